//! Tests for the variable utilization index.
mod common;
use common::*;
use kensa::prelude::*;
use serde_json::json;

#[test]
fn test_producer_and_consumer_are_indexed() {
    let index = utilization(&producer_consumer().boxes);

    assert_eq!(index.len(), 1);
    assert_eq!(
        index["v"],
        VariableUtilization {
            ports_in: vec![PortRef::new("B", "in")],
            ports_out: vec![PortRef::new("A", "out")],
        }
    );
}

#[test]
fn test_empty_boxes_give_empty_index() {
    assert!(utilization(&[]).is_empty());
}

#[test]
fn test_unbound_and_external_ports_are_skipped() {
    let boxes = vec![echo("A", "$token", ""), echo("B", "", "$result")];

    assert!(utilization(&boxes).is_empty());
}

#[test]
fn test_lists_follow_box_then_port_order() {
    let boxes = vec![
        PipelineBox::new("Join", "join")
            .with_input("right", Port::new(DataType::String, "v"))
            .with_input("left", Port::new(DataType::String, "v")),
        echo("A", "v", "v"),
    ];

    let index = utilization(&boxes);
    let usage = &index["v"];
    assert_eq!(
        usage.ports(PortDirection::In),
        [
            PortRef::new("Join", "left"),
            PortRef::new("Join", "right"),
            PortRef::new("A", "in"),
        ]
    );
    assert_eq!(usage.ports(PortDirection::Out), [PortRef::new("A", "out")]);
}

#[test]
fn test_undeclared_variables_are_indexed() {
    let index = utilization(&[echo("A", "ghost", "")]);

    assert_eq!(index["ghost"].ports_in, vec![PortRef::new("A", "in")]);
    assert!(index["ghost"].ports_out.is_empty());
}

#[test]
fn test_index_serializes_with_wire_names() {
    let index = utilization(&producer_consumer().boxes);

    assert_eq!(
        serde_json::to_value(&index).expect("Failed to serialize"),
        json!({
            "v": {
                "portsIn": [{ "box": "B", "port": "in" }],
                "portsOut": [{ "box": "A", "port": "out" }]
            }
        })
    );
}

#[test]
fn test_file_fixture_utilization() {
    let pipeline = Pipeline::from_json_str(PIPELINE_JSON).expect("Failed to parse fixture");
    let index = utilization(&pipeline.boxes);

    assert_eq!(index.len(), 4);
    assert_eq!(index["archive"].ports_out, vec![PortRef::new("Fetch", "file")]);
    assert_eq!(
        index["extracted"].ports_in,
        vec![PortRef::new("Publish", "files")]
    );
    assert_eq!(index["bucket"].ports_out, vec![]);
    assert!(!index.contains_key("source_url"));
}
