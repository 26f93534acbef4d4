//! Integration tests for Kensa
//!
//! End-to-end tests over the JSON fixtures: load, repair, validate, edit.
//!
mod common;
use common::*;
use kensa::prelude::*;
use serde_json::json;

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_file_fixture_is_valid() {
        let registry = file_registry();
        let pipeline = normalize(&raw(PIPELINE_JSON)).expect("Failed to normalize");

        assert_eq!(pipeline.boxes.len(), 3);
        assert_eq!(pipeline.variables.len(), 4);
        assert_eq!(
            Validator::new(&registry).validate_pipeline(&pipeline),
            None
        );
    }

    #[test]
    fn test_registry_fixture() {
        let registry = file_registry();

        assert_eq!(registry.box_types(), vec!["download", "echo", "unzip", "upload"]);
        let upload = registry.lookup("upload").expect("upload is registered");
        assert_eq!(upload.ports_in.len(), 2);
        assert_eq!(
            upload.ports(PortDirection::Out)["objects"].data_type,
            TypeTag::Known(DataType::RemoteFileList)
        );
    }

    #[test]
    fn test_registry_list_form() {
        let registry = BoxTypeRegistry::from_json_str(
            r#"[
                { "type": "echo", "portsIn": { "in": { "type": "string" } }, "portsOut": { "out": { "type": "string" } } },
                { "type": "sink", "portsIn": { "in": { "type": "string" } } }
            ]"#,
        )
        .expect("Failed to load list registry");

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("sink"));
        assert!(registry.lookup("sink").is_some_and(|s| s.ports_out.is_empty()));
    }

    #[test]
    fn test_errors_serialize_as_kind_and_parameters() {
        let registry = file_registry();
        let pipeline = Pipeline::from_json_str(PIPELINE_JSON).expect("Failed to parse");
        let broken = pipeline
            .replace_box(
                "Extract",
                PipelineBox::new("Extract", "unzip")
                    .with_input("archive", Port::new(DataType::String, "archive"))
                    .with_output("files", Port::new(DataType::FileList, "extracted")),
            )
            .expect("Extract exists");

        let errors = validate(&broken.boxes, &broken.variables, &registry)
            .expect("Expected validation errors");

        assert_eq!(
            serde_json::to_value(&errors).expect("Failed to serialize"),
            json!([{
                "kind": "portTypeMismatch",
                "box": "Extract",
                "direction": "portsIn",
                "port": "archive",
                "expected": "file",
                "actual": "string"
            }])
        );
    }

    #[test]
    fn test_multiple_producers_serialization() {
        let pipeline = two_producers();
        let errors = validate(&pipeline.boxes, &pipeline.variables, &echo_registry())
            .expect("Expected validation errors");

        assert_eq!(
            serde_json::to_value(&errors).expect("Failed to serialize"),
            json!([{
                "kind": "multipleProducers",
                "variable": "v",
                "producers": [
                    { "box": "A", "port": "out" },
                    { "box": "B", "port": "out" }
                ]
            }])
        );
    }

    #[test]
    fn test_loop_serialization() {
        let pipeline = Pipeline::from_json_str(LOOP_PIPELINE_JSON).expect("Failed to parse");
        let errors = validate(&pipeline.boxes, &pipeline.variables, &echo_registry())
            .expect("Expected a loop");

        assert_eq!(
            serde_json::to_value(&errors).expect("Failed to serialize"),
            json!([{ "kind": "loopDetected" }])
        );
    }

    #[test]
    fn test_into_pipeline_conversions() {
        let from_str = PIPELINE_JSON.into_pipeline().expect("Failed to convert &str");
        let from_value = raw(PIPELINE_JSON)
            .into_pipeline()
            .expect("Failed to convert Value");
        let from_ref = (&raw(PIPELINE_JSON))
            .into_pipeline()
            .expect("Failed to convert &Value");

        assert_eq!(from_str, from_value);
        assert_eq!(from_value, from_ref);
        assert_eq!(from_ref.clone().into_pipeline().ok(), Some(from_ref));
    }

    #[test]
    fn test_into_pipeline_reports_malformed_input() {
        let err = "not json".into_pipeline().expect_err("Expected a parse error");
        assert!(matches!(err, ConversionError::Parse(ParseError::Json(_))));

        let err = json!(42).into_pipeline().expect_err("Expected a shape error");
        assert!(matches!(
            err,
            ConversionError::Parse(ParseError::NotAnObject { found: "a number" })
        ));
    }

    #[test]
    fn test_custom_format_conversion() {
        struct Step {
            id: &'static str,
            reads: &'static str,
            writes: &'static str,
        }
        struct Script(Vec<Step>);

        impl IntoPipeline for Script {
            fn into_pipeline(self) -> std::result::Result<Pipeline, ConversionError> {
                if self.0.is_empty() {
                    return Err(ConversionError::Invalid("script has no steps".to_string()));
                }
                let boxes = self.0.iter().map(|s| echo(s.id, s.reads, s.writes)).collect();
                let variables = self
                    .0
                    .iter()
                    .filter(|s| !s.writes.is_empty())
                    .map(|s| string_variable(s.writes))
                    .collect();
                Ok(Pipeline { boxes, variables })
            }
        }

        let pipeline = Script(vec![
            Step { id: "A", reads: "", writes: "v" },
            Step { id: "B", reads: "v", writes: "" },
        ])
        .into_pipeline()
        .expect("Failed to convert script");
        assert_eq!(pipeline, producer_consumer());

        let err = Script(vec![]).into_pipeline().expect_err("Empty script");
        assert_eq!(err.to_string(), "Invalid custom data: script has no steps");
    }

    #[test]
    fn test_remove_variable_unbinds_ports() {
        let pipeline = Pipeline::from_json_str(PIPELINE_JSON).expect("Failed to parse");
        let edited = pipeline.remove_variable("extracted").expect("Variable exists");

        assert!(edited.find_variable("extracted").is_none());
        let extract = edited.find_box("Extract").expect("Box exists");
        assert_eq!(extract.ports_out["files"].value, PortValue::Unbound);
        let publish = edited.find_box("Publish").expect("Box exists");
        assert_eq!(publish.ports_in["files"].value, PortValue::Unbound);

        // The original is untouched
        assert!(pipeline.find_variable("extracted").is_some());
        assert_eq!(validate(&edited.boxes, &edited.variables, &file_registry()), None);
    }

    #[test]
    fn test_remove_box_and_missing_names() {
        let pipeline = Pipeline::from_json_str(PIPELINE_JSON).expect("Failed to parse");

        let edited = pipeline.remove_box("Publish").expect("Box exists");
        assert_eq!(edited.boxes.len(), 2);
        assert_eq!(
            edited
                .orphan_variables()
                .iter()
                .map(|v| v.name.as_str())
                .collect::<Vec<_>>(),
            vec!["bucket", "published"]
        );

        assert!(pipeline.remove_box("Nope").is_none());
        assert!(pipeline.remove_variable("nope").is_none());
        assert!(pipeline.replace_box("Nope", echo("X", "", "")).is_none());
    }

    #[test]
    fn test_queries() {
        let pipeline = Pipeline::from_json_str(PIPELINE_JSON).expect("Failed to parse");

        assert_eq!(pipeline.external_references(), vec!["bucket", "source_url"]);
        assert!(pipeline.orphan_variables().is_empty());

        let types = pipeline.variable_types();
        assert_eq!(types["extracted"], &TypeTag::Known(DataType::FileList));
        assert_eq!(types.len(), 4);
    }

    #[test]
    fn test_pipeline_round_trips_through_json() {
        let document = raw(PIPELINE_JSON);
        let pipeline = parse(&document).expect("Failed to parse");

        assert_eq!(pipeline.to_json_value().expect("Failed to serialize"), document);
    }

    #[test]
    fn test_generated_style_layered_pipeline_is_valid() {
        let pipeline = echo_chain(25);
        let registry = echo_registry();

        assert_eq!(validate(&pipeline.boxes, &pipeline.variables, &registry), None);
        let graph = DependencyGraph::from_pipeline(&pipeline);
        let order = graph
            .topological_order()
            .expect("Chain is acyclic");
        assert_eq!(order.first(), Some(&"B0"));
        assert_eq!(order.last(), Some(&"B24"));
    }
}
