//! Tests for the box dependency graph.
mod common;
use common::*;
use kensa::prelude::*;

#[test]
fn test_edges_follow_variables() {
    let graph = DependencyGraph::from_pipeline(&producer_consumer());

    assert_eq!(graph.len(), 2);
    assert_eq!(graph.edges().collect::<Vec<_>>(), vec![("A", "B")]);
    assert!(!graph.has_cycle());
}

#[test]
fn test_empty_graph() {
    let graph = DependencyGraph::build(&[]);

    assert!(graph.is_empty());
    assert_eq!(graph.edge_count(), 0);
    assert!(!graph.has_cycle());
    assert_eq!(graph.topological_order(), Some(vec![]));
}

#[test]
fn test_duplicate_edges_are_merged() {
    let pipeline = Pipeline {
        boxes: vec![
            PipelineBox::new("A", "split")
                .with_output("first", Port::new(DataType::String, "x"))
                .with_output("second", Port::new(DataType::String, "y")),
            PipelineBox::new("B", "join")
                .with_input("left", Port::new(DataType::String, "x"))
                .with_input("right", Port::new(DataType::String, "y")),
        ],
        variables: vec![],
    };

    let graph = DependencyGraph::from_pipeline(&pipeline);
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn test_external_references_do_not_link_boxes() {
    let pipeline = Pipeline {
        boxes: vec![echo("A", "", "$shared"), echo("B", "$shared", "")],
        variables: vec![],
    };

    assert_eq!(DependencyGraph::from_pipeline(&pipeline).edge_count(), 0);
}

#[test]
fn test_find_cycle_returns_the_loop() {
    let graph = DependencyGraph::from_pipeline(&two_box_loop());

    assert!(graph.has_cycle());
    assert_eq!(graph.find_cycle(), Some(vec!["A", "B", "A"]));
    assert_eq!(graph.topological_order(), None);
}

#[test]
fn test_self_loop() {
    let graph = DependencyGraph::build(&[echo("A", "v", "v")]);

    assert_eq!(graph.find_cycle(), Some(vec!["A", "A"]));
}

#[test]
fn test_cycle_behind_acyclic_prefix() {
    let boxes = vec![
        echo("Start", "", "a"),
        echo("P", "a", "b"),
        PipelineBox::new("Q", "join")
            .with_input("left", Port::new(DataType::String, "b"))
            .with_input("right", Port::new(DataType::String, "c"))
            .with_output("out", Port::new(DataType::String, "d")),
        echo("R", "d", "c"),
    ];

    let graph = DependencyGraph::build(&boxes);
    assert_eq!(graph.find_cycle(), Some(vec!["Q", "R", "Q"]));
}

#[test]
fn test_topological_order_of_chain() {
    let mut pipeline = echo_chain(4);
    pipeline.boxes.reverse();

    let graph = DependencyGraph::from_pipeline(&pipeline);
    assert_eq!(
        graph.topological_order(),
        Some(vec!["B0", "B1", "B2", "B3"])
    );
}

#[test]
fn test_topological_order_keeps_declaration_order_for_ties() {
    let boxes = vec![
        echo("X", "", ""),
        echo("A", "", "v"),
        echo("Y", "", ""),
        echo("B", "v", ""),
    ];

    let graph = DependencyGraph::build(&boxes);
    assert_eq!(graph.topological_order(), Some(vec!["X", "A", "Y", "B"]));
}

#[test]
fn test_successors_and_predecessors() {
    let boxes = vec![
        echo("A", "", "v"),
        echo("B", "v", ""),
        echo("C", "v", ""),
    ];
    let graph = DependencyGraph::build(&boxes);

    assert_eq!(graph.successors("A"), Some(vec!["B", "C"]));
    assert_eq!(graph.predecessors("C"), Some(vec!["A"]));
    assert_eq!(graph.predecessors("A"), Some(vec![]));
    assert_eq!(graph.successors("missing"), None);
}

#[test]
fn test_loop_fixture_has_a_cycle() {
    let pipeline = Pipeline::from_json_str(LOOP_PIPELINE_JSON).expect("Failed to parse fixture");

    assert!(DependencyGraph::from_pipeline(&pipeline).has_cycle());
    assert_eq!(
        validate(&pipeline.boxes, &pipeline.variables, &echo_registry()),
        Some(vec![ValidationError::LoopDetected])
    );
}

#[test]
fn test_long_chain_is_checked_without_recursion() {
    let mut pipeline = echo_chain(20_000);
    let graph = DependencyGraph::from_pipeline(&pipeline);

    assert!(!graph.has_cycle());
    assert_eq!(
        validate(&pipeline.boxes, &pipeline.variables, &echo_registry()),
        None
    );

    // Close the chain: the first box reads what the last one writes.
    pipeline.boxes[0] = echo("B0", "v0", "v1");
    pipeline.boxes[19_999] = echo("B19999", "v19999", "v0");
    pipeline.variables.push(string_variable("v0"));

    let graph = DependencyGraph::from_pipeline(&pipeline);
    let cycle = graph.find_cycle().expect("Expected the closed chain to loop");
    assert_eq!(cycle.len(), 20_001);
    assert_eq!(cycle.first(), Some(&"B0"));
    assert_eq!(
        validate(&pipeline.boxes, &pipeline.variables, &echo_registry()),
        Some(vec![ValidationError::LoopDetected])
    );
}
