//! Common test utilities for building registries and pipelines.
use kensa::prelude::*;
use serde_json::json;

#[allow(dead_code)]
pub const BOX_TYPES_JSON: &str = include_str!("../data/box_types.json");
#[allow(dead_code)]
pub const PIPELINE_JSON: &str = include_str!("../data/pipeline.json");
#[allow(dead_code)]
pub const MALFORMED_PIPELINE_JSON: &str = include_str!("../data/malformed_pipeline.json");
#[allow(dead_code)]
pub const LOOP_PIPELINE_JSON: &str = include_str!("../data/loop_pipeline.json");

/// A registry with a single `echo` type: `in: string -> out: string`.
#[allow(dead_code)]
pub fn echo_registry() -> BoxTypeRegistry {
    BoxTypeRegistry::builder()
        .with_box_type(
            "echo",
            BoxTypeSchema::new()
                .with_input("in", DataType::String)
                .with_output("out", DataType::String),
        )
        .build()
        .expect("echo registry is well-formed")
}

/// The registry stored in `data/box_types.json`.
#[allow(dead_code)]
pub fn file_registry() -> BoxTypeRegistry {
    BoxTypeRegistry::from_json_str(BOX_TYPES_JSON).expect("Failed to load box types")
}

/// An `echo` box reading `input` and writing `output`. Empty strings leave the port unbound.
#[allow(dead_code)]
pub fn echo(name: &str, input: &str, output: &str) -> PipelineBox {
    PipelineBox::new(name, "echo")
        .with_input("in", Port::new(DataType::String, input))
        .with_output("out", Port::new(DataType::String, output))
}

#[allow(dead_code)]
pub fn string_variable(name: &str) -> Variable {
    Variable::new(name, DataType::String, json!("hello"))
}

/// `A` writes `v`, `B` reads it.
#[allow(dead_code)]
pub fn producer_consumer() -> Pipeline {
    Pipeline {
        boxes: vec![echo("A", "", "v"), echo("B", "v", "")],
        variables: vec![string_variable("v")],
    }
}

/// `A` and `B` both write `v`.
#[allow(dead_code)]
pub fn two_producers() -> Pipeline {
    Pipeline {
        boxes: vec![echo("A", "", "v"), echo("B", "v", "v")],
        variables: vec![string_variable("v")],
    }
}

/// `A` writes `v` and reads `w`, `B` reads `v` and writes `w`.
#[allow(dead_code)]
pub fn two_box_loop() -> Pipeline {
    Pipeline {
        boxes: vec![echo("A", "w", "v"), echo("B", "v", "w")],
        variables: vec![string_variable("v"), string_variable("w")],
    }
}

/// A linear chain `B0 -> B1 -> ... -> B{len-1}` over variables `v1..v{len-1}`.
#[allow(dead_code)]
pub fn echo_chain(len: usize) -> Pipeline {
    let boxes = (0..len)
        .map(|i| {
            let input = if i == 0 { String::new() } else { format!("v{}", i) };
            let output = if i + 1 == len {
                String::new()
            } else {
                format!("v{}", i + 1)
            };
            echo(&format!("B{}", i), &input, &output)
        })
        .collect();
    let variables = (1..len)
        .map(|i| string_variable(&format!("v{}", i)))
        .collect();
    Pipeline { boxes, variables }
}

/// Parses one of the JSON fixtures into a `serde_json::Value`.
#[allow(dead_code)]
pub fn raw(json: &str) -> serde_json::Value {
    serde_json::from_str(json).expect("fixture is valid JSON")
}

/// The kinds of a validation result, in order.
#[allow(dead_code)]
pub fn kinds(errors: &[ValidationError]) -> Vec<ErrorKind> {
    errors.iter().map(ValidationError::kind).collect()
}
