use clap::Parser;
use kensa::pipeline::{DataType, Pipeline, PipelineBox, Port, Variable, VariableValue};
use kensa::registry::BoxTypeSchema;
use rand::Rng;
use rand::rngs::ThreadRng;
use serde_json::json;
use std::collections::BTreeMap;
use std::fs;

/// A CLI tool to generate random pipelines and a matching registry for kensa
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated pipeline to
    #[arg(short, long, default_value = "generated_pipeline.json")]
    output: String,

    /// The path to write the matching box type registry to
    #[arg(short, long, default_value = "generated_box_types.json")]
    registry: String,

    /// Number of boxes to generate
    #[arg(long, default_value_t = 50)]
    boxes: usize,

    /// Rewire the first and last boxes so that they feed each other
    #[arg(long)]
    inject_loop: bool,
}

fn box_types() -> BTreeMap<&'static str, BoxTypeSchema> {
    BTreeMap::from([
        (
            "source",
            BoxTypeSchema::new().with_output("out", DataType::String),
        ),
        (
            "transform",
            BoxTypeSchema::new()
                .with_input("in", DataType::String)
                .with_output("out", DataType::String),
        ),
        (
            "join",
            BoxTypeSchema::new()
                .with_input("left", DataType::String)
                .with_input("right", DataType::String)
                .with_output("out", DataType::String),
        ),
    ])
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.boxes == 0 {
        eprintln!("Error: --boxes must be at least 1");
        std::process::exit(1);
    }

    println!("Generating a pipeline with {} boxes...", cli.boxes);

    let mut pipeline = generate_pipeline(&mut rng, cli.boxes);
    if cli.inject_loop {
        inject_loop(&mut pipeline);
    }

    fs::write(&cli.output, serde_json::to_string_pretty(&pipeline)?)?;
    fs::write(&cli.registry, serde_json::to_string_pretty(&json!(box_types()))?)?;

    println!(
        "Successfully generated '{}' ({} variables) and '{}'",
        cli.output,
        pipeline.variables.len(),
        cli.registry
    );

    Ok(())
}

/// Box `i` writes variable `v{i}` and reads only variables of earlier boxes,
/// so the result is acyclic with exactly one producer per variable.
fn generate_pipeline(rng: &mut ThreadRng, count: usize) -> Pipeline {
    let mut pipeline = Pipeline::default();

    for index in 0..count {
        let output = format!("v{}", index);
        let kind = rng.random_range(0..3);
        let mut earlier = || format!("v{}", rng.random_range(0..index));

        let b = match (index, kind) {
            (0, _) | (_, 0) => PipelineBox::new(format!("box{}", index), "source"),
            (_, 1) => PipelineBox::new(format!("box{}", index), "transform")
                .with_input("in", Port::new(DataType::String, earlier().as_str())),
            _ => PipelineBox::new(format!("box{}", index), "join")
                .with_input("left", Port::new(DataType::String, earlier().as_str()))
                .with_input("right", Port::new(DataType::String, earlier().as_str())),
        };
        pipeline
            .boxes
            .push(b.with_output("out", Port::new(DataType::String, output.as_str())));

        let value = if rng.random_bool(0.2) {
            VariableValue::External(format!("param{}", index))
        } else {
            VariableValue::Scalar(json!(format!("value {}", index)))
        };
        pipeline
            .variables
            .push(Variable::new(output, DataType::String, value));
    }

    pipeline
}

/// Turns the first and last boxes into transforms reading each other's output.
fn inject_loop(pipeline: &mut Pipeline) {
    let last = pipeline.boxes.len() - 1;
    let rewire = |b: &PipelineBox, reads: usize, writes: usize| {
        PipelineBox::new(b.name.clone(), "transform")
            .with_input("in", Port::new(DataType::String, format!("v{}", reads).as_str()))
            .with_output("out", Port::new(DataType::String, format!("v{}", writes).as_str()))
    };
    pipeline.boxes[0] = rewire(&pipeline.boxes[0], last, 0);
    pipeline.boxes[last] = rewire(&pipeline.boxes[last], 0, last);
}
