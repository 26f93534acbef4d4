use clap::{Parser, ValueEnum};
use itertools::Itertools;
use kensa::prelude::*;
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Output format of the findings.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Repairs and validates a pipeline document against a box type registry
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the pipeline JSON file (`{boxes, variables}`)
    pipeline_path: PathBuf,
    /// Path to the box type registry JSON file
    registry_path: PathBuf,

    /// How to print the findings
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write the repaired document here if the repair pass changed anything
    #[arg(long)]
    write_repaired: Option<PathBuf>,

    /// Also print which ports produce and consume each variable
    #[arg(short, long)]
    utilization: bool,

    /// Print the boxes along the loop when one is detected
    #[arg(long)]
    explain_loop: bool,

    /// Do not report ports the box type does not prescribe
    #[arg(long)]
    allow_unexpected_ports: bool,

    /// List variables no port is bound to
    #[arg(long)]
    warn_orphans: bool,

    /// Log every repair and validation stage
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let start = Instant::now();

    // --- 1. File Loading ---
    let registry_json = fs::read_to_string(&cli.registry_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read registry file '{}': {}",
            cli.registry_path.display(),
            e
        ))
    });
    let pipeline_json = fs::read_to_string(&cli.pipeline_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read pipeline file '{}': {}",
            cli.pipeline_path.display(),
            e
        ))
    });

    let registry = BoxTypeRegistry::from_json_str(&registry_json)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    let raw: serde_json::Value = serde_json::from_str(&pipeline_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse pipeline JSON: {}", e)));

    // --- 2. Repair ---
    let repaired = repair(&raw);
    if repaired.is_changed() {
        log::info!("Repair dropped {} entries", repaired.dropped.len());
        if let Some(path) = &cli.write_repaired {
            let text = serde_json::to_string_pretty(&*repaired.pipeline)
                .unwrap_or_else(|e| exit_with_error(&e.to_string()));
            fs::write(path, text).unwrap_or_else(|e| {
                exit_with_error(&format!(
                    "Failed to write repaired pipeline to '{}': {}",
                    path.display(),
                    e
                ))
            });
        }
    }
    let pipeline = parse(&repaired.pipeline).unwrap_or_else(|e| exit_with_error(&e.to_string()));

    // --- 3. Validation ---
    let validator = Validator::builder(&registry)
        .report_unexpected_ports(!cli.allow_unexpected_ports)
        .build();
    let errors = validator.validate_pipeline(&pipeline).unwrap_or_default();
    log::debug!("Validation finished in {:?}", start.elapsed());

    let graph = DependencyGraph::from_pipeline(&pipeline);
    let cycle = if cli.explain_loop { graph.find_cycle() } else { None };
    let orphans: Vec<&str> = if cli.warn_orphans {
        pipeline
            .orphan_variables()
            .into_iter()
            .map(|v| v.name.as_str())
            .collect()
    } else {
        Vec::new()
    };

    // --- 4. Report ---
    match cli.format {
        OutputFormat::Text => {
            println!(
                "Pipeline '{}': {} boxes, {} variables",
                cli.pipeline_path.display(),
                pipeline.boxes.len(),
                pipeline.variables.len()
            );
            if repaired.is_changed() {
                println!("  -> Repaired: {} entries dropped", repaired.dropped.len());
                for dropped in &repaired.dropped {
                    println!("     - {}", dropped);
                }
            }
            if errors.is_empty() {
                println!("Validation passed.");
            } else {
                println!("Validation failed with {} errors:", errors.len());
                for error in &errors {
                    println!("  [{}] {}", error.kind(), error);
                }
            }
            if let Some(cycle) = &cycle {
                println!("Loop: {}", cycle.join(" -> "));
            }
            for orphan in &orphans {
                println!("warning: variable '{}' is not bound to any port", orphan);
            }
            if cli.utilization {
                print_utilization(&pipeline);
            }
        }
        OutputFormat::Json => {
            let mut report = json!({
                "valid": errors.is_empty(),
                "changed": repaired.is_changed(),
                "dropped": repaired.dropped.iter().map(ToString::to_string).collect::<Vec<_>>(),
                "errors": errors,
            });
            if let Some(cycle) = &cycle {
                report["loop"] = json!(cycle);
            }
            if cli.warn_orphans {
                report["orphans"] = json!(orphans);
            }
            if cli.utilization {
                report["utilization"] = json!(utilization(&pipeline.boxes));
            }
            let text = serde_json::to_string_pretty(&report)
                .unwrap_or_else(|e| exit_with_error(&e.to_string()));
            println!("{}", text);
        }
    }

    std::process::exit(if errors.is_empty() { 0 } else { 1 });
}

fn print_utilization(pipeline: &Pipeline) {
    println!("\n--- Variable Utilization ---");
    let index = utilization(&pipeline.boxes);
    for (variable, usage) in index.iter().sorted_by(|(a, _), (b, _)| a.cmp(b)) {
        println!(
            "{}: produced by [{}], consumed by [{}]",
            variable,
            format_ports(&usage.ports_out),
            format_ports(&usage.ports_in)
        );
    }
}

fn format_ports(ports: &[PortRef]) -> String {
    ports
        .iter()
        .map(|p| format!("{}.{}", p.box_name, p.port))
        .join(", ")
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(2);
}
