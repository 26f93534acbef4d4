//! Prelude module for convenient imports
//!
//! Re-exports the types and functions most callers need: the pipeline model,
//! the registry, the normalizer, the validator, the utilization index and the
//! dependency graph.
//!
//! # Example
//!
//! ```rust,no_run
//! use kensa::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let registry = BoxTypeRegistry::from_json_str(&std::fs::read_to_string("data/box_types.json")?)?;
//! let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string("data/pipeline.json")?)?;
//!
//! let pipeline = normalize(&raw)?;
//! match validate(&pipeline.boxes, &pipeline.variables, &registry) {
//!     None => println!("Pipeline is valid"),
//!     Some(errors) => errors.iter().for_each(|e| println!("{}", e)),
//! }
//! # Ok(())
//! # }
//! ```

// Pipeline model
pub use crate::pipeline::{
    DataType, IntoPipeline, Pipeline, PipelineBox, Port, PortDirection, PortValue, TypeTag,
    Variable, VariableValue,
};

// Registry
pub use crate::registry::{BoxTypeRegistry, BoxTypeSchema};

// Normalizer
pub use crate::normalize::{Dropped, Repaired, normalize, parse, repair};

// Validation
pub use crate::validator::{ErrorKind, ValidationError, Validator, validate};

// Derived structures
pub use crate::graph::DependencyGraph;
pub use crate::utilization::{PortRef, VariableUtilization, utilization};

// Error types
pub use crate::error::{ConversionError, ParseError, RegistryError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
