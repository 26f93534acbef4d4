//! # Kensa - Pipeline Graph Model & Validator
//!
//! **Kensa** checks processing pipelines built from typed *boxes* wired together
//! through named *variables*: it repairs structurally malformed documents,
//! validates them against a catalog of box types, indexes which ports produce
//! and consume each variable, and detects loops in the dependency graph the
//! variables induce.
//!
//! ## Core Workflow
//!
//! 1.  **Load the registry**: build a `BoxTypeRegistry` from JSON or in code. It is
//!     the read-only catalog of prescribed ports per box type.
//! 2.  **Repair and parse**: `normalize::repair` drops entries that are not even
//!     shaped like boxes, ports or variables and tells you whether anything
//!     changed; `normalize::parse` turns the result into a typed `Pipeline`.
//! 3.  **Validate**: `validate` runs name, conformance, binding, variable and
//!     producer checks and finally the loop check, returning `None` or every
//!     finding at once.
//! 4.  **Inspect**: `utilization` and `DependencyGraph` expose the derived
//!     structures to renderers and editors.
//!
//! ## Quick Start
//!
//! ```rust
//! use kensa::prelude::*;
//! use serde_json::json;
//!
//! let registry = BoxTypeRegistry::builder()
//!     .with_box_type(
//!         "echo",
//!         BoxTypeSchema::new()
//!             .with_input("in", DataType::String)
//!             .with_output("out", DataType::String),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let raw = json!({
//!     "boxes": [
//!         {
//!             "name": "A",
//!             "type": "echo",
//!             "portsIn": { "in": { "type": "string", "value": "" } },
//!             "portsOut": { "out": { "type": "string", "value": "v" } }
//!         },
//!         {
//!             "name": "B",
//!             "type": "echo",
//!             "portsIn": { "in": { "type": "string", "value": "v" } },
//!             "portsOut": { "out": { "type": "string", "value": "" } }
//!         }
//!     ],
//!     "variables": [ { "name": "v", "type": "string", "value": "hello" } ]
//! });
//!
//! let repaired = repair(&raw);
//! assert!(!repaired.is_changed());
//!
//! let pipeline = parse(&repaired.pipeline).unwrap();
//! assert_eq!(validate(&pipeline.boxes, &pipeline.variables, &registry), None);
//!
//! let index = utilization(&pipeline.boxes);
//! assert_eq!(index["v"].ports_out, vec![PortRef::new("A", "out")]);
//! assert_eq!(index["v"].ports_in, vec![PortRef::new("B", "in")]);
//! ```

pub mod error;
pub mod graph;
pub mod normalize;
pub mod pipeline;
pub mod prelude;
pub mod registry;
pub mod utilization;
pub mod validator;

pub use graph::DependencyGraph;
pub use normalize::{normalize, parse, repair};
pub use pipeline::Pipeline;
pub use registry::BoxTypeRegistry;
pub use utilization::utilization;
pub use validator::{ValidationError, Validator, validate};

#[cfg(feature = "python-bindings")]
mod python;
