use crate::normalize::{parse, repair};
use crate::registry::BoxTypeRegistry;
use crate::utilization::utilization;
use crate::validator::Validator;
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

/// Validates pipelines against a box type registry.
///
/// The registry is parsed once on construction; `validate` and `utilization`
/// can then be called repeatedly with different pipeline documents.
#[pyclass(name = "Validator")]
struct ValidatorPy {
    registry: BoxTypeRegistry,
}

fn load_pipeline(pipeline_json: &str) -> PyResult<crate::pipeline::Pipeline> {
    let raw: serde_json::Value =
        serde_json::from_str(pipeline_json).map_err(|e| PyValueError::new_err(e.to_string()))?;
    let repaired = repair(&raw);
    parse(&repaired.pipeline).map_err(|e| PyValueError::new_err(e.to_string()))
}

#[pymethods]
impl ValidatorPy {
    /// Loads the box type registry.
    ///
    /// Args:
    ///     registry_json (str): JSON object mapping box type identifiers to
    ///         their `portsIn` / `portsOut` schemas.
    ///
    /// Raises:
    ///     ValueError: If the registry JSON is malformed or lists a box type twice.
    #[new]
    fn new(registry_json: &str) -> PyResult<Self> {
        let registry = BoxTypeRegistry::from_json_str(registry_json)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(ValidatorPy { registry })
    }

    /// Repairs and validates a pipeline document.
    ///
    /// Args:
    ///     pipeline_json (str): JSON object with `boxes` and `variables`.
    ///
    /// Returns:
    ///     str | None: `None` if the pipeline is valid, otherwise a JSON array
    ///         of findings, each an object with a `kind` key and its parameters.
    fn validate(&self, pipeline_json: &str) -> PyResult<Option<String>> {
        let pipeline = load_pipeline(pipeline_json)?;
        Validator::new(&self.registry)
            .validate_pipeline(&pipeline)
            .map(|errors| serde_json::to_string(&errors))
            .transpose()
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }

    /// Returns the utilization index of a pipeline as a JSON object mapping
    /// variable names to their `portsIn` / `portsOut` port lists.
    fn utilization(&self, pipeline_json: &str) -> PyResult<String> {
        let pipeline = load_pipeline(pipeline_json)?;
        serde_json::to_string(&utilization(&pipeline.boxes))
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }
}

/// Pipeline graph validation.
///
/// Python bindings for the kensa Rust library: structural repair, semantic
/// validation against a box type registry, and variable utilization.
#[pymodule]
fn kensa(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ValidatorPy>()?;
    Ok(())
}
