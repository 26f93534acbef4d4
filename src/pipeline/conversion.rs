use super::definition::Pipeline;
use crate::error::{ConversionError, ParseError};

/// A trait for custom data models that can be converted into a kensa `Pipeline`.
///
/// Implement it on your own structs to validate pipelines stored in a
/// different format. JSON documents in the native shape are covered by the
/// implementations for `serde_json::Value` and `&str`, which parse strictly
/// and do not repair anything; run `normalize::repair` first when the input
/// may be malformed.
///
/// # Example
///
/// ```rust
/// use kensa::prelude::*;
/// use kensa::error::ConversionError;
///
/// struct Stage { id: String, kind: String }
/// struct MyPipeline { stages: Vec<Stage> }
///
/// impl IntoPipeline for MyPipeline {
///     fn into_pipeline(self) -> std::result::Result<Pipeline, ConversionError> {
///         let boxes = self
///             .stages
///             .into_iter()
///             .map(|s| PipelineBox::new(s.id, s.kind))
///             .collect();
///         Ok(Pipeline { boxes, variables: vec![] })
///     }
/// }
/// ```
pub trait IntoPipeline {
    /// Consumes the object and converts it into a typed pipeline.
    fn into_pipeline(self) -> Result<Pipeline, ConversionError>;
}

impl IntoPipeline for Pipeline {
    fn into_pipeline(self) -> Result<Pipeline, ConversionError> {
        Ok(self)
    }
}

impl IntoPipeline for serde_json::Value {
    fn into_pipeline(self) -> Result<Pipeline, ConversionError> {
        Ok(crate::normalize::parse(&self)?)
    }
}

impl IntoPipeline for &serde_json::Value {
    fn into_pipeline(self) -> Result<Pipeline, ConversionError> {
        Ok(crate::normalize::parse(self)?)
    }
}

impl IntoPipeline for &str {
    fn into_pipeline(self) -> Result<Pipeline, ConversionError> {
        let raw: serde_json::Value = serde_json::from_str(self).map_err(ParseError::from)?;
        raw.into_pipeline()
    }
}
