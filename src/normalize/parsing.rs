use crate::error::{ParseError, json_kind};
use crate::pipeline::Pipeline;
use serde::Deserialize;
use serde_json::Value;

/// Converts a structurally valid document into the typed model.
///
/// Nothing is repaired here: a box without a name, a port map that is not an
/// object or a non-string type all fail the whole document.
pub fn parse(raw: &Value) -> Result<Pipeline, ParseError> {
    if !raw.is_object() {
        return Err(ParseError::NotAnObject {
            found: json_kind(raw),
        });
    }
    Ok(Pipeline::deserialize(raw)?)
}

/// Parses JSON text into the typed model. See [`parse`].
pub fn parse_str(json: &str) -> Result<Pipeline, ParseError> {
    let raw: Value = serde_json::from_str(json)?;
    parse(&raw)
}
