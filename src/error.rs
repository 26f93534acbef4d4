use thiserror::Error;

/// Errors raised when a document cannot be turned into a typed `Pipeline`.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to parse pipeline JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Pipeline document must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}

/// Errors raised while loading or extending a box type registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Failed to parse box type registry JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Box type '{0}' is registered more than once")]
    DuplicateBoxType(String),

    #[error("Alias '{alias}' refers to box type '{target}', which is not registered")]
    UnknownAliasTarget { alias: String, target: String },
}

/// Errors that can occur when converting a custom user format into a `Pipeline`.
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Invalid custom data: {0}")]
    Invalid(String),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Short name of a JSON value's kind, used in error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
