use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix marking a value supplied from outside the pipeline.
pub const EXTERNAL_REFERENCE_PREFIX: char = '$';

/// Returns the identifier behind an external reference, e.g. `"$limit"` -> `"limit"`.
pub fn external_reference(raw: &str) -> Option<&str> {
    raw.strip_prefix(EXTERNAL_REFERENCE_PREFIX)
}

/// What a port is connected to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum PortValue {
    #[default]
    Unbound,
    /// Name of a variable declared in the same pipeline.
    Variable(String),
    /// Identifier of an external reference, stored without the `$` prefix.
    External(String),
}

impl PortValue {
    pub fn variable(&self) -> Option<&str> {
        match self {
            PortValue::Variable(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_bound(&self) -> bool {
        !matches!(self, PortValue::Unbound)
    }
}

impl From<Option<String>> for PortValue {
    fn from(raw: Option<String>) -> Self {
        match raw {
            None => PortValue::Unbound,
            Some(s) if s.trim().is_empty() => PortValue::Unbound,
            Some(s) => match external_reference(&s) {
                Some(id) => PortValue::External(id.to_string()),
                None => PortValue::Variable(s),
            },
        }
    }
}

impl From<&str> for PortValue {
    fn from(raw: &str) -> Self {
        PortValue::from(Some(raw.to_string()))
    }
}

impl From<PortValue> for String {
    fn from(value: PortValue) -> Self {
        value.to_string()
    }
}

impl fmt::Display for PortValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortValue::Unbound => Ok(()),
            PortValue::Variable(name) => f.write_str(name),
            PortValue::External(id) => write!(f, "{}{}", EXTERNAL_REFERENCE_PREFIX, id),
        }
    }
}

/// The value a variable holds.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum VariableValue {
    /// `null` or absent.
    #[default]
    Unset,
    Scalar(serde_json::Value),
    List(Vec<serde_json::Value>),
    /// Identifier of an external reference, stored without the `$` prefix.
    External(String),
}

impl VariableValue {
    pub fn is_list(&self) -> bool {
        matches!(self, VariableValue::List(_))
    }

    pub fn is_external(&self) -> bool {
        matches!(self, VariableValue::External(_))
    }
}

impl From<serde_json::Value> for VariableValue {
    fn from(raw: serde_json::Value) -> Self {
        match raw {
            serde_json::Value::Null => VariableValue::Unset,
            serde_json::Value::Array(items) => VariableValue::List(items),
            serde_json::Value::String(s) => match external_reference(&s) {
                Some(id) => VariableValue::External(id.to_string()),
                None => VariableValue::Scalar(serde_json::Value::String(s)),
            },
            other => VariableValue::Scalar(other),
        }
    }
}

impl From<VariableValue> for serde_json::Value {
    fn from(value: VariableValue) -> Self {
        match value {
            VariableValue::Unset => serde_json::Value::Null,
            VariableValue::Scalar(v) => v,
            VariableValue::List(items) => serde_json::Value::Array(items),
            VariableValue::External(id) => {
                serde_json::Value::String(format!("{}{}", EXTERNAL_REFERENCE_PREFIX, id))
            }
        }
    }
}
