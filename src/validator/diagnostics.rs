use crate::pipeline::{PortDirection, TypeTag};
use crate::utilization::PortRef;
use itertools::Itertools;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Stable identifier of a validation finding, used by message catalogs.
///
/// Codes never change meaning once published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BoxWithoutName,
    DuplicateBoxNames,
    VariableWithoutName,
    DuplicateVariableNames,
    UnknownBoxType,
    MissingPort,
    UnexpectedPort,
    PortTypeMismatch,
    UndefinedVariable,
    VariableTypeMismatch,
    UnknownVariableType,
    VariableValueMismatch,
    MultipleProducers,
    LoopDetected,
}

impl ErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::BoxWithoutName => "boxWithoutName",
            ErrorKind::DuplicateBoxNames => "duplicateBoxNames",
            ErrorKind::VariableWithoutName => "variableWithoutName",
            ErrorKind::DuplicateVariableNames => "duplicateVariableNames",
            ErrorKind::UnknownBoxType => "unknownBoxType",
            ErrorKind::MissingPort => "missingPort",
            ErrorKind::UnexpectedPort => "unexpectedPort",
            ErrorKind::PortTypeMismatch => "portTypeMismatch",
            ErrorKind::UndefinedVariable => "undefinedVariable",
            ErrorKind::VariableTypeMismatch => "variableTypeMismatch",
            ErrorKind::UnknownVariableType => "unknownVariableType",
            ErrorKind::VariableValueMismatch => "variableValueMismatch",
            ErrorKind::MultipleProducers => "multipleProducers",
            ErrorKind::LoopDetected => "loopDetected",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One problem found in a pipeline.
///
/// Serializes as `{"kind": "<code>", ...parameters}` so a front end can pick a
/// localized message by `kind` and fill it from the parameters. The `Display`
/// text is an English rendering for logs and the command line.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ValidationError {
    #[error("At least one box lacks a name")]
    BoxWithoutName,

    #[error("Some boxes share a name: {}", .names.join(", "))]
    DuplicateBoxNames { names: Vec<String> },

    #[error("At least one variable lacks a name")]
    VariableWithoutName,

    #[error("Some variables share a name: {}", .names.join(", "))]
    DuplicateVariableNames { names: Vec<String> },

    #[error("Box '{box_name}' has unknown type '{box_type}'")]
    UnknownBoxType {
        #[serde(rename = "box")]
        box_name: String,
        #[serde(rename = "type")]
        box_type: String,
    },

    #[error("Port {box_name}.{direction}.{port} is missing")]
    MissingPort {
        #[serde(rename = "box")]
        box_name: String,
        direction: PortDirection,
        port: String,
    },

    #[error("Port {box_name}.{direction}.{port} is not defined by the box type")]
    UnexpectedPort {
        #[serde(rename = "box")]
        box_name: String,
        direction: PortDirection,
        port: String,
    },

    #[error("Port {box_name}.{direction}.{port} has type '{actual}', but its box type prescribes '{expected}'")]
    PortTypeMismatch {
        #[serde(rename = "box")]
        box_name: String,
        direction: PortDirection,
        port: String,
        expected: TypeTag,
        actual: TypeTag,
    },

    #[error("Port {box_name}.{direction}.{port} is bound to undefined variable '{variable}'")]
    UndefinedVariable {
        #[serde(rename = "box")]
        box_name: String,
        direction: PortDirection,
        port: String,
        variable: String,
    },

    #[error("Port {box_name}.{direction}.{port} of type '{port_type}' is bound to variable '{variable}' of type '{variable_type}'")]
    VariableTypeMismatch {
        #[serde(rename = "box")]
        box_name: String,
        direction: PortDirection,
        port: String,
        variable: String,
        #[serde(rename = "portType")]
        port_type: TypeTag,
        #[serde(rename = "variableType")]
        variable_type: TypeTag,
    },

    #[error("Variable '{variable}' has unknown type '{data_type}'")]
    UnknownVariableType {
        variable: String,
        #[serde(rename = "type")]
        data_type: TypeTag,
    },

    #[error("Value of variable '{variable}' does not match its type '{data_type}'")]
    VariableValueMismatch {
        variable: String,
        #[serde(rename = "type")]
        data_type: TypeTag,
    },

    #[error("Variable '{variable}' is attached to more than one output port ({})", format_ports(.producers))]
    MultipleProducers {
        variable: String,
        producers: Vec<PortRef>,
    },

    #[error("The pipeline contains a loop")]
    LoopDetected,
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::BoxWithoutName => ErrorKind::BoxWithoutName,
            ValidationError::DuplicateBoxNames { .. } => ErrorKind::DuplicateBoxNames,
            ValidationError::VariableWithoutName => ErrorKind::VariableWithoutName,
            ValidationError::DuplicateVariableNames { .. } => ErrorKind::DuplicateVariableNames,
            ValidationError::UnknownBoxType { .. } => ErrorKind::UnknownBoxType,
            ValidationError::MissingPort { .. } => ErrorKind::MissingPort,
            ValidationError::UnexpectedPort { .. } => ErrorKind::UnexpectedPort,
            ValidationError::PortTypeMismatch { .. } => ErrorKind::PortTypeMismatch,
            ValidationError::UndefinedVariable { .. } => ErrorKind::UndefinedVariable,
            ValidationError::VariableTypeMismatch { .. } => ErrorKind::VariableTypeMismatch,
            ValidationError::UnknownVariableType { .. } => ErrorKind::UnknownVariableType,
            ValidationError::VariableValueMismatch { .. } => ErrorKind::VariableValueMismatch,
            ValidationError::MultipleProducers { .. } => ErrorKind::MultipleProducers,
            ValidationError::LoopDetected => ErrorKind::LoopDetected,
        }
    }
}

fn format_ports(ports: &[PortRef]) -> String {
    ports
        .iter()
        .map(|p| format!("{}.portsOut.{}", p.box_name, p.port))
        .join(", ")
}
