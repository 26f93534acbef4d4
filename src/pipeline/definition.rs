use super::types::TypeTag;
use super::value::{PortValue, VariableValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Ports of one direction, keyed by the schema-defined port name.
pub type PortMap = BTreeMap<String, Port>;

/// Which side of a box a port sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PortDirection {
    #[serde(rename = "portsIn")]
    In,
    #[serde(rename = "portsOut")]
    Out,
}

impl PortDirection {
    pub const BOTH: [PortDirection; 2] = [PortDirection::In, PortDirection::Out];

    pub fn as_str(self) -> &'static str {
        match self {
            PortDirection::In => "portsIn",
            PortDirection::Out => "portsOut",
        }
    }
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An input or output socket on a box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    #[serde(rename = "type")]
    pub data_type: TypeTag,
    #[serde(default)]
    pub value: PortValue,
}

impl Port {
    pub fn new(data_type: impl Into<TypeTag>, value: impl Into<PortValue>) -> Self {
        Self {
            data_type: data_type.into(),
            value: value.into(),
        }
    }

    pub fn unbound(data_type: impl Into<TypeTag>) -> Self {
        Self::new(data_type, PortValue::Unbound)
    }
}

/// A processing stage instance in a pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineBox {
    pub name: String,
    #[serde(rename = "type")]
    pub box_type: String,
    #[serde(rename = "portsIn", default)]
    pub ports_in: PortMap,
    #[serde(rename = "portsOut", default)]
    pub ports_out: PortMap,
}

impl PipelineBox {
    pub fn new(name: impl Into<String>, box_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            box_type: box_type.into(),
            ports_in: PortMap::new(),
            ports_out: PortMap::new(),
        }
    }

    pub fn with_input(mut self, port: impl Into<String>, value: Port) -> Self {
        self.ports_in.insert(port.into(), value);
        self
    }

    pub fn with_output(mut self, port: impl Into<String>, value: Port) -> Self {
        self.ports_out.insert(port.into(), value);
        self
    }

    pub fn ports(&self, direction: PortDirection) -> &PortMap {
        match direction {
            PortDirection::In => &self.ports_in,
            PortDirection::Out => &self.ports_out,
        }
    }

    pub fn ports_mut(&mut self, direction: PortDirection) -> &mut PortMap {
        match direction {
            PortDirection::In => &mut self.ports_in,
            PortDirection::Out => &mut self.ports_out,
        }
    }

    /// Every port of the box, inputs first.
    pub fn all_ports(&self) -> impl Iterator<Item = (PortDirection, &str, &Port)> {
        PortDirection::BOTH.into_iter().flat_map(move |direction| {
            self.ports(direction)
                .iter()
                .map(move |(name, port)| (direction, name.as_str(), port))
        })
    }
}

/// A named, typed value threading box outputs to box inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: TypeTag,
    #[serde(default)]
    pub value: VariableValue,
}

impl Variable {
    pub fn new(
        name: impl Into<String>,
        data_type: impl Into<TypeTag>,
        value: impl Into<VariableValue>,
    ) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            value: value.into(),
        }
    }
}

/// The boxes and variables of one pipeline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Pipeline {
    #[serde(default)]
    pub boxes: Vec<PipelineBox>,
    #[serde(default)]
    pub variables: Vec<Variable>,
}
