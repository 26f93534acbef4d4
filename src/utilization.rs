//! Which ports produce and which ports consume each variable.

use crate::pipeline::{PipelineBox, PortDirection};
use ahash::AHashMap;
use serde::Serialize;

/// A port on a named box.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PortRef {
    #[serde(rename = "box")]
    pub box_name: String,
    pub port: String,
}

impl PortRef {
    pub fn new(box_name: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            box_name: box_name.into(),
            port: port.into(),
        }
    }
}

/// Producers and consumers of one variable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct VariableUtilization {
    /// Input ports reading the variable.
    #[serde(rename = "portsIn")]
    pub ports_in: Vec<PortRef>,
    /// Output ports writing the variable.
    #[serde(rename = "portsOut")]
    pub ports_out: Vec<PortRef>,
}

impl VariableUtilization {
    pub fn ports(&self, direction: PortDirection) -> &[PortRef] {
        match direction {
            PortDirection::In => &self.ports_in,
            PortDirection::Out => &self.ports_out,
        }
    }

    fn ports_mut(&mut self, direction: PortDirection) -> &mut Vec<PortRef> {
        match direction {
            PortDirection::In => &mut self.ports_in,
            PortDirection::Out => &mut self.ports_out,
        }
    }
}

pub type UtilizationIndex = AHashMap<String, VariableUtilization>;

/// Builds the utilization index from scratch.
///
/// Only ports bound to a variable name are indexed; unbound ports and
/// external references never appear. Lists follow box order, then port order.
pub fn utilization(boxes: &[PipelineBox]) -> UtilizationIndex {
    let mut index = UtilizationIndex::new();
    for b in boxes {
        for (direction, port, value) in b.all_ports() {
            if let Some(variable) = value.value.variable() {
                index
                    .entry(variable.to_string())
                    .or_default()
                    .ports_mut(direction)
                    .push(PortRef::new(b.name.as_str(), port));
            }
        }
    }
    index
}
