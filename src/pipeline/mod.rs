//! The typed pipeline model: boxes, ports, variables and their data types.

mod conversion;
mod definition;
mod types;
mod value;

pub use conversion::*;
pub use definition::*;
pub use types::*;
pub use value::*;

use crate::error::ParseError;
use ahash::AHashMap;
use itertools::Itertools;

impl Pipeline {
    /// Strictly parses a pipeline document. No repair is attempted.
    pub fn from_json_str(json: &str) -> Result<Self, ParseError> {
        crate::normalize::parse_str(json)
    }

    pub fn to_json_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty() && self.variables.is_empty()
    }

    pub fn find_box(&self, name: &str) -> Option<&PipelineBox> {
        self.boxes.iter().find(|b| b.name == name)
    }

    pub fn find_variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// Returns a copy with the box called `name` swapped for `replacement`,
    /// or `None` if there is no such box.
    pub fn replace_box(&self, name: &str, replacement: PipelineBox) -> Option<Pipeline> {
        let index = self.boxes.iter().position(|b| b.name == name)?;
        let mut next = self.clone();
        next.boxes[index] = replacement;
        Some(next)
    }

    /// Returns a copy without the box called `name`.
    pub fn remove_box(&self, name: &str) -> Option<Pipeline> {
        let index = self.boxes.iter().position(|b| b.name == name)?;
        let mut next = self.clone();
        next.boxes.remove(index);
        Some(next)
    }

    /// Returns a copy without the variable called `name`; every port bound
    /// to it becomes unbound.
    pub fn remove_variable(&self, name: &str) -> Option<Pipeline> {
        let index = self.variables.iter().position(|v| v.name == name)?;
        let mut next = self.clone();
        next.variables.remove(index);
        for b in &mut next.boxes {
            for direction in PortDirection::BOTH {
                for port in b.ports_mut(direction).values_mut() {
                    if port.value.variable() == Some(name) {
                        port.value = PortValue::Unbound;
                    }
                }
            }
        }
        Some(next)
    }

    /// Identifiers of all external references in ports and variable values,
    /// sorted and without duplicates.
    pub fn external_references(&self) -> Vec<&str> {
        let from_ports = self
            .boxes
            .iter()
            .flat_map(|b| b.all_ports())
            .filter_map(|(_, _, port)| match &port.value {
                PortValue::External(id) => Some(id.as_str()),
                _ => None,
            });
        let from_variables = self.variables.iter().filter_map(|v| match &v.value {
            VariableValue::External(id) => Some(id.as_str()),
            _ => None,
        });
        from_ports.chain(from_variables).sorted().dedup().collect()
    }

    /// Variables no port is bound to, in declaration order.
    pub fn orphan_variables(&self) -> Vec<&Variable> {
        let index = crate::utilization::utilization(&self.boxes);
        self.variables
            .iter()
            .filter(|v| !index.contains_key(&v.name))
            .collect()
    }

    /// Declared type of each variable. Later duplicates win.
    pub fn variable_types(&self) -> AHashMap<&str, &TypeTag> {
        self.variables
            .iter()
            .map(|v| (v.name.as_str(), &v.data_type))
            .collect()
    }
}
