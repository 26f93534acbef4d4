//! The box type registry: the catalog of prescribed port schemas.
//!
//! The registry is supplied by the caller, fully loaded, and is only ever
//! read during validation.

use crate::error::RegistryError;
use crate::pipeline::{PortDirection, TypeTag};
use ahash::AHashMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The prescribed type of one port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSchema {
    #[serde(rename = "type")]
    pub data_type: TypeTag,
}

/// The ports a box of some type must carry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoxTypeSchema {
    #[serde(rename = "portsIn", default)]
    pub ports_in: BTreeMap<String, PortSchema>,
    #[serde(rename = "portsOut", default)]
    pub ports_out: BTreeMap<String, PortSchema>,
}

impl BoxTypeSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(mut self, port: impl Into<String>, data_type: impl Into<TypeTag>) -> Self {
        self.ports_in.insert(
            port.into(),
            PortSchema {
                data_type: data_type.into(),
            },
        );
        self
    }

    pub fn with_output(mut self, port: impl Into<String>, data_type: impl Into<TypeTag>) -> Self {
        self.ports_out.insert(
            port.into(),
            PortSchema {
                data_type: data_type.into(),
            },
        );
        self
    }

    pub fn ports(&self, direction: PortDirection) -> &BTreeMap<String, PortSchema> {
        match direction {
            PortDirection::In => &self.ports_in,
            PortDirection::Out => &self.ports_out,
        }
    }
}

/// A list entry of the registry document, carrying its own identifier.
#[derive(Deserialize)]
struct NamedBoxType {
    #[serde(rename = "type")]
    box_type: String,
    #[serde(flatten)]
    schema: BoxTypeSchema,
}

/// Registry documents come either keyed by type or as a list of typed entries.
#[derive(Deserialize)]
#[serde(untagged)]
enum RegistryDocument {
    Keyed(BTreeMap<String, BoxTypeSchema>),
    Listed(Vec<NamedBoxType>),
}

/// Read-only lookup from box type identifier to port schema.
#[derive(Debug, Clone, Default)]
pub struct BoxTypeRegistry {
    types: AHashMap<String, BoxTypeSchema>,
}

impl BoxTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Loads a registry from `{typeId: {portsIn, portsOut}}` or from a list of
    /// `{type, portsIn, portsOut}` entries.
    pub fn from_json_str(json: &str) -> Result<Self, RegistryError> {
        let document: RegistryDocument = serde_json::from_str(json)?;
        let mut registry = Self::new();
        match document {
            RegistryDocument::Keyed(types) => {
                for (id, schema) in types {
                    registry.register(id, schema)?;
                }
            }
            RegistryDocument::Listed(entries) => {
                for entry in entries {
                    registry.register(entry.box_type, entry.schema)?;
                }
            }
        }
        log::debug!("Loaded {} box types", registry.len());
        Ok(registry)
    }

    pub fn register(
        &mut self,
        box_type: impl Into<String>,
        schema: BoxTypeSchema,
    ) -> Result<(), RegistryError> {
        let box_type = box_type.into();
        if self.types.contains_key(&box_type) {
            return Err(RegistryError::DuplicateBoxType(box_type));
        }
        self.types.insert(box_type, schema);
        Ok(())
    }

    /// Registers `alias` with the schema of the already registered `target`.
    pub fn register_alias(
        &mut self,
        alias: impl Into<String>,
        target: &str,
    ) -> Result<(), RegistryError> {
        let alias = alias.into();
        let schema = self
            .types
            .get(target)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownAliasTarget {
                alias: alias.clone(),
                target: target.to_string(),
            })?;
        self.register(alias, schema)
    }

    pub fn lookup(&self, box_type: &str) -> Option<&BoxTypeSchema> {
        self.types.get(box_type)
    }

    pub fn contains(&self, box_type: &str) -> bool {
        self.types.contains_key(box_type)
    }

    /// Registered identifiers in lexical order.
    pub fn box_types(&self) -> Vec<&str> {
        self.types.keys().map(String::as_str).sorted().collect()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Builds a registry in code. The first failing registration is reported by `build`.
#[derive(Default)]
pub struct RegistryBuilder {
    registry: BoxTypeRegistry,
    error: Option<RegistryError>,
}

impl RegistryBuilder {
    pub fn with_box_type(mut self, box_type: impl Into<String>, schema: BoxTypeSchema) -> Self {
        if self.error.is_none() {
            self.error = self.registry.register(box_type, schema).err();
        }
        self
    }

    /// Makes `user_type` behave like the registered `registered_type`.
    pub fn with_alias(mut self, user_type: impl Into<String>, registered_type: &str) -> Self {
        if self.error.is_none() {
            self.error = self
                .registry
                .register_alias(user_type, registered_type)
                .err();
        }
        self
    }

    pub fn build(self) -> Result<BoxTypeRegistry, RegistryError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.registry),
        }
    }
}
