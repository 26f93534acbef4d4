//! Structural repair of pipeline documents of unknown shape.
//!
//! Repair is silent and never fails: entries that cannot be made sense of are
//! dropped and reported back as [`Dropped`] records. A document that needed no
//! repair is handed back by reference, so `Repaired::is_changed` tells the
//! caller whether the repaired version is worth persisting.

mod parsing;

pub use parsing::{parse, parse_str};

use crate::error::{ParseError, json_kind};
use crate::pipeline::{Pipeline, PortDirection};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;

/// Something the repair pass removed or replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dropped {
    /// The document itself was not an object and was replaced by an empty pipeline.
    Document { found: &'static str },
    /// `boxes` or `variables` was missing or not an array and became empty.
    Collection {
        field: &'static str,
        found: &'static str,
    },
    /// A box entry without a string `name` and `type`.
    Box { index: usize },
    /// A port map that was missing or not an object and became empty.
    PortMap {
        box_name: String,
        direction: PortDirection,
        found: &'static str,
    },
    /// A port that is not `{type: string, value: string}`.
    Port {
        box_name: String,
        direction: PortDirection,
        port: String,
    },
    /// A variable entry without a string `name` and `type`.
    Variable { index: usize },
}

impl fmt::Display for Dropped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dropped::Document { found } => {
                write!(f, "document was {}, replaced by an empty pipeline", found)
            }
            Dropped::Collection { field, found } => {
                write!(f, "'{}' was {}, replaced by an empty list", field, found)
            }
            Dropped::Box { index } => write!(f, "box #{} has no string name or type", index),
            Dropped::PortMap {
                box_name,
                direction,
                found,
            } => write!(
                f,
                "{}.{} was {}, replaced by an empty map",
                box_name, direction, found
            ),
            Dropped::Port {
                box_name,
                direction,
                port,
            } => write!(f, "{}.{}.{} is not a valid port", box_name, direction, port),
            Dropped::Variable { index } => {
                write!(f, "variable #{} has no string name or type", index)
            }
        }
    }
}

/// Result of [`repair`].
#[derive(Debug, Clone)]
pub struct Repaired<'a> {
    /// The input itself when nothing had to change, otherwise a repaired copy.
    pub pipeline: Cow<'a, Value>,
    pub dropped: Vec<Dropped>,
}

impl Repaired<'_> {
    pub fn is_changed(&self) -> bool {
        matches!(self.pipeline, Cow::Owned(_))
    }

    pub fn into_value(self) -> Value {
        self.pipeline.into_owned()
    }
}

/// Repairs a raw `{boxes, variables}` document.
pub fn repair(raw: &Value) -> Repaired<'_> {
    let mut dropped = Vec::new();

    let Some(document) = raw.as_object() else {
        dropped.push(Dropped::Document {
            found: json_kind(raw),
        });
        let mut empty = Map::new();
        empty.insert("boxes".to_string(), Value::Array(Vec::new()));
        empty.insert("variables".to_string(), Value::Array(Vec::new()));
        return Repaired {
            pipeline: Cow::Owned(Value::Object(empty)),
            dropped,
        };
    };

    let boxes = collection(document, "boxes", &mut dropped)
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| repair_box(index, entry, &mut dropped))
        .collect::<Vec<_>>();

    let variables = collection(document, "variables", &mut dropped)
        .iter()
        .enumerate()
        .filter(|(index, entry)| {
            let keep = has_name_and_type(entry);
            if !keep {
                dropped.push(Dropped::Variable { index: *index });
            }
            keep
        })
        .map(|(_, entry)| entry.clone())
        .collect::<Vec<_>>();

    if dropped.is_empty() {
        return Repaired {
            pipeline: Cow::Borrowed(raw),
            dropped,
        };
    }

    let mut fixed = document.clone();
    fixed.insert("boxes".to_string(), Value::Array(boxes));
    fixed.insert("variables".to_string(), Value::Array(variables));
    Repaired {
        pipeline: Cow::Owned(Value::Object(fixed)),
        dropped,
    }
}

/// Repairs and then parses a document, logging everything that was dropped.
pub fn normalize(raw: &Value) -> Result<Pipeline, ParseError> {
    let repaired = repair(raw);
    if repaired.is_changed() {
        log::info!(
            "Repaired pipeline document ({} entries dropped)",
            repaired.dropped.len()
        );
        for dropped in &repaired.dropped {
            log::debug!("  -> {}", dropped);
        }
    }
    parse(&repaired.pipeline)
}

fn collection<'a>(
    document: &'a Map<String, Value>,
    field: &'static str,
    dropped: &mut Vec<Dropped>,
) -> &'a [Value] {
    match document.get(field) {
        Some(Value::Array(items)) => items,
        other => {
            dropped.push(Dropped::Collection {
                field,
                found: other.map_or("missing", json_kind),
            });
            &[]
        }
    }
}

fn has_name_and_type(entry: &Value) -> bool {
    entry.get("name").is_some_and(Value::is_string) && entry.get("type").is_some_and(Value::is_string)
}

fn is_valid_port(port: &Value) -> bool {
    let Some(port) = port.as_object() else {
        return false;
    };
    let typed = port.get("type").is_some_and(Value::is_string);
    let valued = match port.get("value") {
        None | Some(Value::Null) | Some(Value::String(_)) => true,
        Some(_) => false,
    };
    typed && valued
}

fn repair_box(index: usize, entry: &Value, dropped: &mut Vec<Dropped>) -> Option<Value> {
    if !entry.is_object() || !has_name_and_type(entry) {
        dropped.push(Dropped::Box { index });
        return None;
    }
    let mut fixed = entry.as_object()?.clone();
    let box_name = entry.get("name").and_then(Value::as_str).unwrap_or_default();

    for direction in PortDirection::BOTH {
        let ports = match entry.get(direction.as_str()) {
            Some(Value::Object(ports)) => ports
                .iter()
                .filter(|(port, value)| {
                    let keep = is_valid_port(value);
                    if !keep {
                        dropped.push(Dropped::Port {
                            box_name: box_name.to_string(),
                            direction,
                            port: port.to_string(),
                        });
                    }
                    keep
                })
                .map(|(port, value)| (port.clone(), value.clone()))
                .collect::<Map<_, _>>(),
            other => {
                dropped.push(Dropped::PortMap {
                    box_name: box_name.to_string(),
                    direction,
                    found: other.map_or("missing", json_kind),
                });
                Map::new()
            }
        };
        fixed.insert(direction.as_str().to_string(), Value::Object(ports));
    }

    Some(Value::Object(fixed))
}
