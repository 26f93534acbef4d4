use super::ValidationError;
use crate::pipeline::{PipelineBox, Port, PortDirection, PortValue, Variable};
use crate::registry::BoxTypeRegistry;
use ahash::AHashMap;

/// Checks every box against its registered schema, and every bound port
/// against the variable it names.
///
/// Conformance findings go to `errors`, binding findings to `bindings`, so the
/// caller can keep the two stages apart.
pub(super) fn check_boxes(
    boxes: &[PipelineBox],
    variables: &AHashMap<&str, &Variable>,
    registry: &BoxTypeRegistry,
    report_unexpected_ports: bool,
    errors: &mut Vec<ValidationError>,
    bindings: &mut Vec<ValidationError>,
) {
    for b in boxes {
        let Some(schema) = registry.lookup(&b.box_type) else {
            errors.push(ValidationError::UnknownBoxType {
                box_name: b.name.clone(),
                box_type: b.box_type.clone(),
            });
            continue;
        };

        for direction in PortDirection::BOTH {
            let ports = b.ports(direction);
            let prescribed = schema.ports(direction);

            for (port_name, port_schema) in prescribed {
                match ports.get(port_name) {
                    None => errors.push(ValidationError::MissingPort {
                        box_name: b.name.clone(),
                        direction,
                        port: port_name.clone(),
                    }),
                    Some(port) if port.data_type != port_schema.data_type => {
                        errors.push(ValidationError::PortTypeMismatch {
                            box_name: b.name.clone(),
                            direction,
                            port: port_name.clone(),
                            expected: port_schema.data_type.clone(),
                            actual: port.data_type.clone(),
                        })
                    }
                    Some(port) => check_binding(b, direction, port_name, port, variables, bindings),
                }
            }

            for (port_name, port) in ports.iter().filter(|(name, _)| !prescribed.contains_key(*name)) {
                if report_unexpected_ports {
                    errors.push(ValidationError::UnexpectedPort {
                        box_name: b.name.clone(),
                        direction,
                        port: port_name.clone(),
                    });
                }
                check_binding(b, direction, port_name, port, variables, bindings);
            }
        }
    }
}

/// Unbound ports and external references are not checked.
fn check_binding(
    b: &PipelineBox,
    direction: PortDirection,
    port_name: &str,
    port: &Port,
    variables: &AHashMap<&str, &Variable>,
    errors: &mut Vec<ValidationError>,
) {
    let PortValue::Variable(variable_name) = &port.value else {
        return;
    };

    match variables.get(variable_name.as_str()) {
        None => errors.push(ValidationError::UndefinedVariable {
            box_name: b.name.clone(),
            direction,
            port: port_name.to_string(),
            variable: variable_name.clone(),
        }),
        Some(variable) if variable.data_type != port.data_type => {
            errors.push(ValidationError::VariableTypeMismatch {
                box_name: b.name.clone(),
                direction,
                port: port_name.to_string(),
                variable: variable_name.clone(),
                port_type: port.data_type.clone(),
                variable_type: variable.data_type.clone(),
            })
        }
        Some(_) => {}
    }
}
