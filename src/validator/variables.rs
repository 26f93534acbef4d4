use super::ValidationError;
use crate::pipeline::{PipelineBox, Variable};
use crate::utilization::utilization;
use itertools::Itertools;

/// Every variable needs a known type and a value shaped like that type.
/// External references are exempt from the shape check. Unknown type names
/// ending in `[]` still expect a list.
pub(super) fn check_variables(variables: &[Variable], errors: &mut Vec<ValidationError>) {
    for variable in variables {
        if !variable.data_type.is_known() {
            errors.push(ValidationError::UnknownVariableType {
                variable: variable.name.clone(),
                data_type: variable.data_type.clone(),
            });
        }
        if !variable.value.is_external() && variable.value.is_list() != variable.data_type.is_list() {
            errors.push(ValidationError::VariableValueMismatch {
                variable: variable.name.clone(),
                data_type: variable.data_type.clone(),
            });
        }
    }
}

/// A variable may be written by at most one output port.
pub(super) fn check_single_producer(boxes: &[PipelineBox], errors: &mut Vec<ValidationError>) {
    let index = utilization(boxes);
    errors.extend(
        index
            .into_iter()
            .filter(|(_, usage)| usage.ports_out.len() > 1)
            .sorted_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(variable, usage)| ValidationError::MultipleProducers {
                variable,
                producers: usage.ports_out,
            }),
    );
}
