use super::ValidationError;
use crate::pipeline::{PipelineBox, Variable};
use itertools::Itertools;

/// Blank-or-duplicate name checks. Boxes and variables are separate namespaces.
pub(super) fn check_names(
    boxes: &[PipelineBox],
    variables: &[Variable],
    errors: &mut Vec<ValidationError>,
) {
    let box_names = boxes.iter().map(|b| b.name.as_str());
    if let Some(error) = blank_name(box_names.clone(), ValidationError::BoxWithoutName) {
        errors.push(error);
    }
    let duplicates = duplicate_names(box_names);
    if !duplicates.is_empty() {
        errors.push(ValidationError::DuplicateBoxNames { names: duplicates });
    }

    let variable_names = variables.iter().map(|v| v.name.as_str());
    if let Some(error) = blank_name(variable_names.clone(), ValidationError::VariableWithoutName) {
        errors.push(error);
    }
    let duplicates = duplicate_names(variable_names);
    if !duplicates.is_empty() {
        errors.push(ValidationError::DuplicateVariableNames { names: duplicates });
    }
}

fn blank_name<'a>(
    mut names: impl Iterator<Item = &'a str>,
    error: ValidationError,
) -> Option<ValidationError> {
    names.any(|name| name.trim().is_empty()).then_some(error)
}

/// Each repeated non-blank name once, in order of first repetition.
fn duplicate_names<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    names
        .filter(|name| !name.trim().is_empty())
        .duplicates()
        .map(str::to_string)
        .collect()
}
