//! Multi-stage semantic validation of pipelines.
//!
//! Stages run in a fixed order and accumulate their findings:
//!
//! 1. name integrity (any finding here stops validation),
//! 2. box conformance against the registry,
//! 3. port to variable bindings,
//! 4. variable types and values,
//! 5. at most one producer per variable,
//! 6. acyclicity, attempted only when stages 1-5 found nothing.

use crate::graph::DependencyGraph;
use crate::pipeline::{Pipeline, PipelineBox, Variable};
use crate::registry::BoxTypeRegistry;
use ahash::AHashMap;

mod conformance;
mod diagnostics;
mod names;
mod variables;

pub use diagnostics::{ErrorKind, ValidationError};

/// Validates a pipeline with default settings.
///
/// Returns `None` for a valid pipeline, otherwise the stage-ordered findings.
pub fn validate(
    boxes: &[PipelineBox],
    variables: &[Variable],
    registry: &BoxTypeRegistry,
) -> Option<Vec<ValidationError>> {
    Validator::new(registry).validate(boxes, variables)
}

/// Validates a pipeline against a box type registry.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'r> {
    registry: &'r BoxTypeRegistry,
    report_unexpected_ports: bool,
    check_loops: bool,
}

pub struct ValidatorBuilder<'r> {
    registry: &'r BoxTypeRegistry,
    report_unexpected_ports: bool,
    check_loops: bool,
}

impl<'r> ValidatorBuilder<'r> {
    pub fn new(registry: &'r BoxTypeRegistry) -> Self {
        Self {
            registry,
            report_unexpected_ports: true,
            check_loops: true,
        }
    }

    /// Whether ports the box type does not prescribe are reported. On by default.
    pub fn report_unexpected_ports(mut self, enabled: bool) -> Self {
        self.report_unexpected_ports = enabled;
        self
    }

    /// Whether the final acyclicity gate runs. On by default.
    pub fn check_loops(mut self, enabled: bool) -> Self {
        self.check_loops = enabled;
        self
    }

    pub fn build(self) -> Validator<'r> {
        Validator {
            registry: self.registry,
            report_unexpected_ports: self.report_unexpected_ports,
            check_loops: self.check_loops,
        }
    }
}

impl<'r> Validator<'r> {
    pub fn new(registry: &'r BoxTypeRegistry) -> Self {
        ValidatorBuilder::new(registry).build()
    }

    pub fn builder(registry: &'r BoxTypeRegistry) -> ValidatorBuilder<'r> {
        ValidatorBuilder::new(registry)
    }

    pub fn validate(
        &self,
        boxes: &[PipelineBox],
        variables: &[Variable],
    ) -> Option<Vec<ValidationError>> {
        let mut errors = Vec::new();

        names::check_names(boxes, variables, &mut errors);
        if !errors.is_empty() {
            log::debug!(
                "Name integrity failed with {} errors, skipping remaining checks",
                errors.len()
            );
            return Some(errors);
        }

        let variables_by_name: AHashMap<&str, &Variable> =
            variables.iter().map(|v| (v.name.as_str(), v)).collect();

        let mut bindings = Vec::new();
        conformance::check_boxes(
            boxes,
            &variables_by_name,
            self.registry,
            self.report_unexpected_ports,
            &mut errors,
            &mut bindings,
        );
        errors.append(&mut bindings);
        variables::check_variables(variables, &mut errors);
        variables::check_single_producer(boxes, &mut errors);

        if errors.is_empty() {
            if self.check_loops && DependencyGraph::build(boxes).has_cycle() {
                errors.push(ValidationError::LoopDetected);
            }
        } else {
            log::debug!("Skipping loop detection, {} errors found", errors.len());
        }

        (!errors.is_empty()).then_some(errors)
    }

    pub fn validate_pipeline(&self, pipeline: &Pipeline) -> Option<Vec<ValidationError>> {
        self.validate(&pipeline.boxes, &pipeline.variables)
    }
}
