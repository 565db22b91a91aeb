//! medcalc-formulas
//!
//! Bedside clinical score calculators. Pure data and arithmetic: no I/O,
//! no logging. Each calculator pairs an input schema with a deterministic
//! evaluator and its descriptive content.

pub mod calculators;
pub mod error;
pub mod input;
pub mod presentation;
pub mod registry;
pub mod result;

use std::sync::LazyLock;

use medcalc_core::models::content::CalculatorContent;
use medcalc_core::models::specialty::Specialty;

use input::{CalculatorInput, ValidationError, ValueBag};
use presentation::PointContribution;
use result::EvaluationResult;

/// Trait implemented by each clinical calculator.
pub trait Calculator: Send + Sync {
    /// Unique identifier (e.g., "chads2vasc", "ckd-epi").
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// One-line summary shown on the catalog card.
    fn description(&self) -> &str;

    fn specialties(&self) -> &[Specialty];

    /// Ordered input schema.
    fn inputs(&self) -> &[CalculatorInput];

    /// Evaluate the current values. Pure and total: missing or degenerate
    /// input produces an awaiting-input result, never a panic or a NaN.
    fn evaluate(&self, values: &ValueBag) -> EvaluationResult;

    fn content(&self) -> &CalculatorContent {
        static EMPTY: LazyLock<CalculatorContent> = LazyLock::new(CalculatorContent::default);
        &EMPTY
    }

    /// Per-field contributions for the progress-bar chart.
    fn point_breakdown(&self, values: &ValueBag) -> Vec<PointContribution> {
        presentation::schema_breakdown(self.inputs(), values)
    }

    /// Values a freshly opened form starts with.
    fn default_values(&self) -> ValueBag {
        ValueBag::with_defaults(self.inputs())
    }

    /// Check a bag against the schema: unknown ids and values no field can
    /// produce.
    fn validate_values(&self, values: &ValueBag) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for (id, value) in values.iter() {
            match self.inputs().iter().find(|input| input.id == id) {
                None => errors.push(ValidationError {
                    input_id: id.to_string(),
                    value,
                    message: format!("{}: unknown input '{id}'", self.name()),
                }),
                Some(input) if !input.accepts(value) => errors.push(ValidationError {
                    input_id: id.to_string(),
                    value,
                    message: format!(
                        "{}: {} does not accept the value {value}",
                        self.name(),
                        input.label,
                    ),
                }),
                Some(_) => {}
            }
        }
        errors
    }
}

/// Every registered calculator, in catalog order.
pub fn all_calculators() -> Vec<&'static dyn Calculator> {
    registry::registry().list()
}

/// Look up a calculator by id.
pub fn get_calculator(id: &str) -> Option<&'static dyn Calculator> {
    registry::registry().get(id)
}
