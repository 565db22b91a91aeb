use thiserror::Error;

use crate::input::ValidationError;

#[derive(Debug, Error)]
pub enum FormulaError {
    #[error("unknown calculator: {0}")]
    UnknownCalculator(String),

    #[error("{} invalid value(s) for calculator '{calculator_id}'", errors.len())]
    InvalidValues {
        calculator_id: String,
        errors: Vec<ValidationError>,
    },
}
