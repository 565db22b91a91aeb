use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use medcalc_core::error::CoreError;
use medcalc_formulas::error::FormulaError;
use medcalc_formulas::input::ValidationError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    /// Values rejected by a calculator's schema.
    InvalidValues {
        message: String,
        errors: Vec<ValidationError>,
    },
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<ValidationError>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, Vec::new()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, Vec::new()),
            ApiError::InvalidValues { message, errors } => {
                (StatusCode::UNPROCESSABLE_ENTITY, message, errors)
            }
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                    Vec::new(),
                )
            }
        };

        (status, Json(ErrorBody { error, details })).into_response()
    }
}

impl From<FormulaError> for ApiError {
    fn from(e: FormulaError) -> Self {
        match e {
            FormulaError::UnknownCalculator(_) => ApiError::NotFound(e.to_string()),
            FormulaError::InvalidValues { ref errors, .. } => ApiError::InvalidValues {
                errors: errors.clone(),
                message: e.to_string(),
            },
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}
