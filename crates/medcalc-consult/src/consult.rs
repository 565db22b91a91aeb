//! The AI consult on an already computed result.
//!
//! Never fails toward the caller: any problem degrades to a fixed message
//! with `fallback` set, so the deterministic score on screen is unaffected.

use std::time::Duration;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use ts_rs::TS;
use uuid::Uuid;

use crate::backend::ConsultBackend;
use crate::error::ConsultError;
use crate::prompt;

/// Shown when no backend is configured.
pub const NOT_CONFIGURED_MESSAGE: &str =
    "Tính năng tư vấn AI chưa được cấu hình. Vui lòng liên hệ quản trị viên để kích hoạt.";

/// Shown when the backend fails, times out or returns nothing.
pub const UNAVAILABLE_MESSAGE: &str =
    "Hệ thống AI đang bận hoặc gặp lỗi kết nối. Vui lòng thử lại sau.";

/// Narrative returned for one consult request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClinicalContext {
    pub consult_id: Uuid,
    pub text: String,
    /// True when `text` is one of the fixed fallback messages.
    pub fallback: bool,
    pub generated_at: Timestamp,
}

impl ClinicalContext {
    fn new(consult_id: Uuid, text: String, fallback: bool) -> Self {
        Self {
            consult_id,
            text,
            fallback,
            generated_at: Timestamp::now(),
        }
    }
}

/// Ask the backend for a short clinical commentary on a result.
///
/// `score` is the displayed score text ("15", "NT", ...). One attempt, no
/// retry; the request reports on exactly the snapshot it was given.
pub async fn get_clinical_context(
    backend: &dyn ConsultBackend,
    calculator_name: &str,
    interpretation: &str,
    score: &str,
    timeout: Duration,
) -> ClinicalContext {
    let consult_id = Uuid::new_v4();

    if !backend.is_configured() {
        warn!(consult_id = %consult_id, "consult requested but no backend is configured");
        return ClinicalContext::new(consult_id, NOT_CONFIGURED_MESSAGE.to_string(), true);
    }

    info!(consult_id = %consult_id, calculator = calculator_name, "starting consult");
    let user_message = prompt::build_user_message(calculator_name, interpretation, score);

    let outcome = match tokio::time::timeout(
        timeout,
        backend.generate(prompt::SYSTEM_PROMPT, &user_message),
    )
    .await
    {
        Ok(result) => result,
        Err(_) => Err(ConsultError::Timeout(timeout.as_secs())),
    };

    match outcome.and_then(non_empty) {
        Ok(text) => {
            info!(consult_id = %consult_id, "consult complete");
            ClinicalContext::new(consult_id, text, false)
        }
        Err(ConsultError::NotConfigured) => {
            warn!(consult_id = %consult_id, "consult backend reported it is not configured");
            ClinicalContext::new(consult_id, NOT_CONFIGURED_MESSAGE.to_string(), true)
        }
        Err(e) => {
            error!(consult_id = %consult_id, error = %e, "consult failed");
            ClinicalContext::new(consult_id, UNAVAILABLE_MESSAGE.to_string(), true)
        }
    }
}

fn non_empty(text: String) -> Result<String, ConsultError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(ConsultError::EmptyResponse)
    } else {
        Ok(trimmed.to_string())
    }
}
