use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Ordinal severity bucket of an evaluation result.
///
/// The display layer maps tiers to colors; evaluators never deal in colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SeverityTier {
    Low,
    Moderate,
    High,
    Critical,
    /// No severity applies: awaiting input, or a not-testable GCS.
    Unknown,
}

impl SeverityTier {
    /// Position on the low-to-critical scale. `None` for [`SeverityTier::Unknown`].
    pub fn rank(&self) -> Option<u8> {
        match self {
            SeverityTier::Low => Some(0),
            SeverityTier::Moderate => Some(1),
            SeverityTier::High => Some(2),
            SeverityTier::Critical => Some(3),
            SeverityTier::Unknown => None,
        }
    }

    /// True for tiers that should draw attention (high or critical).
    pub fn is_alarming(&self) -> bool {
        matches!(self, SeverityTier::High | SeverityTier::Critical)
    }
}
