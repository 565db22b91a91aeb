use std::fmt;

use medcalc_core::models::severity::SeverityTier;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Interpretation shown while required fields are missing.
pub const AWAITING_INPUT_LABEL: &str = "Chờ nhập liệu";

/// The score half of an evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum Score {
    Computed { value: f64 },
    /// A GCS component could not be assessed; no total exists.
    NotTestable { components: GcsComponents },
    /// Required fields are missing or degenerate.
    AwaitingInput { missing: Vec<String> },
}

impl Score {
    /// The numeric score, only when one was computed.
    pub fn value(&self) -> Option<f64> {
        match self {
            Score::Computed { value } => Some(*value),
            _ => None,
        }
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, Score::Computed { .. })
    }

    /// Text for the big score figure: the number, "NT", or a dash.
    pub fn label(&self) -> String {
        match self {
            Score::Computed { value } => format_number(*value),
            Score::NotTestable { .. } => "NT".to_string(),
            Score::AwaitingInput { .. } => "—".to_string(),
        }
    }
}

/// The three GCS components; `None` marks a component that was not testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GcsComponents {
    pub eye: Option<u8>,
    pub verbal: Option<u8>,
    pub motor: Option<u8>,
}

impl GcsComponents {
    /// Sum of the components, or `None` if any is not testable.
    pub fn total(&self) -> Option<u8> {
        Some(self.eye? + self.verbal? + self.motor?)
    }
}

impl fmt::Display for GcsComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let part = |c: Option<u8>| c.map_or_else(|| "NT".to_string(), |v| v.to_string());
        write!(
            f,
            "E{} V{} M{}",
            part(self.eye),
            part(self.verbal),
            part(self.motor)
        )
    }
}

/// KDIGO GFR category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum CkdStage {
    G1,
    G2,
    G3a,
    G3b,
    G4,
    G5,
}

impl CkdStage {
    pub const ALL: [CkdStage; 6] = [
        CkdStage::G1,
        CkdStage::G2,
        CkdStage::G3a,
        CkdStage::G3b,
        CkdStage::G4,
        CkdStage::G5,
    ];

    /// Bucket an eGFR in mL/min/1.73m².
    pub fn from_egfr(egfr: f64) -> Self {
        if egfr >= 90.0 {
            CkdStage::G1
        } else if egfr >= 60.0 {
            CkdStage::G2
        } else if egfr >= 45.0 {
            CkdStage::G3a
        } else if egfr >= 30.0 {
            CkdStage::G3b
        } else if egfr >= 15.0 {
            CkdStage::G4
        } else {
            CkdStage::G5
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CkdStage::G1 => "G1",
            CkdStage::G2 => "G2",
            CkdStage::G3a => "G3a",
            CkdStage::G3b => "G3b",
            CkdStage::G4 => "G4",
            CkdStage::G5 => "G5",
        }
    }

    pub fn range_label(&self) -> &'static str {
        match self {
            CkdStage::G1 => "≥90",
            CkdStage::G2 => "60-89",
            CkdStage::G3a => "45-59",
            CkdStage::G3b => "30-44",
            CkdStage::G4 => "15-29",
            CkdStage::G5 => "<15",
        }
    }

    pub fn severity(&self) -> SeverityTier {
        match self {
            CkdStage::G1 | CkdStage::G2 => SeverityTier::Low,
            CkdStage::G3a | CkdStage::G3b => SeverityTier::Moderate,
            CkdStage::G4 => SeverityTier::High,
            CkdStage::G5 => SeverityTier::Critical,
        }
    }
}

/// A secondary figure reported next to the main score (BSA, risk rates, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResultFigure {
    pub label: String,
    pub value: String,
    pub unit: Option<String>,
}

impl ResultFigure {
    pub fn new(label: &str, value: impl Into<String>, unit: Option<&str>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
            unit: unit.map(str::to_string),
        }
    }
}

/// Output of one evaluator call. Recomputed on every input change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EvaluationResult {
    pub score: Score,
    pub interpretation: String,
    pub severity: SeverityTier,
    pub details: Option<String>,
    /// CKD-EPI only.
    pub stage: Option<CkdStage>,
    #[serde(default)]
    pub figures: Vec<ResultFigure>,
}

impl EvaluationResult {
    pub fn computed(value: f64, interpretation: impl Into<String>, severity: SeverityTier) -> Self {
        Self {
            score: Score::Computed { value },
            interpretation: interpretation.into(),
            severity,
            details: None,
            stage: None,
            figures: Vec::new(),
        }
    }

    pub fn not_testable(components: GcsComponents, interpretation: impl Into<String>) -> Self {
        Self {
            score: Score::NotTestable { components },
            interpretation: interpretation.into(),
            severity: SeverityTier::Unknown,
            details: None,
            stage: None,
            figures: Vec::new(),
        }
    }

    /// The "insufficient input" result, naming the fields that blocked evaluation.
    pub fn awaiting_input(missing: &[&str]) -> Self {
        Self {
            score: Score::AwaitingInput {
                missing: missing.iter().map(|m| m.to_string()).collect(),
            },
            interpretation: AWAITING_INPUT_LABEL.to_string(),
            severity: SeverityTier::Unknown,
            details: None,
            stage: None,
            figures: Vec::new(),
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_stage(mut self, stage: CkdStage) -> Self {
        self.stage = Some(stage);
        self
    }

    pub fn with_figure(mut self, figure: ResultFigure) -> Self {
        self.figures.push(figure);
        self
    }

    pub fn is_awaiting_input(&self) -> bool {
        matches!(self.score, Score::AwaitingInput { .. })
    }
}

/// Round half away from zero to `decimals` places, folding `-0` into `0`.
/// Magnitudes too large to scale have no fractional part and pass through.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / factor;
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Shortest decimal rendering: `15` rather than `15.0`.
pub fn format_number(value: f64) -> String {
    format!("{value}")
}
