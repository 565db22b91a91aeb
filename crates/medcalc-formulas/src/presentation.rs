//! Shapes evaluator output into the display contract the UI renders.

use medcalc_core::models::severity::SeverityTier;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::Calculator;
use crate::error::FormulaError;
use crate::input::{CalculatorInput, InputKind, ValueBag};
use crate::result::{CkdStage, EvaluationResult, ResultFigure};

/// One bar of the point-breakdown chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PointContribution {
    pub input_id: String,
    pub label: String,
    pub points: f64,
    pub max_points: f64,
}

impl PointContribution {
    pub fn new(input_id: &str, label: &str, points: f64, max_points: f64) -> Self {
        Self {
            input_id: input_id.to_string(),
            label: label.to_string(),
            points,
            max_points,
        }
    }

    /// Bar fill in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        if self.max_points <= 0.0 {
            0.0
        } else {
            (self.points / self.max_points).clamp(0.0, 1.0)
        }
    }
}

/// One segment of the CKD stage bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StageSegment {
    pub stage: CkdStage,
    pub range_label: String,
    pub active: bool,
}

/// Everything the result panel needs, in one value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DisplayResult {
    pub calculator_id: String,
    /// The number, "NT" or "—".
    pub score_text: String,
    pub score: Option<f64>,
    pub interpretation: String,
    pub severity: SeverityTier,
    pub details: Option<String>,
    pub stage: Option<CkdStage>,
    pub stage_bar: Vec<StageSegment>,
    pub figures: Vec<ResultFigure>,
    pub breakdown: Vec<PointContribution>,
    pub max_total: f64,
}

/// Breakdown derived from the input schema alone.
///
/// Booleans and enumerated fields contribute their stored value (negative
/// sentinels count as zero) against the field's largest option magnitude.
/// Numeric fields are charted only when they declare a ceiling.
pub fn schema_breakdown(inputs: &[CalculatorInput], values: &ValueBag) -> Vec<PointContribution> {
    inputs
        .iter()
        .filter_map(|input| {
            let max_points = input.max_points()?;
            let points = match input.kind {
                InputKind::Numeric { .. } => values.get(&input.id).unwrap_or(0.0),
                _ => values.points(&input.id),
            };
            Some(PointContribution::new(
                &input.id,
                short_label(&input.label),
                points,
                max_points,
            ))
        })
        .collect()
}

/// Chart label: the field label up to its first parenthesis.
pub fn short_label(label: &str) -> &str {
    label.split('(').next().unwrap_or(label).trim()
}

/// The six-segment CKD bar with `active` highlighted.
pub fn stage_bar(active: CkdStage) -> Vec<StageSegment> {
    CkdStage::ALL
        .iter()
        .map(|stage| StageSegment {
            stage: *stage,
            range_label: format!("{} ({})", stage.label(), stage.range_label()),
            active: *stage == active,
        })
        .collect()
}

/// Combine an evaluation with its breakdown.
pub fn to_display(
    calculator: &dyn Calculator,
    result: EvaluationResult,
    breakdown: Vec<PointContribution>,
) -> DisplayResult {
    let max_total = breakdown.iter().map(|b| b.max_points).sum();
    DisplayResult {
        calculator_id: calculator.id().to_string(),
        score_text: result.score.label(),
        score: result.score.value(),
        interpretation: result.interpretation,
        severity: result.severity,
        details: result.details,
        stage: result.stage,
        stage_bar: result.stage.map(stage_bar).unwrap_or_default(),
        figures: result.figures,
        breakdown,
        max_total,
    }
}

/// Evaluate and shape for display.
pub fn present(calculator: &dyn Calculator, values: &ValueBag) -> DisplayResult {
    let result = calculator.evaluate(values);
    let breakdown = calculator.point_breakdown(values);
    to_display(calculator, result, breakdown)
}

/// [`present`], after rejecting values the schema cannot produce.
pub fn present_checked(
    calculator: &dyn Calculator,
    values: &ValueBag,
) -> Result<DisplayResult, FormulaError> {
    let errors = calculator.validate_values(values);
    if !errors.is_empty() {
        return Err(FormulaError::InvalidValues {
            calculator_id: calculator.id().to_string(),
            errors,
        });
    }
    Ok(present(calculator, values))
}
