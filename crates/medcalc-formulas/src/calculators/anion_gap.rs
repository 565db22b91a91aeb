use std::sync::LazyLock;

use medcalc_core::models::severity::SeverityTier;
use medcalc_core::models::specialty::Specialty;

use crate::Calculator;
use crate::input::{CalculatorInput, ValueBag};
use crate::result::{EvaluationResult, round_to};

/// Serum anion gap, `Na − (Cl + HCO₃)`.
pub struct AnionGap;

/// Upper limit of normal without albumin correction, mEq/L.
const UPPER_NORMAL: f64 = 12.0;

impl Calculator for AnionGap {
    fn id(&self) -> &str {
        "anion-gap"
    }

    fn name(&self) -> &str {
        "Khoảng trống Anion (Anion Gap)"
    }

    fn description(&self) -> &str {
        "Phân loại toan chuyển hóa."
    }

    fn specialties(&self) -> &[Specialty] {
        &[Specialty::Nephrology, Specialty::CriticalCare]
    }

    fn inputs(&self) -> &[CalculatorInput] {
        static INPUTS: LazyLock<Vec<CalculatorInput>> = LazyLock::new(|| {
            vec![
                CalculatorInput::numeric("na", "Natri (Na+)", Some(140.0)).with_unit("mEq/L"),
                CalculatorInput::numeric("cl", "Clo (Cl-)", Some(104.0)).with_unit("mEq/L"),
                CalculatorInput::numeric("hco3", "Bicarbonate (HCO3-)", Some(24.0))
                    .with_unit("mEq/L"),
            ]
        });
        &INPUTS
    }

    fn evaluate(&self, values: &ValueBag) -> EvaluationResult {
        let (Some(na), Some(cl), Some(hco3)) = (values.get("na"), values.get("cl"), values.get("hco3"))
        else {
            let missing: Vec<&str> = ["na", "cl", "hco3"]
                .into_iter()
                .filter(|id| values.get(id).is_none())
                .collect();
            return EvaluationResult::awaiting_input(&missing);
        };

        let gap = round_to(na - (cl + hco3), 0);
        if !gap.is_finite() {
            return EvaluationResult::awaiting_input(&["na", "cl", "hco3"]);
        }
        let (interpretation, severity) = if gap > UPPER_NORMAL {
            ("Khoảng trống Anion TĂNG.", SeverityTier::Moderate)
        } else {
            ("Khoảng trống Anion bình thường.", SeverityTier::Low)
        };
        EvaluationResult::computed(gap, interpretation, severity)
            .with_details("Bình thường: 8-12 mEq/L (nếu không hiệu chỉnh albumin).")
    }
}
