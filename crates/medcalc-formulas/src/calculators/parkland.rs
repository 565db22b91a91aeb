use std::sync::LazyLock;

use medcalc_core::models::severity::SeverityTier;
use medcalc_core::models::specialty::Specialty;

use crate::Calculator;
use crate::input::{CalculatorInput, ValueBag};
use crate::result::{EvaluationResult, ResultFigure, format_number, round_to};

/// Parkland burn resuscitation volume for the first 24 hours.
pub struct Parkland;

/// mL of Ringer's lactate per kg per %TBSA.
const ML_PER_KG_PER_TBSA: f64 = 4.0;

impl Calculator for Parkland {
    fn id(&self) -> &str {
        "parkland"
    }

    fn name(&self) -> &str {
        "Công thức Parkland"
    }

    fn description(&self) -> &str {
        "Tính lượng dịch truyền trong 24h đầu cho bệnh nhân bỏng."
    }

    fn specialties(&self) -> &[Specialty] {
        &[Specialty::CriticalCare]
    }

    fn inputs(&self) -> &[CalculatorInput] {
        static INPUTS: LazyLock<Vec<CalculatorInput>> = LazyLock::new(|| {
            vec![
                CalculatorInput::numeric("weight", "Cân nặng (kg)", Some(70.0)).with_unit("kg"),
                CalculatorInput::numeric("tbsa", "Diện tích bỏng (TBSA %)", Some(20.0))
                    .with_unit("%"),
            ]
        });
        &INPUTS
    }

    fn evaluate(&self, values: &ValueBag) -> EvaluationResult {
        let weight = values.positive("weight");
        let tbsa = values.positive("tbsa").filter(|t| *t <= 100.0);
        let (Some(weight), Some(tbsa)) = (weight, tbsa) else {
            let mut missing = Vec::new();
            if weight.is_none() {
                missing.push("weight");
            }
            if tbsa.is_none() {
                missing.push("tbsa");
            }
            return EvaluationResult::awaiting_input(&missing);
        };

        let total = round_to(ML_PER_KG_PER_TBSA * weight * tbsa, 1);
        if !total.is_finite() {
            return EvaluationResult::awaiting_input(&["weight"]);
        }
        let half = round_to(total / 2.0, 1);
        EvaluationResult::computed(
            total,
            format!(
                "Tổng dịch truyền (Lactate Ringer): {} mL trong 24h.",
                format_number(total)
            ),
            SeverityTier::Low,
        )
        .with_details(format!(
            "8h đầu truyền: {h} mL. 16h tiếp theo truyền: {h} mL.",
            h = format_number(half)
        ))
        .with_figure(ResultFigure::new("8 giờ đầu", format_number(half), Some("mL")))
        .with_figure(ResultFigure::new("16 giờ tiếp theo", format_number(half), Some("mL")))
    }
}
