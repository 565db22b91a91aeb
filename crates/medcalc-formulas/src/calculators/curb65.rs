use std::sync::LazyLock;

use medcalc_core::models::severity::SeverityTier;
use medcalc_core::models::specialty::Specialty;

use crate::Calculator;
use crate::input::{CalculatorInput, ValueBag};
use crate::result::EvaluationResult;

/// CURB-65: community-acquired pneumonia severity.
pub struct Curb65;

impl Calculator for Curb65 {
    fn id(&self) -> &str {
        "curb-65"
    }

    fn name(&self) -> &str {
        "Thang điểm CURB-65"
    }

    fn description(&self) -> &str {
        "Mức độ nặng viêm phổi cộng đồng."
    }

    fn specialties(&self) -> &[Specialty] {
        &[Specialty::Pulmonology, Specialty::CriticalCare]
    }

    fn inputs(&self) -> &[CalculatorInput] {
        static INPUTS: LazyLock<Vec<CalculatorInput>> = LazyLock::new(|| {
            vec![
                CalculatorInput::boolean("c", "Lú lẫn (Confusion)"),
                CalculatorInput::boolean("u", "BUN > 19 mg/dL (7 mmol/L)"),
                CalculatorInput::boolean("r", "Nhịp thở ≥ 30 lần/phút"),
                CalculatorInput::boolean("b", "Huyết áp < 90/60 mmHg"),
                CalculatorInput::boolean("65", "Tuổi ≥ 65"),
            ]
        });
        &INPUTS
    }

    fn evaluate(&self, values: &ValueBag) -> EvaluationResult {
        let score = self
            .inputs()
            .iter()
            .filter(|input| values.flag(&input.id))
            .count();
        let (interpretation, severity) = match score {
            3.. => ("Nặng: Nhập viện/ICU.", SeverityTier::High),
            2 => ("Trung bình: Cân nhắc nhập viện.", SeverityTier::Moderate),
            _ => ("Nhẹ: Điều trị ngoại trú.", SeverityTier::Low),
        };
        EvaluationResult::computed(score as f64, interpretation, severity)
    }
}
