use std::sync::LazyLock;

use medcalc_core::models::content::{CalculatorContent, EvidenceContent, LiteratureKind};
use medcalc_core::models::severity::SeverityTier;
use medcalc_core::models::specialty::Specialty;

use super::{is_female, lines, reference, sex_input};
use crate::Calculator;
use crate::input::{CalculatorInput, ValueBag};
use crate::presentation::PointContribution;
use crate::result::{EvaluationResult, ResultFigure, round_to};

/// Body mass index with Mosteller body surface area.
pub struct Bmi;

/// Chart ceiling of the BMI bar.
const BAR_CEILING: f64 = 50.0;

/// `weight / height²` from kg and cm, if both are positive and the quotient
/// is finite.
pub fn body_mass_index(weight_kg: f64, height_cm: f64) -> Option<f64> {
    if weight_kg <= 0.0 || height_cm <= 0.0 {
        return None;
    }
    let height_m = height_cm / 100.0;
    Some(weight_kg / (height_m * height_m)).filter(|bmi| bmi.is_finite() && *bmi > 0.0)
}

/// Mosteller: `sqrt(height_cm × weight_kg / 3600)`, in m².
pub fn mosteller_bsa(weight_kg: f64, height_cm: f64) -> Option<f64> {
    Some((height_cm * weight_kg / 3600.0).sqrt()).filter(|bsa| bsa.is_finite())
}

fn category(bmi: f64) -> (&'static str, SeverityTier) {
    if bmi < 18.5 {
        ("Nhẹ cân (Underweight)", SeverityTier::Moderate)
    } else if bmi < 25.0 {
        ("Cân nặng bình thường", SeverityTier::Low)
    } else if bmi < 30.0 {
        ("Tiền béo phì (Overweight)", SeverityTier::Moderate)
    } else if bmi < 35.0 {
        ("Béo phì độ I", SeverityTier::High)
    } else if bmi < 40.0 {
        ("Béo phì độ II", SeverityTier::High)
    } else {
        ("Béo phì độ III", SeverityTier::Critical)
    }
}

impl Calculator for Bmi {
    fn id(&self) -> &str {
        "bmi"
    }

    fn name(&self) -> &str {
        "Chỉ số khối cơ thể (BMI)"
    }

    fn description(&self) -> &str {
        "Phân loại tình trạng dinh dưỡng và tính diện tích bề mặt cơ thể (BSA)."
    }

    fn specialties(&self) -> &[Specialty] {
        &[Specialty::Endocrinology, Specialty::Pediatrics]
    }

    fn inputs(&self) -> &[CalculatorInput] {
        static INPUTS: LazyLock<Vec<CalculatorInput>> = LazyLock::new(|| {
            vec![
                sex_input("sex", false),
                CalculatorInput::numeric("weight", "Cân nặng", Some(70.0)).with_unit("kg"),
                CalculatorInput::numeric("height", "Chiều cao", Some(170.0)).with_unit("cm"),
            ]
        });
        &INPUTS
    }

    fn evaluate(&self, values: &ValueBag) -> EvaluationResult {
        let weight = values.positive("weight");
        let height = values.positive("height");
        let (Some(weight), Some(height)) = (weight, height) else {
            let mut missing = Vec::new();
            if weight.is_none() {
                missing.push("weight");
            }
            if height.is_none() {
                missing.push("height");
            }
            return EvaluationResult::awaiting_input(&missing);
        };
        let (Some(bmi), Some(bsa)) = (body_mass_index(weight, height), mosteller_bsa(weight, height))
        else {
            return EvaluationResult::awaiting_input(&["weight", "height"]);
        };

        let subject = match is_female(values, "sex") {
            Some(true) => "Nữ",
            _ => "Nam",
        };
        let (interpretation, severity) = category(bmi);

        EvaluationResult::computed(round_to(bmi, 1), interpretation, severity)
            .with_details(format!(
                "Đối tượng: {subject}. Diện tích bề mặt cơ thể (BSA): {bsa:.2} m²."
            ))
            .with_figure(ResultFigure::new("BSA (Mosteller)", format!("{bsa:.2}"), Some("m²")))
    }

    fn point_breakdown(&self, values: &ValueBag) -> Vec<PointContribution> {
        let bmi = self.evaluate(values).score.value().unwrap_or(0.0);
        vec![PointContribution::new("bmi", "BMI", bmi, BAR_CEILING)]
    }

    fn content(&self) -> &CalculatorContent {
        static CONTENT: LazyLock<CalculatorContent> = LazyLock::new(|| CalculatorContent {
            when_to_use: lines(&[
                "Sàng lọc tình trạng dinh dưỡng ở người trưởng thành.",
                "Tính BSA để hiệu chỉnh liều thuốc (hóa trị, nhi khoa).",
            ]),
            pearls: lines(&[
                "BMI không phân biệt khối cơ và khối mỡ.",
                "Ngưỡng phân loại WHO; quần thể Châu Á có thể dùng ngưỡng thấp hơn.",
            ]),
            evidence: Some(EvidenceContent {
                literature: vec![reference(
                    LiteratureKind::Original,
                    "Simplified calculation of body-surface area",
                    "Mosteller RD. N Engl J Med. 1987;317(17):1098.",
                    Some("3657876"),
                )],
                ..Default::default()
            }),
            related_ids: lines(&["crcl"]),
            ..CalculatorContent::default()
        });
        &CONTENT
    }
}
