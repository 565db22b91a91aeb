use std::sync::LazyLock;

use medcalc_core::models::content::{CalculatorContent, EvidenceContent, LiteratureKind};
use medcalc_core::models::severity::SeverityTier;
use medcalc_core::models::specialty::Specialty;

use super::{lines, reference};
use crate::Calculator;
use crate::input::{CalculatorInput, ValueBag};
use crate::result::EvaluationResult;

/// Quick SOFA: bedside sepsis screen outside the ICU.
pub struct QSofa;

const CRITERIA: [&str; 3] = ["rr", "mentation", "sbp"];

impl Calculator for QSofa {
    fn id(&self) -> &str {
        "qsofa"
    }

    fn name(&self) -> &str {
        "Thang điểm qSOFA"
    }

    fn description(&self) -> &str {
        "Nhận diện nhanh bệnh nhân có nguy cơ nhiễm khuẩn huyết."
    }

    fn specialties(&self) -> &[Specialty] {
        &[Specialty::CriticalCare, Specialty::Pulmonology]
    }

    fn inputs(&self) -> &[CalculatorInput] {
        static INPUTS: LazyLock<Vec<CalculatorInput>> = LazyLock::new(|| {
            vec![
                CalculatorInput::boolean("rr", "Nhịp thở ≥ 22 lần/phút"),
                CalculatorInput::boolean("mentation", "Thay đổi ý thức (GCS < 15)"),
                CalculatorInput::boolean("sbp", "Huyết áp tâm thu ≤ 100 mmHg"),
            ]
        });
        &INPUTS
    }

    fn evaluate(&self, values: &ValueBag) -> EvaluationResult {
        let score = CRITERIA.iter().filter(|id| values.flag(id)).count() as f64;
        let (interpretation, severity) = if score >= 2.0 {
            ("Nguy cơ cao tử vong hoặc nằm hồi sức kéo dài.", SeverityTier::High)
        } else {
            ("Nguy cơ thấp.", SeverityTier::Low)
        };
        EvaluationResult::computed(score, interpretation, severity).with_details(
            "Nếu ≥ 2 điểm, cần đánh giá thang điểm SOFA đầy đủ và tìm ổ nhiễm khuẩn.",
        )
    }

    fn content(&self) -> &CalculatorContent {
        static CONTENT: LazyLock<CalculatorContent> = LazyLock::new(|| CalculatorContent {
            pearls: lines(&["qSOFA không phải tiêu chuẩn chẩn đoán nhiễm khuẩn huyết."]),
            evidence: Some(EvidenceContent {
                literature: vec![reference(
                    LiteratureKind::Original,
                    "Assessment of Clinical Criteria for Sepsis: For the Third International Consensus Definitions for Sepsis and Septic Shock (Sepsis-3)",
                    "Seymour CW, Liu VX, Iwashyna TJ, et al. JAMA. 2016;315(8):762-774.",
                    Some("26903335"),
                )],
                ..Default::default()
            }),
            related_ids: lines(&["sofa"]),
            ..CalculatorContent::default()
        });
        &CONTENT
    }
}
