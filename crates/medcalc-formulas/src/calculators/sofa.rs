use std::sync::LazyLock;

use medcalc_core::models::content::{
    CalculatorContent, EvidenceContent, FormulaRow, LiteratureKind, NextSteps, SubCriterion,
};
use medcalc_core::models::severity::SeverityTier;
use medcalc_core::models::specialty::Specialty;

use super::{lines, reference};
use crate::Calculator;
use crate::input::{CalculatorInput, InputOption, ValueBag};
use crate::presentation::PointContribution;
use crate::result::EvaluationResult;

/// Sequential Organ Failure Assessment.
pub struct Sofa;

/// Organ fields in display order, with their chart labels.
const ORGANS: [(&str, &str); 6] = [
    ("pf_ratio", "Hô hấp"),
    ("coagulation", "Đông máu"),
    ("liver", "Gan"),
    ("cardio", "Tim mạch"),
    ("cns", "Thần kinh"),
    ("renal", "Thận"),
];

/// Respiratory points without ventilatory support never exceed this.
const UNSUPPORTED_RESPIRATORY_CAP: u8 = 2;

fn organ_input(id: &str, label: &str, grades: [&str; 5]) -> CalculatorInput {
    CalculatorInput::enumerated(
        id,
        label,
        grades
            .iter()
            .enumerate()
            .map(|(points, label)| InputOption::new(*label, points as f64))
            .collect(),
    )
}

/// Per-organ points after the ventilation rule. `Err` names the organ fields
/// that are absent or out of range.
fn organ_scores(values: &ValueBag) -> Result<[u8; 6], Vec<&'static str>> {
    let mut scores = [0u8; 6];
    let mut missing = Vec::new();
    for (slot, (id, _)) in scores.iter_mut().zip(ORGANS) {
        match values.code(id) {
            Some(n) if (0..=4).contains(&n) => *slot = n as u8,
            _ => missing.push(id),
        }
    }
    if !missing.is_empty() {
        return Err(missing);
    }
    if !values.flag("is_ventilated") {
        scores[0] = scores[0].min(UNSUPPORTED_RESPIRATORY_CAP);
    }
    Ok(scores)
}

impl Calculator for Sofa {
    fn id(&self) -> &str {
        "sofa"
    }

    fn name(&self) -> &str {
        "Thang điểm SOFA"
    }

    fn description(&self) -> &str {
        "Đánh giá mức độ suy đa tạng và tiên lượng tử vong ở bệnh nhân ICU."
    }

    fn specialties(&self) -> &[Specialty] {
        &[Specialty::CriticalCare]
    }

    fn inputs(&self) -> &[CalculatorInput] {
        static INPUTS: LazyLock<Vec<CalculatorInput>> = LazyLock::new(|| {
            vec![
                organ_input(
                    "pf_ratio",
                    "Hô hấp: PaO₂/FiO₂ (mmHg)",
                    ["≥400", "300-399", "200-299", "100-199", "<100"],
                )
                .with_help("Điểm 3-4 chỉ được tính khi bệnh nhân có hỗ trợ thông khí."),
                CalculatorInput::boolean("is_ventilated", "Thở máy / Hỗ trợ hô hấp áp lực dương"),
                organ_input(
                    "coagulation",
                    "Đông máu: Tiểu cầu (×10³/µL)",
                    ["≥150", "100-149", "50-99", "20-49", "<20"],
                ),
                organ_input(
                    "liver",
                    "Gan: Bilirubin (mg/dL)",
                    ["<1.2", "1.2-1.9", "2.0-5.9", "6.0-11.9", "≥12.0"],
                ),
                organ_input(
                    "cardio",
                    "Tim mạch: Huyết áp / Vận mạch",
                    [
                        "MAP ≥70 mmHg",
                        "MAP <70 mmHg",
                        "Dopamine ≤5 hoặc Dobutamine",
                        "Dopamine >5 hoặc Epi/Norepi ≤0.1",
                        "Dopamine >15 hoặc Epi/Norepi >0.1",
                    ],
                ),
                organ_input(
                    "cns",
                    "Thần kinh: Điểm Glasgow",
                    ["15", "13-14", "10-12", "6-9", "<6"],
                ),
                organ_input(
                    "renal",
                    "Thận: Creatinine (mg/dL) hoặc nước tiểu",
                    [
                        "<1.2",
                        "1.2-1.9",
                        "2.0-3.4",
                        "3.5-4.9 hoặc <500 mL/ngày",
                        "≥5.0 hoặc <200 mL/ngày",
                    ],
                ),
            ]
        });
        &INPUTS
    }

    fn evaluate(&self, values: &ValueBag) -> EvaluationResult {
        let scores = match organ_scores(values) {
            Ok(scores) => scores,
            Err(missing) => return EvaluationResult::awaiting_input(&missing),
        };
        let total: u8 = scores.iter().sum();

        let (interpretation, severity) = match total {
            15.. => ("Nguy kịch cực độ (Tử vong >80-90%)", SeverityTier::Critical),
            10..=14 => ("Nguy kịch nặng (Tử vong 45-50%)", SeverityTier::High),
            7..=9 => ("Nguy kịch trung bình (Tử vong 18-26%)", SeverityTier::Moderate),
            2..=6 => ("Nguy kịch nhẹ (Tử vong 1-10%)", SeverityTier::Moderate),
            _ => ("Tình trạng ổn định (Tử vong 0%)", SeverityTier::Low),
        };

        let mut result = EvaluationResult::computed(f64::from(total), interpretation, severity);
        if !values.flag("is_ventilated") && values.code("pf_ratio").is_some_and(|n| n > 2) {
            result = result.with_details(
                "Điểm hô hấp được giới hạn ở 2 do bệnh nhân không có hỗ trợ thông khí.",
            );
        }
        result
    }

    fn point_breakdown(&self, values: &ValueBag) -> Vec<PointContribution> {
        let scores = organ_scores(values).unwrap_or_else(|_| {
            let mut partial = [0u8; 6];
            for (slot, (id, _)) in partial.iter_mut().zip(ORGANS) {
                *slot = values.code(id).unwrap_or(0).clamp(0, 4) as u8;
            }
            if !values.flag("is_ventilated") {
                partial[0] = partial[0].min(UNSUPPORTED_RESPIRATORY_CAP);
            }
            partial
        });
        ORGANS
            .iter()
            .zip(scores)
            .map(|((id, label), points)| PointContribution::new(id, label, f64::from(points), 4.0))
            .collect()
    }

    fn content(&self) -> &CalculatorContent {
        static CONTENT: LazyLock<CalculatorContent> = LazyLock::new(|| CalculatorContent {
            when_to_use: lines(&[
                "Bệnh nhân nằm ICU, đánh giá lúc nhập viện và mỗi 24-48 giờ.",
                "Tiêu chuẩn Sepsis-3: SOFA tăng ≥2 điểm do nhiễm trùng.",
            ]),
            pearls: lines(&[
                "Dùng giá trị xấu nhất trong 24 giờ cho từng cơ quan.",
                "Xu hướng thay đổi điểm có giá trị tiên lượng hơn một lần đo đơn lẻ.",
            ]),
            next_steps: Some(NextSteps {
                advice: lines(&["Điểm tăng dần gợi ý tiên lượng xấu, cần đánh giá lại điều trị."]),
                management: Vec::new(),
                critical_actions: None,
            }),
            evidence: Some(EvidenceContent {
                formula: ORGANS
                    .iter()
                    .map(|(_, label)| FormulaRow {
                        criteria: label.to_string(),
                        sub_criteria: vec![SubCriterion {
                            label: "Mức độ rối loạn".to_string(),
                            points: "0-4".to_string(),
                        }],
                        points: None,
                    })
                    .collect(),
                facts_figures: Vec::new(),
                appraisal: Vec::new(),
                literature: vec![
                    reference(
                        LiteratureKind::Original,
                        "The SOFA (Sepsis-related Organ Failure Assessment) score to describe organ dysfunction/failure",
                        "Vincent JL, Moreno R, Takala J, et al. Intensive Care Med. 1996;22(7):707-710.",
                        Some("8844239"),
                    ),
                    reference(
                        LiteratureKind::Validation,
                        "Serial evaluation of the SOFA score to predict outcome in critically ill patients",
                        "Ferreira FL, Bota DP, Bross A, Mélot C, Vincent JL. JAMA. 2001;286(14):1754-1758.",
                        Some("11594901"),
                    ),
                ],
            }),
            related_ids: lines(&["qsofa", "gcs"]),
            ..CalculatorContent::default()
        });
        &CONTENT
    }
}
