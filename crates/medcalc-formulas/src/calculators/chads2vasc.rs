use std::sync::LazyLock;

use medcalc_core::models::content::{
    CalculatorContent, Creator, EvidenceContent, FactsFiguresRow, FormulaRow, LiteratureKind,
    NextSteps, SubCriterion,
};
use medcalc_core::models::severity::SeverityTier;
use medcalc_core::models::specialty::Specialty;

use super::{lines, reference};
use crate::Calculator;
use crate::input::{CalculatorInput, InputOption, ValueBag};
use crate::presentation::PointContribution;
use crate::result::{EvaluationResult, ResultFigure};

/// CHA₂DS₂-VASc: stroke risk in non-valvular atrial fibrillation. Score 0–9.
pub struct Chads2Vasc;

/// Annual event rates by score (ischemic stroke, stroke/TIA/systemic
/// embolism), Swedish Atrial Fibrillation cohort, Friberg et al. 2012.
/// Scores past the end of the table use the last row.
const ANNUAL_RISK: [(&str, &str); 10] = [
    ("0.2%", "0.3%"),
    ("0.6%", "0.9%"),
    ("2.2%", "2.9%"),
    ("3.2%", "4.6%"),
    ("4.8%", "6.7%"),
    ("7.2%", "10.0%"),
    ("9.7%", "13.6%"),
    ("11.2%", "15.7%"),
    ("10.8%", "15.2%"),
    ("12.2%", "17.4%"),
];

/// `(ischemic stroke, stroke/TIA/embolism)` annual rate for a score.
pub fn annual_risk(score: u32) -> (&'static str, &'static str) {
    ANNUAL_RISK[(score as usize).min(ANNUAL_RISK.len() - 1)]
}

/// Points per risk factor, with the maximum each can award.
///
/// Stroke/TIA/thromboembolism history is worth 2 whatever its selector
/// stores.
pub fn item_points(values: &ValueBag) -> Vec<PointContribution> {
    let flag = |id: &str| if values.flag(id) { 1.0 } else { 0.0 };
    let age = values.code("age").unwrap_or(0).clamp(0, 2) as f64;
    vec![
        PointContribution::new("age", "Tuổi", age, 2.0),
        PointContribution::new("sex", "Giới tính", flag("sex"), 1.0),
        PointContribution::new("chf", "Suy tim", flag("chf"), 1.0),
        PointContribution::new("htn", "Tăng huyết áp", flag("htn"), 1.0),
        PointContribution::new("stroke", "Đột quỵ", 2.0 * flag("stroke"), 2.0),
        PointContribution::new("vascular", "Bệnh mạch máu", flag("vascular"), 1.0),
        PointContribution::new("diabetes", "Tiểu đường", flag("diabetes"), 1.0),
    ]
}

impl Calculator for Chads2Vasc {
    fn id(&self) -> &str {
        "chads2vasc"
    }

    fn name(&self) -> &str {
        "Thang điểm CHA₂DS₂-VASc"
    }

    fn description(&self) -> &str {
        "Đánh giá nguy cơ đột quỵ ở bệnh nhân rung nhĩ."
    }

    fn specialties(&self) -> &[Specialty] {
        &[Specialty::Cardiology, Specialty::CriticalCare]
    }

    fn inputs(&self) -> &[CalculatorInput] {
        static INPUTS: LazyLock<Vec<CalculatorInput>> = LazyLock::new(|| {
            vec![
                CalculatorInput::enumerated(
                    "age",
                    "Tuổi",
                    vec![
                        InputOption::new("<65", 0.0),
                        InputOption::new("65-74", 1.0).with_delta("+1"),
                        InputOption::new("≥75", 2.0).with_delta("+2"),
                    ],
                ),
                CalculatorInput::enumerated(
                    "sex",
                    "Giới tính",
                    vec![
                        InputOption::new("Nam", 0.0),
                        InputOption::new("Nữ", 1.0).with_delta("+1"),
                    ],
                ),
                CalculatorInput::boolean("chf", "Tiền sử Suy tim sung huyết"),
                CalculatorInput::boolean("htn", "Tiền sử Tăng huyết áp"),
                CalculatorInput::enumerated(
                    "stroke",
                    "Tiền sử Đột quỵ/TIA/Thuyên tắc (x2)",
                    vec![
                        InputOption::new("Không", 0.0),
                        InputOption::new("Có", 1.0).with_delta("+2"),
                    ],
                ),
                CalculatorInput::boolean("vascular", "Bệnh mạch máu (NMCT, Bệnh mạch ngoại vi)"),
                CalculatorInput::boolean("diabetes", "Tiểu đường"),
            ]
        });
        &INPUTS
    }

    fn evaluate(&self, values: &ValueBag) -> EvaluationResult {
        let score = item_points(values).iter().map(|i| i.points).sum::<f64>() as u32;
        let female = values.flag("sex");

        let (interpretation, severity, advice) = match (score, female) {
            (0, false) => ("Nguy cơ thấp (Nam 0)", SeverityTier::Low, "Không khuyến cáo chống đông."),
            (1, true) => ("Nguy cơ thấp (Nữ 1)", SeverityTier::Low, "Không khuyến cáo chống đông."),
            (1, false) | (2, true) => (
                "Nguy cơ trung bình",
                SeverityTier::Moderate,
                "Cân nhắc chống đông (Cá thể hóa).",
            ),
            _ => ("Nguy cơ cao", SeverityTier::High, "Khuyến cáo OAC (Class I)."),
        };

        let (ischemic, total) = annual_risk(score);
        EvaluationResult::computed(score as f64, interpretation, severity)
            .with_details(format!("{advice} Nguy cơ đột quỵ: {ischemic}/năm."))
            .with_figure(ResultFigure::new("Đột quỵ thiếu máu", ischemic, Some("/năm")))
            .with_figure(ResultFigure::new("Đột quỵ/TIA/thuyên tắc", total, Some("/năm")))
    }

    fn point_breakdown(&self, values: &ValueBag) -> Vec<PointContribution> {
        item_points(values)
    }

    fn content(&self) -> &CalculatorContent {
        static CONTENT: LazyLock<CalculatorContent> = LazyLock::new(|| CalculatorContent {
            when_to_use: lines(&[
                "Sử dụng cho bệnh nhân rung nhĩ không do bệnh van tim để quyết định điều trị chống đông.",
            ]),
            pearls: lines(&[
                "Giới tính nữ chỉ được tính 1 điểm nếu có ít nhất một yếu tố nguy cơ khác.",
                "Tiền sử đột quỵ/TIA/thuyên tắc được tính 2 điểm.",
            ]),
            why_use: Some(
                "Phân tầng nguy cơ đột quỵ chi tiết hơn CHADS₂, đặc biệt ở nhóm nguy cơ thấp."
                    .to_string(),
            ),
            next_steps: Some(NextSteps {
                advice: lines(&[
                    "Nam 0 điểm hoặc Nữ 1 điểm: không cần chống đông.",
                    "Nam 1 điểm hoặc Nữ 2 điểm: cân nhắc chống đông, cá thể hóa.",
                    "Nam ≥2 điểm hoặc Nữ ≥3 điểm: khuyến cáo chống đông đường uống.",
                ]),
                management: Vec::new(),
                critical_actions: Some(
                    "Đánh giá nguy cơ chảy máu (HAS-BLED) trước khi khởi trị chống đông."
                        .to_string(),
                ),
            }),
            evidence: Some(EvidenceContent {
                formula: vec![
                    FormulaRow {
                        criteria: "Tuổi".to_string(),
                        sub_criteria: vec![
                            SubCriterion { label: "<65".to_string(), points: "0".to_string() },
                            SubCriterion { label: "65-74".to_string(), points: "+1".to_string() },
                            SubCriterion { label: "≥75".to_string(), points: "+2".to_string() },
                        ],
                        points: None,
                    },
                    FormulaRow {
                        criteria: "Giới tính nữ".to_string(),
                        sub_criteria: Vec::new(),
                        points: Some("+1".to_string()),
                    },
                    FormulaRow {
                        criteria: "Suy tim, Tăng huyết áp, Bệnh mạch máu, Tiểu đường".to_string(),
                        sub_criteria: Vec::new(),
                        points: Some("+1 mỗi yếu tố".to_string()),
                    },
                    FormulaRow {
                        criteria: "Đột quỵ/TIA/Thuyên tắc".to_string(),
                        sub_criteria: Vec::new(),
                        points: Some("+2".to_string()),
                    },
                ],
                facts_figures: ANNUAL_RISK
                    .iter()
                    .enumerate()
                    .map(|(score, (ischemic, total))| FactsFiguresRow {
                        score: score as u32,
                        ischemic_risk: Some(ischemic.to_string()),
                        total_risk: Some(total.to_string()),
                        survival_5yr: None,
                        survival_10yr: None,
                    })
                    .collect(),
                appraisal: lines(&[
                    "Được khuyến cáo bởi ESC và AHA/ACC/HRS để quyết định chống đông trong rung nhĩ.",
                ]),
                literature: vec![
                    reference(
                        LiteratureKind::Original,
                        "Refining clinical risk stratification for predicting stroke and thromboembolism in atrial fibrillation",
                        "Lip GY, Nieuwlaat R, Pisters R, Lane DA, Crijns HJ. Chest. 2010;137(2):263-272.",
                        Some("19762550"),
                    ),
                    reference(
                        LiteratureKind::Validation,
                        "Evaluation of risk stratification schemes for ischaemic stroke and bleeding in 182 678 patients with atrial fibrillation",
                        "Friberg L, Rosenqvist M, Lip GY. Eur Heart J. 2012;33(12):1500-1510.",
                        Some("22246443"),
                    ),
                ],
            }),
            creator_insights: None,
            creator: Some(Creator {
                name: "BS. Gregory Lip".to_string(),
                title: Some("Giáo sư Tim mạch học tại Đại học Liverpool".to_string()),
                image: None,
            }),
            contributors: Vec::new(),
            related_ids: lines(&["has-bled", "wells-dvt"]),
        });
        &CONTENT
    }
}
