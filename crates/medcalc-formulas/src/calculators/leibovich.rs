use std::sync::LazyLock;

use medcalc_core::models::content::{
    CalculatorContent, EvidenceContent, FormulaRow, LiteratureKind, SubCriterion,
};
use medcalc_core::models::severity::SeverityTier;
use medcalc_core::models::specialty::Specialty;

use super::{lines, reference};
use crate::Calculator;
use crate::input::{CalculatorInput, InputOption, ValueBag};
use crate::presentation::PointContribution;
use crate::result::EvaluationResult;

/// Leibovich 2018 progression score for localized renal cell carcinoma.
pub struct Leibovich2018;

/// Sum of every field's maximum.
pub const MAX_SCORE: f64 = 23.0;

/// How a field's stored code turns into points.
#[derive(Debug, Clone, Copy)]
enum Rule {
    /// `points` when the code is at least 1.
    Present(f64),
    /// Points equal to `code − 1`, for 1-based ordinal scales.
    Ordinal { top: i64 },
    /// Fixed points per code.
    Table(&'static [(i64, f64)]),
}

/// Field id, chart label, scoring rule and maximum.
const FIELDS: [(&str, &str, Rule, f64); 13] = [
    ("rcc_type", "Loại mô học", Rule::Table(&[(1, 2.0), (2, 0.0), (3, 0.0)]), 2.0),
    ("age", "Tuổi", Rule::Present(1.0), 1.0),
    ("ecog", "ECOG", Rule::Present(1.0), 1.0),
    ("symptoms", "Triệu chứng", Rule::Present(1.0), 1.0),
    ("adrenal", "Tuyến thượng thận", Rule::Present(1.0), 1.0),
    ("margins", "Diện cắt", Rule::Present(1.0), 1.0),
    ("grade", "Độ ISUP", Rule::Ordinal { top: 4 }, 3.0),
    ("necrosis", "Hoại tử", Rule::Present(1.0), 1.0),
    ("sarcomatoid", "Sarcomatoid", Rule::Present(2.0), 2.0),
    ("size", "Kích thước u", Rule::Ordinal { top: 4 }, 3.0),
    ("fat", "Xâm lấn mỡ", Rule::Present(2.0), 2.0),
    ("thrombus", "Huyết khối", Rule::Table(&[(0, 0.0), (1, 1.0), (2, 2.0)]), 2.0),
    ("nodal", "Di căn hạch", Rule::Present(3.0), 3.0),
];

fn field_points(values: &ValueBag, id: &str, rule: Rule) -> f64 {
    let code = values.code(id).unwrap_or(0);
    match rule {
        Rule::Present(points) if code >= 1 => points,
        Rule::Present(_) => 0.0,
        Rule::Ordinal { top } => (code.clamp(1, top) - 1) as f64,
        Rule::Table(table) => table
            .iter()
            .find(|(c, _)| *c == code)
            .map_or(0.0, |(_, points)| *points),
    }
}

/// An ordinal option scoring `value − 1`.
fn ordinal_option(label: impl Into<String>, value: f64) -> InputOption {
    let option = InputOption::new(label, value);
    if value > 1.0 {
        option.with_delta(format!("+{}", value - 1.0))
    } else {
        option.with_delta("0")
    }
}

/// Points per field. Absent fields score nothing.
pub fn item_points(values: &ValueBag) -> Vec<PointContribution> {
    FIELDS
        .iter()
        .map(|(id, label, rule, max)| {
            PointContribution::new(id, label, field_points(values, id, *rule), *max)
        })
        .collect()
}

fn yes_no(id: &str, label: &str, yes_delta: &str) -> CalculatorInput {
    CalculatorInput::enumerated(
        id,
        label,
        vec![
            InputOption::new("Không", 0.0),
            InputOption::new("Có", 1.0).with_delta(yes_delta),
        ],
    )
}

impl Calculator for Leibovich2018 {
    fn id(&self) -> &str {
        "leibovich-2018"
    }

    fn name(&self) -> &str {
        "Thang điểm Leibovich 2018"
    }

    fn description(&self) -> &str {
        "Tiên lượng tiến triển và sống còn sau phẫu thuật ung thư tế bào thận."
    }

    fn specialties(&self) -> &[Specialty] {
        &[Specialty::Oncology, Specialty::Urology]
    }

    fn inputs(&self) -> &[CalculatorInput] {
        static INPUTS: LazyLock<Vec<CalculatorInput>> = LazyLock::new(|| {
            vec![
                CalculatorInput::enumerated(
                    "rcc_type",
                    "Loại mô học RCC",
                    vec![
                        InputOption::new("ccRCC", 1.0).with_delta("+2"),
                        InputOption::new("papRCC", 2.0).with_delta("0"),
                        InputOption::new("chrRCC", 3.0).with_delta("0"),
                    ],
                ),
                CalculatorInput::enumerated(
                    "age",
                    "Tuổi phẫu thuật",
                    vec![InputOption::new("<60", 0.0), InputOption::new("≥60", 1.0)],
                ),
                CalculatorInput::enumerated(
                    "ecog",
                    "Tình trạng ECOG",
                    vec![InputOption::new("0", 0.0), InputOption::new("≥1", 1.0)],
                ),
                yes_no("symptoms", "Triệu chứng thực thể", "+1"),
                yes_no("adrenal", "Xâm lấn tuyến thượng thận", "+1"),
                CalculatorInput::enumerated(
                    "margins",
                    "Diện cắt phẫu thuật",
                    vec![
                        InputOption::new("Âm tính", 0.0),
                        InputOption::new("Dương tính", 1.0),
                    ],
                ),
                CalculatorInput::enumerated(
                    "grade",
                    "Độ mô học (ISUP)",
                    (1..=4)
                        .map(|g| ordinal_option(g.to_string(), f64::from(g)))
                        .collect(),
                ),
                yes_no("necrosis", "Hoại tử đông", "+1"),
                yes_no("sarcomatoid", "Sarcomatoid", "+2"),
                CalculatorInput::enumerated(
                    "size",
                    "Kích thước u (cm)",
                    [("≤4", 1.0), ("4-7", 2.0), ("7-10", 3.0), (">10", 4.0)]
                        .into_iter()
                        .map(|(label, value)| ordinal_option(label, value))
                        .collect(),
                ),
                yes_no("fat", "Xâm lấn mỡ quanh thận", "+2"),
                CalculatorInput::enumerated(
                    "thrombus",
                    "Huyết khối tĩnh mạch",
                    vec![
                        InputOption::new("Không", 0.0),
                        InputOption::new("Nhánh", 1.0),
                        InputOption::new("TM chủ dưới", 2.0),
                    ],
                ),
                CalculatorInput::enumerated(
                    "nodal",
                    "Di căn hạch",
                    vec![
                        InputOption::new("NX/N0", 0.0),
                        InputOption::new("N1 (+)", 1.0).with_delta("+3"),
                    ],
                ),
            ]
        });
        &INPUTS
    }

    fn evaluate(&self, values: &ValueBag) -> EvaluationResult {
        let score: f64 = item_points(values).iter().map(|i| i.points).sum();
        let (interpretation, severity) = if score >= 9.0 {
            ("Nguy cơ Cao", SeverityTier::High)
        } else if score >= 5.0 {
            ("Nguy cơ Trung bình", SeverityTier::Moderate)
        } else {
            ("Nguy cơ Thấp", SeverityTier::Low)
        };
        EvaluationResult::computed(score, interpretation, severity)
            .with_details("Ước tính tỷ lệ sống sót đặc hiệu ung thư (CSS).")
    }

    fn point_breakdown(&self, values: &ValueBag) -> Vec<PointContribution> {
        item_points(values)
    }

    fn content(&self) -> &CalculatorContent {
        static CONTENT: LazyLock<CalculatorContent> = LazyLock::new(|| CalculatorContent {
            when_to_use: lines(&[
                "Bệnh nhân ung thư tế bào thận khu trú đã phẫu thuật cắt thận.",
            ]),
            pearls: lines(&[
                "Áp dụng cho ccRCC, papRCC và chrRCC.",
                "Di căn hạch N1 được tính 3 điểm.",
            ]),
            evidence: Some(EvidenceContent {
                formula: vec![
                    FormulaRow {
                        criteria: "Huyết khối tĩnh mạch".to_string(),
                        sub_criteria: vec![
                            SubCriterion { label: "Nhánh".to_string(), points: "+1".to_string() },
                            SubCriterion {
                                label: "TM chủ dưới".to_string(),
                                points: "+2".to_string(),
                            },
                        ],
                        points: None,
                    },
                    FormulaRow {
                        criteria: "Xâm lấn mỡ quanh thận".to_string(),
                        sub_criteria: Vec::new(),
                        points: Some("+2".to_string()),
                    },
                    FormulaRow {
                        criteria: "Di căn hạch N1".to_string(),
                        sub_criteria: Vec::new(),
                        points: Some("+3".to_string()),
                    },
                ],
                literature: vec![reference(
                    LiteratureKind::Original,
                    "Predicting Oncologic Outcomes in Renal Cell Carcinoma After Surgery",
                    "Leibovich BC, Lohse CM, Cheville JC, et al. Eur Urol. 2018;73(5):772-780.",
                    Some("29398265"),
                )],
                ..Default::default()
            }),
            ..CalculatorContent::default()
        });
        &CONTENT
    }
}
