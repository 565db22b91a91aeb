use std::sync::LazyLock;

use medcalc_core::models::content::{
    CalculatorContent, EvidenceContent, FormulaRow, LiteratureKind, NextSteps, SubCriterion,
};
use medcalc_core::models::severity::SeverityTier;
use medcalc_core::models::specialty::Specialty;

use super::{lines, reference};
use crate::Calculator;
use crate::input::{CalculatorInput, InputOption, ValueBag};
use crate::result::{EvaluationResult, GcsComponents};

/// Stored value of a "not testable" component.
pub const NOT_TESTABLE: f64 = -1.0;

/// Glasgow Coma Scale.
///
/// A component that cannot be assessed (swelling, intubation, sedation) is
/// recorded as [`NOT_TESTABLE`]; the total is then withheld and only the
/// components are reported.
pub struct GlasgowComaScale;

fn component_input(id: &str, label: &str, scale: &[(&str, f64)], nt_label: &str) -> CalculatorInput {
    let mut options: Vec<InputOption> = scale
        .iter()
        .map(|(label, value)| InputOption::new(*label, *value))
        .collect();
    options.push(InputOption::new(nt_label, NOT_TESTABLE).with_delta("NT"));
    CalculatorInput::enumerated(id, label, options)
}

/// A component value: `Ok(Some(n))` for a score in range, `Ok(None)` for
/// not testable, `Err(())` when absent or outside the scale.
fn component(values: &ValueBag, id: &str, max: i64) -> Result<Option<u8>, ()> {
    match values.code(id) {
        Some(-1) => Ok(None),
        Some(n) if (1..=max).contains(&n) => Ok(Some(n as u8)),
        _ => Err(()),
    }
}

impl Calculator for GlasgowComaScale {
    fn id(&self) -> &str {
        "gcs"
    }

    fn name(&self) -> &str {
        "Thang điểm Hôn mê Glasgow (GCS)"
    }

    fn description(&self) -> &str {
        "Đánh giá mức độ ý thức của bệnh nhân sau chấn thương sọ não."
    }

    fn specialties(&self) -> &[Specialty] {
        &[Specialty::Neurology, Specialty::CriticalCare]
    }

    fn inputs(&self) -> &[CalculatorInput] {
        static INPUTS: LazyLock<Vec<CalculatorInput>> = LazyLock::new(|| {
            vec![
                component_input(
                    "eye",
                    "Mở mắt (Eye)",
                    &[
                        ("Mở mắt tự nhiên", 4.0),
                        ("Mở mắt khi gọi", 3.0),
                        ("Mở mắt khi kích thích đau", 2.0),
                        ("Không mở mắt", 1.0),
                    ],
                    "Không đánh giá được (phù nề mi mắt...)",
                ),
                component_input(
                    "verbal",
                    "Đáp ứng lời nói (Verbal)",
                    &[
                        ("Định hướng tốt", 5.0),
                        ("Trả lời lẫn lộn", 4.0),
                        ("Trả lời không phù hợp", 3.0),
                        ("Âm thanh khó hiểu", 2.0),
                        ("Không đáp ứng", 1.0),
                    ],
                    "Không đánh giá được (đặt nội khí quản...)",
                ),
                component_input(
                    "motor",
                    "Đáp ứng vận động (Motor)",
                    &[
                        ("Làm theo lệnh", 6.0),
                        ("Định khu được kích thích đau", 5.0),
                        ("Rụt chi khi kích thích đau", 4.0),
                        ("Gấp cứng (mất vỏ)", 3.0),
                        ("Duỗi cứng (mất não)", 2.0),
                        ("Không đáp ứng", 1.0),
                    ],
                    "Không đánh giá được (liệt, an thần...)",
                ),
            ]
        });
        &INPUTS
    }

    fn evaluate(&self, values: &ValueBag) -> EvaluationResult {
        let eye = component(values, "eye", 4);
        let verbal = component(values, "verbal", 5);
        let motor = component(values, "motor", 6);

        let missing: Vec<&str> = [("eye", &eye), ("verbal", &verbal), ("motor", &motor)]
            .into_iter()
            .filter(|(_, c)| c.is_err())
            .map(|(id, _)| id)
            .collect();
        let (Ok(eye), Ok(verbal), Ok(motor)) = (eye, verbal, motor) else {
            return EvaluationResult::awaiting_input(&missing);
        };

        let components = GcsComponents { eye, verbal, motor };
        let Some(total) = components.total() else {
            return EvaluationResult::not_testable(components, "Không thể tính tổng điểm (NT)")
                .with_details(format!(
                    "Kết quả thành phần: {components}. Tổng điểm GCS không hợp lệ khi có thành phần NT."
                ));
        };

        let (interpretation, severity, details) = match total {
            13.. => (
                "Chấn thương sọ não Nhẹ",
                SeverityTier::Low,
                "Theo dõi ý thức định kỳ.",
            ),
            9..=12 => (
                "Chấn thương sọ não Trung bình",
                SeverityTier::Moderate,
                "Theo dõi sát, cân nhắc chụp CT sọ não.",
            ),
            _ => (
                "Hôn mê / Chấn thương sọ não Nặng",
                SeverityTier::High,
                "GCS ≤ 8: cân nhắc đặt nội khí quản bảo vệ đường thở.",
            ),
        };

        EvaluationResult::computed(f64::from(total), interpretation, severity)
            .with_details(format!("{details} ({components})"))
    }

    fn content(&self) -> &CalculatorContent {
        static CONTENT: LazyLock<CalculatorContent> = LazyLock::new(|| CalculatorContent {
            when_to_use: lines(&[
                "Đánh giá ban đầu và theo dõi diễn tiến ý thức ở bệnh nhân chấn thương sọ não hoặc rối loạn ý thức.",
            ]),
            pearls: lines(&[
                "Ghi lại từng thành phần (ví dụ E3V4M5) thay vì chỉ tổng điểm.",
                "Thành phần không đánh giá được ghi là NT; khi đó không cộng tổng điểm.",
            ]),
            why_use: Some(
                "Ngôn ngữ chung để mô tả mức độ ý thức giữa các nhân viên y tế.".to_string(),
            ),
            next_steps: Some(NextSteps {
                advice: lines(&[
                    "13-15: nhẹ. 9-12: trung bình. 3-8: nặng.",
                ]),
                management: Vec::new(),
                critical_actions: Some(
                    "GCS ≤ 8 thường là chỉ định bảo vệ đường thở.".to_string(),
                ),
            }),
            evidence: Some(EvidenceContent {
                formula: vec![
                    FormulaRow {
                        criteria: "Mở mắt (E)".to_string(),
                        sub_criteria: vec![SubCriterion {
                            label: "1-4".to_string(),
                            points: "1-4".to_string(),
                        }],
                        points: None,
                    },
                    FormulaRow {
                        criteria: "Lời nói (V)".to_string(),
                        sub_criteria: vec![SubCriterion {
                            label: "1-5".to_string(),
                            points: "1-5".to_string(),
                        }],
                        points: None,
                    },
                    FormulaRow {
                        criteria: "Vận động (M)".to_string(),
                        sub_criteria: vec![SubCriterion {
                            label: "1-6".to_string(),
                            points: "1-6".to_string(),
                        }],
                        points: None,
                    },
                ],
                facts_figures: Vec::new(),
                appraisal: Vec::new(),
                literature: vec![reference(
                    LiteratureKind::Original,
                    "Assessment of coma and impaired consciousness. A practical scale",
                    "Teasdale G, Jennett B. Lancet. 1974;2(7872):81-84.",
                    Some("4136544"),
                )],
            }),
            related_ids: lines(&["sofa"]),
            ..CalculatorContent::default()
        });
        &CONTENT
    }
}
