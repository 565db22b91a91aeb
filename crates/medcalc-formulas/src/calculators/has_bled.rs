use std::sync::LazyLock;

use medcalc_core::models::content::{CalculatorContent, EvidenceContent, LiteratureKind};
use medcalc_core::models::severity::SeverityTier;
use medcalc_core::models::specialty::Specialty;

use super::{lines, reference};
use crate::Calculator;
use crate::input::{CalculatorInput, InputOption, ValueBag};
use crate::result::EvaluationResult;

/// HAS-BLED: major bleeding risk on anticoagulation.
pub struct HasBled;

/// Field id with the most points it can award.
const ITEMS: [(&str, f64); 7] = [
    ("h", 1.0),
    ("a", 2.0),
    ("s", 1.0),
    ("b", 1.0),
    ("l", 1.0),
    ("e", 1.0),
    ("d", 2.0),
];

fn pair_input(id: &str, label: &str, one: &str) -> CalculatorInput {
    CalculatorInput::enumerated(
        id,
        label,
        vec![
            InputOption::new("Không", 0.0),
            InputOption::new(one, 1.0),
            InputOption::new("Có (Cả 2)", 2.0),
        ],
    )
}

impl Calculator for HasBled {
    fn id(&self) -> &str {
        "has-bled"
    }

    fn name(&self) -> &str {
        "Thang điểm HAS-BLED"
    }

    fn description(&self) -> &str {
        "Đánh giá nguy cơ chảy máu lớn ở bệnh nhân đang dùng chống đông."
    }

    fn specialties(&self) -> &[Specialty] {
        &[Specialty::Cardiology]
    }

    fn inputs(&self) -> &[CalculatorInput] {
        static INPUTS: LazyLock<Vec<CalculatorInput>> = LazyLock::new(|| {
            vec![
                CalculatorInput::boolean("h", "Tăng huyết áp (HA tâm thu >160)"),
                pair_input(
                    "a",
                    "Bất thường chức năng Thận hoặc Gan (+1 mỗi cơ quan)",
                    "Có (1 cơ quan)",
                ),
                CalculatorInput::boolean("s", "Tiền sử Đột quỵ"),
                CalculatorInput::boolean("b", "Tiền sử Chảy máu hoặc Xuất huyết"),
                CalculatorInput::boolean("l", "INR dao động (nếu dùng Warfarin)"),
                CalculatorInput::boolean("e", "Người già (Tuổi > 65)"),
                pair_input(
                    "d",
                    "Thuốc kháng tiểu cầu hoặc Rượu (+1 mỗi loại)",
                    "Có (1 loại)",
                ),
            ]
        });
        &INPUTS
    }

    fn evaluate(&self, values: &ValueBag) -> EvaluationResult {
        let score: f64 = ITEMS
            .iter()
            .map(|(id, max)| values.points(id).min(*max))
            .sum();
        let (interpretation, severity) = if score >= 3.0 {
            ("Nguy cơ chảy máu CAO.", SeverityTier::High)
        } else {
            ("Nguy cơ chảy máu thấp/trung bình.", SeverityTier::Low)
        };
        EvaluationResult::computed(score, interpretation, severity)
            .with_details("Cần thận trọng và theo dõi sát khi dùng chống đông.")
    }

    fn content(&self) -> &CalculatorContent {
        static CONTENT: LazyLock<CalculatorContent> = LazyLock::new(|| CalculatorContent {
            pearls: lines(&[
                "Điểm cao không phải chống chỉ định chống đông; cần kiểm soát các yếu tố nguy cơ có thể thay đổi.",
            ]),
            evidence: Some(EvidenceContent {
                literature: vec![reference(
                    LiteratureKind::Original,
                    "A novel user-friendly score (HAS-BLED) to assess 1-year risk of major bleeding in patients with atrial fibrillation: the Euro Heart Survey",
                    "Pisters R, Lane DA, Nieuwlaat R, de Vos CB, Crijns HJ, Lip GY. Chest. 2010;138(5):1093-1100.",
                    Some("20299623"),
                )],
                ..Default::default()
            }),
            related_ids: lines(&["chads2vasc"]),
            ..CalculatorContent::default()
        });
        &CONTENT
    }
}
