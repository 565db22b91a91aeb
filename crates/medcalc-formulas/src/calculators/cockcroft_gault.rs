use std::sync::LazyLock;

use medcalc_core::models::content::{
    CalculatorContent, EvidenceContent, LiteratureKind, NextSteps,
};
use medcalc_core::models::severity::SeverityTier;
use medcalc_core::models::specialty::Specialty;

use super::bmi::body_mass_index;
use super::{creatinine_mg_dl, creatinine_unit_input, is_female, lines, reference, sex_input};
use crate::Calculator;
use crate::input::{CalculatorInput, ValueBag};
use crate::presentation::PointContribution;
use crate::result::{EvaluationResult, ResultFigure, format_number, round_to};

/// Cockcroft-Gault creatinine clearance, run on actual, ideal and adjusted
/// body weight.
pub struct CockcroftGault;

const CM_PER_INCH: f64 = 2.54;
const FEMALE_FACTOR: f64 = 0.85;
/// Primary clearance below this is flagged as severe impairment, mL/min.
const SEVERE_THRESHOLD: f64 = 30.0;

/// Which body weight the primary figure was computed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightBasis {
    Actual,
    Ideal,
    Adjusted,
}

/// The three clearances and the weights behind them. Everything is rounded
/// to one decimal.
#[derive(Debug, Clone, PartialEq)]
pub struct Clearances {
    pub actual: f64,
    /// `None` without a usable height.
    pub ideal: Option<f64>,
    pub adjusted: Option<f64>,
    pub primary: f64,
    pub basis: WeightBasis,
    pub ideal_weight: Option<f64>,
    pub adjusted_weight: Option<f64>,
    pub bmi: Option<f64>,
}

/// Devine ideal body weight in kg.
pub fn ideal_body_weight(female: bool, height_cm: f64) -> f64 {
    let base = if female { 45.5 } else { 50.0 };
    base + 2.3 * (height_cm / CM_PER_INCH - 60.0)
}

/// `IBW + 0.4 × (actual − IBW)`.
pub fn adjusted_body_weight(ideal: f64, actual: f64) -> f64 {
    ideal + 0.4 * (actual - ideal)
}

fn clearance(female: bool, age: f64, weight: f64, scr_mg_dl: f64) -> Option<f64> {
    let crcl = (140.0 - age) * weight / (72.0 * scr_mg_dl);
    let crcl = if female { crcl * FEMALE_FACTOR } else { crcl };
    crcl.is_finite().then_some(crcl)
}

/// All three clearances, with the primary one picked by BMI: actual weight
/// below 18.5, ideal below 25, adjusted otherwise.
///
/// `None` when even the actual-weight clearance overflows. An ideal or
/// adjusted clearance that overflows is dropped on its own.
pub fn clearances(
    female: bool,
    age: f64,
    weight: f64,
    scr_mg_dl: f64,
    height_cm: Option<f64>,
) -> Option<Clearances> {
    let actual = clearance(female, age, weight, scr_mg_dl)?;
    let ideal_weight = height_cm
        .map(|h| ideal_body_weight(female, h))
        .filter(|ibw| ibw.is_finite() && *ibw > 0.0);
    let adjusted_weight = ideal_weight.map(|ibw| adjusted_body_weight(ibw, weight));
    let ideal = ideal_weight.and_then(|w| clearance(female, age, w, scr_mg_dl));
    let adjusted = adjusted_weight.and_then(|w| clearance(female, age, w, scr_mg_dl));
    let bmi = height_cm.and_then(|h| body_mass_index(weight, h));

    let (primary, basis) = match (bmi, ideal, adjusted) {
        (Some(bmi), Some(ideal), Some(_)) if (18.5..25.0).contains(&bmi) => {
            (ideal, WeightBasis::Ideal)
        }
        (Some(bmi), Some(_), Some(adjusted)) if bmi >= 25.0 => (adjusted, WeightBasis::Adjusted),
        _ => (actual, WeightBasis::Actual),
    };

    Some(Clearances {
        actual: round_to(actual, 1),
        ideal: ideal.map(|v| round_to(v, 1)),
        adjusted: adjusted.map(|v| round_to(v, 1)),
        primary: round_to(primary, 1),
        basis,
        ideal_weight: ideal_weight.map(|v| round_to(v, 1)),
        adjusted_weight: adjusted_weight.map(|v| round_to(v, 1)),
        bmi: bmi.map(|v| round_to(v, 1)),
    })
}

impl Calculator for CockcroftGault {
    fn id(&self) -> &str {
        "crcl"
    }

    fn name(&self) -> &str {
        "Độ thanh thải Creatinine (Cockcroft-Gault)"
    }

    fn description(&self) -> &str {
        "Ước tính độ thanh thải Creatinine theo cân nặng thực, lý tưởng và hiệu chỉnh."
    }

    fn specialties(&self) -> &[Specialty] {
        &[Specialty::Nephrology, Specialty::CriticalCare]
    }

    fn inputs(&self) -> &[CalculatorInput] {
        static INPUTS: LazyLock<Vec<CalculatorInput>> = LazyLock::new(|| {
            vec![
                sex_input("sex", true),
                CalculatorInput::numeric("age", "Tuổi", Some(80.0)).with_unit("năm"),
                CalculatorInput::numeric("weight", "Cân nặng", Some(70.0)).with_unit("kg"),
                CalculatorInput::numeric("creatinine", "Creatinine huyết thanh", Some(170.0)),
                creatinine_unit_input("creatinine_unit"),
                CalculatorInput::numeric("height", "Chiều cao", Some(165.0))
                    .with_unit("cm")
                    .with_help("Dùng để tính cân nặng lý tưởng và hiệu chỉnh."),
            ]
        });
        &INPUTS
    }

    fn evaluate(&self, values: &ValueBag) -> EvaluationResult {
        let female = is_female(values, "sex");
        let age = values.positive("age").filter(|a| *a < 140.0);
        let weight = values.positive("weight");
        let scr = creatinine_mg_dl(values, "creatinine", "creatinine_unit");

        let (Some(female), Some(age), Some(weight), Some(scr)) = (female, age, weight, scr) else {
            let missing: Vec<&str> = [
                ("sex", female.is_none()),
                ("age", age.is_none()),
                ("weight", weight.is_none()),
                ("creatinine", scr.is_none()),
            ]
            .into_iter()
            .filter_map(|(id, absent)| absent.then_some(id))
            .collect();
            return EvaluationResult::awaiting_input(&missing);
        };

        let Some(c) = clearances(female, age, weight, scr, values.positive("height")) else {
            return EvaluationResult::awaiting_input(&["age", "weight", "creatinine"]);
        };
        let (interpretation, severity) = if c.primary < SEVERE_THRESHOLD {
            ("Suy thận nặng", SeverityTier::High)
        } else {
            ("Chức năng ổn định", SeverityTier::Low)
        };

        let basis = match c.basis {
            WeightBasis::Actual => "cân nặng thực",
            WeightBasis::Ideal => "cân nặng lý tưởng",
            WeightBasis::Adjusted => "cân nặng hiệu chỉnh",
        };
        let mut result = EvaluationResult::computed(c.primary, interpretation, severity)
            .with_details(format!("Kết quả chính tính theo {basis}."))
            .with_figure(ResultFigure::new(
                "Cockcroft-Gault nguyên bản",
                format_number(c.actual),
                Some("mL/min"),
            ));

        if let (Some(ideal), Some(adjusted), Some(abw)) = (c.ideal, c.adjusted, c.adjusted_weight) {
            let (low, high) = if ideal < adjusted {
                (ideal, adjusted)
            } else {
                (adjusted, ideal)
            };
            result = result
                .with_figure(ResultFigure::new(
                    "Hiệu chỉnh cho BN thừa cân",
                    format_number(adjusted),
                    Some("mL/min"),
                ))
                .with_figure(ResultFigure::new(
                    "Dải IBW - hiệu chỉnh",
                    format!("{}-{}", format_number(low), format_number(high)),
                    Some("mL/min"),
                ))
                .with_figure(ResultFigure::new(
                    "Cân nặng hiệu chỉnh",
                    format_number(abw),
                    Some("kg"),
                ));
        }
        if let Some(bmi) = c.bmi {
            result = result.with_figure(ResultFigure::new("BMI", format_number(bmi), Some("kg/m²")));
        }
        result
    }

    fn point_breakdown(&self, values: &ValueBag) -> Vec<PointContribution> {
        let result = self.evaluate(values);
        let Some(primary) = result.score.value() else {
            return Vec::new();
        };
        let bmi = values
            .positive("weight")
            .zip(values.positive("height"))
            .and_then(|(w, h)| body_mass_index(w, h))
            .map(|v| round_to(v, 1))
            .unwrap_or(0.0);
        vec![
            PointContribution::new("bmi", "BMI", bmi, 40.0),
            PointContribution::new("primary", "CrCl Chính", primary, 120.0),
        ]
    }

    fn content(&self) -> &CalculatorContent {
        static CONTENT: LazyLock<CalculatorContent> = LazyLock::new(|| CalculatorContent {
            when_to_use: lines(&[
                "Hiệu chỉnh liều thuốc thải qua thận, đặc biệt ở người cao tuổi.",
            ]),
            pearls: lines(&[
                "Cân nặng dùng để tính phụ thuộc BMI: thực (<18.5), lý tưởng (18.5-24.9), hiệu chỉnh (≥25).",
                "Hiện vẫn còn tranh luận về việc nên sử dụng loại cân nặng nào.",
            ]),
            next_steps: Some(NextSteps {
                critical_actions: Some(
                    "CrCl < 30 mL/min: rà soát và giảm liều các thuốc thải qua thận.".to_string(),
                ),
                ..Default::default()
            }),
            evidence: Some(EvidenceContent {
                literature: vec![
                    reference(
                        LiteratureKind::Original,
                        "Prediction of creatinine clearance from serum creatinine",
                        "Cockcroft DW, Gault MH. Nephron. 1976;16(1):31-41.",
                        Some("1244564"),
                    ),
                    reference(
                        LiteratureKind::Guideline,
                        "Functional range of creatinine clearance for renal drug dosing: a practical solution to the controversy of which weight to use in the Cockcroft-Gault equation",
                        "Brown DL, Masselink AJ, Lalla CD. Ann Pharmacother. 2013;47(7-8):1039-1044.",
                        Some("23757387"),
                    ),
                ],
                ..Default::default()
            }),
            related_ids: lines(&["ckd-epi", "bmi"]),
            ..CalculatorContent::default()
        });
        &CONTENT
    }
}
