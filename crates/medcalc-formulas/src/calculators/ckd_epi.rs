use std::sync::LazyLock;

use medcalc_core::models::content::{
    CalculatorContent, EvidenceContent, LiteratureKind, NextSteps,
};
use medcalc_core::models::specialty::Specialty;

use super::{creatinine_mg_dl, creatinine_unit_input, is_female, lines, reference, sex_input};
use crate::Calculator;
use crate::input::{CalculatorInput, InputOption, ValueBag};
use crate::presentation::PointContribution;
use crate::result::{CkdStage, EvaluationResult, round_to};

/// CKD-EPI eGFR, five equation variants.
pub struct CkdEpi;

/// Reference cystatin C, mg/L.
const CYSTATIN_REFERENCE: f64 = 0.8;

/// The selectable equations, in the order their selector lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CkdEquation {
    Creatinine2021,
    CreatinineCystatin2021,
    Creatinine2009,
    Cystatin2012,
    CreatinineCystatin2012,
}

/// Exponents on `min(ratio, 1)` and `max(ratio, 1)`.
#[derive(Debug, Clone, Copy)]
struct Piecewise {
    below: f64,
    above: f64,
}

impl Piecewise {
    fn apply(&self, ratio: f64) -> f64 {
        ratio.min(1.0).powf(self.below) * ratio.max(1.0).powf(self.above)
    }
}

#[derive(Debug, Clone, Copy)]
struct Coefficients {
    base: f64,
    /// Creatinine term: (female α, male α, exponent above κ).
    creatinine: Option<(f64, f64, f64)>,
    cystatin: Option<Piecewise>,
    age_decay: f64,
    female_factor: f64,
    black_race_factor: Option<f64>,
}

impl CkdEquation {
    pub const ALL: [CkdEquation; 5] = [
        CkdEquation::Creatinine2021,
        CkdEquation::CreatinineCystatin2021,
        CkdEquation::Creatinine2009,
        CkdEquation::Cystatin2012,
        CkdEquation::CreatinineCystatin2012,
    ];

    /// Selector code stored in the value bag.
    pub fn code(self) -> f64 {
        match self {
            CkdEquation::Creatinine2021 => 0.0,
            CkdEquation::CreatinineCystatin2021 => 1.0,
            CkdEquation::Creatinine2009 => 2.0,
            CkdEquation::Cystatin2012 => 3.0,
            CkdEquation::CreatinineCystatin2012 => 4.0,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        CkdEquation::ALL.into_iter().find(|eq| eq.code() as i64 == code)
    }

    pub fn label(self) -> &'static str {
        match self {
            CkdEquation::Creatinine2021 => "2021 CKD-EPI Creatinine",
            CkdEquation::CreatinineCystatin2021 => "2021 CKD-EPI Creatinine-Cystatin C",
            CkdEquation::Creatinine2009 => "2009 CKD-EPI Creatinine",
            CkdEquation::Cystatin2012 => "2012 CKD-EPI Cystatin C",
            CkdEquation::CreatinineCystatin2012 => "2012 CKD-EPI Creatinine-Cystatin C",
        }
    }

    pub fn uses_creatinine(self) -> bool {
        self.coefficients().creatinine.is_some()
    }

    pub fn uses_cystatin(self) -> bool {
        self.coefficients().cystatin.is_some()
    }

    fn coefficients(self) -> Coefficients {
        match self {
            CkdEquation::Creatinine2021 => Coefficients {
                base: 142.0,
                creatinine: Some((-0.241, -0.302, -1.200)),
                cystatin: None,
                age_decay: 0.9938,
                female_factor: 1.012,
                black_race_factor: None,
            },
            CkdEquation::CreatinineCystatin2021 => Coefficients {
                base: 135.0,
                creatinine: Some((-0.219, -0.144, -0.544)),
                cystatin: Some(Piecewise { below: -0.323, above: -0.778 }),
                age_decay: 0.9961,
                female_factor: 0.963,
                black_race_factor: None,
            },
            CkdEquation::Creatinine2009 => Coefficients {
                base: 141.0,
                creatinine: Some((-0.329, -0.411, -1.209)),
                cystatin: None,
                age_decay: 0.993,
                female_factor: 1.018,
                black_race_factor: Some(1.159),
            },
            CkdEquation::Cystatin2012 => Coefficients {
                base: 133.0,
                creatinine: None,
                cystatin: Some(Piecewise { below: -0.499, above: -1.328 }),
                age_decay: 0.996,
                female_factor: 0.932,
                black_race_factor: None,
            },
            CkdEquation::CreatinineCystatin2012 => Coefficients {
                base: 135.0,
                creatinine: Some((-0.248, -0.207, -0.601)),
                cystatin: Some(Piecewise { below: -0.375, above: -0.711 }),
                age_decay: 0.995,
                female_factor: 0.969,
                black_race_factor: None,
            },
        }
    }
}

/// Patient data one equation runs on. Biomarkers the equation does not use
/// may be `None`.
#[derive(Debug, Clone, Copy)]
pub struct EgfrInputs {
    pub female: bool,
    pub age: f64,
    pub creatinine_mg_dl: Option<f64>,
    pub cystatin_mg_l: Option<f64>,
    pub black: bool,
}

/// Unrounded eGFR in mL/min/1.73m², or `None` when a biomarker the equation
/// needs is missing or the inputs are too extreme for a finite result.
pub fn egfr(equation: CkdEquation, inputs: &EgfrInputs) -> Option<f64> {
    let c = equation.coefficients();
    let mut value = c.base * c.age_decay.powf(inputs.age);

    if let Some((alpha_female, alpha_male, above)) = c.creatinine {
        let (kappa, below) = if inputs.female {
            (0.7, alpha_female)
        } else {
            (0.9, alpha_male)
        };
        let scr = inputs.creatinine_mg_dl?;
        value *= Piecewise { below, above }.apply(scr / kappa);
    }
    if let Some(term) = c.cystatin {
        value *= term.apply(inputs.cystatin_mg_l? / CYSTATIN_REFERENCE);
    }
    if inputs.female {
        value *= c.female_factor;
    }
    if inputs.black {
        value *= c.black_race_factor.unwrap_or(1.0);
    }
    Some(value).filter(|v| v.is_finite())
}

impl Calculator for CkdEpi {
    fn id(&self) -> &str {
        "ckd-epi"
    }

    fn name(&self) -> &str {
        "Mức lọc cầu thận ước tính (CKD-EPI)"
    }

    fn description(&self) -> &str {
        "Ước tính mức lọc cầu thận (eGFR) theo Creatinine và/hoặc Cystatin C."
    }

    fn specialties(&self) -> &[Specialty] {
        &[Specialty::Nephrology]
    }

    fn inputs(&self) -> &[CalculatorInput] {
        static INPUTS: LazyLock<Vec<CalculatorInput>> = LazyLock::new(|| {
            vec![
                CalculatorInput::enumerated(
                    "equation",
                    "Phương trình",
                    CkdEquation::ALL
                        .iter()
                        .map(|eq| InputOption::new(eq.label(), eq.code()).with_delta(""))
                        .collect(),
                ),
                sex_input("sex", true),
                CalculatorInput::numeric("age", "Tuổi", Some(60.0)).with_unit("năm"),
                CalculatorInput::numeric("creatinine", "Creatinine huyết thanh", Some(80.0))
                    .with_help("Bắt buộc với các phương trình có Creatinine."),
                creatinine_unit_input("creatinine_unit"),
                CalculatorInput::numeric("cystatin", "Cystatin C", Some(0.8))
                    .with_unit("mg/L")
                    .with_help("Bắt buộc với các phương trình có Cystatin C."),
                CalculatorInput::boolean("black", "Người da đen")
                    .with_help("Chỉ dùng cho phương trình 2009."),
            ]
        });
        &INPUTS
    }

    fn evaluate(&self, values: &ValueBag) -> EvaluationResult {
        let equation = values
            .code("equation")
            .and_then(CkdEquation::from_code)
            .unwrap_or(CkdEquation::Creatinine2021);

        let mut missing = Vec::new();
        let female = is_female(values, "sex");
        if female.is_none() {
            missing.push("sex");
        }
        let age = values.positive("age");
        if age.is_none() {
            missing.push("age");
        }
        let creatinine = creatinine_mg_dl(values, "creatinine", "creatinine_unit");
        if equation.uses_creatinine() && creatinine.is_none() {
            missing.push("creatinine");
        }
        let cystatin = values.positive("cystatin");
        if equation.uses_cystatin() && cystatin.is_none() {
            missing.push("cystatin");
        }

        let (Some(female), Some(age)) = (female, age) else {
            return EvaluationResult::awaiting_input(&missing);
        };
        let inputs = EgfrInputs {
            female,
            age,
            creatinine_mg_dl: creatinine,
            cystatin_mg_l: cystatin,
            black: values.flag("black"),
        };
        if !missing.is_empty() {
            return EvaluationResult::awaiting_input(&missing);
        }
        let Some(gfr) = egfr(equation, &inputs) else {
            let mut suspect = vec!["age"];
            if equation.uses_creatinine() {
                suspect.push("creatinine");
            }
            if equation.uses_cystatin() {
                suspect.push("cystatin");
            }
            return EvaluationResult::awaiting_input(&suspect);
        };

        let stage = CkdStage::from_egfr(gfr);
        EvaluationResult::computed(
            round_to(gfr, 0),
            format!("Giai đoạn {}", stage.label()),
            stage.severity(),
        )
        .with_details(format!("Sử dụng: {}.", equation.label()))
        .with_stage(stage)
    }

    fn point_breakdown(&self, _values: &ValueBag) -> Vec<PointContribution> {
        Vec::new()
    }

    fn content(&self) -> &CalculatorContent {
        static CONTENT: LazyLock<CalculatorContent> = LazyLock::new(|| CalculatorContent {
            when_to_use: lines(&[
                "Ước tính chức năng thận ở người trưởng thành có Creatinine ổn định.",
            ]),
            pearls: lines(&[
                "Phương trình 2021 không dùng hệ số chủng tộc và được KDIGO khuyến cáo.",
                "Kết hợp Cystatin C cho kết quả chính xác hơn khi khối cơ bất thường.",
            ]),
            next_steps: Some(NextSteps {
                advice: lines(&[
                    "G3a trở xuống: hiệu chỉnh liều thuốc thải qua thận.",
                    "G4-G5: chuyển khám chuyên khoa Thận, chuẩn bị điều trị thay thế thận.",
                ]),
                ..Default::default()
            }),
            evidence: Some(EvidenceContent {
                literature: vec![
                    reference(
                        LiteratureKind::Original,
                        "A new equation to estimate glomerular filtration rate",
                        "Levey AS, Stevens LA, Schmid CH, et al. Ann Intern Med. 2009;150(9):604-612.",
                        Some("19414839"),
                    ),
                    reference(
                        LiteratureKind::Original,
                        "Estimating glomerular filtration rate from serum creatinine and cystatin C",
                        "Inker LA, Schmid CH, Tighiouart H, et al. N Engl J Med. 2012;367(1):20-29.",
                        Some("22762315"),
                    ),
                    reference(
                        LiteratureKind::Original,
                        "New Creatinine- and Cystatin C-Based Equations to Estimate GFR without Race",
                        "Inker LA, Eneanya ND, Coresh J, et al. N Engl J Med. 2021;385(19):1737-1749.",
                        Some("34554658"),
                    ),
                ],
                ..Default::default()
            }),
            related_ids: lines(&["crcl"]),
            ..CalculatorContent::default()
        });
        &CONTENT
    }
}
