//! The bundled calculators, one module each.

pub mod anion_gap;
pub mod bmi;
pub mod chads2vasc;
pub mod ckd_epi;
pub mod cockcroft_gault;
pub mod curb65;
pub mod gcs;
pub mod has_bled;
pub mod leibovich;
pub mod parkland;
pub mod qsofa;
pub mod sofa;

use medcalc_core::models::content::{LiteratureItem, LiteratureKind};

use crate::Calculator;
use crate::input::{CalculatorInput, InputOption, ValueBag};

/// Serum creatinine conversion factor.
pub const CREATININE_UMOL_PER_MG_DL: f64 = 88.4;

/// Catalog order of the bundled calculators.
pub fn builtin() -> Vec<Box<dyn Calculator>> {
    vec![
        Box::new(chads2vasc::Chads2Vasc),
        Box::new(gcs::GlasgowComaScale),
        Box::new(sofa::Sofa),
        Box::new(qsofa::QSofa),
        Box::new(has_bled::HasBled),
        Box::new(anion_gap::AnionGap),
        Box::new(bmi::Bmi),
        Box::new(ckd_epi::CkdEpi),
        Box::new(cockcroft_gault::CockcroftGault),
        Box::new(curb65::Curb65),
        Box::new(parkland::Parkland),
        Box::new(leibovich::Leibovich2018),
    ]
}

pub(crate) fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub(crate) fn reference(
    kind: LiteratureKind,
    title: &str,
    citation: &str,
    pubmed_id: Option<&str>,
) -> LiteratureItem {
    LiteratureItem {
        kind,
        title: title.to_string(),
        citation: citation.to_string(),
        pubmed_id: pubmed_id.map(str::to_string),
    }
}

/// Option values of the creatinine unit selector.
pub(crate) const UNIT_MG_DL: f64 = 0.0;
pub(crate) const UNIT_UMOL_L: f64 = 1.0;

pub(crate) fn creatinine_unit_input(id: &str) -> CalculatorInput {
    CalculatorInput::enumerated(
        id,
        "Đơn vị Creatinine",
        vec![
            InputOption::new("µmol/L", UNIT_UMOL_L),
            InputOption::new("mg/dL", UNIT_MG_DL),
        ],
    )
}

/// Serum creatinine in mg/dL, if present and nonzero. An absent unit
/// selector means µmol/L, the selector's default.
pub(crate) fn creatinine_mg_dl(values: &ValueBag, value_id: &str, unit_id: &str) -> Option<f64> {
    let raw = values.positive(value_id)?;
    let mg_dl = match values.get(unit_id) {
        Some(unit) if unit == UNIT_MG_DL => raw,
        _ => raw / CREATININE_UMOL_PER_MG_DL,
    };
    // Subnormal µmol/L values can underflow to zero.
    (mg_dl > 0.0).then_some(mg_dl)
}

/// Which sex the evaluator applies; selectors store female as 1.
pub(crate) fn is_female(values: &ValueBag, id: &str) -> Option<bool> {
    match values.code(id)? {
        0 => Some(false),
        1 => Some(true),
        _ => None,
    }
}

pub(crate) fn sex_input(id: &str, female_first: bool) -> CalculatorInput {
    let male = InputOption::new("Nam", 0.0);
    let female = InputOption::new("Nữ", 1.0);
    let options = if female_first {
        vec![female, male]
    } else {
        vec![male, female]
    };
    CalculatorInput::enumerated(id, "Giới tính", options)
}
