use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Label of the pseudo-specialty that matches every calculator.
pub const ALL_SPECIALTIES_LABEL: &str = "Tất cả";

/// Clinical specialty a calculator is filed under.
///
/// Serialized with the bundled Vietnamese label, which is also what the
/// browsing UI shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Specialty {
    #[serde(rename = "Tim mạch")]
    Cardiology,
    #[serde(rename = "Hồi sức cấp cứu")]
    CriticalCare,
    #[serde(rename = "Nội tiết")]
    Endocrinology,
    #[serde(rename = "Tiêu hóa")]
    Gastroenterology,
    #[serde(rename = "Thận học")]
    Nephrology,
    #[serde(rename = "Thần kinh")]
    Neurology,
    #[serde(rename = "Sản phụ khoa")]
    Obstetrics,
    #[serde(rename = "Nhi khoa")]
    Pediatrics,
    #[serde(rename = "Hô hấp")]
    Pulmonology,
    #[serde(rename = "Ung bướu")]
    Oncology,
    #[serde(rename = "Ngoại tiết niệu")]
    Urology,
}

impl Specialty {
    /// Every specialty, in the order the browsing sidebar lists them.
    pub const ALL: [Specialty; 11] = [
        Specialty::Cardiology,
        Specialty::CriticalCare,
        Specialty::Endocrinology,
        Specialty::Gastroenterology,
        Specialty::Nephrology,
        Specialty::Neurology,
        Specialty::Obstetrics,
        Specialty::Pediatrics,
        Specialty::Pulmonology,
        Specialty::Oncology,
        Specialty::Urology,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Specialty::Cardiology => "Tim mạch",
            Specialty::CriticalCare => "Hồi sức cấp cứu",
            Specialty::Endocrinology => "Nội tiết",
            Specialty::Gastroenterology => "Tiêu hóa",
            Specialty::Nephrology => "Thận học",
            Specialty::Neurology => "Thần kinh",
            Specialty::Obstetrics => "Sản phụ khoa",
            Specialty::Pediatrics => "Nhi khoa",
            Specialty::Pulmonology => "Hô hấp",
            Specialty::Oncology => "Ung bướu",
            Specialty::Urology => "Ngoại tiết niệu",
        }
    }

    /// ASCII identifier, accepted as an alternative to the label in query strings.
    pub fn slug(&self) -> &'static str {
        match self {
            Specialty::Cardiology => "cardiology",
            Specialty::CriticalCare => "critical_care",
            Specialty::Endocrinology => "endocrinology",
            Specialty::Gastroenterology => "gastroenterology",
            Specialty::Nephrology => "nephrology",
            Specialty::Neurology => "neurology",
            Specialty::Obstetrics => "obstetrics",
            Specialty::Pediatrics => "pediatrics",
            Specialty::Pulmonology => "pulmonology",
            Specialty::Oncology => "oncology",
            Specialty::Urology => "urology",
        }
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Specialty {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Specialty::ALL
            .into_iter()
            .find(|sp| sp.label() == s || sp.slug().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::UnknownSpecialty(s.to_string()))
    }
}

/// Specialty selector used when browsing the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecialtyFilter {
    /// The "Tất cả" pseudo-specialty: everything passes.
    #[default]
    All,
    Only(Specialty),
}

impl SpecialtyFilter {
    pub fn matches(&self, specialties: &[Specialty]) -> bool {
        match self {
            SpecialtyFilter::All => true,
            SpecialtyFilter::Only(wanted) => specialties.contains(wanted),
        }
    }
}

impl From<Specialty> for SpecialtyFilter {
    fn from(specialty: Specialty) -> Self {
        SpecialtyFilter::Only(specialty)
    }
}

impl FromStr for SpecialtyFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == ALL_SPECIALTIES_LABEL || s.eq_ignore_ascii_case("all") {
            return Ok(SpecialtyFilter::All);
        }
        s.parse().map(SpecialtyFilter::Only)
    }
}
