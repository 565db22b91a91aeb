use axum::Json;
use serde::Serialize;

use medcalc_core::models::specialty::{ALL_SPECIALTIES_LABEL, Specialty};

#[derive(Serialize)]
pub struct SpecialtyList {
    all_label: &'static str,
    specialties: Vec<SpecialtyEntry>,
}

#[derive(Serialize)]
pub struct SpecialtyEntry {
    slug: &'static str,
    label: &'static str,
}

pub async fn list_specialties() -> Json<SpecialtyList> {
    Json(SpecialtyList {
        all_label: ALL_SPECIALTIES_LABEL,
        specialties: Specialty::ALL
            .iter()
            .map(|s| SpecialtyEntry {
                slug: s.slug(),
                label: s.label(),
            })
            .collect(),
    })
}
