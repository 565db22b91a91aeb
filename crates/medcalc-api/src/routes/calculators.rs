use axum::Json;
use axum::extract::{Path, Query};
use serde::{Deserialize, Serialize};

use medcalc_core::models::content::CalculatorContent;
use medcalc_core::models::specialty::{Specialty, SpecialtyFilter};
use medcalc_formulas::Calculator;
use medcalc_formulas::input::{CalculatorInput, ValueBag};
use medcalc_formulas::presentation::{self, DisplayResult};
use medcalc_formulas::registry::registry;

use crate::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    q: Option<String>,
    specialty: Option<String>,
}

#[derive(Serialize)]
pub struct CalculatorSummary {
    id: String,
    name: String,
    description: String,
    specialties: Vec<Specialty>,
}

impl CalculatorSummary {
    fn of(calculator: &dyn Calculator) -> Self {
        Self {
            id: calculator.id().to_string(),
            name: calculator.name().to_string(),
            description: calculator.description().to_string(),
            specialties: calculator.specialties().to_vec(),
        }
    }
}

#[derive(Serialize)]
pub struct CalculatorDetail {
    #[serde(flatten)]
    summary: CalculatorSummary,
    inputs: Vec<CalculatorInput>,
    content: CalculatorContent,
    related: Vec<CalculatorSummary>,
}

pub async fn list_calculators(
    Query(query): Query<CatalogQuery>,
) -> Result<Json<Vec<CalculatorSummary>>, ApiError> {
    let specialty: SpecialtyFilter = query.specialty.as_deref().unwrap_or("").parse()?;
    let search = query.q.as_deref().unwrap_or("");

    let calculators = registry()
        .filter(search, specialty)
        .into_iter()
        .map(CalculatorSummary::of)
        .collect();
    Ok(Json(calculators))
}

pub async fn get_calculator_detail(
    Path(id): Path<String>,
) -> Result<Json<CalculatorDetail>, ApiError> {
    let calculator = registry().require(&id)?;

    Ok(Json(CalculatorDetail {
        summary: CalculatorSummary::of(calculator),
        inputs: calculator.inputs().to_vec(),
        content: calculator.content().clone(),
        related: registry()
            .related(calculator)
            .into_iter()
            .map(CalculatorSummary::of)
            .collect(),
    }))
}

pub async fn get_defaults(Path(id): Path<String>) -> Result<Json<ValueBag>, ApiError> {
    let calculator = registry().require(&id)?;
    Ok(Json(calculator.default_values()))
}

pub async fn evaluate(
    Path(id): Path<String>,
    Json(values): Json<ValueBag>,
) -> Result<Json<DisplayResult>, ApiError> {
    let calculator = registry().require(&id)?;
    let display = presentation::present_checked(calculator, &values)?;
    Ok(Json(display))
}
