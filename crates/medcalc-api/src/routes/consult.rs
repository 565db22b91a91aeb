use axum::Json;
use axum::extract::{Path, State};

use medcalc_consult::{ClinicalContext, get_clinical_context};
use medcalc_formulas::input::ValueBag;
use medcalc_formulas::presentation;
use medcalc_formulas::registry::registry;

use crate::error::ApiError;
use crate::state::AppState;

/// Evaluate the submitted values, then ask for commentary on that result.
///
/// Consult failures never surface as errors; the body carries the fallback
/// text instead.
pub async fn consult(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(values): Json<ValueBag>,
) -> Result<Json<ClinicalContext>, ApiError> {
    let calculator = registry().require(&id)?;
    let display = presentation::present_checked(calculator, &values)?;

    let context = get_clinical_context(
        state.consult.as_ref(),
        calculator.name(),
        &display.interpretation,
        &display.score_text,
        state.consult_timeout,
    )
    .await;

    Ok(Json(context))
}
