use std::sync::Arc;
use std::time::Duration;

use medcalc_consult::ConsultBackend;

/// Shared application state, injected into route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub consult: Arc<dyn ConsultBackend>,
    pub consult_timeout: Duration,
}

impl AppState {
    pub fn new(consult: Arc<dyn ConsultBackend>, consult_timeout: Duration) -> Self {
        Self {
            consult,
            consult_timeout,
        }
    }
}
