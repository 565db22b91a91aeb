//! medcalc-api
//!
//! JSON HTTP host for the calculator catalog and the AI consult. Runs under
//! AWS Lambda or as a plain local server.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use medcalc_consult::{BedrockConsult, ConsultBackend, DisabledConsult};

use config::ApiConfig;
use state::AppState;

/// The full application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/specialties", get(routes::specialties::list_specialties))
        .route("/calculators", get(routes::calculators::list_calculators))
        .route(
            "/calculators/{id}",
            get(routes::calculators::get_calculator_detail),
        )
        .route(
            "/calculators/{id}/defaults",
            get(routes::calculators::get_defaults),
        )
        .route(
            "/calculators/{id}/evaluate",
            post(routes::calculators::evaluate),
        )
        .route("/calculators/{id}/consult", post(routes::consult::consult))
        .layer(
            ServiceBuilder::new()
                .layer(axum_mw::from_fn(middleware::request_log::request_log))
                .layer(cors),
        )
        .with_state(state)
}

/// Pick the consult backend the configuration asks for.
pub async fn consult_backend(config: &ApiConfig) -> Arc<dyn ConsultBackend> {
    if !config.consult_enabled {
        tracing::warn!("AI consult disabled by configuration");
        return Arc::new(DisabledConsult);
    }

    let client = medcalc_consult::client::build_client(&config.region).await;
    tracing::info!(
        model = %config.consult_model,
        region = %config.region,
        "AI consult enabled"
    );
    Arc::new(BedrockConsult::new(
        client,
        config.consult_model.clone(),
        config.consult_max_tokens,
    ))
}
