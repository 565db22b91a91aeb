use std::env;

use tracing_subscriber::EnvFilter;

use medcalc_api::config::ApiConfig;
use medcalc_api::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = ApiConfig::from_env();
    let consult = medcalc_api::consult_backend(&config).await;
    let app = medcalc_api::router(AppState::new(consult, config.consult_timeout));

    if env::var("AWS_LAMBDA_RUNTIME_API").is_ok() {
        tracing::info!("serving through the Lambda runtime");
        return lambda_http::run(app).await.map_err(|e| eyre::eyre!(e));
    }

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
