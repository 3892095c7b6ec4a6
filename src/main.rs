use anyhow::{Context, Result};
use crypto_predictor::api::{self, AppState};
use crypto_predictor::config::{Config, EnvConfig};
use crypto_predictor::monitoring;
use crypto_predictor::prediction::PredictionService;

#[tokio::main]
async fn main() -> Result<()> {
    monitoring::init_logging();

    tracing::info!("🚀 Crypto Predictor API starting...");

    // Load configuration
    let env_config = EnvConfig::load()?;
    let config = Config::load_or_default(&env_config.config_path)?;

    let service = PredictionService::from_config(&config, &env_config);
    tracing::info!(
        "Completion model: {} (temperature {}, max tokens {})",
        service.completion().config().model,
        service.completion().config().temperature,
        service.completion().config().max_tokens
    );
    tracing::info!("Market data source: {}", env_config.coingecko_api_url);

    let cors = api::cors_layer(&config.server)?;
    let app = api::router(AppState::new(service), cors);

    let listener = tokio::net::TcpListener::bind(config.server.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_addr))?;

    tracing::info!("✅ Listening on http://{}", config.server.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    tracing::info!("Shutting down...");

    Ok(())
}
