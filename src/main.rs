use pine_relay::api::{run_server, AppState};
use pine_relay::config::AppConfig;
use pine_relay::services::RelayService;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load Configuration (.env, config.yaml, environment)
    let config = AppConfig::load()?;

    // Setup Logging
    config.logging.init();

    info!("Starting Pine Relay...");
    info!("Loaded Configuration: {:?}", config);

    // Initialize Relay
    let relay = RelayService::new(config.gemini.clone())?;
    let app_state = AppState::new(Arc::new(relay));

    // Start API Server
    info!("Initializing API Server...");
    run_server(app_state, &config).await?;

    Ok(())
}
