//! Weather Explorer proxy server.
//!
//! Entry point. Loads configuration, initialises structured logging,
//! resolves provider API keys, and serves the weather API and UI until
//! Ctrl+C.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use weather_explorer::config::AppConfig;
use weather_explorer::providers::geodb::GeoDbClient;
use weather_explorer::providers::openweather::OpenWeatherClient;
use weather_explorer::server::{self, ProxyState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    init_logging();

    let cfg = AppConfig::load_or_default()?;

    info!(
        host = %cfg.server.host,
        port = cfg.server.port,
        weather_url = %cfg.weather.base_url,
        "Weather Explorer starting up"
    );

    // -- Providers -------------------------------------------------------

    let weather_key = AppConfig::resolve_secret(&cfg.weather.api_key_env);
    let weather = OpenWeatherClient::new(&cfg.weather, weather_key)?;
    if !weather.has_api_key() {
        warn!(
            env = %cfg.weather.api_key_env,
            "No weather API key configured; /api/weather will answer 500"
        );
    }

    let cities_key = AppConfig::resolve_secret(&cfg.suggestions.api_key_env);
    if cities_key.is_none() {
        warn!(
            env = %cfg.suggestions.api_key_env,
            "No city-search API key configured; suggestions will be empty"
        );
    }
    let cities = GeoDbClient::new(&cfg.suggestions, cities_key)?;

    // -- Server ----------------------------------------------------------

    let state = Arc::new(ProxyState::new(Box::new(weather), Box::new(cities)));
    let router = server::build_router(state, &cfg)?;

    server::serve(router, &cfg.server.host, cfg.server.port, shutdown_signal()).await?;

    info!("Weather Explorer shut down cleanly.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received.");
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("weather_explorer=info,tower_http=info"));

    let json_logging = std::env::var("WEATHER_EXPLORER_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
