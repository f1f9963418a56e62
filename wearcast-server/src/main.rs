//! HTTP proxy for the wearcast UI: a single `/api/weather` endpoint that
//! forwards to OpenWeather with a timeout and maps failures to structured
//! `{error}` payloads.

mod api;

use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info};
use wearcast_core::{Config, WeatherProvider, provider::provider_from_config};

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_target(false).with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let config = Config::load()?;

    // A missing credential must not crash the server; every request gets a
    // structured 500 instead, so the operator sees the problem in responses
    // and logs rather than a dead process.
    let provider: Option<Arc<dyn WeatherProvider>> = match provider_from_config(&config) {
        Ok(client) => Some(Arc::new(client)),
        Err(err) => {
            error!(error = %err, "no upstream provider configured; /api/weather will answer 500");
            None
        }
    };

    let addr =
        std::env::var("WEARCAST_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "wearcast server listening");

    axum::serve(listener, api::router(api::AppState { provider }))
        .with_graceful_shutdown(wait_for_shutdown())
        .await?;

    info!("wearcast server stopping");
    Ok(())
}

async fn wait_for_shutdown() {
    let _ = tokio::signal::ctrl_c().await;
}
