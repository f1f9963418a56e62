use crate::{Config, error::UpstreamError, model::CitySuggestion};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// Seam between the application and the upstream weather/geocoding API.
///
/// Both calls return a structured result: a payload, or an [`UpstreamError`]
/// carrying an HTTP-style status code. No failure escapes as a panic.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current weather for a resolved city name. The payload is the upstream
    /// JSON passed through unmodified.
    async fn current_weather(&self, city: &str) -> Result<Value, UpstreamError>;

    /// Autocomplete suggestions for a free-text city query.
    async fn suggest_cities(&self, query: &str) -> Result<Vec<CitySuggestion>, UpstreamError>;
}

/// Construct the upstream client from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherClient> {
    let api_key = config.require_api_key()?;
    Ok(OpenWeatherClient::with_timeout(api_key.to_owned(), config.timeout()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn provider_from_config_works_when_configured() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        assert!(provider_from_config(&cfg).is_ok());
    }
}
