use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::{error::UpstreamError, model::CitySuggestion};

use super::WeatherProvider;

const WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const GEO_URL: &str = "https://api.openweathermap.org/geo/1.0/direct";
const SUGGESTION_LIMIT: &str = "5";

/// Default upstream timeout; the race against this timer decides the outcome.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// Client for the OpenWeather current-weather and direct-geocoding endpoints.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    timeout: Duration,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_timeout(api_key, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(api_key: String, timeout: Duration) -> Self {
        Self { api_key, timeout, http: Client::new() }
    }

    /// Issue a GET and read the body, racing the whole exchange against the
    /// timeout. Whichever settles first wins; the loser is dropped.
    async fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<(StatusCode, String), UpstreamError> {
        let exchange = async {
            let res = self
                .http
                .get(url)
                .query(query)
                .send()
                .await
                .map_err(|e| UpstreamError::Network(e.to_string()))?;

            let status = res.status();
            let body =
                res.text().await.map_err(|e| UpstreamError::Network(e.to_string()))?;

            Ok((status, body))
        };

        match tokio::time::timeout(self.timeout, exchange).await {
            Ok(result) => result,
            Err(_) => Err(UpstreamError::Timeout),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeoEntry {
    name: String,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    country: String,
}

/// Map a geocoding response body to suggestions. Upstream promises an array;
/// anything else maps to no suggestions, and entries without a name are
/// skipped.
fn map_suggestions(body: &str) -> Vec<CitySuggestion> {
    let value: Value = serde_json::from_str(body).unwrap_or(Value::Null);
    let Some(entries) = value.as_array() else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| serde_json::from_value::<GeoEntry>(entry.clone()).ok())
        .map(|e| CitySuggestion { name: e.name, state: e.state, country: e.country })
        .collect()
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current_weather(&self, city: &str) -> Result<Value, UpstreamError> {
        let (status, body) = self
            .get(WEATHER_URL, &[("q", city), ("appid", &self.api_key), ("units", "metric")])
            .await?;

        if status == StatusCode::NOT_FOUND {
            return Err(UpstreamError::CityNotFound);
        }
        if !status.is_success() {
            return Err(UpstreamError::upstream(
                status.as_u16(),
                &body,
                format!("Weather fetch failed (status {})", status.as_u16()),
            ));
        }

        serde_json::from_str(&body)
            .map_err(|e| UpstreamError::Network(format!("Failed to parse weather JSON: {e}")))
    }

    async fn suggest_cities(&self, query: &str) -> Result<Vec<CitySuggestion>, UpstreamError> {
        let (status, body) = self
            .get(GEO_URL, &[("q", query), ("limit", SUGGESTION_LIMIT), ("appid", &self.api_key)])
            .await?;

        if !status.is_success() {
            return Err(UpstreamError::upstream(
                status.as_u16(),
                &body,
                format!("Suggestion fetch failed (status {})", status.as_u16()),
            ));
        }

        Ok(map_suggestions(&body))
    }
}
