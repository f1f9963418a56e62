use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized input to the recommendation engine.
///
/// Built from [`CurrentWeather`] with field-level fallbacks, so downstream
/// code never sees a missing value. No range validation happens here; the
/// engine clamps whatever it is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub city: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: f64,
    pub wind_speed_ms: f64,
    pub condition: String,
    pub observed_at: DateTime<Utc>,
}

/// Upstream current-weather payload, every field optional.
///
/// The proxy passes the raw JSON through unmodified; this type is how the
/// rest of the system reads it without trusting its shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentWeather {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub dt: Option<i64>,
    #[serde(default)]
    pub main: WeatherMain,
    #[serde(default)]
    pub weather: Vec<WeatherEntry>,
    #[serde(default)]
    pub wind: WeatherWind,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherMain {
    #[serde(default)]
    pub temp: Option<f64>,
    #[serde(default)]
    pub feels_like: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherEntry {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub main: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherWind {
    #[serde(default)]
    pub speed: Option<f64>,
}

impl CurrentWeather {
    /// Parse a passthrough payload. A payload that does not match the
    /// expected shape yields the all-default value rather than an error.
    pub fn from_value(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }

    /// Apply the fallback rules: absent `feels_like` equals `temp`, absent
    /// numerics are zero, absent strings are empty, absent `dt` is now.
    pub fn observation(&self) -> WeatherObservation {
        let temperature_c = self.main.temp.unwrap_or(0.0);
        let condition = self
            .weather
            .first()
            .and_then(|w| w.description.clone())
            .unwrap_or_default();
        let observed_at = self
            .dt
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .unwrap_or_else(Utc::now);

        WeatherObservation {
            city: self.name.clone().unwrap_or_default(),
            temperature_c,
            feels_like_c: self.main.feels_like.unwrap_or(temperature_c),
            humidity_pct: self.main.humidity.unwrap_or(0.0),
            wind_speed_ms: self.wind.speed.unwrap_or(0.0),
            condition,
            observed_at,
        }
    }
}

/// One geocoding hit, as returned by the suggestion proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitySuggestion {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default)]
    pub country: String,
}

impl CitySuggestion {
    /// Render as `"name, state, country"`, omitting the state when absent.
    pub fn display(&self) -> String {
        match &self.state {
            Some(state) => format!("{}, {}, {}", self.name, state, self.country),
            None => format!("{}, {}", self.name, self.country),
        }
    }
}
