use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::warn;
use wearcast_core::{UpstreamError, WeatherProvider};

#[derive(Clone)]
pub struct AppState {
    /// `None` when the deployment is missing its credential; requests then
    /// answer with the configuration error instead of reaching upstream.
    pub provider: Option<Arc<dyn WeatherProvider>>,
}

pub fn router(state: AppState) -> Router {
    Router::new().route("/api/weather", get(weather)).with_state(state)
}

#[derive(Debug, Deserialize)]
struct WeatherQuery {
    city: Option<String>,
    suggest: Option<String>,
}

/// `GET /api/weather?city=<name>` — passthrough weather JSON.
/// `GET /api/weather?suggest=1&city=<name>` — `{suggestions: [...]}`.
async fn weather(State(state): State<AppState>, Query(params): Query<WeatherQuery>) -> Response {
    match handle(&state, &params).await {
        Ok(payload) => (StatusCode::OK, Json(payload)).into_response(),
        Err(err) => {
            warn!(status = err.status_code(), error = %err, "weather proxy request failed");
            let status = StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(json!({ "error": err.to_string() }))).into_response()
        }
    }
}

async fn handle(state: &AppState, params: &WeatherQuery) -> Result<Value, UpstreamError> {
    let provider = state.provider.as_ref().ok_or(UpstreamError::MissingApiKey)?;
    let city = params.city.as_deref().map(str::trim).filter(|c| !c.is_empty());

    if params.suggest.is_some()
        && let Some(city) = city
    {
        let suggestions = provider.suggest_cities(city).await?;
        return Ok(json!({ "suggestions": suggestions }));
    }

    let city = city.ok_or(UpstreamError::MissingCity)?;
    provider.current_weather(city).await
}
