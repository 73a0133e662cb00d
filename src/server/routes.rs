//! Proxy API route handlers.
//!
//! All endpoints return JSON. Providers are shared via `Arc<ProxyState>`.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::providers::{CitySearch, WeatherSource};
use crate::types::{NormalizedWeather, SuggestionQuery, WeatherError, WeatherQuery};

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Read-only provider handles shared by all route handlers.
pub struct ProxyState {
    pub weather: Box<dyn WeatherSource>,
    pub cities: Box<dyn CitySearch>,
}

impl ProxyState {
    pub fn new(weather: Box<dyn WeatherSource>, cities: Box<dyn CitySearch>) -> Self {
        Self { weather, cities }
    }
}

pub type AppState = Arc<ProxyState>;

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// GET /api/weather?city=<name>
///
/// A malformed query string is treated like a missing city.
pub async fn get_weather(
    State(state): State<AppState>,
    query: Option<Query<WeatherQuery>>,
) -> Result<Json<NormalizedWeather>, WeatherError> {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let city = query.validated_city()?;

    let weather = state.weather.current_weather(city).await?;
    info!(
        city = %weather.city,
        country = ?weather.country,
        temperature = ?weather.temperature,
        "Weather served"
    );
    Ok(Json(weather))
}

/// GET /api/suggestions?q=<prefix>
///
/// Always 200; failures surface as an empty list.
pub async fn get_suggestions(
    State(state): State<AppState>,
    query: Option<Query<SuggestionQuery>>,
) -> Json<Vec<String>> {
    let prefix = query
        .and_then(|Query(q)| q.q)
        .unwrap_or_default();
    if prefix.trim().is_empty() {
        return Json(Vec::new());
    }
    Json(state.cities.suggest(&prefix).await)
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
