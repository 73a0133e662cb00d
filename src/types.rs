//! Core domain types for Weather Explorer.
//!
//! Request/response payloads shared by the proxy endpoints, the upstream
//! provider clients and the frontend client, plus the error taxonomy.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

// ---------------------------------------------------------------------------
// User-facing messages
// ---------------------------------------------------------------------------

pub const MSG_EMPTY_CITY: &str = "Please enter a city name.";
pub const MSG_CITY_NOT_FOUND: &str = "City not found. Please try another name.";
pub const MSG_UNAVAILABLE: &str = "Unable to retrieve weather data. Please try again later.";
pub const MSG_NOT_CONFIGURED: &str = "Weather service is not configured.";

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Incoming `/api/weather` query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherQuery {
    #[serde(default)]
    pub city: Option<String>,
}

impl WeatherQuery {
    /// The trimmed city name, or `Validation` when absent or blank.
    pub fn validated_city(&self) -> Result<&str, WeatherError> {
        match self.city.as_deref().map(str::trim) {
            Some(city) if !city.is_empty() => Ok(city),
            _ => Err(WeatherError::Validation),
        }
    }
}

/// The reduced weather shape returned to clients.
///
/// Every field except `city` is nullable: a path missing upstream
/// serializes as `null` rather than failing the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedWeather {
    pub city: String,
    pub country: Option<String>,
    /// Degrees Celsius, unrounded.
    pub temperature: Option<f64>,
    pub description: Option<String>,
    /// OpenWeatherMap icon code, e.g. `04d`.
    pub icon: Option<String>,
    /// Relative humidity in percent.
    pub humidity: Option<f64>,
    /// Metres per second.
    pub wind_speed: Option<f64>,
}

/// JSON error body: `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { error: message.into() }
    }
}

/// `/api/suggestions` query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuggestionQuery {
    #[serde(default)]
    pub q: Option<String>,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Failure modes of a weather lookup.
///
/// `Display` carries internal detail for logs; clients only ever see
/// [`WeatherError::user_message`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeatherError {
    #[error("missing or blank city name")]
    Validation,

    #[error("weather provider responded with status {status}")]
    Upstream { status: u16 },

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("transport error: {0}")]
    Transport(String),
}

impl WeatherError {
    pub fn status(&self) -> StatusCode {
        match self {
            WeatherError::Validation => StatusCode::BAD_REQUEST,
            WeatherError::Upstream { status } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            WeatherError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            WeatherError::Transport(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::Validation => MSG_EMPTY_CITY,
            WeatherError::Upstream { status: 404 } => MSG_CITY_NOT_FOUND,
            WeatherError::Upstream { .. } => MSG_UNAVAILABLE,
            WeatherError::Configuration(_) => MSG_NOT_CONFIGURED,
            WeatherError::Transport(_) => MSG_UNAVAILABLE,
        }
    }
}

impl IntoResponse for WeatherError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            WeatherError::Configuration(_) | WeatherError::Transport(_) => {
                error!(error = %self, status = status.as_u16(), "Weather lookup failed");
            }
            WeatherError::Upstream { .. } => {
                warn!(error = %self, status = status.as_u16(), "Weather lookup rejected upstream");
            }
            WeatherError::Validation => {}
        }
        (status, Json(ErrorResponse::new(self.user_message()))).into_response()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
