//! Backend client used by the UI layer.
//!
//! Calls the proxy's own endpoints and turns every failure into one of
//! the three messages the UI is allowed to show.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::providers::CitySearch;
use crate::types::{
    ErrorResponse, NormalizedWeather, MSG_CITY_NOT_FOUND, MSG_EMPTY_CITY, MSG_UNAVAILABLE,
};

/// What the UI displays when a lookup fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UiError {
    #[error("{}", MSG_EMPTY_CITY)]
    EmptyCity,

    #[error("{}", MSG_CITY_NOT_FOUND)]
    CityNotFound,

    #[error("{}", MSG_UNAVAILABLE)]
    Unavailable,
}

impl UiError {
    /// Map a backend `{error}` message to a display error. Only the
    /// validation and not-found messages pass through; anything else
    /// collapses to the generic message.
    pub fn from_backend_message(message: Option<&str>) -> Self {
        match message {
            Some(MSG_EMPTY_CITY) => UiError::EmptyCity,
            Some(MSG_CITY_NOT_FOUND) => UiError::CityNotFound,
            _ => UiError::Unavailable,
        }
    }
}

pub struct WeatherClient {
    http: Client,
    base_url: String,
}

impl WeatherClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build backend HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Look up a city through `/api/weather`. A blank city is rejected
    /// locally without touching the network.
    pub async fn fetch_weather(&self, city: &str) -> Result<NormalizedWeather, UiError> {
        if city.trim().is_empty() {
            return Err(UiError::EmptyCity);
        }

        let url = format!("{}/api/weather?city={}", self.base_url, urlencoding::encode(city));
        let resp = self.http.get(&url).send().await.map_err(|e| {
            debug!(error = %e, "Backend weather request failed");
            UiError::Unavailable
        })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.json::<ErrorResponse>().await.ok();
            debug!(status = status.as_u16(), error = ?body, "Backend rejected weather lookup");
            return Err(UiError::from_backend_message(body.as_ref().map(|b| b.error.as_str())));
        }

        resp.json::<NormalizedWeather>().await.map_err(|e| {
            debug!(error = %e, "Unreadable backend weather payload");
            UiError::Unavailable
        })
    }

    /// Autocomplete through `/api/suggestions`. Never fails.
    pub async fn fetch_suggestions(&self, prefix: &str) -> Vec<String> {
        if prefix.trim().is_empty() {
            return Vec::new();
        }

        let url = format!("{}/api/suggestions?q={}", self.base_url, urlencoding::encode(prefix));
        let resp = match self.http.get(&url).send().await {
            Ok(r) if r.status().is_success() => r,
            Ok(r) => {
                debug!(status = r.status().as_u16(), "Backend suggestions returned non-success");
                return Vec::new();
            }
            Err(e) => {
                debug!(error = %e, "Backend suggestions request failed");
                return Vec::new();
            }
        };
        resp.json().await.unwrap_or_default()
    }
}

#[async_trait]
impl CitySearch for WeatherClient {
    async fn suggest(&self, prefix: &str) -> Vec<String> {
        self.fetch_suggestions(prefix).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
