//! OpenWeatherMap current-weather provider.
//!
//! API: `https://api.openweathermap.org/data/2.5/weather`
//! Auth: `appid` query parameter.
//! Units: metric (°C, m/s).

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::debug;

use super::WeatherSource;
use crate::config::WeatherConfig;
use crate::types::{NormalizedWeather, WeatherError};

const USER_AGENT: &str = concat!("weather-explorer/", env!("CARGO_PKG_VERSION"));

/// The card labels are °C and m/s, so this is not configurable.
const UNITS: &str = "metric";

// ---------------------------------------------------------------------------
// Response paths
// ---------------------------------------------------------------------------

// Each field is looked up independently. A node that is missing, null, or
// of an unexpected shape yields `None` for that field only.
const PATH_NAME: &str = "/name";
const PATH_COUNTRY: &str = "/sys/country";
const PATH_TEMP: &str = "/main/temp";
const PATH_DESCRIPTION: &str = "/weather/0/description";
const PATH_ICON: &str = "/weather/0/icon";
const PATH_HUMIDITY: &str = "/main/humidity";
const PATH_WIND_SPEED: &str = "/wind/speed";

fn text_at(raw: &Value, pointer: &str) -> Option<String> {
    raw.pointer(pointer).and_then(Value::as_str).map(str::to_string)
}

fn number_at(raw: &Value, pointer: &str) -> Option<f64> {
    raw.pointer(pointer).and_then(Value::as_f64)
}

// ---------------------------------------------------------------------------
// Provider
// ---------------------------------------------------------------------------

pub struct OpenWeatherClient {
    http: Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl OpenWeatherClient {
    /// A client with no API key is valid; lookups then fail with
    /// `WeatherError::Configuration`.
    pub fn new(config: &WeatherConfig, api_key: Option<SecretString>) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build OpenWeatherMap HTTP client")?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Reduce the upstream payload to the normalized shape.
    fn normalize(requested_city: &str, raw: &Value) -> NormalizedWeather {
        NormalizedWeather {
            city: text_at(raw, PATH_NAME).unwrap_or_else(|| requested_city.to_string()),
            country: text_at(raw, PATH_COUNTRY),
            temperature: number_at(raw, PATH_TEMP),
            description: text_at(raw, PATH_DESCRIPTION),
            icon: text_at(raw, PATH_ICON),
            humidity: number_at(raw, PATH_HUMIDITY),
            wind_speed: number_at(raw, PATH_WIND_SPEED),
        }
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn current_weather(&self, city: &str) -> Result<NormalizedWeather, WeatherError> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            WeatherError::Configuration("OpenWeatherMap API key is not set".into())
        })?;

        let resp = self
            .http
            .get(&self.base_url)
            .query(&[
                ("q", city),
                ("appid", api_key.expose_secret().as_str()),
                ("units", UNITS),
            ])
            .send()
            .await
            // The URL carries the API key; keep it out of error text.
            .map_err(|e| WeatherError::Transport(e.without_url().to_string()))?;

        let status = resp.status();
        debug!(city, status = status.as_u16(), "OpenWeatherMap responded");

        if !status.is_success() {
            return Err(WeatherError::Upstream { status: status.as_u16() });
        }

        let raw: Value = resp.json().await.map_err(|e| {
            WeatherError::Transport(format!("unreadable OpenWeatherMap body: {}", e.without_url()))
        })?;

        Ok(Self::normalize(city, &raw))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
