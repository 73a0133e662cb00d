//! Upstream provider integrations.
//!
//! Defines the `WeatherSource` and `CitySearch` traits and provides
//! implementations for:
//! - OpenWeatherMap: current conditions, normalized to `NormalizedWeather`
//! - GeoDB Cities (RapidAPI): city-name autocomplete

pub mod geodb;
pub mod openweather;

use async_trait::async_trait;

use crate::types::{NormalizedWeather, WeatherError};

/// Abstraction over current-weather providers.
///
/// One outbound call per invocation. No retries, no caching.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Fetch and normalize current conditions for an already-validated city.
    async fn current_weather(&self, city: &str) -> Result<NormalizedWeather, WeatherError>;
}

/// Abstraction over city-name search providers.
///
/// Fail-soft: implementors swallow every failure and return an empty list.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CitySearch: Send + Sync {
    /// Candidate city names for a prefix, in upstream order.
    async fn suggest(&self, prefix: &str) -> Vec<String>;
}
