//! GeoDB Cities autocomplete provider (via RapidAPI).
//!
//! API: `https://wft-geo-db.p.rapidapi.com/v1/geo/cities`
//! Auth: `X-RapidAPI-Key` / `X-RapidAPI-Host` headers.
//!
//! Suggestions are a convenience: every failure degrades to an empty list.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, warn};

use super::CitySearch;
use crate::config::SuggestionsConfig;

const USER_AGENT: &str = concat!("weather-explorer/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// GeoDB response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct GeoDbCitiesResponse {
    #[serde(default)]
    data: Vec<GeoDbCity>,
}

#[derive(Debug, Deserialize)]
struct GeoDbCity {
    #[serde(default)]
    city: Option<String>,
}

// ---------------------------------------------------------------------------
// Provider
// ---------------------------------------------------------------------------

pub struct GeoDbClient {
    http: Client,
    base_url: String,
    rapidapi_host: String,
    limit: usize,
    sort: String,
    api_key: Option<SecretString>,
}

impl GeoDbClient {
    pub fn new(config: &SuggestionsConfig, api_key: Option<SecretString>) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build GeoDB HTTP client")?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            rapidapi_host: config.rapidapi_host.clone(),
            limit: config.limit,
            sort: config.sort.clone(),
            api_key,
        })
    }

    async fn fetch(&self, prefix: &str) -> Result<Vec<String>> {
        let Some(api_key) = self.api_key.as_ref() else {
            bail!("RapidAPI key is not set");
        };

        let limit = self.limit.to_string();
        let resp = self
            .http
            .get(&self.base_url)
            .query(&[
                ("namePrefix", prefix),
                ("limit", limit.as_str()),
                ("sort", self.sort.as_str()),
            ])
            .header("X-RapidAPI-Key", api_key.expose_secret().as_str())
            .header("X-RapidAPI-Host", self.rapidapi_host.as_str())
            .send()
            .await
            .context("GeoDB request failed")?;

        if !resp.status().is_success() {
            let status = resp.status();
            bail!("GeoDB API error: {status}");
        }

        let body: GeoDbCitiesResponse = resp
            .json()
            .await
            .context("Failed to parse GeoDB response")?;

        // Upstream already sorts by population; keep that order.
        Ok(body
            .data
            .into_iter()
            .filter_map(|c| c.city)
            .take(self.limit)
            .collect())
    }
}

#[async_trait]
impl CitySearch for GeoDbClient {
    async fn suggest(&self, prefix: &str) -> Vec<String> {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return Vec::new();
        }

        match self.fetch(prefix).await {
            Ok(names) => {
                debug!(prefix, count = names.len(), "City suggestions fetched");
                names
            }
            Err(e) if self.api_key.is_none() => {
                warn!(error = %e, "City suggestions disabled");
                Vec::new()
            }
            Err(e) => {
                debug!(prefix, error = %e, "City suggestion lookup failed");
                Vec::new()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
