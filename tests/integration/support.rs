//! Test harness: upstream fakes and an in-process proxy.

use secrecy::SecretString;
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;
use wiremock::MockServer;

use weather_explorer::config::{AppConfig, SuggestionsConfig, WeatherConfig};
use weather_explorer::providers::geodb::GeoDbClient;
use weather_explorer::providers::openweather::OpenWeatherClient;
use weather_explorer::server::{build_router, ProxyState};

pub const WEATHER_PATH: &str = "/data/2.5/weather";
pub const CITIES_PATH: &str = "/v1/geo/cities";

/// A proxy bound to `127.0.0.1:<ephemeral>` plus its upstream fakes.
pub struct Harness {
    pub base_url: String,
    pub weather_upstream: MockServer,
    pub cities_upstream: MockServer,
    server: tokio::task::JoinHandle<()>,
}

impl Drop for Harness {
    fn drop(&mut self) {
        self.server.abort();
    }
}

pub struct HarnessKeys {
    pub weather: Option<&'static str>,
    pub cities: Option<&'static str>,
}

impl Default for HarnessKeys {
    fn default() -> Self {
        Self { weather: Some("owm-test-key"), cities: Some("rapid-test-key") }
    }
}

pub async fn start(keys: HarnessKeys) -> Harness {
    let weather_upstream = MockServer::start().await;
    let cities_upstream = MockServer::start().await;

    let weather_cfg = WeatherConfig {
        base_url: format!("{}{WEATHER_PATH}", weather_upstream.uri()),
        ..WeatherConfig::default()
    };
    let cities_cfg = SuggestionsConfig {
        base_url: format!("{}{CITIES_PATH}", cities_upstream.uri()),
        ..SuggestionsConfig::default()
    };

    let secret = |k: Option<&str>| k.map(|k| SecretString::new(k.to_string()));
    let weather = OpenWeatherClient::new(&weather_cfg, secret(keys.weather)).unwrap();
    let cities = GeoDbClient::new(&cities_cfg, secret(keys.cities)).unwrap();

    let state = Arc::new(ProxyState::new(Box::new(weather), Box::new(cities)));
    let router = build_router(state, &AppConfig::default()).unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    Harness {
        base_url: format!("http://{addr}"),
        weather_upstream,
        cities_upstream,
        server,
    }
}

pub fn london_payload() -> serde_json::Value {
    json!({
        "weather": [{ "id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d" }],
        "main": { "temp": 15.2, "feels_like": 14.6, "humidity": 72 },
        "wind": { "speed": 4.12 },
        "sys": { "country": "GB" },
        "name": "London",
        "cod": 200
    })
}
