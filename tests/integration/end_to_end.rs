use chrono::{TimeZone, Utc};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use weather_explorer::frontend::{SuggestionDebouncer, UiError, WeatherCard, WeatherClient};
use weather_explorer::types::{MSG_CITY_NOT_FOUND, MSG_EMPTY_CITY, MSG_UNAVAILABLE};

use crate::support::{self, london_payload, HarnessKeys, CITIES_PATH, WEATHER_PATH};

fn frontend(base_url: &str) -> WeatherClient {
    WeatherClient::new(base_url, Duration::from_secs(5)).unwrap()
}

async fn raw_get(url: &str) -> (u16, serde_json::Value) {
    let resp = reqwest::get(url).await.unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

#[tokio::test]
async fn test_london_round_trip_to_card() {
    let h = support::start(HarnessKeys::default()).await;
    Mock::given(method("GET"))
        .and(path(WEATHER_PATH))
        .and(query_param("q", "London"))
        .and(query_param("appid", "owm-test-key"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_payload()))
        .expect(1)
        .mount(&h.weather_upstream)
        .await;

    let weather = frontend(&h.base_url).fetch_weather("London").await.unwrap();
    assert_eq!(weather.city, "London");
    assert_eq!(weather.country.as_deref(), Some("GB"));
    assert_eq!(weather.temperature, Some(15.2));
    assert_eq!(weather.description.as_deref(), Some("broken clouds"));
    assert_eq!(weather.icon.as_deref(), Some("04d"));
    assert_eq!(weather.humidity, Some(72.0));
    assert_eq!(weather.wind_speed, Some(4.12));

    let at = Utc.with_ymd_and_hms(2026, 1, 3, 9, 30, 0).unwrap();
    let card = WeatherCard::new(&weather, &at);
    assert_eq!(card.title, "London, GB");
    assert_eq!(card.temperature, "15°C");
}

#[tokio::test]
async fn test_sparse_upstream_payload_yields_nulls() {
    let h = support::start(HarnessKeys::default()).await;
    Mock::given(method("GET"))
        .and(path(WEATHER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "main": { "temp": 1.5 } })))
        .mount(&h.weather_upstream)
        .await;

    let (status, body) = raw_get(&format!("{}/api/weather?city=Tromso", h.base_url)).await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({
            "city": "Tromso",
            "country": null,
            "temperature": 1.5,
            "description": null,
            "icon": null,
            "humidity": null,
            "wind_speed": null
        })
    );
}

#[tokio::test]
async fn test_whitespace_city_is_rejected_before_upstream() {
    let h = support::start(HarnessKeys::default()).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_payload()))
        .expect(0)
        .mount(&h.weather_upstream)
        .await;

    let (status, body) = raw_get(&format!("{}/api/weather?city=%20%20%20", h.base_url)).await;
    assert_eq!(status, 400);
    assert_eq!(body, json!({ "error": MSG_EMPTY_CITY }));
}

#[tokio::test]
async fn test_unknown_city_maps_to_not_found() {
    let h = support::start(HarnessKeys::default()).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "cod": "404", "message": "city not found" })))
        .mount(&h.weather_upstream)
        .await;

    let (status, body) = raw_get(&format!("{}/api/weather?city=Qwzx", h.base_url)).await;
    assert_eq!(status, 404);
    assert_eq!(body, json!({ "error": MSG_CITY_NOT_FOUND }));

    let err = frontend(&h.base_url).fetch_weather("Qwzx").await.unwrap_err();
    assert_eq!(err, UiError::CityNotFound);
}

#[tokio::test]
async fn test_other_upstream_status_is_forwarded_with_generic_message() {
    let h = support::start(HarnessKeys::default()).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "cod": 401, "message": "Invalid API key" })))
        .mount(&h.weather_upstream)
        .await;

    let (status, body) = raw_get(&format!("{}/api/weather?city=Paris", h.base_url)).await;
    assert_eq!(status, 401);
    assert_eq!(body, json!({ "error": MSG_UNAVAILABLE }));
}

#[tokio::test]
async fn test_missing_weather_key_is_500() {
    let h = support::start(HarnessKeys { weather: None, ..HarnessKeys::default() }).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_payload()))
        .expect(0)
        .mount(&h.weather_upstream)
        .await;

    let (status, body) = raw_get(&format!("{}/api/weather?city=Paris", h.base_url)).await;
    assert_eq!(status, 500);
    assert!(body["error"].is_string());

    let err = frontend(&h.base_url).fetch_weather("Paris").await.unwrap_err();
    assert_eq!(err, UiError::Unavailable);
}

#[tokio::test]
async fn test_suggestions_through_proxy() {
    let h = support::start(HarnessKeys::default()).await;
    Mock::given(method("GET"))
        .and(path(CITIES_PATH))
        .and(query_param("namePrefix", "Lon"))
        .and(query_param("limit", "5"))
        .and(query_param("sort", "-population"))
        .and(header("X-RapidAPI-Key", "rapid-test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "city": "London" }, { "city": "Longyan" }]
        })))
        .mount(&h.cities_upstream)
        .await;

    let names = frontend(&h.base_url).fetch_suggestions("Lon").await;
    assert_eq!(names, vec!["London", "Longyan"]);
}

#[tokio::test]
async fn test_suggestions_fail_soft_through_proxy() {
    let h = support::start(HarnessKeys::default()).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&h.cities_upstream)
        .await;

    let (status, body) = raw_get(&format!("{}/api/suggestions?q=Lon", h.base_url)).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_debounced_typing_hits_upstream_once() {
    let h = support::start(HarnessKeys::default()).await;
    Mock::given(method("GET"))
        .and(path(CITIES_PATH))
        .and(query_param("namePrefix", "Berl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [{ "city": "Berlin" }] })))
        .expect(1)
        .mount(&h.cities_upstream)
        .await;

    let debouncer = SuggestionDebouncer::new(Arc::new(frontend(&h.base_url)), Duration::from_millis(200));
    let mut rx = debouncer.subscribe();
    for partial in ["B", "Be", "Ber", "Berl"] {
        debouncer.on_input(partial);
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    tokio::time::timeout(Duration::from_secs(5), rx.changed())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(*rx.borrow(), vec!["Berlin".to_string()]);

    let received = h.cities_upstream.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
}
