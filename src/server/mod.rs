//! HTTP server: Axum router for the weather proxy and its web UI.
//!
//! Serves the JSON API and a self-contained HTML page (search form,
//! debounced autocomplete, weather card). CORS is configurable so a
//! separately hosted frontend can call the API.

pub mod routes;

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    response::Html,
    routing::get,
    Router,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AppConfig;

pub use routes::{AppState, ProxyState};

/// The embedded UI page (compiled into the binary).
const INDEX_HTML: &str = include_str!("templates/index.html");

/// Placeholder in the page template for the autocomplete debounce window.
const DEBOUNCE_PLACEHOLDER: &str = "{{DEBOUNCE_MS}}";

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState, config: &AppConfig) -> Result<Router> {
    let cors = CorsLayer::new()
        .allow_origin(allow_origin(&config.server.allowed_origin)?)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]);

    let page: Arc<str> = render_index(config.suggestions.debounce()).into();

    Ok(Router::new()
        .route("/api/weather", get(routes::get_weather))
        .route("/api/suggestions", get(routes::get_suggestions))
        .route("/health", get(routes::health))
        .route("/", get(move || serve_index(Arc::clone(&page))))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

fn render_index(debounce: Duration) -> String {
    INDEX_HTML.replace(DEBOUNCE_PLACEHOLDER, &debounce.as_millis().to_string())
}

fn allow_origin(origin: &str) -> Result<AllowOrigin> {
    if origin.trim() == "*" {
        return Ok(AllowOrigin::any());
    }
    let value = origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin: {origin}"))?;
    Ok(AllowOrigin::exact(value))
}

/// Bind `host:port` and serve until `shutdown` resolves.
///
/// `host` may be an IP literal (IPv4 or bare IPv6) or a hostname; hostnames
/// are resolved and the first address that binds is used.
pub async fn serve<F>(router: Router, host: &str, port: u16, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind {host}:{port}"))?;
    let addr = listener.local_addr().context("Listener has no local address")?;
    info!(%addr, "Weather proxy listening on http://{addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .context("Server error")
}

/// Serve the rendered HTML page.
async fn serve_index(page: Arc<str>) -> Html<String> {
    Html(page.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
