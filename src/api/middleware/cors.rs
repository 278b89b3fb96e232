//! Cross-origin policy for the shorten endpoint.
//!
//! Browsers on the allowed frontends POST to `/v1/short` cross-origin;
//! redirects themselves are top-level navigations and need no CORS.

use axum::http::{HeaderValue, Method, header};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

/// Preflight cache lifetime.
const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(86400);

/// Builds the CORS layer from the configured origin allowlist.
///
/// An empty allowlist falls back to a permissive policy, which keeps
/// server-to-server callers and local development working without extra
/// configuration. Origins that fail to parse as header values are skipped
/// with a warning rather than aborting startup.
pub fn layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(PREFLIGHT_MAX_AGE);

    if allowed_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("ignoring unparseable CORS origin: {origin}");
                None
            }
        })
        .collect();

    cors.allow_origin(origins)
}
