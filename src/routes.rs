//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`          - Service banner
//! - `GET  /health`    - Liveness probe
//! - `POST /v1/short`  - Create a short link
//! - `GET  /{code}`    - Short link redirect
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Origin allowlist for the browser-facing shorten endpoint
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{health_handler, index_handler, redirect_handler, shorten_handler};
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// Static segments win over the `{code}` capture, so `/health` and
/// `/v1/short` are never interpreted as codes.
pub fn app_router(state: AppState, allowed_origins: &[String]) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/v1/short", post(shorten_handler))
        .route("/{code}", get(redirect_handler))
        .with_state(state)
        .layer(cors::layer(allowed_origins))
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
