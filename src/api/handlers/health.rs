//! Service banner and health check handlers.

use axum::Json;

use crate::api::dto::health::HealthResponse;

/// Plain-text banner for the service root.
///
/// # Endpoint
///
/// `GET /`
pub async fn index_handler() -> &'static str {
    "SHORT API - Ativo"
}

/// Liveness probe.
///
/// # Endpoint
///
/// `GET /health`
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
