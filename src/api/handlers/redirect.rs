//! Handler for short code redirection.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
};
use serde_json::json;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// How long clients and intermediaries may cache a redirect. The id-to-URL
/// mapping is immutable once created, so 24 hours is safe.
const REDIRECT_CACHE_CONTROL: &str = "public, max-age=86400";

/// Redirects a short code to its stored long URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Reject path segments that cannot be codes by construction (anything
///    outside the base62 alphabet, e.g. `favicon.ico`) before decoding
/// 2. Decode the code back to the record id
/// 3. Point lookup of the long URL by id
/// 4. Respond `301 Moved Permanently` with a 24-hour cache header
///
/// # Errors
///
/// Returns 404 Not Found for undecodable codes and for decoded ids with
/// no record; the two cases are indistinguishable by design.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<(StatusCode, HeaderMap), AppError> {
    // Not-a-code by construction; skip the codec entirely.
    if !code.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(AppError::not_found(
            "Short link not found",
            json!({ "code": code }),
        ));
    }

    let long_url = state.link_service.resolve(&code).await?;

    debug!("redirecting {code} -> {long_url}");

    let mut headers = HeaderMap::new();
    headers.insert(
        header::LOCATION,
        HeaderValue::from_str(&long_url).map_err(|_| {
            AppError::internal("Stored URL is not a valid header value", json!({}))
        })?,
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(REDIRECT_CACHE_CONTROL),
    );

    Ok((StatusCode::MOVED_PERMANENTLY, headers))
}
