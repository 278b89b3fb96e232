//! Handler for the link shortening endpoint.

use axum::{Json, extract::State, http::HeaderMap, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::public_url::origin_from_headers;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /v1/short`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/page", "title": "Example" }
/// ```
///
/// # Response
///
/// `201 Created` with:
///
/// ```json
/// {
///   "short_code": "kg5aV2z",
///   "short_url": "https://sa.api.br/kg5aV2z",
///   "original_url": "https://example.com/page"
/// }
/// ```
///
/// The short link host comes from `PUBLIC_BASE_URL` when configured,
/// otherwise from the request's `Host` header.
///
/// # Errors
///
/// Returns 400 Bad Request for a missing or malformed URL, before any
/// storage write happens.
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let link = state.link_service.shorten(payload.url, payload.title).await?;

    let base = match &state.public_base_url {
        Some(base) => base.clone(),
        None => origin_from_headers(&headers)?,
    };
    let short_url = state.link_service.public_short_url(&base, &link.code);

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            short_code: link.code,
            short_url,
            original_url: link.long_url,
        }),
    ))
}
