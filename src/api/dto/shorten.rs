//! DTOs for the link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a single long URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten (must be a valid absolute URL).
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    /// Optional descriptive title stored alongside the URL.
    #[validate(length(max = 200))]
    pub title: Option<String>,
}

/// Successful shorten response.
///
/// Field names follow the public API contract: the generated code, the
/// fully qualified short link, and an echo of the submitted URL.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
}
