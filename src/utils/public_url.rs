//! Derivation of the public short-link origin from request headers.
//!
//! When `PUBLIC_BASE_URL` is not configured, the shorten response builds
//! the short link from the `Host` header the client reached us on, always
//! with an https scheme (the service is expected to sit behind TLS
//! termination at the edge).

use crate::error::AppError;
use axum::http::{HeaderMap, header};

/// Builds `https://{host}` from the request's `Host` header.
///
/// # Errors
///
/// Returns [`AppError::Validation`] when the header is missing or not
/// valid UTF-8.
pub fn origin_from_headers(headers: &HeaderMap) -> Result<String, AppError> {
    let host = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::bad_request("Missing Host header", serde_json::json!({})))?
        .to_str()
        .map_err(|_| AppError::bad_request("Invalid Host header", serde_json::json!({})))?;

    Ok(format!("https://{host}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_origin_from_host_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("sa.api.br"));
        assert_eq!(origin_from_headers(&headers).unwrap(), "https://sa.api.br");
    }

    #[test]
    fn test_origin_keeps_explicit_port() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("localhost:8787"));
        assert_eq!(
            origin_from_headers(&headers).unwrap(),
            "https://localhost:8787"
        );
    }

    #[test]
    fn test_missing_host_header_is_an_error() {
        let headers = HeaderMap::new();
        assert!(origin_from_headers(&headers).is_err());
    }
}
