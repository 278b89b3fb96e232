//! Validation and canonicalization of submitted long URLs.
//!
//! Runs before any storage write: a request with a malformed target must
//! produce a client error without ever touching the store.

use url::Url;

/// Rejection reasons for a submitted long URL.
#[derive(Debug, thiserror::Error)]
pub enum LongUrlError {
    #[error("not a well-formed absolute URL: {0}")]
    Malformed(String),

    #[error("only http and https URLs can be shortened")]
    UnsupportedScheme,
}

/// Parses and lightly canonicalizes a long URL.
///
/// Accepts only absolute `http`/`https` URLs, which also shuts out
/// `javascript:`, `data:` and friends as redirect targets. The host is
/// lowercased and fragments are dropped; path, query, and their case are
/// preserved.
///
/// # Errors
///
/// Returns [`LongUrlError`] when the input does not parse as an absolute
/// URL or uses a non-HTTP scheme.
pub fn validate_long_url(input: &str) -> Result<String, LongUrlError> {
    let mut parsed = Url::parse(input).map_err(|e| LongUrlError::Malformed(e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(LongUrlError::UnsupportedScheme);
    }

    if let Some(host) = parsed.host_str() {
        let lowered = host.to_ascii_lowercase();
        if lowered != host {
            parsed
                .set_host(Some(&lowered))
                .map_err(|e| LongUrlError::Malformed(e.to_string()))?;
        }
    }

    parsed.set_fragment(None);

    Ok(parsed.to_string())
}
