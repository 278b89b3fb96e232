//! Utility functions shared across layers.
//!
//! - [`long_url`] - Validation and canonicalization of submitted URLs
//! - [`public_url`] - Public origin derivation from request headers

pub mod long_url;
pub mod public_url;
