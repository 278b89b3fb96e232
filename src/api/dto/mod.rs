//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use serde for JSON serialization/deserialization and
//! validator for input validation.

pub mod health;
pub mod shorten;
