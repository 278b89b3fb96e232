//! HTTP transport layer.
//!
//! Translates HTTP requests into workflow calls and formats responses
//! according to the public API contract. Everything here is thin glue;
//! the interesting logic lives in [`crate::application`] and
//! [`crate::domain`].
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Tracing and CORS layers

pub mod dto;
pub mod handlers;
pub mod middleware;
