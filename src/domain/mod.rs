//! Domain layer containing business entities and logic.
//!
//! Defines the data model, the storage contract, and the short-code codec
//! independent of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`codec`] - Salted reversible id-to-code mapping
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation
//!   layers
//! - Repository traits define contracts implemented by the infrastructure
//!   layer
//! - Workflow orchestration lives in [`crate::application::services`]

pub mod codec;
pub mod entities;
pub mod repositories;
