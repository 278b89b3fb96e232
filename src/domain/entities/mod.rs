//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic. Creation
//! input uses a separate struct ([`NewLink`]) because the id and the short
//! code only exist after the store has assigned a row.

pub mod link;

pub use link::{Link, NewLink};
