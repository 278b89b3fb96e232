//! Repository trait for link record data access.

use crate::domain::entities::NewLink;
use crate::error::AppError;
use async_trait::async_trait;

/// Storage contract consumed by the shorten and redirect workflows.
///
/// The surface is deliberately small: an insert that returns the assigned
/// id, the one-time code attachment, and the primary-key point lookup the
/// redirect path runs on. Nothing here reads `short_code`.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL
/// - An in-memory double in `tests/common` for HTTP-level tests
/// - Mocks auto-generated with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new record with `short_code` NULL and returns the freshly
    /// assigned id. Ids are unique and never reused.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the write cannot be durably
    /// committed.
    async fn insert(&self, new_link: NewLink) -> Result<i64, AppError>;

    /// Attaches the derived short code to an existing record.
    ///
    /// Returns `Ok(false)` when no record carries `id`. The workflow calls
    /// this right after a successful insert, so a miss indicates something
    /// external deleted the row in between.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn set_short_code(&self, id: i64, code: &str) -> Result<bool, AppError>;

    /// Point lookup of the stored long URL by primary key.
    ///
    /// Sits on the hot redirect path and must stay a direct index lookup.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_long_url_by_id(&self, id: i64) -> Result<Option<String>, AppError>;
}
