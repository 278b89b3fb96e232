//! Link entity representing a stored long URL and its derived short code.

use chrono::{DateTime, Utc};

/// A persisted link record.
///
/// `id` is assigned by the store on insertion and is the sole decoding
/// target: redirects resolve by decoding the incoming code back to `id`.
/// `short_code` is a denormalized convenience column, written once by the
/// second phase of the shorten workflow and never read on the hot path.
#[derive(Debug, Clone)]
pub struct Link {
    pub id: i64,
    pub long_url: String,
    pub title: Option<String>,
    /// `None` between the insert and the code attachment. A record stuck
    /// in that state (crash between phases) is still fully resolvable,
    /// since resolution keys off `id` alone.
    pub short_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    pub fn new(
        id: i64,
        long_url: String,
        title: Option<String>,
        short_code: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            long_url,
            title,
            short_code,
            created_at,
        }
    }

    /// Returns true while the second write phase has not yet attached a
    /// short code.
    pub fn is_pending_code(&self) -> bool {
        self.short_code.is_none()
    }
}

/// Input data for creating a new link record.
///
/// The short code is intentionally absent: it can only be derived after
/// the store has assigned an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub long_url: String,
    pub title: Option<String>,
}
