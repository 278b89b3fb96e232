//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::LinkService;

/// State threaded through the router.
///
/// The codec and store handle are injected here at startup rather than
/// read from ambient globals, so both stay independently testable with
/// fixture secrets and in-memory repositories.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    /// Origin used in returned short links; `None` falls back to the
    /// request's `Host` header.
    pub public_base_url: Option<String>,
}
