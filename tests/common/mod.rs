#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};

use short_api::application::services::LinkService;
use short_api::domain::codec::ShortCodec;
use short_api::domain::entities::{Link, NewLink};
use short_api::domain::repositories::LinkRepository;
use short_api::error::AppError;
use short_api::state::AppState;

/// Codec secret shared by the HTTP-level tests.
pub const TEST_SECRET: &str = "integration-secret";

/// In-memory [`LinkRepository`] with the same observable behavior as the
/// PostgreSQL implementation: insert assigns fresh, never-reused ids and
/// leaves `short_code` NULL until the second phase attaches it.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    rows: Mutex<Vec<Link>>,
    next_id: Mutex<i64>,
}

impl InMemoryLinkRepository {
    pub fn row(&self, id: i64) -> Option<Link> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|link| link.id == id)
            .cloned()
    }

    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<i64, AppError> {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let id = *next_id;

        self.rows.lock().unwrap().push(Link::new(
            id,
            new_link.long_url,
            new_link.title,
            None,
            Utc::now(),
        ));

        Ok(id)
    }

    async fn set_short_code(&self, id: i64, code: &str) -> Result<bool, AppError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|link| link.id == id) {
            Some(link) => {
                link.short_code = Some(code.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_long_url_by_id(&self, id: i64) -> Result<Option<String>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|link| link.id == id)
            .map(|link| link.long_url.clone()))
    }
}

/// Builds application state over an in-memory repository, returning the
/// repository handle so tests can inspect and seed storage directly.
pub fn create_test_state(
    public_base_url: Option<&str>,
) -> (AppState, Arc<InMemoryLinkRepository>) {
    let repository = Arc::new(InMemoryLinkRepository::default());
    let codec = Arc::new(ShortCodec::new(TEST_SECRET).unwrap());
    let link_service = Arc::new(LinkService::new(repository.clone(), codec));

    let state = AppState {
        link_service,
        public_base_url: public_base_url.map(str::to_string),
    };

    (state, repository)
}
