//! Shorten and redirect workflow orchestration.

use std::sync::Arc;

use crate::domain::codec::ShortCodec;
use crate::domain::entities::NewLink;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::long_url::validate_long_url;
use serde_json::json;

/// Outcome of a completed shorten workflow.
#[derive(Debug, Clone)]
pub struct ShortenedLink {
    pub id: i64,
    pub code: String,
    pub long_url: String,
}

/// Service composing the codec and the link store into the two public
/// operations: shorten and resolve.
///
/// Fully stateless between calls; safe to share across unboundedly many
/// concurrent requests, since inserts mint fresh ids without coordination,
/// the code attachment only targets the row the same request just
/// inserted, and lookups are read-only.
pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
    codec: Arc<ShortCodec>,
}

impl LinkService {
    pub fn new(repository: Arc<dyn LinkRepository>, codec: Arc<ShortCodec>) -> Self {
        Self { repository, codec }
    }

    /// Creates a link record and derives its public short code.
    ///
    /// Two-phase write: insert the record with `short_code` NULL, encode
    /// the assigned id, then attach the code. The phases are deliberately
    /// not one transaction; a crash in between leaves a record whose
    /// `short_code` is NULL, which is a bounded and harmless inconsistency
    /// because resolution decodes back to the id and never reads
    /// `short_code`. The insert is never retried here - without an
    /// idempotency key a retry could mint a duplicate record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed long URL (checked
    /// before any storage write) and [`AppError::Internal`] when either
    /// phase fails at the durability layer.
    pub async fn shorten(
        &self,
        long_url: String,
        title: Option<String>,
    ) -> Result<ShortenedLink, AppError> {
        let long_url = validate_long_url(&long_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        // Phase 1: the store assigns the id, the one authoritative key.
        let id = self
            .repository
            .insert(NewLink {
                long_url: long_url.clone(),
                title,
            })
            .await?;

        let code = self
            .codec
            .encode(id)
            .map_err(|e| AppError::internal("Failed to encode link id", json!({ "reason": e.to_string() })))?;

        // Phase 2: attach the derived code to the row from phase 1.
        let updated = self.repository.set_short_code(id, &code).await?;
        if !updated {
            tracing::error!("link {id} vanished between insert and code attachment");
            return Err(AppError::internal(
                "Failed to attach short code",
                json!({ "id": id }),
            ));
        }

        tracing::debug!("shortened link {id} as {code}");

        Ok(ShortenedLink { id, code, long_url })
    }

    /// Resolves a short code to the stored long URL.
    ///
    /// Decodes the code back to an id and performs the primary-key lookup.
    /// The stored `short_code` column is intentionally not compared to the
    /// requested code: resolution trusts the codec inverse alone, which
    /// keeps the hot path to a single point read and keeps records with a
    /// NULL `short_code` resolvable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] both for undecodable codes and for
    /// decoded ids with no record - the two cases are indistinguishable by
    /// design, so the endpoint does not reveal which codes are
    /// syntactically well-formed.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        let id = match self.codec.decode(code) {
            Ok(id) => id,
            Err(_) => return Err(Self::unknown_code(code)),
        };

        self.repository
            .find_long_url_by_id(id)
            .await?
            .ok_or_else(|| Self::unknown_code(code))
    }

    /// Builds the public short URL for a code.
    pub fn public_short_url(&self, base: &str, code: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), code)
    }

    fn unknown_code(code: &str) -> AppError {
        AppError::not_found("Short link not found", json!({ "code": code }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use mockall::predicate::eq;

    fn codec() -> Arc<ShortCodec> {
        Arc::new(ShortCodec::new("test-secret").unwrap())
    }

    #[tokio::test]
    async fn test_shorten_runs_both_phases_in_order() {
        let mut repo = MockLinkRepository::new();
        let codec = codec();
        let expected_code = codec.encode(42).unwrap();

        repo.expect_insert()
            .withf(|new_link| {
                new_link.long_url == "https://example.com/page"
                    && new_link.title.as_deref() == Some("Page")
            })
            .times(1)
            .returning(|_| Ok(42));

        let attached = expected_code.clone();
        repo.expect_set_short_code()
            .withf(move |id, code| *id == 42 && code == attached)
            .times(1)
            .returning(|_, _| Ok(true));

        let service = LinkService::new(Arc::new(repo), codec);

        let result = service
            .shorten(
                "https://example.com/page".to_string(),
                Some("Page".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(result.id, 42);
        assert_eq!(result.code, expected_code);
        assert_eq!(result.long_url, "https://example.com/page");
    }

    #[tokio::test]
    async fn test_shorten_rejects_invalid_url_without_touching_store() {
        let mut repo = MockLinkRepository::new();
        repo.expect_insert().times(0);
        repo.expect_set_short_code().times(0);

        let service = LinkService::new(Arc::new(repo), codec());

        let result = service.shorten("not-a-url".to_string(), None).await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_shorten_surfaces_vanished_row_as_internal() {
        let mut repo = MockLinkRepository::new();
        repo.expect_insert().times(1).returning(|_| Ok(7));
        repo.expect_set_short_code()
            .times(1)
            .returning(|_, _| Ok(false));

        let service = LinkService::new(Arc::new(repo), codec());

        let result = service
            .shorten("https://example.com".to_string(), None)
            .await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_resolve_decodes_and_looks_up_by_id() {
        let codec = codec();
        let code = codec.encode(5).unwrap();

        let mut repo = MockLinkRepository::new();
        repo.expect_find_long_url_by_id()
            .with(eq(5))
            .times(1)
            .returning(|_| Ok(Some("https://example.com/target".to_string())));

        let service = LinkService::new(Arc::new(repo), codec);

        let url = service.resolve(&code).await.unwrap();
        assert_eq!(url, "https://example.com/target");
    }

    #[tokio::test]
    async fn test_resolve_skips_lookup_on_undecodable_code() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_long_url_by_id().times(0);

        let service = LinkService::new(Arc::new(repo), codec());

        let result = service.resolve("favicon.ico").await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_resolve_maps_missing_record_to_not_found() {
        let codec = codec();
        let code = codec.encode(99).unwrap();

        let mut repo = MockLinkRepository::new();
        repo.expect_find_long_url_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = LinkService::new(Arc::new(repo), codec);

        // Same outcome shape as an undecodable code.
        let result = service.resolve(&code).await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_resolve_ignores_stored_short_code() {
        // A record whose short_code is NULL (crash between phases) or even
        // inconsistent with the requested code still resolves: the codec
        // inverse is authoritative, the column is not.
        let codec = codec();
        let code = codec.encode(11).unwrap();

        let mut repo = MockLinkRepository::new();
        repo.expect_find_long_url_by_id()
            .with(eq(11))
            .times(1)
            .returning(|_| Ok(Some("https://example.com/recovered".to_string())));

        let service = LinkService::new(Arc::new(repo), codec);

        let url = service.resolve(&code).await.unwrap();
        assert_eq!(url, "https://example.com/recovered");
    }

    #[test]
    fn test_public_short_url_joins_base_and_code() {
        let repo = MockLinkRepository::new();
        let service = LinkService::new(Arc::new(repo), codec());

        assert_eq!(
            service.public_short_url("https://sa.api.br/", "kg5aV2z"),
            "https://sa.api.br/kg5aV2z"
        );
        assert_eq!(
            service.public_short_url("https://sa.api.br", "kg5aV2z"),
            "https://sa.api.br/kg5aV2z"
        );
    }
}
