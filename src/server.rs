//! HTTP server initialization and runtime setup.
//!
//! Handles codec construction, database connection, migrations, and the
//! Axum server lifecycle. Configuration problems (missing secret, bad
//! store connection) abort startup here instead of surfacing as
//! per-request errors.

use crate::application::services::LinkService;
use crate::config::Config;
use crate::domain::codec::ShortCodec;
use crate::infrastructure::persistence::PgLinkRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Short-code codec from the configured secret
/// - PostgreSQL connection pool and migrations
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if the secret is unusable, the database connection
/// fails, or the server cannot bind.
pub async fn run(config: Config) -> Result<()> {
    let codec = Arc::new(ShortCodec::new(&config.hash_secret)?);

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let link_repository = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    let link_service = Arc::new(LinkService::new(link_repository, codec));

    let state = AppState {
        link_service,
        public_base_url: config.public_base_url.clone(),
    };

    let app = app_router(state, &config.cors_allowed_origins);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

    Ok(())
}
