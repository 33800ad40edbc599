//! Postgres access layer: pool construction and per-aggregate repositories.
//!
//! The pool is built once at startup by [`connect`] and handed to callers as
//! an explicit handle; repository functions borrow it per call. All queries
//! are fully parameterized, and every write-then-read-back operation runs
//! inside a single transaction so the read-back observes the write.

pub mod error;
pub mod forum_repo;
pub mod models;
pub mod score_repo;
pub mod user_repo;

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use crate::config;
use error::DbError;

/// Build the process-wide connection pool.
///
/// Pool sizing and timeouts come from [`config::settings`]; a server-side
/// `statement_timeout` bounds every round-trip so a stuck store surfaces as
/// [`DbError::Unavailable`] rather than a hang.
pub async fn connect(database_url: &str) -> Result<PgPool, DbError> {
    let cfg = config::settings();

    let opts = PgConnectOptions::from_str(database_url)
        .map_err(DbError::from)?
        .options([(
            "statement_timeout",
            cfg.statement_timeout_ms.to_string(),
        )]);

    let pool = PgPoolOptions::new()
        .max_connections(cfg.max_connections)
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout))
        .connect_with(opts)
        .await?;

    log::info!(
        "connected to Postgres (max_connections={})",
        cfg.max_connections
    );
    Ok(pool)
}

/// Apply the checked-in schema migrations. Idempotent.
pub async fn migrate(pool: &PgPool) -> Result<(), DbError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DbError::Store(e.into()))
}
