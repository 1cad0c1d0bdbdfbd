//! Persistence layer: pool bootstrap, models, repositories, and the
//! entity-lifecycle / record-reconciliation engine with its two
//! orchestration workflows.

use std::str::FromStr;

use checker_core::error::CoreError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

pub mod auth;
pub mod lifecycle;
pub mod models;
pub mod reconcile;
pub mod repositories;
pub mod workflows;

/// Connection pool type used across the workspace.
pub type DbPool = SqlitePool;

/// Create a connection pool for the given SQLite URL, creating the
/// database file on first run.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    SqlitePoolOptions::new()
        .max_connections(8)
        .connect_with(options)
        .await
}

/// Apply all embedded migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(pool)
        .await
        .map(|_| ())
}

/// True when the error is a uniqueness-constraint rejection from the store.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err)
            if db_err.kind() == sqlx::error::ErrorKind::UniqueViolation
    )
}

/// Map a store error into the domain taxonomy: uniqueness rejections are
/// `Exists`, everything else surfaces as a store I/O failure.
pub(crate) fn store_err(err: sqlx::Error) -> CoreError {
    if is_unique_violation(&err) {
        CoreError::Exists(err.to_string())
    } else {
        CoreError::Io(err.to_string())
    }
}
