//! Gauge Store
//!
//! Local persistence for job records: SQLite pool construction, schema
//! migration, and the job repository.

pub mod jobs;

pub use sqlx::sqlite::SqlitePool;

use sqlx::sqlite::SqlitePoolOptions;
use std::time::Duration;

/// Default store location, created on first use
pub const DEFAULT_DATABASE_URL: &str = "sqlite://gauge.db?mode=rwc";

/// Open a connection pool against the given SQLite URL
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

/// Open an ephemeral in-memory store
///
/// Pinned to a single connection so every caller sees the same database.
pub async fn create_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
}

/// Create the schema if it does not exist yet
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS jobs (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            eval_id TEXT,
            data_id TEXT,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_jobs_created_at ON jobs(created_at DESC)")
        .execute(pool)
        .await?;

    tracing::info!("database migrations completed");
    Ok(())
}
