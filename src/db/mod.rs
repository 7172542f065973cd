//! Local SQLite storage for client state that must survive a restart.
//!
//! Only the authenticated session lives here; entity collections are always
//! refetched from the API.

mod repository;

pub use repository::*;

use std::path::Path;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use crate::errors::SyncError;

/// Open (or create) the session database and make sure its table exists.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, SyncError> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            SyncError::Storage(format!("Cannot create {}: {}", parent.display(), e))
        })?;
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    // One writer at a time is plenty for a single session blob.
    let pool = SqlitePoolOptions::new()
        .max_connections(2)
        .connect_with(options)
        .await?;

    create_schema(&pool).await?;
    tracing::debug!("Session database ready at {}", db_path.display());

    Ok(pool)
}

async fn create_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
