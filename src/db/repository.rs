//! Key-value repository over the `kv_store` table.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::SyncError;

/// Namespaced string values keyed by name.
#[derive(Clone)]
pub struct KvRepository {
    pool: SqlitePool,
}

impl KvRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the value stored under `key`.
    pub async fn get(&self, key: &str) -> Result<Option<String>, SyncError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.get("value")))
    }

    /// Insert or replace the value under `key`.
    pub async fn put(&self, key: &str, value: &str) -> Result<(), SyncError> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            r#"INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)
               ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at"#,
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Remove `key`. Returns whether a value was present.
    pub async fn delete(&self, key: &str) -> Result<bool, SyncError> {
        let result = sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_put_get_delete() {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_database(&temp_dir.path().join("kv.sqlite")).await.unwrap();
        let repo = KvRepository::new(pool);

        assert_eq!(repo.get("theme").await.unwrap(), None);

        repo.put("theme", "dark").await.unwrap();
        repo.put("theme", "light").await.unwrap();
        assert_eq!(repo.get("theme").await.unwrap().as_deref(), Some("light"));

        assert!(repo.delete("theme").await.unwrap());
        assert!(!repo.delete("theme").await.unwrap());
        assert_eq!(repo.get("theme").await.unwrap(), None);
    }
}
