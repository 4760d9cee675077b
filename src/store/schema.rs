use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

use super::types::{ChangeEvent, StoreError};

/// Capacity of the change bus. Subscribers that lag simply coalesce the
/// missed events into a single re-query, so a small buffer is enough.
const CHANGE_BUS_CAPACITY: usize = 64;

// ============================================================================
// Content Store
// ============================================================================

/// Single-owner document store backed by SQLite.
///
/// All documents live in one `documents` table scoped by `(owner, collection)`;
/// payloads are JSON objects and ordering uses `json_extract` on the
/// configured sort field. The owner identity is threaded in explicitly at
/// construction rather than read from ambient process state.
///
/// Cloning is cheap: clones share the connection pool and the change bus.
#[derive(Clone)]
pub struct ContentStore {
    pub(crate) pool: SqlitePool,
    pub(crate) owner: Arc<str>,
    changes: broadcast::Sender<ChangeEvent>,
}

impl ContentStore {
    /// Open a content database and run migrations.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InstanceLocked` if another process has the
    /// database locked (SQLITE_BUSY, SQLITE_LOCKED, SQLITE_CANTOPEN).
    /// Returns `StoreError::Migration` if schema creation fails.
    pub async fn open(path: &str, owner_id: &str) -> Result<Self, StoreError> {
        let url = format!("sqlite:{}?mode=rwc", path);

        // busy_timeout=5000: SQLite waits up to 5 seconds for locks to release
        // before returning SQLITE_BUSY. Using pragma() ensures all connections
        // in the pool inherit this setting.
        let options = SqliteConnectOptions::from_str(&url)
            .map_err(StoreError::from_sqlx)?
            .pragma("busy_timeout", "5000");
        // SQLite is single-writer; 5 connections covers concurrent
        // subscription re-queries alongside the occasional write.
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await
            .map_err(StoreError::from_sqlx)?;

        let (changes, _) = broadcast::channel(CHANGE_BUS_CAPACITY);
        let store = Self {
            pool,
            owner: Arc::from(owner_id),
            changes,
        };
        store.migrate().await?;
        Ok(store)
    }

    /// Owner scope this store was constructed with.
    pub fn owner_id(&self) -> &str {
        &self.owner
    }

    /// Run schema migrations atomically within a transaction.
    ///
    /// All statements use `IF NOT EXISTS`, so re-running on an existing
    /// database is a no-op.
    async fn migrate(&self) -> Result<(), StoreError> {
        // Per-connection setting, must be outside the transaction
        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&self.pool)
            .await?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::Migration(e.to_string()))?;

        // `seq` is the insertion-order tie-break for sorts; `id` is the
        // opaque store-assigned identifier handed back to callers.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                owner TEXT NOT NULL,
                collection TEXT NOT NULL,
                payload TEXT NOT NULL
            )
        "#,
        )
        .execute(&mut *tx)
        .await
        .map_err(|e| StoreError::Migration(e.to_string()))?;

        // Every query filters by (owner, collection) before sorting
        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_documents_scope ON documents(owner, collection)",
        )
        .execute(&mut *tx)
        .await
        .map_err(|e| StoreError::Migration(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| StoreError::Migration(e.to_string()))?;

        Ok(())
    }

    /// Publish a change for `collection` on the bus.
    ///
    /// Send errors mean no live subscriptions exist, which is fine.
    pub(crate) fn publish_change(&self, collection: &str) {
        let _ = self.changes.send(ChangeEvent {
            collection: Arc::from(collection),
        });
        tracing::debug!(collection = %collection, "published change event");
    }

    /// New receiver on the change bus. Each subscription takes its own
    /// receiver; there is no sharing or de-duplication across subscribers.
    pub(crate) fn change_events(&self) -> broadcast::Receiver<ChangeEvent> {
        self.changes.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_in_memory() {
        let store = ContentStore::open(":memory:", "test-owner").await.unwrap();
        assert_eq!(store.owner_id(), "test-owner");
    }

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let store = ContentStore::open(":memory:", "test-owner").await.unwrap();
        // Second run over the same pool must be a no-op
        store.migrate().await.unwrap();
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_ok() {
        let store = ContentStore::open(":memory:", "test-owner").await.unwrap();
        store.publish_change("projects");
    }
}
