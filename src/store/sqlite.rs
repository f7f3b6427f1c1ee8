//! SQLite-based checkpoint store implementation.
//!
//! Messages are stored as a JSON column alongside the call counter, one row
//! per thread. For multi-process deployments with concurrent writers,
//! consider a server-backed key-value store instead.

use super::{CheckpointStore, Thread, ThreadSummary};
use crate::conversation::Message;
use crate::error::{Result, SnakkError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info, instrument};

/// SQLite-based checkpoint store.
pub struct SqliteCheckpointStore {
    conn: Mutex<Connection>,
}

impl SqliteCheckpointStore {
    /// Create a new SQLite checkpoint store.
    #[instrument(skip_all)]
    pub fn new(path: &Path) -> Result<Self> {
        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        // Enable WAL mode for better concurrent performance
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        Self::create_schema(&conn)?;

        info!("Initialized SQLite checkpoint store at {:?}", path);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite checkpoint store (useful for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::create_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn create_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS threads (
                id TEXT PRIMARY KEY,
                messages TEXT NOT NULL,
                message_count INTEGER NOT NULL,
                llm_calls INTEGER NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_threads_updated_at ON threads(updated_at);
            "#,
        )?;
        Ok(())
    }

    fn parse_timestamp(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now())
    }
}

#[async_trait]
impl CheckpointStore for SqliteCheckpointStore {
    #[instrument(skip(self))]
    async fn load(&self, thread_id: &str) -> Result<Option<Thread>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| SnakkError::Store(format!("failed to acquire lock: {}", e)))?;

        let row = conn
            .query_row(
                r#"
                SELECT id, messages, llm_calls, created_at, updated_at
                FROM threads
                WHERE id = ?1
                "#,
                params![thread_id],
                |row| {
                    let id: String = row.get(0)?;
                    let messages_json: String = row.get(1)?;
                    let llm_calls: u64 = row.get(2)?;
                    let created_at: String = row.get(3)?;
                    let updated_at: String = row.get(4)?;
                    Ok((id, messages_json, llm_calls, created_at, updated_at))
                },
            )
            .optional()?;

        let Some((id, messages_json, llm_calls, created_at, updated_at)) = row else {
            return Ok(None);
        };

        let messages: Vec<Message> = serde_json::from_str(&messages_json)?;

        debug!("Loaded thread {} with {} messages", id, messages.len());

        Ok(Some(Thread {
            id,
            messages,
            llm_calls,
            created_at: Self::parse_timestamp(&created_at),
            updated_at: Self::parse_timestamp(&updated_at),
        }))
    }

    #[instrument(skip(self, thread), fields(thread_id = %thread.id))]
    async fn save(&self, thread: &Thread) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| SnakkError::Store(format!("failed to acquire lock: {}", e)))?;

        let messages_json = serde_json::to_string(&thread.messages)?;

        conn.execute(
            r#"
            INSERT OR REPLACE INTO threads
            (id, messages, message_count, llm_calls, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                thread.id,
                messages_json,
                thread.messages.len() as i64,
                thread.llm_calls as i64,
                thread.created_at.to_rfc3339(),
                thread.updated_at.to_rfc3339(),
            ],
        )?;

        debug!("Saved thread {}", thread.id);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<ThreadSummary>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| SnakkError::Store(format!("failed to acquire lock: {}", e)))?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, message_count, llm_calls, updated_at
            FROM threads
            ORDER BY updated_at DESC
            "#,
        )?;

        let summaries = stmt.query_map([], |row| {
            let updated_at: String = row.get(3)?;
            Ok(ThreadSummary {
                id: row.get(0)?,
                message_count: row.get::<_, i64>(1)? as usize,
                llm_calls: row.get(2)?,
                updated_at: Self::parse_timestamp(&updated_at),
            })
        })?;

        Ok(summaries.filter_map(|s| s.ok()).collect())
    }

    #[instrument(skip(self))]
    async fn delete(&self, thread_id: &str) -> Result<bool> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| SnakkError::Store(format!("failed to acquire lock: {}", e)))?;

        let deleted = conn.execute("DELETE FROM threads WHERE id = ?1", params![thread_id])?;

        if deleted > 0 {
            info!("Deleted thread {}", thread_id);
        }
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::{Message, ToolCallRequest};

    #[tokio::test]
    async fn test_save_load_roundtrip() {
        let store = SqliteCheckpointStore::in_memory().unwrap();

        let mut thread = Thread::new("t1");
        thread.messages.push(Message::user("Add 3 and 4."));
        thread
            .messages
            .push(Message::assistant_tool_calls(vec![ToolCallRequest {
                id: "call_1".to_string(),
                name: "add".to_string(),
                arguments: serde_json::json!({"a": 3, "b": 4}),
            }]));
        thread.messages.push(Message::tool("call_1", "7"));
        thread.messages.push(Message::assistant("3 + 4 = 7"));
        thread.llm_calls = 2;

        store.save(&thread).await.unwrap();

        let loaded = store.load("t1").await.unwrap().unwrap();
        assert_eq!(loaded.messages.len(), 4);
        assert_eq!(loaded.llm_calls, 2);
        assert_eq!(loaded.messages[1].tool_calls[0].name, "add");
        assert_eq!(loaded.messages[2].tool_call_id.as_deref(), Some("call_1"));
    }

    #[tokio::test]
    async fn test_load_missing_returns_none() {
        let store = SqliteCheckpointStore::in_memory().unwrap();
        assert!(store.load("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_overwrites_prior_snapshot() {
        let store = SqliteCheckpointStore::in_memory().unwrap();

        let mut thread = Thread::new("t1");
        thread.messages.push(Message::user("first"));
        store.save(&thread).await.unwrap();

        thread.messages.push(Message::assistant("second"));
        thread.llm_calls = 1;
        store.save(&thread).await.unwrap();

        let loaded = store.load("t1").await.unwrap().unwrap();
        assert_eq!(loaded.messages.len(), 2);
        assert_eq!(loaded.llm_calls, 1);
    }

    #[tokio::test]
    async fn test_list_orders_by_recency() {
        let store = SqliteCheckpointStore::in_memory().unwrap();

        let mut older = Thread::new("older");
        older.updated_at = Utc::now() - chrono::Duration::hours(1);
        store.save(&older).await.unwrap();
        store.save(&Thread::new("newer")).await.unwrap();

        let summaries = store.list().await.unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].id, "newer");
        assert_eq!(summaries[1].id, "older");
    }

    #[tokio::test]
    async fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("threads.db");

        {
            let store = SqliteCheckpointStore::new(&path).unwrap();
            let mut thread = Thread::new("t1");
            thread.messages.push(Message::user("hello"));
            store.save(&thread).await.unwrap();
        }

        let store = SqliteCheckpointStore::new(&path).unwrap();
        let loaded = store.load("t1").await.unwrap().unwrap();
        assert_eq!(loaded.messages[0].content, "hello");
    }

    #[tokio::test]
    async fn test_delete() {
        let store = SqliteCheckpointStore::in_memory().unwrap();
        store.save(&Thread::new("t1")).await.unwrap();

        assert!(store.delete("t1").await.unwrap());
        assert!(!store.delete("t1").await.unwrap());
        assert!(store.load("t1").await.unwrap().is_none());
    }
}
