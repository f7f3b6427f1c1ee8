//! In-memory checkpoint store implementation.
//!
//! Useful for testing and ephemeral sessions.

use super::{CheckpointStore, Thread, ThreadSummary};
use crate::error::{Result, SnakkError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory checkpoint store.
pub struct MemoryCheckpointStore {
    threads: RwLock<HashMap<String, Thread>>,
}

impl MemoryCheckpointStore {
    /// Create a new in-memory checkpoint store.
    pub fn new() -> Self {
        Self {
            threads: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryCheckpointStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CheckpointStore for MemoryCheckpointStore {
    async fn load(&self, thread_id: &str) -> Result<Option<Thread>> {
        let threads = self
            .threads
            .read()
            .map_err(|e| SnakkError::Store(format!("failed to acquire lock: {}", e)))?;
        Ok(threads.get(thread_id).cloned())
    }

    async fn save(&self, thread: &Thread) -> Result<()> {
        let mut threads = self
            .threads
            .write()
            .map_err(|e| SnakkError::Store(format!("failed to acquire lock: {}", e)))?;
        threads.insert(thread.id.clone(), thread.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<ThreadSummary>> {
        let threads = self
            .threads
            .read()
            .map_err(|e| SnakkError::Store(format!("failed to acquire lock: {}", e)))?;

        let mut summaries: Vec<ThreadSummary> = threads.values().map(|t| t.summary()).collect();
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(summaries)
    }

    async fn delete(&self, thread_id: &str) -> Result<bool> {
        let mut threads = self
            .threads
            .write()
            .map_err(|e| SnakkError::Store(format!("failed to acquire lock: {}", e)))?;
        Ok(threads.remove(thread_id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::Message;

    #[tokio::test]
    async fn test_load_missing_returns_none() {
        let store = MemoryCheckpointStore::new();
        assert!(store.load("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_load_roundtrip() {
        let store = MemoryCheckpointStore::new();

        let mut thread = Thread::new("t1");
        thread.messages.push(Message::user("Add 3 and 4."));
        thread.messages.push(Message::assistant("7"));
        thread.llm_calls = 1;

        store.save(&thread).await.unwrap();

        let loaded = store.load("t1").await.unwrap().unwrap();
        assert_eq!(loaded.id, "t1");
        assert_eq!(loaded.messages.len(), 2);
        assert_eq!(loaded.messages[0].content, "Add 3 and 4.");
        assert_eq!(loaded.llm_calls, 1);
    }

    #[tokio::test]
    async fn test_reload_without_turns_is_identical() {
        let store = MemoryCheckpointStore::new();

        let mut thread = Thread::new("t1");
        thread.messages.push(Message::user("hello"));
        store.save(&thread).await.unwrap();

        let first = store.load("t1").await.unwrap().unwrap();
        let second = store.load("t1").await.unwrap().unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let store = MemoryCheckpointStore::new();

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
    async fn test_list_and_delete() {
        let store = MemoryCheckpointStore::new();
        store.save(&Thread::new("t1")).await.unwrap();
        store.save(&Thread::new("t2")).await.unwrap();

        assert_eq!(store.list().await.unwrap().len(), 2);
        assert!(store.delete("t1").await.unwrap());
        assert!(!store.delete("t1").await.unwrap());
        assert_eq!(store.list().await.unwrap().len(), 1);
    }
}
