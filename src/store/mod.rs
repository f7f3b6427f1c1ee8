//! Checkpoint store abstraction for conversation threads.
//!
//! Provides a trait-based interface for different persistence backends.
//! A thread's snapshot is written wholesale at the end of each turn; a
//! concurrent save for the same id is last-writer-wins by contract.

mod memory;
mod sqlite;

pub use memory::MemoryCheckpointStore;
pub use sqlite::SqliteCheckpointStore;

use crate::conversation::Message;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A durable conversation session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thread {
    /// Opaque thread identifier.
    pub id: String,
    /// Ordered conversation history, oldest first.
    pub messages: Vec<Message>,
    /// Number of model invocations made on this thread so far.
    pub llm_calls: u64,
    /// When this thread was created.
    pub created_at: DateTime<Utc>,
    /// When this thread was last saved.
    pub updated_at: DateTime<Utc>,
}

impl Thread {
    /// Create an empty thread with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            messages: Vec::new(),
            llm_calls: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Summary view of this thread.
    pub fn summary(&self) -> ThreadSummary {
        ThreadSummary {
            id: self.id.clone(),
            message_count: self.messages.len(),
            llm_calls: self.llm_calls,
            updated_at: self.updated_at,
        }
    }
}

/// Summary information about a stored thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadSummary {
    /// Thread identifier.
    pub id: String,
    /// Number of messages in the conversation.
    pub message_count: usize,
    /// Number of model invocations made so far.
    pub llm_calls: u64,
    /// When the thread was last saved.
    pub updated_at: DateTime<Utc>,
}

/// Trait for checkpoint store implementations.
#[async_trait]
pub trait CheckpointStore: Send + Sync {
    /// Load a thread snapshot, or None if the id has never been saved.
    async fn load(&self, thread_id: &str) -> Result<Option<Thread>>;

    /// Persist a thread snapshot, overwriting any prior one.
    async fn save(&self, thread: &Thread) -> Result<()>;

    /// List stored threads, most recently updated first.
    async fn list(&self) -> Result<Vec<ThreadSummary>>;

    /// Delete a thread. Returns whether one existed.
    async fn delete(&self, thread_id: &str) -> Result<bool>;
}
