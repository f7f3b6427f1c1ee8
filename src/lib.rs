//! Snakk - Tool-Calling Agent Runtime
//!
//! A library and CLI for durable, tool-using conversations with
//! OpenAI-compatible models.
//!
//! The name "Snakk" comes from the Norwegian word for "talk."
//!
//! # Overview
//!
//! Snakk allows you to:
//! - Run a bounded tool-calling loop against a chat model
//! - Persist conversations as threads and resume them across restarts
//! - Register typed tools the model can invoke, with argument validation
//! - Request schema-validated structured final answers
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `conversation` - Message and role data model
//! - `tools` - Tool trait, registry, and built-in tools
//! - `gateway` - Model gateway abstraction and OpenAI implementation
//! - `store` - Checkpoint store abstraction (SQLite, in-memory)
//! - `agent` - The agent runner coordinating the loop
//!
//! # Example
//!
//! ```rust,no_run
//! use snakk::agent::{AgentConfig, AgentRunner};
//! use snakk::gateway::OpenAiGateway;
//! use snakk::store::MemoryCheckpointStore;
//! use snakk::tools::ToolRegistry;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let runner = AgentRunner::new(
//!         Arc::new(OpenAiGateway::new("gpt-4o-mini")),
//!         Arc::new(ToolRegistry::with_builtins()),
//!         Arc::new(MemoryCheckpointStore::new()),
//!         AgentConfig::default(),
//!     );
//!
//!     let thread_id = runner.create_thread().await?;
//!     let outcome = runner.send(&thread_id, "Add 3 and 4.").await?;
//!     println!("{}", outcome.content);
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod conversation;
pub mod error;
pub mod gateway;
pub mod store;
pub mod tools;

pub use error::{Result, SnakkError};
