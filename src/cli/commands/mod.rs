//! CLI command implementations.

mod chat;
mod config;
mod doctor;
mod send;
mod threads;

pub use chat::run_chat;
pub use config::run_config;
pub use doctor::run_doctor;
pub use send::run_send;
pub use threads::run_threads;

use crate::agent::{AgentConfig, AgentRunner, TrimPolicy};
use crate::config::{Settings, StoreProvider};
use crate::error::Result;
use crate::gateway::OpenAiGateway;
use crate::store::{CheckpointStore, MemoryCheckpointStore, SqliteCheckpointStore};
use crate::tools::ToolRegistry;
use std::sync::Arc;

/// Open the configured checkpoint store.
fn open_store(settings: &Settings) -> Result<Arc<dyn CheckpointStore>> {
    Ok(match settings.checkpoint.provider {
        StoreProvider::Sqlite => Arc::new(SqliteCheckpointStore::new(&settings.sqlite_path())?),
        StoreProvider::Memory => Arc::new(MemoryCheckpointStore::new()),
    })
}

/// Build an agent runner from settings, with an optional model override.
fn build_runner(settings: &Settings, model: Option<&str>) -> Result<AgentRunner> {
    let model = model.unwrap_or(&settings.model.model);
    let gateway = Arc::new(
        OpenAiGateway::new(model).with_temperature(settings.model.temperature),
    );

    let trim = (settings.agent.trim_limit > 0).then(|| TrimPolicy {
        strategy: settings.agent.trim_strategy,
        limit: settings.agent.trim_limit,
        keep_system: settings.agent.keep_system,
    });

    let config = AgentConfig {
        system_prompt: Some(settings.agent.system_prompt.clone()),
        max_iterations: settings.agent.max_iterations,
        trim,
    };

    Ok(AgentRunner::new(
        gateway,
        Arc::new(ToolRegistry::with_builtins()),
        open_store(settings)?,
        config,
    ))
}
