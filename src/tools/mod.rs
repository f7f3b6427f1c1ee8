//! Tool abstraction for model-invocable capabilities.
//!
//! Tools are registered once at startup and dispatched by name when the
//! model requests them. Each tool declares a JSON Schema for its arguments;
//! the registry validates payloads against it before dispatch.

mod builtin;
mod registry;

pub use builtin::{builtin_tools, AddTool, DivideTool, MultiplyTool, WeatherTool, WebSearchTool};
pub use registry::ToolRegistry;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A tool's wire-facing signature: name, description, and argument schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique tool name.
    pub name: String,
    /// Human-readable description, shown to the model.
    pub description: String,
    /// JSON Schema for the argument object.
    pub parameters: serde_json::Value,
}

/// Trait for model-invocable tools.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name, used by the model to address this tool.
    fn name(&self) -> &str;

    /// Description shown to the model when deciding what to call.
    fn description(&self) -> &str;

    /// JSON Schema describing the argument object.
    fn parameters(&self) -> serde_json::Value;

    /// Execute with a validated argument object, returning a textual result.
    async fn execute(&self, args: serde_json::Value) -> Result<String>;

    /// Render this tool's wire-facing definition.
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters(),
        }
    }
}
