//! Model gateway: the boundary between the agent loop and the LLM API.
//!
//! The gateway is a thin request/response seam. It carries no retry policy
//! and no loop state; callers that want backoff wrap `complete` themselves.

mod openai;

pub use openai::OpenAiGateway;

use crate::conversation::{Message, ToolCallRequest};
use crate::error::Result;
use crate::tools::ToolDefinition;
use async_trait::async_trait;

/// Schema for a structured final answer.
#[derive(Debug, Clone)]
pub struct OutputSchema {
    /// Schema name, required by the API's structured-output mode.
    pub name: String,
    /// JSON Schema the final answer must satisfy.
    pub schema: serde_json::Value,
}

impl OutputSchema {
    /// Create a named output schema.
    pub fn new(name: impl Into<String>, schema: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }
}

/// One reply from the model.
///
/// `Text` and `Structured` are terminal; `ToolCalls` asks the loop to run
/// tools and come back. Implementations normalize an empty tool-call list
/// from the API into `Text` so callers never see a zero-length batch.
#[derive(Debug, Clone)]
pub enum ModelReply {
    /// Final textual answer.
    Text(String),
    /// Final structured answer, produced when an output schema was supplied.
    Structured(serde_json::Value),
    /// Non-terminal: the model requests these tool invocations.
    ToolCalls(Vec<ToolCallRequest>),
}

/// Trait for chat-completion backends.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Send a conversation plus available tool signatures, get one reply.
    ///
    /// Fails with `Upstream` when the endpoint cannot be reached and with
    /// `MalformedReply` when the response fits none of the reply shapes.
    async fn complete(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
        output_schema: Option<&OutputSchema>,
    ) -> Result<ModelReply>;
}
