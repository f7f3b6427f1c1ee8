//! Agent runner: the bounded tool-calling loop.

use super::history::TrimPolicy;
use crate::conversation::{Message, ToolCallRequest};
use crate::error::{Result, SnakkError};
use crate::gateway::{ModelGateway, ModelReply, OutputSchema};
use crate::store::{CheckpointStore, Thread};
use crate::tools::ToolRegistry;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Configuration for a turn of the agent loop.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// System prompt installed as the first message of a new thread.
    pub system_prompt: Option<String>,
    /// Maximum model invocations per turn before the turn is aborted.
    pub max_iterations: usize,
    /// Optional history trimming, applied before each model invocation.
    pub trim: Option<TrimPolicy>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            system_prompt: None,
            max_iterations: 10,
            trim: None,
        }
    }
}

/// Agent runner coordinating a model gateway, tool registry, and checkpoint
/// store.
///
/// All collaborators are injected. Two concurrent turns on the same thread
/// id are a caller error; turns on different threads are independent.
pub struct AgentRunner {
    gateway: Arc<dyn ModelGateway>,
    registry: Arc<ToolRegistry>,
    store: Arc<dyn CheckpointStore>,
    config: AgentConfig,
}

impl AgentRunner {
    /// Create a runner from its collaborators.
    pub fn new(
        gateway: Arc<dyn ModelGateway>,
        registry: Arc<ToolRegistry>,
        store: Arc<dyn CheckpointStore>,
        config: AgentConfig,
    ) -> Self {
        Self {
            gateway,
            registry,
            store,
            config,
        }
    }

    /// Create a new empty thread and return its id.
    pub async fn create_thread(&self) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        self.store.save(&Thread::new(&id)).await?;
        info!("Created thread {}", id);
        Ok(id)
    }

    /// Run one turn and return the final textual answer.
    pub async fn send(&self, thread_id: &str, input: &str) -> Result<TurnOutcome> {
        self.run_turn(thread_id, input, None).await
    }

    /// Run one turn whose final answer must match the given schema.
    pub async fn send_structured(
        &self,
        thread_id: &str,
        input: &str,
        schema: &OutputSchema,
    ) -> Result<TurnOutcome> {
        self.run_turn(thread_id, input, Some(schema)).await
    }

    /// One caller-initiated turn: model round-trips until a final answer.
    ///
    /// The thread snapshot is written exactly once, after the final answer.
    /// A turn that fails (gateway error, budget exhausted) or is cancelled
    /// mid-flight persists nothing; the prior snapshot stays intact.
    #[instrument(skip(self, input, output_schema), fields(thread_id = %thread_id))]
    async fn run_turn(
        &self,
        thread_id: &str,
        input: &str,
        output_schema: Option<&OutputSchema>,
    ) -> Result<TurnOutcome> {
        let mut thread = self
            .store
            .load(thread_id)
            .await?
            .unwrap_or_else(|| Thread::new(thread_id));

        if thread.messages.is_empty() {
            if let Some(prompt) = &self.config.system_prompt {
                thread.messages.push(Message::system(prompt.clone()));
            }
        }
        thread.messages.push(Message::user(input));

        let tool_defs = self.registry.definitions();
        let mut records: Vec<ToolCallRecord> = Vec::new();
        let mut iterations = 0;

        let final_reply = loop {
            iterations += 1;
            if iterations > self.config.max_iterations {
                return Err(SnakkError::LoopBudgetExceeded(self.config.max_iterations));
            }

            if let Some(trim) = &self.config.trim {
                trim.apply(&mut thread.messages);
            }

            debug!(
                "Turn iteration {}, {} messages",
                iterations,
                thread.messages.len()
            );

            let reply = self
                .gateway
                .complete(&thread.messages, &tool_defs, output_schema)
                .await?;
            thread.llm_calls += 1;

            match reply {
                ModelReply::ToolCalls(calls) if !calls.is_empty() => {
                    thread
                        .messages
                        .push(Message::assistant_tool_calls(calls.clone()));

                    // Independent invocations run concurrently; results are
                    // appended in request order regardless of completion
                    // order, since join_all preserves input order.
                    let results =
                        join_all(calls.iter().map(|call| self.execute_tool_call(call))).await;

                    for record in results {
                        thread
                            .messages
                            .push(Message::tool(&record.id, &record.result));
                        records.push(record);
                    }
                }
                // An empty tool-call batch is a final answer with no text.
                ModelReply::ToolCalls(_) => break ModelReply::Text(String::new()),
                reply => break reply,
            }
        };

        let (content, structured) = match final_reply {
            ModelReply::Text(text) => (text, None),
            ModelReply::Structured(value) => (value.to_string(), Some(value)),
            ModelReply::ToolCalls(_) => unreachable!("tool calls are handled in the loop"),
        };

        thread.messages.push(Message::assistant(content.clone()));
        thread.updated_at = chrono::Utc::now();
        self.store.save(&thread).await?;

        info!(
            "Turn complete on thread {} after {} iteration(s), {} tool call(s)",
            thread_id,
            iterations,
            records.len()
        );

        Ok(TurnOutcome {
            thread_id: thread_id.to_string(),
            content,
            structured,
            tool_calls: records,
            iterations,
        })
    }

    /// Execute a single requested invocation and record the outcome.
    ///
    /// Tool-level failures become model-visible text so the conversation can
    /// continue; only gateway-level failures abort the turn.
    async fn execute_tool_call(&self, call: &ToolCallRequest) -> ToolCallRecord {
        let (result, ok) = match self.registry.invoke(&call.name, &call.arguments).await {
            Ok(output) => (output, true),
            Err(e) => (format!("Tool error: {}", e), false),
        };

        ToolCallRecord {
            id: call.id.clone(),
            name: call.name.clone(),
            arguments: call.arguments.clone(),
            result,
            ok,
        }
    }
}

/// Result of one turn of the agent loop.
#[derive(Debug)]
pub struct TurnOutcome {
    /// Thread the turn ran on.
    pub thread_id: String,
    /// Final answer text. For structured turns, the serialized JSON.
    pub content: String,
    /// Final structured answer, when an output schema was supplied.
    pub structured: Option<serde_json::Value>,
    /// Record of all tool calls made during the turn, in request order.
    pub tool_calls: Vec<ToolCallRecord>,
    /// Number of model invocations used.
    pub iterations: usize,
}

/// Record of a tool call made during a turn.
#[derive(Debug, Clone)]
pub struct ToolCallRecord {
    /// Invocation identifier from the model.
    pub id: String,
    /// Tool name.
    pub name: String,
    /// Argument payload.
    pub arguments: serde_json::Value,
    /// Textual result fed back to the model.
    pub result: String,
    /// Whether the handler succeeded.
    pub ok: bool,
}

impl std::fmt::Display for ToolCallRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.arguments)
    }
}
