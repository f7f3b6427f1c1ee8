//! Agent runtime: the bounded tool-calling loop over durable threads.
//!
//! The runner coordinates the model gateway and the tool registry until the
//! model produces a final answer, then persists the thread snapshot in one
//! write. Gateways, tools, and stores are injected; the runtime holds no
//! process-wide state.

mod history;
mod runner;

pub use history::{TrimPolicy, TrimStrategy};
pub use runner::{AgentConfig, AgentRunner, ToolCallRecord, TurnOutcome};
