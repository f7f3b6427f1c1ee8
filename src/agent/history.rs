//! Conversation history trimming.
//!
//! Bounds prompt cost by dropping the oldest messages before each model
//! invocation. Trimming never reorders retained messages, and trimming an
//! already-short history is a no-op.

use crate::conversation::{Message, Role};
use serde::{Deserialize, Serialize};

/// How the trim budget is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrimStrategy {
    /// Budget is a message count.
    #[default]
    Messages,
    /// Budget is an estimated token count (roughly four characters per
    /// token). An estimate, not a tokenizer.
    Tokens,
}

impl std::str::FromStr for TrimStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "messages" | "message" => Ok(TrimStrategy::Messages),
            "tokens" | "token" => Ok(TrimStrategy::Tokens),
            _ => Err(format!("Unknown trim strategy: {}", s)),
        }
    }
}

/// Drop-oldest trimming policy.
#[derive(Debug, Clone)]
pub struct TrimPolicy {
    /// Counting strategy for the budget.
    pub strategy: TrimStrategy,
    /// Budget: message count or estimated tokens, per `strategy`.
    pub limit: usize,
    /// Always retain leading system messages.
    pub keep_system: bool,
}

impl TrimPolicy {
    /// Keep at most `limit` messages.
    pub fn messages(limit: usize) -> Self {
        Self {
            strategy: TrimStrategy::Messages,
            limit,
            keep_system: true,
        }
    }

    /// Keep roughly `limit` estimated tokens of history.
    pub fn tokens(limit: usize) -> Self {
        Self {
            strategy: TrimStrategy::Tokens,
            limit,
            keep_system: true,
        }
    }

    /// Set whether leading system messages are always retained.
    pub fn with_keep_system(mut self, keep_system: bool) -> Self {
        self.keep_system = keep_system;
        self
    }

    /// Trim the history in place according to this policy.
    pub fn apply(&self, messages: &mut Vec<Message>) {
        let lead = if self.keep_system {
            messages
                .iter()
                .take_while(|m| m.role == Role::System)
                .count()
        } else {
            0
        };

        let tail_start = match self.strategy {
            TrimStrategy::Messages => self.tail_start_by_count(messages, lead),
            TrimStrategy::Tokens => self.tail_start_by_tokens(messages, lead),
        };

        if tail_start > lead {
            messages.drain(lead..tail_start);
        }
    }

    /// First retained index after the leading block, counting messages.
    fn tail_start_by_count(&self, messages: &[Message], lead: usize) -> usize {
        if messages.len() <= self.limit {
            return lead;
        }
        let tail_budget = self.limit.saturating_sub(lead);
        messages.len().saturating_sub(tail_budget).max(lead)
    }

    /// First retained index after the leading block, counting estimated
    /// tokens. The newest message is always retained.
    fn tail_start_by_tokens(&self, messages: &[Message], lead: usize) -> usize {
        let lead_cost: usize = messages[..lead].iter().map(estimate_tokens).sum();
        let mut budget = self.limit.saturating_sub(lead_cost);

        let mut start = messages.len();
        while start > lead {
            let cost = estimate_tokens(&messages[start - 1]);
            if cost > budget && start < messages.len() {
                break;
            }
            budget = budget.saturating_sub(cost);
            start -= 1;
        }
        start
    }
}

/// Rough token estimate: four characters per token plus a small per-message
/// overhead for role framing.
fn estimate_tokens(message: &Message) -> usize {
    let mut chars = message.content.len();
    for call in &message.tool_calls {
        chars += call.name.len() + call.arguments.to_string().len();
    }
    chars / 4 + 4
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(n: usize) -> Vec<Message> {
        (0..n).map(|i| Message::user(format!("message {}", i))).collect()
    }

    #[test]
    fn test_short_history_is_noop() {
        let policy = TrimPolicy::messages(10);
        let mut messages = history(5);
        policy.apply(&mut messages);
        assert_eq!(messages.len(), 5);
        assert_eq!(messages[0].content, "message 0");
    }

    #[test]
    fn test_trims_to_exactly_limit() {
        let policy = TrimPolicy::messages(10);
        let mut messages = history(25);
        policy.apply(&mut messages);

        assert_eq!(messages.len(), 10);
        // The 10 most recent, in original relative order.
        assert_eq!(messages[0].content, "message 15");
        assert_eq!(messages[9].content, "message 24");
    }

    #[test]
    fn test_keeps_leading_system_messages() {
        let policy = TrimPolicy::messages(10);
        let mut messages = vec![Message::system("You are a calculator.")];
        messages.extend(history(25));
        policy.apply(&mut messages);

        assert_eq!(messages.len(), 10);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].content, "message 16");
        assert_eq!(messages[9].content, "message 24");
    }

    #[test]
    fn test_keep_system_disabled() {
        let policy = TrimPolicy::messages(10).with_keep_system(false);
        let mut messages = vec![Message::system("You are a calculator.")];
        messages.extend(history(25));
        policy.apply(&mut messages);

        assert_eq!(messages.len(), 10);
        assert_eq!(messages[0].content, "message 15");
    }

    #[test]
    fn test_idempotent() {
        let policy = TrimPolicy::messages(10);
        let mut messages = history(25);
        policy.apply(&mut messages);
        let after_first: Vec<String> = messages.iter().map(|m| m.content.clone()).collect();

        policy.apply(&mut messages);
        let after_second: Vec<String> = messages.iter().map(|m| m.content.clone()).collect();
        assert_eq!(after_first, after_second);
    }

    #[test]
    fn test_token_budget_drops_oldest() {
        // Each message is ~6 estimated tokens ("message N" is 9-10 chars).
        let policy = TrimPolicy::tokens(20);
        let mut messages = history(10);
        policy.apply(&mut messages);

        assert!(messages.len() < 10);
        assert_eq!(messages.last().unwrap().content, "message 9");
        // Retained messages are a contiguous most-recent suffix.
        let first_kept: usize = messages[0]
            .content
            .strip_prefix("message ")
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(messages.len(), 10 - first_kept);
    }

    #[test]
    fn test_token_budget_always_keeps_newest() {
        let policy = TrimPolicy::tokens(1);
        let mut messages = history(10);
        policy.apply(&mut messages);

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "message 9");
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("messages".parse::<TrimStrategy>().unwrap(), TrimStrategy::Messages);
        assert_eq!("tokens".parse::<TrimStrategy>().unwrap(), TrimStrategy::Tokens);
        assert!("bytes".parse::<TrimStrategy>().is_err());
    }
}
