//! Pre-flight checks before commands that call the model API.
//!
//! Validates that required configuration is available before starting
//! operations that would otherwise fail midway through a turn.

use crate::error::{Result, SnakkError};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Interactive chat requires an API key.
    Chat,
    /// One-shot sends require an API key.
    Send,
    /// Thread inspection only touches local storage.
    Threads,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation) -> Result<()> {
    match operation {
        Operation::Chat | Operation::Send => check_api_key()?,
        Operation::Threads => {
            // No external requirements for local inspection
        }
    }
    Ok(())
}

/// Check if OpenAI API key is configured.
pub fn check_api_key() -> Result<()> {
    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.is_empty() => Ok(()),
        Ok(_) => Err(SnakkError::Config(
            "OPENAI_API_KEY is empty. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
        Err(_) => Err(SnakkError::Config(
            "OPENAI_API_KEY not set. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_threads_no_requirements() {
        // Thread inspection should always pass pre-flight
        assert!(check(Operation::Threads).is_ok());
    }
}
