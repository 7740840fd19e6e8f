//! Core types shared by the calculator agent service.
//!
//! The HTTP layer only ever sees [`CalculatorAgent`]; concrete agents live in
//! their own crates and are injected at startup.

use async_trait::async_trait;
use thiserror::Error;

// ─────────────────────────────────────────────────────────────────────────────
// Error
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Evaluation failed: {0}")]
    Evaluation(String),

    #[error("LLM request failed: {0}")]
    LlmError(String),

    #[error("Agent returned an empty response")]
    EmptyResponse,
}

// ─────────────────────────────────────────────────────────────────────────────
// Agent Trait
// ─────────────────────────────────────────────────────────────────────────────

/// A text-in, text-out calculation agent.
///
/// Implementations must be safe to call from many requests at once.
#[async_trait]
pub trait CalculatorAgent: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    async fn run(&self, input_text: &str) -> Result<String, AgentError>;
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    struct Echo;

    #[async_trait]
    impl CalculatorAgent for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        async fn run(&self, input_text: &str) -> Result<String, AgentError> {
            Ok(input_text.to_string())
        }
    }

    #[tokio::test]
    async fn test_agent_is_object_safe() {
        let agent: Arc<dyn CalculatorAgent> = Arc::new(Echo);

        assert_eq!(agent.name(), "echo");
        assert_eq!(agent.run("2+2").await.unwrap(), "2+2");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AgentError::Evaluation("division by zero".into()).to_string(),
            "Evaluation failed: division by zero"
        );
        assert_eq!(AgentError::EmptyResponse.to_string(), "Agent returned an empty response");
    }
}
