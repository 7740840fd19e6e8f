//! Calculator agent backed by an OpenAI-compatible chat completion endpoint.
//!
//! Works against the OpenAI API or any compatible server (Ollama's `/v1`
//! endpoint, for example) via `api_base`.

use std::time::Instant;

use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use calc_core::{AgentError, CalculatorAgent};
use tracing::debug;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const SYSTEM_PROMPT: &str = "You are a calculator. Work out the arithmetic the user asks for \
and reply with the final answer only: a single number, no words, no units, no working. \
If the request contains no calculation, reply with a short sentence saying so.";

pub struct LlmCalculator {
    client: Client<OpenAIConfig>,
    model: String,
}

impl LlmCalculator {
    /// Creates a calculator for `model`. `api_base` overrides the OpenAI URL.
    pub fn new(model: &str, api_key: &str, api_base: Option<&str>) -> Self {
        let mut config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(base) = api_base {
            config = config.with_api_base(base);
        }

        Self {
            client: Client::with_config(config),
            model: model.to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, input_text: &str) -> Result<CreateChatCompletionRequest, AgentError> {
        let system = ChatCompletionRequestSystemMessageArgs::default()
            .content(SYSTEM_PROMPT)
            .build()
            .map_err(|e| AgentError::LlmError(e.to_string()))?;
        let user = ChatCompletionRequestUserMessageArgs::default()
            .content(input_text)
            .build()
            .map_err(|e| AgentError::LlmError(e.to_string()))?;
        let messages: Vec<ChatCompletionRequestMessage> = vec![system.into(), user.into()];

        CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .temperature(0.0)
            .messages(messages)
            .build()
            .map_err(|e| AgentError::LlmError(e.to_string()))
    }
}

/// Trims the completion text, treating missing or blank content as an error.
fn answer_from(content: Option<String>) -> Result<String, AgentError> {
    let text = content.unwrap_or_default();
    let trimmed = text.trim();
    match trimmed.is_empty() {
        true => Err(AgentError::EmptyResponse),
        false => Ok(trimmed.to_string()),
    }
}

#[async_trait]
impl CalculatorAgent for LlmCalculator {
    fn name(&self) -> &str {
        "openai"
    }

    async fn run(&self, input_text: &str) -> Result<String, AgentError> {
        let request = self.build_request(input_text)?;
        let start = Instant::now();

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| AgentError::LlmError(e.to_string()))?;

        if let Some(usage) = &response.usage {
            debug!(
                model = %self.model,
                input_tokens = usage.prompt_tokens,
                output_tokens = usage.completion_tokens,
                elapsed = ?start.elapsed(),
                "LLM completion"
            );
        }

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);
        answer_from(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request() {
        let agent = LlmCalculator::new(DEFAULT_MODEL, "sk-test", None);
        let request = agent.build_request("What is 2+2?").unwrap();

        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.temperature, Some(0.0));
    }

    #[test]
    fn test_custom_api_base() {
        let agent = LlmCalculator::new("llama3.2", "ollama", Some("http://localhost:11434/v1"));
        assert_eq!(agent.model(), "llama3.2");
        assert_eq!(agent.name(), "openai");
    }

    #[test]
    fn test_answer_from() {
        assert_eq!(answer_from(Some(" 4\n".into())).unwrap(), "4");
        assert!(matches!(answer_from(Some("   ".into())), Err(AgentError::EmptyResponse)));
        assert!(matches!(answer_from(None), Err(AgentError::EmptyResponse)));
    }
}
