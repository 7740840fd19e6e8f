//! Server configuration from environment variables.

use std::net::{AddrParseError, SocketAddr};
use std::sync::Arc;

use calc_core::CalculatorAgent;
use calc_engine::ArithmeticAgent;
use calc_llm::{LlmCalculator, DEFAULT_MODEL};

pub const DEFAULT_ADDR: &str = "0.0.0.0:8000";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Invalid CALC_SERVER_ADDR {value:?}: {source}")]
    InvalidAddr {
        value: String,
        #[source]
        source: AddrParseError,
    },

    #[error("Unknown CALC_AGENT {0:?} (expected \"arithmetic\" or \"openai\")")]
    UnknownBackend(String),

    #[error("{0} must be set when CALC_AGENT=openai")]
    MissingVar(&'static str),
}

/// Which calculator agent answers `/execute`.
#[derive(Clone, PartialEq)]
pub enum AgentBackend {
    Arithmetic,
    OpenAi {
        model: String,
        api_key: String,
        api_base: Option<String>,
    },
}

impl AgentBackend {
    pub fn name(&self) -> &'static str {
        match self {
            AgentBackend::Arithmetic => "arithmetic",
            AgentBackend::OpenAi { .. } => "openai",
        }
    }
}

// Keeps the API key out of logs.
impl std::fmt::Debug for AgentBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentBackend::Arithmetic => f.write_str("Arithmetic"),
            AgentBackend::OpenAi { model, api_base, .. } => f
                .debug_struct("OpenAi")
                .field("model", model)
                .field("api_base", api_base)
                .finish_non_exhaustive(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub backend: AgentBackend,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from a variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let addr_value = var("CALC_SERVER_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr: SocketAddr = addr_value
            .parse()
            .map_err(|source| ConfigError::InvalidAddr { value: addr_value.clone(), source })?;

        let backend = match var("CALC_AGENT").map(|b| b.to_lowercase()).as_deref() {
            None | Some("arithmetic") => AgentBackend::Arithmetic,
            Some("openai") => AgentBackend::OpenAi {
                model: var("CALC_AGENT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                api_key: var("OPENAI_API_KEY").ok_or(ConfigError::MissingVar("OPENAI_API_KEY"))?,
                api_base: var("OPENAI_API_BASE"),
            },
            Some(other) => return Err(ConfigError::UnknownBackend(other.to_string())),
        };

        Ok(Self { addr, backend })
    }

    pub fn build_agent(&self) -> Arc<dyn CalculatorAgent> {
        match &self.backend {
            AgentBackend::Arithmetic => Arc::new(ArithmeticAgent::new()),
            AgentBackend::OpenAi { model, api_key, api_base } => {
                Arc::new(LlmCalculator::new(model, api_key, api_base.as_deref()))
            }
        }
    }
}
