mod constants;
pub(crate) mod azure;
pub(crate) mod openai;

pub use azure::{AzureOpenAiClient, AzureOpenAiConfig};
pub use openai::{OpenAiClient, OpenAiConfig};

use std::sync::Arc;

use crate::core::{ChatTransport, LlmError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    AzureOpenAI,
    OpenAI,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::AzureOpenAI => write!(f, "AzureOpenAI"),
            Provider::OpenAI => write!(f, "OpenAI"),
        }
    }
}

impl Provider {
    /// Get the default environment variable name for this provider's API key
    pub fn default_api_key_env_var(&self) -> &'static str {
        match self {
            Provider::AzureOpenAI => constants::azure::API_KEY_ENV_VAR,
            Provider::OpenAI => constants::openai::API_KEY_ENV_VAR,
        }
    }

    pub fn endpoint_env_var(&self) -> &'static str {
        match self {
            Provider::AzureOpenAI => constants::azure::ENDPOINT_ENV_VAR,
            Provider::OpenAI => constants::openai::ENDPOINT_ENV_VAR,
        }
    }

    /// Environment variable holding the deployment (Azure) or model (OpenAI) name.
    pub fn model_env_var(&self) -> &'static str {
        match self {
            Provider::AzureOpenAI => constants::azure::DEPLOYMENT_ENV_VAR,
            Provider::OpenAI => constants::openai::MODEL_ENV_VAR,
        }
    }

    /// Endpoint used when none is configured. Azure endpoints are per resource.
    pub fn default_endpoint(&self) -> Option<&'static str> {
        match self {
            Provider::AzureOpenAI => None,
            Provider::OpenAI => Some(constants::openai::API_BASE),
        }
    }

    /// Build the HTTP transport for this provider with default settings.
    pub fn transport(&self) -> Result<Arc<dyn ChatTransport>, LlmError> {
        let transport: Arc<dyn ChatTransport> = match self {
            Provider::AzureOpenAI => Arc::new(AzureOpenAiClient::new()?),
            Provider::OpenAI => Arc::new(OpenAiClient::new()?),
        };
        Ok(transport)
    }
}
