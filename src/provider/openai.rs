use async_trait::async_trait;
use reqwest::Url;

use crate::completions::{ChatCompletionsClient, ChatCompletionsProviderConfig, endpoint_url};
use crate::core::{
    ChatTransport, ClientSettings, Completion, CompletionRequest, Credential, HttpClientConfig,
    LlmError,
};
use crate::provider::{Provider, constants::openai};

/// OpenAI-specific configuration for the chat-completions client
#[derive(Debug, Clone, Default)]
pub struct OpenAiConfig {
    pub organization: Option<String>,
    pub http_config: HttpClientConfig,
}

impl OpenAiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    pub fn with_http_config(mut self, config: HttpClientConfig) -> Self {
        self.http_config = config;
        self
    }
}

impl ChatCompletionsProviderConfig for OpenAiConfig {
    fn provider(&self) -> Provider {
        Provider::OpenAI
    }

    fn url(&self, endpoint: &str, _model: &str) -> Result<Url, LlmError> {
        endpoint_url(endpoint, openai::CHAT_COMPLETIONS_PATH)
    }

    fn auth_header(&self, credential: &Credential) -> (String, String) {
        (
            "Authorization".to_string(),
            format!("Bearer {}", credential.expose()),
        )
    }

    fn extra_headers(&self) -> Vec<(String, String)> {
        self.organization
            .iter()
            .map(|org| ("OpenAI-Organization".to_string(), org.clone()))
            .collect()
    }

    fn http_config(&self) -> HttpClientConfig {
        self.http_config.clone()
    }
}

pub struct OpenAiClient {
    completions_client: ChatCompletionsClient<OpenAiConfig>,
}

impl OpenAiClient {
    pub fn new() -> Result<Self, LlmError> {
        Self::with_config(OpenAiConfig::default())
    }

    pub fn with_config(config: OpenAiConfig) -> Result<Self, LlmError> {
        Ok(Self {
            completions_client: ChatCompletionsClient::new(config)?,
        })
    }

    pub fn config(&self) -> &OpenAiConfig {
        &self.completions_client.config
    }
}

#[async_trait]
impl ChatTransport for OpenAiClient {
    async fn send(
        &self,
        settings: &ClientSettings,
        request: &CompletionRequest,
    ) -> Result<Completion, LlmError> {
        self.completions_client.send(settings, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_and_headers() {
        let config = OpenAiConfig::new().with_organization("org-123");

        assert_eq!(
            config
                .url("https://api.openai.com/v1", "gpt-4o-mini")
                .unwrap()
                .as_str(),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            config.auth_header(&Credential::new("sk-test")),
            ("Authorization".to_string(), "Bearer sk-test".to_string())
        );
        assert_eq!(
            config.extra_headers(),
            vec![("OpenAI-Organization".to_string(), "org-123".to_string())]
        );
        assert!(config.include_model_in_body());
    }
}
