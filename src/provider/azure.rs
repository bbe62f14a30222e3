//! Azure OpenAI provider.
//!
//! Requests target a deployment rather than a model:
//! `{endpoint}/openai/deployments/{deployment}/chat/completions?api-version=...`,
//! authenticated with the `api-key` header.

use async_trait::async_trait;
use reqwest::Url;

use crate::completions::{ChatCompletionsClient, ChatCompletionsProviderConfig, endpoint_url};
use crate::core::{
    ChatTransport, ClientSettings, Completion, CompletionRequest, Credential, HttpClientConfig,
    LlmError,
};
use crate::provider::{Provider, constants::azure};

#[derive(Debug, Clone)]
pub struct AzureOpenAiConfig {
    pub api_version: String,
    pub http_config: HttpClientConfig,
}

impl Default for AzureOpenAiConfig {
    fn default() -> Self {
        Self {
            api_version: azure::API_VERSION.to_string(),
            http_config: HttpClientConfig::default(),
        }
    }
}

impl AzureOpenAiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn with_http_config(mut self, config: HttpClientConfig) -> Self {
        self.http_config = config;
        self
    }
}

impl ChatCompletionsProviderConfig for AzureOpenAiConfig {
    fn provider(&self) -> Provider {
        Provider::AzureOpenAI
    }

    fn url(&self, endpoint: &str, deployment: &str) -> Result<Url, LlmError> {
        let mut url = endpoint_url(
            endpoint,
            ["openai", "deployments", deployment, "chat", "completions"],
        )?;
        url.query_pairs_mut()
            .append_pair("api-version", &self.api_version);
        Ok(url)
    }

    fn auth_header(&self, credential: &Credential) -> (String, String) {
        (
            azure::API_KEY_HEADER.to_string(),
            credential.expose().to_string(),
        )
    }

    fn include_model_in_body(&self) -> bool {
        false
    }

    fn http_config(&self) -> HttpClientConfig {
        self.http_config.clone()
    }
}

pub struct AzureOpenAiClient {
    completions_client: ChatCompletionsClient<AzureOpenAiConfig>,
}

impl AzureOpenAiClient {
    pub fn new() -> Result<Self, LlmError> {
        Self::with_config(AzureOpenAiConfig::default())
    }

    pub fn with_config(config: AzureOpenAiConfig) -> Result<Self, LlmError> {
        Ok(Self {
            completions_client: ChatCompletionsClient::new(config)?,
        })
    }

    pub fn config(&self) -> &AzureOpenAiConfig {
        &self.completions_client.config
    }
}

#[async_trait]
impl ChatTransport for AzureOpenAiClient {
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
    fn test_url_is_deployment_scoped() {
        let config = AzureOpenAiConfig::new().with_api_version("2024-06-01");

        assert_eq!(
            config
                .url("https://my-resource.openai.azure.com", "summarizer")
                .unwrap()
                .as_str(),
            "https://my-resource.openai.azure.com/openai/deployments/summarizer/chat/completions?api-version=2024-06-01"
        );
        assert!(!config.include_model_in_body());
    }

    #[test]
    fn test_deployment_name_is_percent_encoded() {
        let url = AzureOpenAiConfig::new()
            .url("https://my-resource.openai.azure.com/", "a/b?c#d")
            .unwrap();

        assert_eq!(
            url.path(),
            "/openai/deployments/a%2Fb%3Fc%23d/chat/completions"
        );
        assert_eq!(url.query(), Some("api-version=2024-10-21"));
        assert!(url.fragment().is_none());
    }

    #[test]
    fn test_auth_uses_api_key_header() {
        let (name, value) = AzureOpenAiConfig::new().auth_header(&Credential::new("secret"));
        assert_eq!(name, "api-key");
        assert_eq!(value, "secret");
    }
}
