//! Generic client for providers speaking the OpenAI chat-completions format.

use async_trait::async_trait;
use reqwest::Url;

use crate::{
    Provider,
    completions::{
        request::{Request, build_request},
        response::{Response, into_completion},
    },
    core::{
        ChatTransport, ClientSettings, Completion, CompletionRequest, Credential, HttpClient,
        HttpClientConfig, LlmError,
    },
};

/// Per-provider differences in URL layout and authentication.
pub trait ChatCompletionsProviderConfig: Send + Sync {
    fn provider(&self) -> Provider;

    /// Full URL for a chat-completions call against `endpoint` and `model`.
    fn url(&self, endpoint: &str, model: &str) -> Result<Url, LlmError>;

    /// Authentication header as (name, value) tuple
    fn auth_header(&self, credential: &Credential) -> (String, String);

    /// Whether the model name goes into the request body.
    fn include_model_in_body(&self) -> bool {
        true
    }

    fn extra_headers(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig::default()
    }

    fn user_agent(&self) -> String {
        format!("tldr/{}", env!("CARGO_PKG_VERSION"))
    }
}

/// Append percent-encoded path segments to `endpoint`.
///
/// A trailing slash on the endpoint does not produce an empty segment.
pub fn endpoint_url<'a>(
    endpoint: &str,
    segments: impl IntoIterator<Item = &'a str>,
) -> Result<Url, LlmError> {
    let mut url = Url::parse(endpoint).map_err(|e| {
        LlmError::ProviderConfiguration(format!("Invalid endpoint '{endpoint}': {e}"))
    })?;

    url.path_segments_mut()
        .map_err(|_| {
            LlmError::ProviderConfiguration(format!("Endpoint '{endpoint}' cannot carry a path"))
        })?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}

pub struct ChatCompletionsClient<P: ChatCompletionsProviderConfig> {
    pub config: P,
    http: HttpClient,
}

impl<P: ChatCompletionsProviderConfig> ChatCompletionsClient<P> {
    pub fn new(config: P) -> Result<Self, LlmError> {
        let http_config = config.http_config();
        let user_agent = config.user_agent();

        let http = HttpClient::new(http_config, Some(&user_agent))?;

        Ok(Self { config, http })
    }

    #[tracing::instrument(
        name = "chat_completion_request",
        skip(self, settings, request),
        fields(provider = %self.config.provider(), model = %request.model),
        err(level = "debug")
    )]
    pub(crate) async fn make_api_request(
        &self,
        settings: &ClientSettings,
        request: &CompletionRequest,
    ) -> Result<Response, LlmError> {
        let url = self.config.url(settings.endpoint.trim(), &request.model)?;

        let mut headers = vec![self.config.auth_header(&settings.credential)];
        headers.extend(self.config.extra_headers());

        let body: Request = build_request(request, self.config.include_model_in_body());
        self.http.post_json(url.as_str(), &headers, &body).await
    }
}

#[async_trait]
impl<P: ChatCompletionsProviderConfig> ChatTransport for ChatCompletionsClient<P> {
    async fn send(
        &self,
        settings: &ClientSettings,
        request: &CompletionRequest,
    ) -> Result<Completion, LlmError> {
        let response = self.make_api_request(settings, request).await?;
        into_completion(response, &request.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_keeps_base_path() {
        let url = endpoint_url("https://api.openai.com/v1/", ["chat", "completions"]).unwrap();
        assert_eq!(url.as_str(), "https://api.openai.com/v1/chat/completions");

        let url = endpoint_url("http://localhost:8080", ["chat", "completions"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/chat/completions");
    }

    #[test]
    fn test_endpoint_url_rejects_invalid_endpoint() {
        for endpoint in ["not a url", "mailto:someone@example.com"] {
            let err = endpoint_url(endpoint, ["chat"]).unwrap_err();
            assert!(
                matches!(err, LlmError::ProviderConfiguration(_)),
                "{endpoint}: {err:?}"
            );
        }
    }
}
