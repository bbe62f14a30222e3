use std::fmt;

use crate::provider::Provider;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub role: ChatRole,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Configuration for text generation parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationConfig {
    /// Maximum number of tokens to generate. `None` leaves it to the provider.
    pub max_tokens: Option<u32>,
}

/// A single-turn request handed to a [`ChatTransport`](crate::core::ChatTransport).
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// Text of the first choice, exactly as the provider returned it.
    pub text: String,
    pub model: String,
    pub finish_reason: Option<String>,
    pub usage: Option<LanguageModelUsage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageModelUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Opaque secret used to authenticate against the provider.
///
/// The value never shows up in `Debug` output or logs.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("Credential(<empty>)")
        } else {
            f.write_str("Credential(<redacted>)")
        }
    }
}

impl From<String> for Credential {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Credential {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Connection settings for a [`CompletionClient`](crate::core::CompletionClient).
///
/// Construction never fails. Empty fields are reported when a completion is
/// attempted.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub endpoint: String,
    pub credential: Credential,
    /// Model name (OpenAI) or deployment name (Azure OpenAI).
    pub model_or_deployment: String,
}

impl ClientSettings {
    pub fn new(
        endpoint: impl Into<String>,
        credential: impl Into<Credential>,
        model_or_deployment: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            credential: credential.into(),
            model_or_deployment: model_or_deployment.into(),
        }
    }

    /// Read settings from the provider's environment variables.
    ///
    /// Unset variables become empty strings.
    pub fn from_env(provider: Provider) -> Self {
        Self::from_lookup(provider, |name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(provider: Provider, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| lookup(name).unwrap_or_default();

        let mut endpoint = read(provider.endpoint_env_var());
        if endpoint.is_empty()
            && let Some(default) = provider.default_endpoint()
        {
            endpoint = default.to_string();
        }

        Self {
            endpoint,
            credential: Credential::new(read(provider.default_api_key_env_var())),
            model_or_deployment: read(provider.model_env_var()),
        }
    }
}
