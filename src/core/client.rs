use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::provider::Provider;

use super::{
    error::LlmError,
    template::{PromptInputs, PromptTemplate},
    traits::ChatTransport,
    types::{ClientSettings, Completion, CompletionRequest, GenerationConfig, Message},
};

/// Renders prompt templates and sends them to a chat-completion provider.
///
/// The client is immutable after construction. Clones share the same
/// transport, and every call is independent of every other call.
#[derive(Clone)]
pub struct CompletionClient {
    settings: ClientSettings,
    transport: Arc<dyn ChatTransport>,
}

impl std::fmt::Debug for CompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionClient")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl CompletionClient {
    pub fn new(settings: ClientSettings, transport: Arc<dyn ChatTransport>) -> Self {
        Self {
            settings,
            transport,
        }
    }

    /// Build a client backed by `provider`'s HTTP transport.
    ///
    /// Fails only if the local HTTP client cannot be created.
    pub fn for_provider(provider: Provider, settings: ClientSettings) -> Result<Self, LlmError> {
        Ok(Self::new(settings, provider.transport()?))
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Render `template` with `inputs`, send it as a single user message and
    /// return the first completion.
    ///
    /// A missing placeholder value fails before anything is sent.
    #[tracing::instrument(
        name = "complete",
        skip(self, template, inputs),
        fields(model = %self.settings.model_or_deployment),
        err(level = "debug")
    )]
    pub async fn complete(
        &self,
        template: &PromptTemplate,
        inputs: &PromptInputs,
    ) -> Result<Completion, LlmError> {
        let request = self.prepare(template, inputs)?;
        let completion = self.transport.send(&self.settings, &request).await?;

        debug!(
            finish_reason = completion.finish_reason.as_deref().unwrap_or("unknown"),
            "completion received"
        );
        Ok(completion)
    }

    /// Like [`complete`](Self::complete), but gives up with
    /// [`LlmError::Cancelled`] as soon as `cancel` resolves.
    ///
    /// The in-flight request is dropped. No partial text is returned.
    pub async fn complete_until<C>(
        &self,
        template: &PromptTemplate,
        inputs: &PromptInputs,
        cancel: C,
    ) -> Result<Completion, LlmError>
    where
        C: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            () = cancel => {
                debug!("completion cancelled by caller");
                Err(LlmError::Cancelled)
            }
            result = self.complete(template, inputs) => result,
        }
    }

    /// Like [`complete`](Self::complete), with a deadline. Expiry is reported
    /// as [`LlmError::Cancelled`].
    pub async fn complete_within(
        &self,
        template: &PromptTemplate,
        inputs: &PromptInputs,
        deadline: Duration,
    ) -> Result<Completion, LlmError> {
        match tokio::time::timeout(deadline, self.complete(template, inputs)).await {
            Ok(result) => result,
            Err(_) => {
                debug!(?deadline, "completion deadline elapsed");
                Err(LlmError::Cancelled)
            }
        }
    }

    fn prepare(
        &self,
        template: &PromptTemplate,
        inputs: &PromptInputs,
    ) -> Result<CompletionRequest, LlmError> {
        let prompt = template.render(inputs)?;
        self.validate_settings()?;

        Ok(CompletionRequest {
            model: self.settings.model_or_deployment.clone(),
            messages: vec![Message::user(prompt)],
            generation_config: GenerationConfig {
                max_tokens: template.max_output_tokens().map(|n| n.get()),
            },
        })
    }

    fn validate_settings(&self) -> Result<(), LlmError> {
        if self.settings.credential.is_empty() {
            return Err(LlmError::AuthenticationFailed {
                message: "No credential configured".to_string(),
            });
        }

        if self.settings.endpoint.trim().is_empty() {
            return Err(LlmError::ProviderConfiguration(
                "No endpoint configured".to_string(),
            ));
        }

        if self.settings.model_or_deployment.trim().is_empty() {
            return Err(LlmError::Provider {
                message: "No model or deployment configured".to_string(),
                status_code: None,
            });
        }

        Ok(())
    }
}
