use async_trait::async_trait;

use super::{
    error::LlmError,
    types::{ClientSettings, Completion, CompletionRequest},
};

/// The single capability a completion client needs from a provider:
/// send one chat request, get one completion back.
///
/// Implementations own wire formatting, authentication headers and any
/// connection pooling. They must be safe to call concurrently.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(
        &self,
        settings: &ClientSettings,
        request: &CompletionRequest,
    ) -> Result<Completion, LlmError>;
}
