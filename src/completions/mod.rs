//! Chat-completions wire format shared by the Azure OpenAI and OpenAI transports.

pub mod client;
pub(crate) mod request;
pub(crate) mod response;

pub use client::{ChatCompletionsClient, ChatCompletionsProviderConfig, endpoint_url};
