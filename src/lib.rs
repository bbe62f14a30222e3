//! # tldr
//!
//! Render a prompt template, send it to a hosted chat-completion model, get
//! the text back.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::num::NonZeroU32;
//! use tldr::{ClientSettings, CompletionClient, PromptInputs, PromptTemplate, Provider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = ClientSettings::from_env(Provider::AzureOpenAI);
//!     let client = CompletionClient::for_provider(Provider::AzureOpenAI, settings)?;
//!
//!     let summarize = PromptTemplate::new("{{$input}}\n\nOne line TLDR with the fewest words.")
//!         .with_max_output_tokens(NonZeroU32::new(100).unwrap());
//!
//!     let completion = client
//!         .complete(&summarize, &PromptInputs::new().with("input", "Energy cannot be created or destroyed."))
//!         .await?;
//!     println!("{}", completion.text);
//!     Ok(())
//! }
//! ```
//!
//! The HTTP transport sits behind [`ChatTransport`], so tests and custom
//! integrations can supply their own.

pub mod completions;
pub mod core;
pub mod provider;

pub use crate::core::{
    ChatRole, ChatTransport, ClientSettings, Completion, CompletionClient, CompletionRequest,
    Credential, ErrorKind, GenerationConfig, HttpClientConfig, LanguageModelUsage, LlmError,
    Message, PromptInputs, PromptTemplate,
};
pub use provider::{AzureOpenAiClient, AzureOpenAiConfig, OpenAiClient, OpenAiConfig, Provider};
