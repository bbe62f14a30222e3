pub mod client;
pub mod error;
pub mod http;
pub mod template;
pub mod traits;
pub mod types;

pub use client::CompletionClient;
pub use error::{ErrorKind, LlmError};
pub use http::{HttpClient, HttpClientConfig};
pub use template::{PromptInputs, PromptTemplate};
pub use traits::ChatTransport;
pub use types::{
    ChatRole, ClientSettings, Completion, CompletionRequest, Credential, GenerationConfig,
    LanguageModelUsage, Message,
};
