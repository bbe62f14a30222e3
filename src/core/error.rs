use std::fmt;

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("No value supplied for placeholder '{name}'")]
    MissingPlaceholderValue { name: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Provider unreachable: {message}")]
    Unreachable {
        message: String,
        #[source]
        source: BoxError,
    },

    /// Local configuration problem detected before any request left the process.
    #[error("Provider configuration error: {0}")]
    ProviderConfiguration(String),

    #[error("Provider error{}: {message}", status_suffix(.status_code))]
    Provider {
        message: String,
        status_code: Option<u16>,
    },

    #[error("Malformed provider response: {message}")]
    MalformedResponse {
        message: String,
        #[source]
        source: BoxError,
    },

    /// Well-formed response that carried no completion choices.
    #[error("Provider returned no completion choices")]
    EmptyResponse,

    #[error("Completion cancelled before a response arrived")]
    Cancelled,
}

fn status_suffix(status_code: &Option<u16>) -> String {
    status_code.map(|code| format!(" ({code})")).unwrap_or_default()
}

/// Coarse error classification surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingPlaceholderValue,
    AuthenticationFailed,
    Unreachable,
    ProviderError,
    Cancelled,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::MissingPlaceholderValue => "missing_placeholder_value",
            ErrorKind::AuthenticationFailed => "authentication_failed",
            ErrorKind::Unreachable => "unreachable",
            ErrorKind::ProviderError => "provider_error",
            ErrorKind::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

impl LlmError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LlmError::MissingPlaceholderValue { .. } => ErrorKind::MissingPlaceholderValue,
            LlmError::AuthenticationFailed { .. } => ErrorKind::AuthenticationFailed,
            LlmError::Unreachable { .. } | LlmError::ProviderConfiguration(_) => {
                ErrorKind::Unreachable
            }
            LlmError::Provider { .. }
            | LlmError::MalformedResponse { .. }
            | LlmError::EmptyResponse => ErrorKind::ProviderError,
            LlmError::Cancelled => ErrorKind::Cancelled,
        }
    }

    /// Whether a caller-side wrapper could reasonably try the call again.
    ///
    /// Nothing in this crate acts on it.
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::Unreachable { .. } => true,
            LlmError::Provider {
                status_code: Some(code),
                ..
            } => *code == 429 || (500..600).contains(code),
            _ => false,
        }
    }
}
