//! Error types for trello-mcp.

pub mod unified;

pub use unified::{ErrorCategory, RecoverySuggestion};

use thiserror::Error;

/// Primary error type for all trello-mcp operations.
#[derive(Error, Debug)]
pub enum TrelloError {
    /// A tool call carried missing, mistyped or malformed arguments.
    ///
    /// The payload is the caller-facing message and is surfaced verbatim.
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A call omitted `boardId`/`workspaceId` and no active one is set.
    #[error("{0}")]
    MissingContext(String),

    #[error("Trello API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limited by Trello: retry after {retry_after_secs:?}s")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Context store error: {0}")]
    ContextStore(String),
}

impl TrelloError {
    /// Create an invalid-params error.
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams(message.into())
    }

    /// Create an API error from a status code and response body.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Whether this error was caused by the shape of the caller's arguments.
    pub fn is_invalid_params(&self) -> bool {
        matches!(self, Self::InvalidParams(_))
    }

    /// Caller-facing message without the variant prefix.
    pub fn message(&self) -> String {
        match self {
            Self::InvalidParams(message) | Self::MissingContext(message) => message.clone(),
            other => other.to_string(),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidParams(_) => ErrorCategory::InvalidParams,
            Self::MissingContext(_) => ErrorCategory::MissingContext,
            Self::Authentication(_) => ErrorCategory::Authentication,
            Self::RateLimited { .. } => ErrorCategory::RateLimit,
            Self::Network(_) => ErrorCategory::Network,
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Serialization(_) => ErrorCategory::Serialization,
            Self::NotFound(_) => ErrorCategory::NotFound,
            Self::Api { status, .. } => match status {
                401 | 403 => ErrorCategory::Authentication,
                404 => ErrorCategory::NotFound,
                429 => ErrorCategory::RateLimit,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Api,
            },
            Self::Io(_) | Self::ContextStore(_) => ErrorCategory::Storage,
        }
    }

    /// Whether retrying the same call later could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::RateLimit | ErrorCategory::Network | ErrorCategory::Server
        )
    }

    /// Suggest recovery actions.
    pub fn recovery_suggestion(&self) -> RecoverySuggestion {
        match self.category() {
            ErrorCategory::InvalidParams => RecoverySuggestion::FixArguments,
            ErrorCategory::MissingContext => RecoverySuggestion::SetActiveBoard,
            ErrorCategory::Authentication => RecoverySuggestion::CheckCredentials,
            ErrorCategory::RateLimit | ErrorCategory::Network | ErrorCategory::Server => {
                RecoverySuggestion::RetryWithBackoff
            }
            ErrorCategory::Configuration => RecoverySuggestion::CheckConfiguration,
            ErrorCategory::NotFound => RecoverySuggestion::CheckIdentifiers,
            _ => RecoverySuggestion::ContactSupport,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, TrelloError>;
