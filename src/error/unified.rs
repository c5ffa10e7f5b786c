//! Error classification and recovery hints.

/// Broad error category for routing recovery logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    InvalidParams,
    MissingContext,
    Authentication,
    RateLimit,
    Network,
    Server,
    NotFound,
    Api,
    Configuration,
    Serialization,
    Storage,
}

/// Suggested recovery action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoverySuggestion {
    FixArguments,
    SetActiveBoard,
    RetryWithBackoff,
    CheckCredentials,
    CheckConfiguration,
    CheckIdentifiers,
    ContactSupport,
}
