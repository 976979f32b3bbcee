//! Error types for the askdocs service.
//!
//! This module defines a unified error enum that covers all error categories
//! in the application: configuration, request validation, guardrail outcomes,
//! collaborator faults, and answer parsing.

use thiserror::Error;

/// Unified error type for the askdocs service.
///
/// All functions in the application return `Result<T, AppError>`.
/// We never panic — errors must be represented and propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors (missing env vars, bad config file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed client request; the message is safe to return to the caller
    #[error("{0}")]
    Validation(String),

    /// The guardrail intervened on a question or an answer.
    ///
    /// The caller only ever sees the fixed message below. The guardrail
    /// identifier and the service-assigned request id are logged server-side.
    #[error("Content was blocked by guardrail")]
    GuardrailBlocked {
        guardrail_id: String,
        request_id: String,
    },

    /// Guardrail service transport or contract errors
    #[error("Guardrail error: {0}")]
    Guardrail(String),

    /// Search index service errors
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    /// Model invocation errors
    #[error("Model error: {0}")]
    Llm(String),

    /// Prompt template errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Model output did not match the expected answer format
    #[error("Parse error: {0}")]
    Parse(String),

    /// Index data-source sync job errors
    #[error("Sync error: {0}")]
    Sync(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl AppError {
    /// Whether this error was caused by the caller and may be surfaced with
    /// its own message. Everything else becomes a generic internal error.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_) | AppError::GuardrailBlocked { .. }
        )
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
