//! Prompt-specific error types.

use thiserror::Error;

/// Errors that can occur during prompt operations.
///
/// The registry itself only raises [`Configuration`](Self::Configuration),
/// [`AlreadyExists`](Self::AlreadyExists) and [`NotFound`](Self::NotFound).
/// The remaining variants belong to prompt definitions and reach callers
/// through the registry untouched.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The requested prompt was not found.
    #[error("Unknown prompt: {0}")]
    NotFound(String),

    /// A prompt is already registered under this key.
    #[error("Prompt already exists: {0}")]
    AlreadyExists(String),

    /// The registry was configured with an invalid value.
    #[error("{0}")]
    Configuration(String),

    /// A prompt was built from a callable that has no usable name.
    #[error("A name must be provided for {0}")]
    MissingName(String),

    /// Required argument is missing.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// Invalid argument value.
    #[error("Invalid argument value for '{0}': {1}")]
    InvalidArgument(String, String),

    /// The supplied arguments do not match the prompt's parameters.
    #[error("Invalid arguments for prompt '{0}': {1}")]
    InvalidArguments(String, String),

    /// Template rendering failed.
    #[error("Template error: {0}")]
    TemplateError(String),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PromptError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "already exists" error.
    pub fn already_exists(key: impl Into<String>) -> Self {
        Self::AlreadyExists(key.into())
    }

    /// Create a new configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a new "missing name" error.
    pub fn missing_name(what: impl Into<String>) -> Self {
        Self::MissingName(what.into())
    }

    /// Create a new "missing argument" error.
    pub fn missing_argument(arg: impl Into<String>) -> Self {
        Self::MissingArgument(arg.into())
    }

    /// Create a new "invalid argument" error.
    pub fn invalid_argument(arg: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument(arg.into(), reason.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(prompt: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArguments(prompt.into(), reason.into())
    }

    /// Create a new "template" error.
    pub fn template(msg: impl Into<String>) -> Self {
        Self::TemplateError(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the error was caused by the caller's request rather than
    /// the server (unknown prompt or bad arguments).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_)
                | Self::MissingArgument(_)
                | Self::InvalidArgument(..)
                | Self::InvalidArguments(..)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_carries_name() {
        let err = PromptError::not_found("ghost");
        assert!(matches!(&err, PromptError::NotFound(name) if name == "ghost"));
        assert_eq!(err.to_string(), "Unknown prompt: ghost");
    }

    #[test]
    fn test_client_error_classification() {
        assert!(PromptError::not_found("x").is_client_error());
        assert!(PromptError::missing_argument("code").is_client_error());
        assert!(!PromptError::already_exists("x").is_client_error());
        assert!(!PromptError::internal("boom").is_client_error());
    }
}
