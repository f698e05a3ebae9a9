//! Custom error types for Roundtable
//!
//! Provides a unified error handling system across all modules.

use thiserror::Error;

/// Main error type for Roundtable operations
#[derive(Error, Debug)]
pub enum RoundtableError {
    /// Chat backend connection or API errors
    #[error("Provider error: {0}")]
    Provider(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Team roster has no agent with the coordinator role
    #[error("No agent has the coordinator role")]
    NoCoordinator,

    /// Team roster has more than one coordinator
    #[error("More than one agent has the coordinator role: {}", .0.join(", "))]
    MultipleCoordinators(Vec<String>),

    /// Two agents share a name
    #[error("Duplicate agent name: {0}")]
    DuplicateAgent(String),

    /// Model not available on the backend
    #[error("Model '{0}' not available. Run: ollama pull {0}")]
    ModelNotFound(String),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Convenience Result type for Roundtable operations
pub type Result<T> = std::result::Result<T, RoundtableError>;

impl RoundtableError {
    /// Create a provider error
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Wrap an error with additional context
    pub fn with_context<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::WithContext {
            context: context.into(),
            source: Box::new(error),
        }
    }
}
