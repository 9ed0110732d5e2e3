//! Error types for monday-mcp

use thiserror::Error;

/// Main error type for the library
#[derive(Debug, Error)]
pub enum MondayError {
    /// An aggregation requested a function the query builder cannot express
    #[error("Unsupported aggregation function: {0}")]
    UnsupportedFunction(String),

    /// A search was requested for an entity kind that has no listing operation
    #[error("Unsupported search type: {0}")]
    UnsupportedSearchType(String),

    /// Request failed boundary validation
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP transport failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The GraphQL endpoint answered with errors
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    /// The backend answered with a shape we could not interpret
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A response body was not valid JSON for the expected shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MondayError {
    /// Whether the error was caused by the caller's input rather than the system
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            MondayError::UnsupportedFunction(_)
                | MondayError::UnsupportedSearchType(_)
                | MondayError::InvalidRequest(_)
                | MondayError::Config(_)
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, MondayError>;
