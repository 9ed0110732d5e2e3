//! Shared utilities for MCP operations

use crate::{MondayError, Result};
use rmcp::Error as McpError;

/// Common error handling patterns for MCP operations
pub struct McpErrorHandler;

impl McpErrorHandler {
    /// Convert a [`MondayError`] to the MCP error returned to the client
    ///
    /// - Caller input errors -> invalid_params
    /// - Backend and transport errors -> internal_error
    pub fn handle_error(error: MondayError, operation: &str) -> McpError {
        tracing::error!("MCP operation '{}' failed: {}", operation, error);

        match error {
            MondayError::UnsupportedFunction(_)
            | MondayError::UnsupportedSearchType(_)
            | MondayError::InvalidRequest(_)
            | MondayError::Config(_) => McpError::invalid_params(error.to_string(), None),
            MondayError::Http(err) => McpError::internal_error(format!("HTTP error: {err}"), None),
            MondayError::GraphQl(msg) => {
                McpError::internal_error(format!("monday.com API error: {msg}"), None)
            }
            MondayError::MalformedResponse(msg) => {
                McpError::internal_error(format!("Malformed API response: {msg}"), None)
            }
            MondayError::Json(err) => McpError::internal_error(format!("JSON error: {err}"), None),
        }
    }

    /// Handle results with consistent error mapping
    pub fn handle_result<T>(
        result: Result<T>,
        operation: &str,
    ) -> std::result::Result<T, McpError> {
        result.map_err(|e| Self::handle_error(e, operation))
    }
}
