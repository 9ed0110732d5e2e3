//! Error handling for the monday-mcp CLI
//!
//! Preserves the error chain while still giving every failure an exit code.

use crate::exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_WARNING};
use monday_mcp::MondayError;
use std::error::Error;
use std::fmt;

/// CLI-specific result type that preserves error information
pub type CliResult<T> = Result<T, CliError>;

/// CLI error type that includes both error information and suggested exit code
#[derive(Debug)]
pub struct CliError {
    /// Message printed to the user
    pub message: String,
    /// Process exit code
    pub exit_code: i32,
    /// Underlying error, if any
    pub source: Option<Box<dyn Error + Send + Sync>>,
}

impl CliError {
    /// Create a new CLI error with a message and exit code
    pub fn new(message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            message: message.into(),
            exit_code,
            source: None,
        }
    }

    /// Create a CLI error from another error with a specific exit code
    pub fn from_error<E: Error + Send + Sync + 'static>(error: E, exit_code: i32) -> Self {
        let message = error.to_string();
        Self {
            message,
            exit_code,
            source: Some(Box::new(error)),
        }
    }

    /// Create a CLI error from a command failure.
    ///
    /// Failures caused by the caller's input (bad arguments, unreadable or
    /// invalid files, configuration) exit with [`EXIT_ERROR`], all others with
    /// [`EXIT_WARNING`].
    pub fn from_anyhow(error: anyhow::Error) -> Self {
        let exit_code = match error.downcast_ref::<MondayError>() {
            Some(e) if e.is_caller_error() => EXIT_ERROR,
            Some(_) => EXIT_WARNING,
            None if error.is::<serde_json::Error>() || error.is::<std::io::Error>() => EXIT_ERROR,
            None => EXIT_WARNING,
        };
        Self {
            message: error.to_string(),
            exit_code,
            source: Some(error.into()),
        }
    }

    /// Get the full error chain as a formatted string
    pub fn full_chain(&self) -> String {
        let mut result = self.message.clone();

        let mut current_source = self.source();
        while let Some(err) = current_source {
            let text = err.to_string();
            if text != self.message {
                result.push_str(&format!("\n  Caused by: {text}"));
            }
            current_source = err.source();
        }

        result
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

/// Extension trait for converting results to CLI results
pub trait IntoCliResult<T> {
    /// Map the error to a [`CliError`] with `exit_code`
    fn cli_error(self, exit_code: i32) -> CliResult<T>;
}

impl<T, E: Error + Send + Sync + 'static> IntoCliResult<T> for Result<T, E> {
    fn cli_error(self, exit_code: i32) -> CliResult<T> {
        self.map_err(|e| CliError::from_error(e, exit_code))
    }
}

/// Convert a CliResult to an exit code, printing the full error chain if needed
pub fn handle_cli_result<T>(result: CliResult<T>) -> i32 {
    match result {
        Ok(_) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e.full_chain());
            e.exit_code
        }
    }
}
