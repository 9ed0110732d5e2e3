//! monday-mcp CLI Library
//!
//! Command-line definitions, error handling, logging and the command
//! implementations behind the `monday-mcp` binary.

/// Aggregate command
pub mod aggregate;
/// Command-line interface definitions and argument parsing
pub mod cli;
/// Backend configuration with command-line overrides
pub mod config;
/// CLI error type and exit code mapping
pub mod error;
/// Exit codes used by the CLI application
pub mod exit_codes;
/// Log writer for MCP mode
pub mod logging;
/// Search command
pub mod search;
/// Stdio MCP server
pub mod serve;
