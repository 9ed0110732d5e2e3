//! Exit code constants for CLI commands
//!
//! - 0: Success
//! - 1: Runtime failure (backend, network, server)
//! - 2: Invalid input (bad arguments, spec file or configuration)

/// Successful execution
pub const EXIT_SUCCESS: i32 = 0;

/// Runtime failure
pub const EXIT_WARNING: i32 = 1;

/// Invalid input or configuration
pub const EXIT_ERROR: i32 = 2;
