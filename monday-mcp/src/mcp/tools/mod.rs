//! MCP tool implementations
//!
//! Each tool lives in its own directory next to a `description.md` that is
//! compiled into the binary and served as the tool description.

pub mod board_insights;
pub mod search;
