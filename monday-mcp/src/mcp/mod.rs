//! Model Context Protocol (MCP) server support
//!
//! This module serves the search and board insights tools over the Model
//! Context Protocol.

pub mod server;
pub mod shared_utils;
pub mod tool_registry;
pub mod tools;

pub use server::McpServer;
pub use shared_utils::McpErrorHandler;
pub use tool_registry::{register_tools, BaseToolImpl, McpTool, ToolContext, ToolRegistry};
