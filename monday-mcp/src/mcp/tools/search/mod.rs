//! Search tool for MCP operations
//!
//! This module provides the SearchTool for finding boards, docs and folders
//! through the MCP protocol.

use crate::mcp::shared_utils::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext, ToolRegistry};
use crate::search::SearchRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for searching boards, docs and folders
#[derive(Default)]
pub struct SearchTool;

impl SearchTool {
    /// Creates a new instance of the SearchTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for SearchTool {
    fn name(&self) -> &'static str {
        "search"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        BaseToolImpl::schema_for::<SearchRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: SearchRequest = BaseToolImpl::parse_arguments(arguments)?;

        let response = McpErrorHandler::handle_result(
            context.search.search(&request).await,
            &format!("search {}", request.search_type),
        )?;

        tracing::info!(
            "Search for {} returned {} results{}",
            request.search_type,
            response.results.len(),
            if response.disclaimer.is_some() {
                " (unfiltered)"
            } else {
                ""
            }
        );

        BaseToolImpl::create_json_response(&response)
    }
}

/// Register the search tool with the registry
pub fn register_search_tools(registry: &mut ToolRegistry) {
    registry.register(SearchTool::new());
}
