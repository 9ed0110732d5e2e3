//! Board insights tool for MCP operations
//!
//! Compiles the caller's aggregation into an aggregate query, runs it against
//! the backend and returns the flattened rows.

use crate::aggregation::{AggregationRequestBuilder, AggregationResultFlattener, AggregationSpec};
use crate::mcp::shared_utils::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext, ToolRegistry};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde_json::json;

/// Text returned when the aggregate query produced no rows
pub const NO_INSIGHTS_MESSAGE: &str = "No board insights found for the given query";

/// Tool for aggregating the items of a board
#[derive(Default)]
pub struct BoardInsightsTool;

impl BoardInsightsTool {
    /// Creates a new instance of the BoardInsightsTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for BoardInsightsTool {
    fn name(&self) -> &'static str {
        "board_insights"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        BaseToolImpl::schema_for::<AggregationSpec>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let spec: AggregationSpec = BaseToolImpl::parse_arguments(arguments)?;
        let operation = format!("board insights for board {}", spec.table_id);

        let query = McpErrorHandler::handle_result(
            AggregationRequestBuilder::build(&spec),
            &operation,
        )?;

        tracing::debug!(
            "Aggregating board {} with {} selections grouped by {:?}",
            query.from.id,
            query.select.len(),
            query.group_by.iter().map(|g| g.column_id.as_str()).collect::<Vec<_>>()
        );

        let rows =
            McpErrorHandler::handle_result(context.backend.aggregate(&query).await, &operation)?;
        let records = AggregationResultFlattener::flatten_result(rows);

        if records.is_empty() {
            tracing::info!("No insights for board {}", query.from.id);
            return Ok(BaseToolImpl::create_success_response(NO_INSIGHTS_MESSAGE));
        }

        tracing::info!(
            "Board {} insights returned {} rows",
            query.from.id,
            records.len()
        );

        BaseToolImpl::create_json_response(&json!({ "results": records }))
    }
}

/// Register the board insights tool with the registry
pub fn register_board_insights_tools(registry: &mut ToolRegistry) {
    registry.register(BoardInsightsTool::new());
}
