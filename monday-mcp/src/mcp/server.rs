//! MCP server implementation for serving the monday.com tools

use crate::backend::{GraphQlClient, MondayBackend};
use crate::{MondayConfig, Result};
use rmcp::model::*;
use rmcp::service::RequestContext;
use rmcp::{Error as McpError, RoleServer, ServerHandler};
use std::sync::Arc;

use super::tool_registry::{register_tools, ToolContext, ToolRegistry};

const SERVER_NAME: &str = "monday-mcp";

const INSTRUCTIONS: &str = "Tools for a monday.com account. Use search to find boards, docs and folders by name; \
ids in the results are prefixed with the entity kind. Use board_insights to count, sum or otherwise aggregate \
the items of a board, optionally grouped by columns and filtered by rules.";

/// MCP server exposing search and board insights
#[derive(Clone)]
pub struct McpServer {
    tool_registry: Arc<ToolRegistry>,
    /// Tool context containing shared state for tool execution
    pub tool_context: Arc<ToolContext>,
}

impl McpServer {
    /// Create a server whose tools talk to `backend`
    pub fn new(backend: Arc<dyn MondayBackend>) -> Self {
        let mut tool_registry = ToolRegistry::new();
        register_tools(&mut tool_registry);

        Self {
            tool_registry: Arc::new(tool_registry),
            tool_context: Arc::new(ToolContext::new(backend)),
        }
    }

    /// Create a server backed by the GraphQL API described by `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: MondayConfig) -> Result<Self> {
        let client = GraphQlClient::new(config)?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Names of the registered tools
    pub fn tool_names(&self) -> Vec<String> {
        self.tool_registry.list_tool_names()
    }

    /// Run a tool by name, as `call_tool` does
    pub async fn call_tool_by_name(
        &self,
        name: &str,
        arguments: Option<serde_json::Map<String, serde_json::Value>>,
    ) -> std::result::Result<CallToolResult, McpError> {
        match self.tool_registry.get_tool(name) {
            Some(tool) => {
                tool.execute(arguments.unwrap_or_default(), &self.tool_context)
                    .await
            }
            None => Err(McpError::invalid_request(
                format!("Unknown tool: {name}"),
                None,
            )),
        }
    }

    fn capabilities() -> ServerCapabilities {
        ServerCapabilities {
            prompts: None,
            tools: Some(ToolsCapability {
                list_changed: Some(false),
            }),
            resources: None,
            logging: None,
            completions: None,
            experimental: None,
        }
    }
}

impl ServerHandler for McpServer {
    async fn initialize(
        &self,
        request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<InitializeResult, McpError> {
        tracing::info!(
            "MCP client connecting: {} v{}",
            request.client_info.name,
            request.client_info.version
        );

        Ok(self.get_info())
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_registry.list_tools(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        tracing::debug!("call_tool {}", request.name);
        self.call_tool_by_name(&request.name, request.arguments)
            .await
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: Self::capabilities(),
            server_info: Implementation {
                name: SERVER_NAME.into(),
                version: crate::VERSION.into(),
            },
            instructions: Some(INSTRUCTIONS.into()),
        }
    }
}
