//! Tool registry for MCP operations
//!
//! Tools are registered by name and dispatched through [`McpTool`], so the
//! server never needs to know the concrete tool types.

use crate::backend::MondayBackend;
use crate::search::SearchOrchestrator;
use rmcp::model::{Annotated, CallToolResult, RawContent, RawTextContent, Tool};
use rmcp::Error as McpError;
use std::collections::HashMap;
use std::sync::Arc;

/// Context shared by all tools during execution
#[derive(Clone)]
pub struct ToolContext {
    /// Backend every tool talks to
    pub backend: Arc<dyn MondayBackend>,
    /// Search orchestrator over the same backend
    pub search: SearchOrchestrator,
}

impl ToolContext {
    /// Create a new tool context
    pub fn new(backend: Arc<dyn MondayBackend>) -> Self {
        let search = SearchOrchestrator::new(backend.clone());
        Self { backend, search }
    }
}

/// Trait defining the interface for all MCP tools
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Get the tool's name
    fn name(&self) -> &'static str;

    /// Get the tool's description
    fn description(&self) -> &'static str;

    /// Get the tool's JSON schema for arguments
    fn schema(&self) -> serde_json::Value;

    /// Execute the tool with the given arguments and context
    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError>;
}

/// Registry for managing MCP tools
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn McpTool>>,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool in the registry
    pub fn register<T: McpTool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        self.tools.insert(name, Box::new(tool));
    }

    /// Get a tool by name
    pub fn get_tool(&self, name: &str) -> Option<&dyn McpTool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    /// List all registered tool names, sorted
    pub fn list_tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get all registered tools as Tool objects for MCP list_tools response
    pub fn list_tools(&self) -> Vec<Tool> {
        self.list_tool_names()
            .iter()
            .filter_map(|name| self.get_tool(name))
            .map(|tool| {
                let schema_map = match tool.schema() {
                    serde_json::Value::Object(map) => map,
                    _ => serde_json::Map::new(),
                };

                Tool {
                    name: tool.name().into(),
                    description: Some(tool.description().into()),
                    input_schema: Arc::new(schema_map),
                    annotations: None,
                }
            })
            .collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Base implementation providing common utility methods for MCP tools
pub struct BaseToolImpl;

impl BaseToolImpl {
    /// Parse tool arguments from a JSON map into a typed struct
    ///
    /// # Arguments
    ///
    /// * `arguments` - The JSON map of arguments from the MCP request
    ///
    /// # Returns
    ///
    /// * `Result<T, McpError>` - The parsed arguments or an error
    pub fn parse_arguments<T: serde::de::DeserializeOwned>(
        arguments: serde_json::Map<String, serde_json::Value>,
    ) -> std::result::Result<T, McpError> {
        serde_json::from_value(serde_json::Value::Object(arguments))
            .map_err(|e| McpError::invalid_request(format!("Invalid arguments: {e}"), None))
    }

    /// JSON schema of an argument type, as served by `list_tools`
    pub fn schema_for<T: schemars::JsonSchema>() -> serde_json::Value {
        serde_json::to_value(schemars::schema_for!(T)).unwrap_or_else(|e| {
            tracing::error!("Failed to serialize tool schema: {}", e);
            serde_json::json!({ "type": "object" })
        })
    }

    /// Create a success response with text content
    pub fn create_success_response<T: Into<String>>(content: T) -> CallToolResult {
        CallToolResult {
            content: vec![Annotated::new(
                RawContent::Text(RawTextContent {
                    text: content.into(),
                }),
                None,
            )],
            is_error: Some(false),
        }
    }

    /// Create a success response carrying `value` as pretty-printed JSON
    pub fn create_json_response<T: serde::Serialize>(
        value: &T,
    ) -> std::result::Result<CallToolResult, McpError> {
        let text = serde_json::to_string_pretty(value).map_err(|e| {
            McpError::internal_error(format!("Failed to serialize response: {e}"), None)
        })?;
        Ok(Self::create_success_response(text))
    }
}

/// Register every tool this server exposes
pub fn register_tools(registry: &mut ToolRegistry) {
    super::tools::search::register_search_tools(registry);
    super::tools::board_insights::register_board_insights_tools(registry);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;

    struct StubTool {
        name: &'static str,
        description: &'static str,
    }

    #[async_trait::async_trait]
    impl McpTool for StubTool {
        fn name(&self) -> &'static str {
            self.name
        }

        fn description(&self) -> &'static str {
            self.description
        }

        fn schema(&self) -> serde_json::Value {
            serde_json::json!({
                "type": "object",
                "properties": {},
                "required": []
            })
        }

        async fn execute(
            &self,
            _arguments: serde_json::Map<String, serde_json::Value>,
            _context: &ToolContext,
        ) -> std::result::Result<CallToolResult, McpError> {
            Ok(BaseToolImpl::create_success_response(format!(
                "Stub tool {} executed",
                self.name
            )))
        }
    }

    fn text_of(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            RawContent::Text(text_content) => &text_content.text,
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_tool_registry_creation() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_tool_registration_and_lookup() {
        let mut registry = ToolRegistry::new();
        registry.register(StubTool {
            name: "lookup_test",
            description: "A lookup test tool",
        });

        assert_eq!(registry.len(), 1);
        let tool = registry.get_tool("lookup_test").unwrap();
        assert_eq!(tool.description(), "A lookup test tool");
        assert!(registry.get_tool("nonexistent").is_none());
    }

    #[test]
    fn test_list_tools_is_sorted() {
        let mut registry = ToolRegistry::new();
        registry.register(StubTool {
            name: "zeta",
            description: "Z",
        });
        registry.register(StubTool {
            name: "alpha",
            description: "A",
        });

        let names: Vec<_> = registry
            .list_tools()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_register_tools() {
        let mut registry = ToolRegistry::new();
        register_tools(&mut registry);

        assert_eq!(registry.list_tool_names(), vec!["board_insights", "search"]);
        for tool in registry.list_tools() {
            assert!(tool.description.is_some());
            assert_eq!(tool.input_schema["type"], "object");
        }
    }

    #[tokio::test]
    async fn test_tool_execution() {
        let context = ToolContext::new(Arc::new(MockBackend::new()));
        let tool = StubTool {
            name: "exec_test",
            description: "Execution test tool",
        };

        let result = tool.execute(serde_json::Map::new(), &context).await.unwrap();
        assert_eq!(result.is_error, Some(false));
        assert_eq!(text_of(&result), "Stub tool exec_test executed");
    }

    #[test]
    fn test_parse_arguments_error() {
        #[derive(serde::Deserialize)]
        struct TestArgs {
            #[serde(rename = "required_field")]
            _required_field: String,
        }

        let result: std::result::Result<TestArgs, McpError> =
            BaseToolImpl::parse_arguments(serde_json::Map::new());
        let err = result.err().unwrap();
        assert!(err.to_string().contains("Invalid arguments"));
    }

    #[test]
    fn test_json_response() {
        let response =
            BaseToolImpl::create_json_response(&serde_json::json!({ "results": [] })).unwrap();
        assert_eq!(response.is_error, Some(false));
        let parsed: serde_json::Value = serde_json::from_str(text_of(&response)).unwrap();
        assert_eq!(parsed, serde_json::json!({ "results": [] }));
    }
}
