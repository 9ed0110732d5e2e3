use anyhow::Result;
use monday_mcp::backend::{GraphQlClient, MondayBackend};
use monday_mcp::common::IdInput;
use monday_mcp::search::{SearchOrchestrator, SearchRequest, SearchResponse};
use std::sync::Arc;

use crate::config::ConfigOverrides;

/// Arguments of the `search` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchArgs {
    /// Entity kind as typed by the user
    pub search_type: String,
    /// Optional name filter
    pub term: Option<String>,
    /// Workspace filter
    pub workspace_ids: Vec<String>,
    /// 1-based page
    pub page: u32,
    /// Page size
    pub limit: u32,
}

impl SearchArgs {
    /// The library request for these arguments
    pub fn to_request(&self) -> SearchRequest {
        SearchRequest {
            search_type: self.search_type.clone(),
            search_term: self.term.clone(),
            workspace_ids: (!self.workspace_ids.is_empty()).then(|| {
                self.workspace_ids
                    .iter()
                    .map(|id| IdInput::from(id.as_str()))
                    .collect()
            }),
            page: self.page,
            limit: self.limit,
        }
    }
}

/// Run a search against `backend`
pub async fn search(backend: Arc<dyn MondayBackend>, args: &SearchArgs) -> Result<SearchResponse> {
    let orchestrator = SearchOrchestrator::new(backend);
    let response = orchestrator.search(&args.to_request()).await?;

    if let Some(disclaimer) = &response.disclaimer {
        tracing::warn!("{}", disclaimer);
    }
    Ok(response)
}

/// Entry point of the `search` command: prints the response as JSON
pub async fn run_search_command(args: SearchArgs, overrides: &ConfigOverrides) -> Result<()> {
    // reject unknown kinds before asking for a token
    let _: monday_mcp::search::EntityKind = args.search_type.parse()?;

    let client = GraphQlClient::new(overrides.load()?)?;
    let response = search(Arc::new(client), &args).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
