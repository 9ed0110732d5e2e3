//! GraphQL transport for the monday.com API

use super::{ListedItem, ListingQuery, MondayBackend};
use crate::aggregation::{AggregateQuery, ResultRow};
use crate::{MondayConfig, MondayError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const BOARDS_QUERY: &str = "query ($page: Int!, $limit: Int!, $workspace_ids: [ID]) {
  boards(page: $page, limit: $limit, workspace_ids: $workspace_ids) { id name url }
}";

const DOCS_QUERY: &str = "query ($page: Int!, $limit: Int!, $workspace_ids: [ID]) {
  docs(page: $page, limit: $limit, workspace_ids: $workspace_ids) { id name url }
}";

const FOLDERS_QUERY: &str = "query ($page: Int!, $limit: Int!, $workspace_ids: [ID]) {
  folders(page: $page, limit: $limit, workspace_ids: $workspace_ids) { id name }
}";

const AGGREGATE_QUERY: &str = "query ($query: AggregateQueryInput!) {
  aggregate(query: $query) {
    results {
      entries {
        alias
        value {
          ... on AggregateBasicAggregationResult { result }
          ... on AggregateGroupByResult { value_string value_int value_float value_boolean }
        }
      }
    }
  }
}";

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Value,
}

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Option<Vec<GraphQlErrorEntry>>,
}

#[derive(Deserialize)]
struct GraphQlErrorEntry {
    message: String,
}

#[derive(Debug, Deserialize)]
struct BoardsData {
    #[serde(default)]
    boards: Option<Vec<ListedItem>>,
}

#[derive(Deserialize)]
struct DocsData {
    #[serde(default)]
    docs: Option<Vec<ListedItem>>,
}

#[derive(Deserialize)]
struct FoldersData {
    #[serde(default)]
    folders: Option<Vec<ListedItem>>,
}

#[derive(Deserialize)]
struct AggregateData {
    #[serde(default)]
    aggregate: Option<AggregateResult>,
}

#[derive(Deserialize)]
struct AggregateResult {
    #[serde(default)]
    results: Option<Vec<ResultRow>>,
}

/// [`MondayBackend`] over HTTP GraphQL
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    http: Client,
    config: MondayConfig,
}

impl GraphQlClient {
    /// Create a client for `config`
    pub fn new(config: MondayConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("monday-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    /// Create a client from `MONDAY_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(MondayConfig::from_env()?)
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &MondayConfig {
        &self.config
    }

    /// Execute one GraphQL operation and decode its `data`
    pub async fn execute<T: DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T> {
        tracing::debug!("POST {} variables={}", self.config.api_url, variables);

        let mut request = self
            .http
            .post(self.config.api_url.clone())
            .header(reqwest::header::AUTHORIZATION, &self.config.api_token)
            .json(&GraphQlRequest { query, variables });
        if let Some(version) = &self.config.api_version {
            request = request.header("API-Version", version);
        }

        let response = request.send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        Self::decode(&bytes)
    }

    fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
        let body: GraphQlResponse<T> = serde_json::from_slice(bytes)?;

        if let Some(errors) = body.errors.filter(|errors| !errors.is_empty()) {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            return Err(MondayError::GraphQl(messages.join("; ")));
        }

        body.data
            .ok_or_else(|| MondayError::MalformedResponse("response has no data".to_string()))
    }

    fn listing_variables(query: &ListingQuery) -> Value {
        json!({
            "page": query.page,
            "limit": query.limit,
            "workspace_ids": query.workspace_ids,
        })
    }
}

#[async_trait]
impl MondayBackend for GraphQlClient {
    async fn list_boards(&self, query: &ListingQuery) -> Result<Vec<ListedItem>> {
        let data: BoardsData = self
            .execute(BOARDS_QUERY, Self::listing_variables(query))
            .await?;
        Ok(data.boards.unwrap_or_default())
    }

    async fn list_docs(&self, query: &ListingQuery) -> Result<Vec<ListedItem>> {
        let data: DocsData = self
            .execute(DOCS_QUERY, Self::listing_variables(query))
            .await?;
        Ok(data.docs.unwrap_or_default())
    }

    async fn list_folders(&self, query: &ListingQuery) -> Result<Vec<ListedItem>> {
        let data: FoldersData = self
            .execute(FOLDERS_QUERY, Self::listing_variables(query))
            .await?;
        Ok(data.folders.unwrap_or_default())
    }

    async fn aggregate(&self, query: &AggregateQuery) -> Result<Option<Vec<ResultRow>>> {
        let data: AggregateData = self
            .execute(AGGREGATE_QUERY, json!({ "query": query }))
            .await?;
        Ok(data.aggregate.and_then(|aggregate| aggregate.results))
    }
}
