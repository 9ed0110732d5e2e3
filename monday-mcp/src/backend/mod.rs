//! Backend abstraction
//!
//! The core never talks HTTP itself. Everything it needs from the platform is
//! expressed by [`MondayBackend`]: three listing operations (one per
//! searchable entity kind) and the aggregate query. [`GraphQlClient`] is the
//! production implementation; [`mock::MockBackend`] serves tests.

pub mod graphql;
pub mod mock;

pub use graphql::GraphQlClient;
pub use mock::{BackendCall, MockBackend};

use crate::aggregation::{AggregateQuery, ResultRow};
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Input of a listing operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingQuery {
    /// 1-based page number
    pub page: u32,
    /// Page size
    pub limit: u32,
    /// Restrict to these workspaces, in backend id form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_ids: Option<Vec<String>>,
}

/// One row returned by a listing operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListedItem {
    /// Backend id, not namespaced
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Link to the entity; folders have none
    #[serde(default)]
    pub url: Option<String>,
}

impl ListedItem {
    /// Listed item with a name and no url
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            url: None,
        }
    }

    /// Attach a url
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Operations the platform backend provides
///
/// Implementations perform exactly one round trip per call and surface
/// transport failures unchanged.
#[async_trait]
pub trait MondayBackend: Send + Sync {
    /// List boards
    async fn list_boards(&self, query: &ListingQuery) -> Result<Vec<ListedItem>>;

    /// List docs
    async fn list_docs(&self, query: &ListingQuery) -> Result<Vec<ListedItem>>;

    /// List folders
    async fn list_folders(&self, query: &ListingQuery) -> Result<Vec<ListedItem>>;

    /// Run an aggregate query; `None` when the backend returned no result at all
    async fn aggregate(&self, query: &AggregateQuery) -> Result<Option<Vec<ResultRow>>>;
}
