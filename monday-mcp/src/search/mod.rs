//! Board, doc and folder search
//!
//! The platform's listing operations page through boards, docs and folders
//! but cannot filter them by free text. [`SearchOrchestrator`] dispatches a
//! [`SearchRequest`] to the right listing and lets the [`VirtualPaginator`]
//! decide whether the backend's own pagination is enough or whether the whole
//! collection has to be fetched, filtered by name and sliced locally.
//!
//! Result ids are namespaced by kind (`board-1`, `document-1`, `folder-1`) so
//! callers can tell entities apart without another lookup.

mod orchestrator;
mod paginator;

pub use orchestrator::SearchOrchestrator;
pub use paginator::{filter_and_slice, FilterState, PageRequest, PaginatedItems, VirtualPaginator};

use crate::backend::ListedItem;
use crate::common::IdInput;
use crate::{MondayError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Page used when the caller does not ask for one
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when the caller does not ask for one
pub const DEFAULT_LIMIT: u32 = 100;

/// Largest page size a caller may request
pub const MAX_SEARCH_LIMIT: u32 = 100;

/// Collections up to this size are returned whole, unfiltered
pub const LOCAL_FILTER_THRESHOLD: usize = 100;

/// Page size of the single full fetch made for term searches
pub const FULL_FETCH_LIMIT: u32 = 10_000;

/// Attached to results the caller still has to filter
pub const UNFILTERED_DISCLAIMER: &str =
    "[IMPORTANT]Items were not filtered. Please perform the filtering.";

/// Kind of entity to search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityKind {
    /// Boards
    Board,
    /// Workdocs
    Document,
    /// Workspace folders
    Folder,
}

impl EntityKind {
    /// Prefix of namespaced ids for this kind
    pub fn id_prefix(self) -> &'static str {
        match self {
            EntityKind::Board => "board",
            EntityKind::Document => "document",
            EntityKind::Folder => "folder",
        }
    }

    /// Namespace a backend id, e.g. `board-123`
    pub fn namespace(self, id: &str) -> String {
        format!("{}-{}", self.id_prefix(), id)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Board => "BOARD",
            EntityKind::Document => "DOCUMENT",
            EntityKind::Folder => "FOLDER",
        };
        f.write_str(name)
    }
}

impl FromStr for EntityKind {
    type Err = MondayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BOARD" | "BOARDS" => Ok(EntityKind::Board),
            "DOCUMENT" | "DOCUMENTS" | "DOC" | "DOCS" => Ok(EntityKind::Document),
            "FOLDER" | "FOLDERS" => Ok(EntityKind::Folder),
            _ => Err(MondayError::UnsupportedSearchType(s.to_string())),
        }
    }
}

/// A search as requested by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// What to search: `BOARD`, `DOCUMENT` or `FOLDER`
    #[schemars(with = "EntityKind")]
    pub search_type: String,
    /// Case-insensitive text matched against names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
    /// Only search these workspaces
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_ids: Option<Vec<IdInput>>,
    /// 1-based page number
    #[serde(default = "default_page")]
    pub page: u32,
    /// Page size, at most 100
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

impl SearchRequest {
    /// Search for `kind` with default paging and no term
    pub fn new(kind: EntityKind) -> Self {
        Self {
            search_type: kind.to_string(),
            search_term: None,
            workspace_ids: None,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }

    /// Set the search term
    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    /// Set page and page size
    pub fn with_page(mut self, page: u32, limit: u32) -> Self {
        self.page = page;
        self.limit = limit;
        self
    }

    /// Restrict to workspaces
    pub fn with_workspaces(mut self, workspace_ids: Vec<IdInput>) -> Self {
        self.workspace_ids = Some(workspace_ids);
        self
    }

    /// Check paging bounds
    pub fn validate(&self) -> Result<()> {
        if self.page < 1 {
            return Err(MondayError::InvalidRequest(
                "page must be at least 1".to_string(),
            ));
        }
        if !(1..=MAX_SEARCH_LIMIT).contains(&self.limit) {
            return Err(MondayError::InvalidRequest(format!(
                "limit must be between 1 and {MAX_SEARCH_LIMIT}, got {}",
                self.limit
            )));
        }
        Ok(())
    }
}

/// One search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Namespaced id, e.g. `board-123`
    pub id: String,
    /// Display name
    pub title: String,
    /// Link to the entity, absent for folders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl SearchResult {
    /// Build a hit from a listed item of `kind`
    pub fn from_listed(kind: EntityKind, item: ListedItem) -> Self {
        let url = match kind {
            EntityKind::Folder => None,
            EntityKind::Board | EntityKind::Document => item.url,
        };
        Self {
            id: kind.namespace(&item.id),
            title: item.name.unwrap_or_default(),
            url,
        }
    }
}

/// Output of a search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Hits, in backend order
    pub results: Vec<SearchResult>,
    /// Present when the caller must filter the results itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclaimer: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entity_kind_parsing() {
        assert_eq!("BOARD".parse::<EntityKind>().unwrap(), EntityKind::Board);
        assert_eq!("documents".parse::<EntityKind>().unwrap(), EntityKind::Document);
        assert_eq!(" Folder ".parse::<EntityKind>().unwrap(), EntityKind::Folder);

        let err = "ITEM".parse::<EntityKind>().unwrap_err();
        assert!(matches!(err, MondayError::UnsupportedSearchType(ref v) if v == "ITEM"));
        assert!(err.to_string().contains("ITEM"));
    }

    #[test]
    fn test_request_defaults() {
        let request: SearchRequest =
            serde_json::from_value(json!({ "searchType": "BOARD" })).unwrap();
        assert_eq!(request.page, 1);
        assert_eq!(request.limit, 100);
        assert_eq!(request.search_term, None);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_request_limit_is_capped() {
        let request = SearchRequest::new(EntityKind::Board).with_page(1, 101);
        assert!(matches!(
            request.validate(),
            Err(MondayError::InvalidRequest(_))
        ));

        let request = SearchRequest::new(EntityKind::Board).with_page(0, 10);
        assert!(request.validate().is_err());

        let request = SearchRequest::new(EntityKind::Board).with_page(1, 0);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_result_url_handling() {
        let board = SearchResult::from_listed(
            EntityKind::Board,
            ListedItem::new("1", "Roadmap").with_url("https://x.monday.com/boards/1"),
        );
        assert_eq!(board.id, "board-1");
        assert_eq!(board.url.as_deref(), Some("https://x.monday.com/boards/1"));

        let doc = SearchResult::from_listed(EntityKind::Document, ListedItem::new("2", "Spec"));
        assert_eq!(serde_json::to_value(&doc).unwrap(), json!({ "id": "document-2", "title": "Spec" }));

        let folder = SearchResult::from_listed(
            EntityKind::Folder,
            ListedItem::new("3", "Ops").with_url("https://ignored"),
        );
        assert_eq!(folder.id, "folder-3");
        assert_eq!(folder.url, None);
    }

    #[test]
    fn test_null_name_becomes_empty_title() {
        let item = ListedItem {
            id: "9".to_string(),
            name: None,
            url: None,
        };
        assert_eq!(SearchResult::from_listed(EntityKind::Board, item).title, "");
    }
}
