//! Search entry point: type check, bounds check, one paginated listing

use super::{
    EntityKind, PageRequest, SearchRequest, SearchResponse, SearchResult, VirtualPaginator,
};
use crate::backend::{ListedItem, ListingQuery, MondayBackend};
use crate::Result;
use std::sync::Arc;

/// Runs searches against a [`MondayBackend`]
#[derive(Clone)]
pub struct SearchOrchestrator {
    backend: Arc<dyn MondayBackend>,
    paginator: VirtualPaginator,
}

impl SearchOrchestrator {
    /// Orchestrator with the default pagination policy
    pub fn new(backend: Arc<dyn MondayBackend>) -> Self {
        Self::with_paginator(backend, VirtualPaginator::default())
    }

    /// Orchestrator with a custom pagination policy
    pub fn with_paginator(backend: Arc<dyn MondayBackend>, paginator: VirtualPaginator) -> Self {
        Self { backend, paginator }
    }

    /// Run a search.
    ///
    /// The search type is checked first, so an unsupported type never reaches
    /// the backend. Exactly one listing call is made otherwise.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let kind: EntityKind = request.search_type.parse()?;
        request.validate()?;

        let page_request = PageRequest {
            search_term: request.search_term.clone(),
            page: request.page,
            limit: request.limit,
            workspace_ids: request
                .workspace_ids
                .as_ref()
                .map(|ids| ids.iter().map(|id| id.as_id_string()).collect()),
        };

        tracing::debug!(
            "Searching {} page={} limit={} term={:?}",
            kind,
            page_request.page,
            page_request.limit,
            page_request.term()
        );

        let paginated = self
            .paginator
            .paginate(kind, &page_request, |query| self.list(kind, query))
            .await?;

        let disclaimer = paginated.disclaimer().map(str::to_string);
        let results = paginated
            .items
            .into_iter()
            .map(|item| SearchResult::from_listed(kind, item))
            .collect();

        Ok(SearchResponse {
            results,
            disclaimer,
        })
    }

    async fn list(&self, kind: EntityKind, query: ListingQuery) -> Result<Vec<ListedItem>> {
        match kind {
            EntityKind::Board => self.backend.list_boards(&query).await,
            EntityKind::Document => self.backend.list_docs(&query).await,
            EntityKind::Folder => self.backend.list_folders(&query).await,
        }
    }
}

impl std::fmt::Debug for SearchOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchOrchestrator")
            .field("paginator", &self.paginator)
            .finish_non_exhaustive()
    }
}
