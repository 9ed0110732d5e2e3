//! Virtual pagination
//!
//! Without a search term the backend pages for us. With a term, one listing
//! request fetches the whole eligible collection (`page = 1`,
//! [`FULL_FETCH_LIMIT`]). Collections of at most [`LOCAL_FILTER_THRESHOLD`]
//! items are handed back whole with a disclaimer; larger ones are filtered by
//! name and sliced with the caller's page and limit.

use super::{EntityKind, FULL_FETCH_LIMIT, LOCAL_FILTER_THRESHOLD, UNFILTERED_DISCLAIMER};
use crate::backend::{ListedItem, ListingQuery};
use crate::Result;
use std::future::Future;

/// Whether, and by whom, the items were filtered by the search term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterState {
    /// No term was given
    NotRequested,
    /// A term was given but filtering is left to the caller
    Deferred,
    /// Items were filtered and sliced locally
    Applied,
}

/// Paging parameters after boundary validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Search term; empty is the same as absent
    pub search_term: Option<String>,
    /// 1-based page
    pub page: u32,
    /// Page size
    pub limit: u32,
    /// Workspace filter in backend id form
    pub workspace_ids: Option<Vec<String>>,
}

impl PageRequest {
    /// The term, if non-empty
    pub fn term(&self) -> Option<&str> {
        self.search_term.as_deref().filter(|term| !term.is_empty())
    }
}

/// Items of one page and how they were filtered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginatedItems {
    /// Items, in backend order
    pub items: Vec<ListedItem>,
    /// How the term was applied
    pub filter_state: FilterState,
}

impl PaginatedItems {
    /// Whether the term was applied locally
    pub fn filtered_locally(&self) -> bool {
        self.filter_state == FilterState::Applied
    }

    /// Disclaimer for the caller when filtering was deferred
    pub fn disclaimer(&self) -> Option<&'static str> {
        match self.filter_state {
            FilterState::Deferred => Some(UNFILTERED_DISCLAIMER),
            FilterState::NotRequested | FilterState::Applied => None,
        }
    }
}

/// Chooses between backend pagination and fetch-filter-slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualPaginator {
    threshold: usize,
    fetch_limit: u32,
}

impl Default for VirtualPaginator {
    fn default() -> Self {
        Self::new(LOCAL_FILTER_THRESHOLD, FULL_FETCH_LIMIT)
    }
}

impl VirtualPaginator {
    /// Paginator with a custom threshold and full-fetch page size
    pub fn new(threshold: usize, fetch_limit: u32) -> Self {
        Self {
            threshold,
            fetch_limit,
        }
    }

    /// Run one listing through `fetch` and apply the pagination policy.
    ///
    /// `fetch` is called exactly once.
    pub async fn paginate<F, Fut>(
        &self,
        kind: EntityKind,
        request: &PageRequest,
        fetch: F,
    ) -> Result<PaginatedItems>
    where
        F: FnOnce(ListingQuery) -> Fut,
        Fut: Future<Output = Result<Vec<ListedItem>>>,
    {
        let Some(term) = request.term() else {
            let items = fetch(ListingQuery {
                page: request.page,
                limit: request.limit,
                workspace_ids: request.workspace_ids.clone(),
            })
            .await?;
            return Ok(PaginatedItems {
                items,
                filter_state: FilterState::NotRequested,
            });
        };

        let all = fetch(ListingQuery {
            page: 1,
            limit: self.fetch_limit,
            workspace_ids: request.workspace_ids.clone(),
        })
        .await?;

        if all.len() <= self.threshold {
            tracing::warn!(
                "{} {} items fetched, leaving filtering by '{}' to the caller",
                all.len(),
                kind,
                term
            );
            return Ok(PaginatedItems {
                items: all,
                filter_state: FilterState::Deferred,
            });
        }

        let fetched = all.len();
        let items = filter_and_slice(all, term, request.page, request.limit);
        tracing::debug!(
            "Filtered {} {} items by '{}', returning {} for page {}",
            fetched,
            kind,
            term,
            items.len(),
            request.page
        );

        Ok(PaginatedItems {
            items,
            filter_state: FilterState::Applied,
        })
    }
}

/// Keep items whose name contains `term` (case-insensitive), then take page
/// `page` of size `limit`
pub fn filter_and_slice(
    items: Vec<ListedItem>,
    term: &str,
    page: u32,
    limit: u32,
) -> Vec<ListedItem> {
    let needle = term.to_lowercase();
    let start = (page.saturating_sub(1) as usize).saturating_mul(limit as usize);

    items
        .into_iter()
        .filter(|item| {
            item.name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains(&needle))
        })
        .skip(start)
        .take(limit as usize)
        .collect()
}
