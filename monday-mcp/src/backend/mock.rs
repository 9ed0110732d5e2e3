//! Mock in-memory backend for testing
//!
//! `MockBackend` serves canned listings and aggregate results and records every
//! call it receives, so tests can assert both on the output of the core and on
//! the exact requests it sent.
//!
//! Listings honour `page`/`limit` the way the platform does: items are sliced
//! `[(page - 1) * limit, page * limit)`.
//!
//! # Usage
//!
//! ```
//! use monday_mcp::backend::{ListedItem, ListingQuery, MockBackend, MondayBackend};
//!
//! # tokio_test_block_on(async {
//! let backend = MockBackend::new();
//! backend.set_boards(vec![ListedItem::new("1", "Roadmap")]).await;
//!
//! let query = ListingQuery { page: 1, limit: 10, workspace_ids: None };
//! let boards = backend.list_boards(&query).await.unwrap();
//! assert_eq!(boards.len(), 1);
//! assert_eq!(backend.calls().await.len(), 1);
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

use super::{ListedItem, ListingQuery, MondayBackend};
use crate::aggregation::{AggregateQuery, ResultRow};
use crate::{MondayError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A request received by [`MockBackend`]
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    /// `list_boards`
    Boards(ListingQuery),
    /// `list_docs`
    Docs(ListingQuery),
    /// `list_folders`
    Folders(ListingQuery),
    /// `aggregate`
    Aggregate(AggregateQuery),
}

#[derive(Debug, Default)]
struct MockState {
    boards: Vec<ListedItem>,
    docs: Vec<ListedItem>,
    folders: Vec<ListedItem>,
    aggregate: Option<Vec<ResultRow>>,
    fail_with: Option<String>,
    calls: Vec<BackendCall>,
}

/// In-memory [`MondayBackend`]
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    state: Arc<RwLock<MockState>>,
}

impl MockBackend {
    /// Empty backend: no items, no aggregate result
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the boards
    pub async fn set_boards(&self, items: Vec<ListedItem>) {
        self.state.write().await.boards = items;
    }

    /// Replace the docs
    pub async fn set_docs(&self, items: Vec<ListedItem>) {
        self.state.write().await.docs = items;
    }

    /// Replace the folders
    pub async fn set_folders(&self, items: Vec<ListedItem>) {
        self.state.write().await.folders = items;
    }

    /// Replace the aggregate result
    pub async fn set_aggregate_result(&self, rows: Option<Vec<ResultRow>>) {
        self.state.write().await.aggregate = rows;
    }

    /// Make every subsequent call fail with a GraphQL error carrying `message`
    pub async fn fail_with(&self, message: impl Into<String>) {
        self.state.write().await.fail_with = Some(message.into());
    }

    /// Calls received so far, in order
    pub async fn calls(&self) -> Vec<BackendCall> {
        self.state.read().await.calls.clone()
    }

    async fn record(&self, call: BackendCall) -> Result<()> {
        let mut state = self.state.write().await;
        state.calls.push(call);
        match &state.fail_with {
            Some(message) => Err(MondayError::GraphQl(message.clone())),
            None => Ok(()),
        }
    }

    fn page(items: &[ListedItem], query: &ListingQuery) -> Vec<ListedItem> {
        let start = (query.page.saturating_sub(1) as usize).saturating_mul(query.limit as usize);
        items
            .iter()
            .skip(start)
            .take(query.limit as usize)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl MondayBackend for MockBackend {
    async fn list_boards(&self, query: &ListingQuery) -> Result<Vec<ListedItem>> {
        self.record(BackendCall::Boards(query.clone())).await?;
        Ok(Self::page(&self.state.read().await.boards, query))
    }

    async fn list_docs(&self, query: &ListingQuery) -> Result<Vec<ListedItem>> {
        self.record(BackendCall::Docs(query.clone())).await?;
        Ok(Self::page(&self.state.read().await.docs, query))
    }

    async fn list_folders(&self, query: &ListingQuery) -> Result<Vec<ListedItem>> {
        self.record(BackendCall::Folders(query.clone())).await?;
        Ok(Self::page(&self.state.read().await.folders, query))
    }

    async fn aggregate(&self, query: &AggregateQuery) -> Result<Option<Vec<ResultRow>>> {
        self.record(BackendCall::Aggregate(query.clone())).await?;
        Ok(self.state.read().await.aggregate.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: u32, limit: u32) -> ListingQuery {
        ListingQuery {
            page,
            limit,
            workspace_ids: None,
        }
    }

    #[tokio::test]
    async fn test_listing_is_paged() {
        let backend = MockBackend::new();
        backend
            .set_docs((1..=5).map(|i| ListedItem::new(i.to_string(), format!("Doc {i}"))).collect())
            .await;

        let second_page = backend.list_docs(&query(2, 2)).await.unwrap();
        let ids: Vec<_> = second_page.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "4"]);

        assert!(backend.list_docs(&query(4, 2)).await.unwrap().is_empty());
        assert_eq!(backend.calls().await.len(), 2);
    }

    #[tokio::test]
    async fn test_failure_is_recorded_and_returned() {
        let backend = MockBackend::new();
        backend.fail_with("Not Authenticated").await;

        let err = backend.list_boards(&query(1, 10)).await.unwrap_err();
        assert!(matches!(err, MondayError::GraphQl(ref m) if m == "Not Authenticated"));
        assert_eq!(backend.calls().await, vec![BackendCall::Boards(query(1, 10))]);
    }
}
