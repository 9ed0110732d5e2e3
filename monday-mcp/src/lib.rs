//! # monday-mcp
//!
//! Model Context Protocol tools for a monday.com account.
//!
//! ## Features
//!
//! - **Board insights**: Compile structured aggregation requests into the
//!   platform's aggregate query tree and flatten the grouped results
//! - **Search**: Find boards, docs and folders with virtual pagination when the
//!   backend cannot filter by free text
//! - **MCP Support**: Serve both as tools over the Model Context Protocol
//!
//! ## Quick Start
//!
//! ```rust
//! use monday_mcp::aggregation::{AggregationItem, AggregationRequestBuilder, AggregationSpec};
//!
//! # fn main() -> monday_mcp::Result<()> {
//! let spec = AggregationSpec {
//!     table_id: "123".into(),
//!     aggregations: vec![
//!         AggregationItem::column("status"),
//!         AggregationItem::function("COUNT", "item_id"),
//!     ],
//!     group_by: Some(vec!["status".to_string()]),
//!     filters: None,
//!     limit: None,
//! };
//!
//! let query = AggregationRequestBuilder::build(&spec)?;
//! assert_eq!(query.select.len(), 2);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

/// Aggregation query building and result flattening
pub mod aggregation;

/// Backend abstraction and the GraphQL transport
pub mod backend;

/// Shared helpers used across the crate
pub mod common;

/// Environment-driven configuration
pub mod config;

/// Error types used throughout the library
pub mod error;

/// Model Context Protocol (MCP) server support
pub mod mcp;

/// Board, doc and folder search with virtual pagination
pub mod search;

pub use config::MondayConfig;
pub use error::{MondayError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::aggregation::{
        AggregationItem, AggregationRequestBuilder, AggregationResultFlattener, AggregationSpec,
    };
    pub use crate::backend::{GraphQlClient, MondayBackend};
    pub use crate::mcp::McpServer;
    pub use crate::search::{EntityKind, SearchOrchestrator, SearchRequest, SearchResponse};
    pub use crate::{MondayConfig, MondayError, Result};
}
