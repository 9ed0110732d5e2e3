use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "monday-mcp")]
#[command(version)]
#[command(about = "An MCP server for searching and summarizing monday.com boards")]
#[command(long_about = "
monday-mcp is an MCP (Model Context Protocol) server exposing tools over a
monday.com account: search for boards, docs and folders, and board insights
(counts, sums and other aggregations over the items of a board).

The API token is read from MONDAY_API_TOKEN.

Example usage:
  monday-mcp serve                                  # Run as MCP server
  monday-mcp search --type board --term roadmap     # Search boards
  monday-mcp aggregate insights.json --dry-run      # Show the query for an aggregation
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,

    /// GraphQL endpoint, overrides MONDAY_API_URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// API version header, overrides MONDAY_API_VERSION
    #[arg(long, global = true)]
    pub api_version: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run as MCP server over stdio
    #[command(long_about = "
Runs monday-mcp as an MCP server on stdin/stdout. The server exposes:

- search: find boards, docs and folders by name
- board_insights: aggregate the items of a board

Logs are written to ~/.monday-mcp/mcp.log when stdin is not a terminal
(override the file name with MONDAY_MCP_LOG_FILE).

Example:
  monday-mcp serve
")]
    Serve,
    /// Search boards, docs or folders
    #[command(long_about = "
Searches boards, docs or folders and prints the results as JSON.

Without --term the backend pages the results. With --term, small
collections are returned whole with a disclaimer and larger ones are
filtered by name locally.

Examples:
  monday-mcp search --type board --term roadmap
  monday-mcp search --type folder --workspace-id 123 --page 2 --limit 20
")]
    Search {
        /// What to search: board, document or folder
        #[arg(long = "type", value_name = "TYPE")]
        search_type: String,

        /// Text matched case-insensitively against names
        #[arg(long)]
        term: Option<String>,

        /// Restrict to a workspace; repeat for several
        #[arg(long = "workspace-id", value_name = "ID")]
        workspace_ids: Vec<String>,

        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Results per page, at most 100
        #[arg(long, default_value_t = 100)]
        limit: u32,
    },
    /// Run board insights from a JSON file
    #[command(long_about = "
Reads an aggregation from a JSON file, runs it against the board and prints
the flattened rows as JSON.

The file has the same shape as the board_insights tool arguments:
  {
    \"boardId\": 123,
    \"aggregations\": [{ \"columnId\": \"status\" }, { \"function\": \"COUNT\", \"columnId\": \"item_id\" }],
    \"groupBy\": [\"status\"]
  }

With --dry-run the aggregate query is printed instead and no API token is needed.

Examples:
  monday-mcp aggregate insights.json
  monday-mcp aggregate insights.json --dry-run
")]
    Aggregate {
        /// Path to the aggregation JSON file
        spec: PathBuf,

        /// Print the query without sending it
        #[arg(long)]
        dry_run: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn try_parse_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(args)
    }
}
