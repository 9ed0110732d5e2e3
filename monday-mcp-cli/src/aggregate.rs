use anyhow::{Context, Result};
use monday_mcp::aggregation::{
    AggregateQuery, AggregationRequestBuilder, AggregationResultFlattener, AggregationSpec,
    PlainRecord,
};
use monday_mcp::backend::{GraphQlClient, MondayBackend};
use monday_mcp::mcp::tools::board_insights::NO_INSIGHTS_MESSAGE;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;

use crate::config::ConfigOverrides;

/// Read an aggregation from a JSON file
pub fn load_spec(path: &Path) -> Result<AggregationSpec> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let spec = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid aggregation in {}", path.display()))?;
    Ok(spec)
}

/// Build the aggregate query for `spec`
pub fn build_query(spec: &AggregationSpec) -> Result<AggregateQuery> {
    Ok(AggregationRequestBuilder::build(spec)?)
}

/// Run `spec` against `backend` and flatten the result
pub async fn run_aggregation(
    backend: Arc<dyn MondayBackend>,
    spec: &AggregationSpec,
) -> Result<Vec<PlainRecord>> {
    let query = build_query(spec)?;
    let rows = backend.aggregate(&query).await?;
    Ok(AggregationResultFlattener::flatten_result(rows))
}

/// Entry point of the `aggregate` command
pub async fn run_aggregate_command(
    spec_path: &Path,
    dry_run: bool,
    overrides: &ConfigOverrides,
) -> Result<()> {
    let spec = load_spec(spec_path)?;

    if dry_run {
        let query = build_query(&spec)?;
        println!("{}", serde_json::to_string_pretty(&query)?);
        return Ok(());
    }

    let client = GraphQlClient::new(overrides.load()?)?;
    let records = run_aggregation(Arc::new(client), &spec).await?;

    if records.is_empty() {
        println!("{NO_INSIGHTS_MESSAGE}");
    } else {
        tracing::info!("{} rows", records.len());
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "results": records }))?
        );
    }
    Ok(())
}
