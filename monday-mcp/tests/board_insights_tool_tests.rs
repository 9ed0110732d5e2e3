//! Board insights end to end: tool arguments in, query tree to the backend,
//! flattened records out

use monday_mcp::aggregation::{
    AggregateQuery, EntryValue, ResultEntry, ResultRow, SelectExpression,
};
use monday_mcp::backend::{BackendCall, MockBackend};
use monday_mcp::mcp::McpServer;
use rmcp::model::{CallToolResult, RawContent};
use serde_json::{json, Value};
use std::sync::Arc;

fn text_of(result: &CallToolResult) -> String {
    match &result.content[0].raw {
        RawContent::Text(text) => text.text.clone(),
        _ => panic!("Expected text content"),
    }
}

async fn call(server: &McpServer, arguments: Value) -> CallToolResult {
    server
        .call_tool_by_name("board_insights", arguments.as_object().cloned())
        .await
        .unwrap()
}

async fn sent_query(backend: &MockBackend) -> AggregateQuery {
    match backend.calls().await.as_slice() {
        [BackendCall::Aggregate(query)] => query.clone(),
        other => panic!("expected one aggregate call, got {other:?}"),
    }
}

#[tokio::test]
async fn test_query_tree_wire_shape() {
    let backend = MockBackend::new();
    let server = McpServer::new(Arc::new(backend.clone()));

    call(
        &server,
        json!({
            "boardId": 123,
            "aggregations": [
                { "columnId": "status" },
                { "function": "COUNT", "columnId": "item_id" }
            ],
            "groupBy": ["status"],
            "filters": {
                "rules": [{ "columnId": "priority", "compareValue": [1], "compareOperator": "any_of" }],
                "combineOperator": "or"
            },
            "limit": 50
        }),
    )
    .await;

    let query = sent_query(&backend).await;
    assert_eq!(
        serde_json::to_value(&query).unwrap(),
        json!({
            "from": { "id": "123", "type": "TABLE" },
            "select": [
                { "type": "COLUMN", "column": { "column_id": "status" }, "as": "status" },
                {
                    "type": "FUNCTION",
                    "function": {
                        "function": "COUNT",
                        "params": [
                            { "type": "COLUMN", "column": { "column_id": "item_id" }, "as": "item_id" }
                        ]
                    },
                    "as": "COUNT_item_id_0"
                }
            ],
            "groupBy": [{ "column_id": "status" }],
            "query": {
                "rules": [{ "column_id": "priority", "compare_value": [1], "operator": "any_of" }],
                "operator": "OR"
            },
            "limit": 50
        })
    );
}

#[tokio::test]
async fn test_repeated_functions_and_transforming_grouping() {
    let backend = MockBackend::new();
    let server = McpServer::new(Arc::new(backend.clone()));

    call(
        &server,
        json!({
            "boardId": "77",
            "aggregations": [
                { "function": "sum", "columnId": "numbers" },
                { "function": "SUM", "columnId": "numbers" },
                { "function": "LABEL", "columnId": "status" }
            ]
        }),
    )
    .await;

    let query = sent_query(&backend).await;
    assert_eq!(
        query.output_keys().collect::<Vec<_>>(),
        vec!["SUM_numbers_0", "SUM_numbers_1", "LABEL_status_0", "status"]
    );
    assert_eq!(query.group_by.len(), 1);
    assert_eq!(query.group_by[0].column_id, "status");
    assert!(matches!(
        query.select.last(),
        Some(SelectExpression::Column { .. })
    ));
}

#[tokio::test]
async fn test_flattened_rows_keep_nulls_and_skip_blank_aliases() {
    let backend = MockBackend::new();
    backend
        .set_aggregate_result(Some(vec![
            ResultRow {
                entries: vec![
                    ResultEntry::new("status", EntryValue::Text("Done".to_string())),
                    ResultEntry::new("AVERAGE_numbers_0", EntryValue::Float(2.5)),
                    ResultEntry::null("owner"),
                    ResultEntry::new("", EntryValue::Boolean(true)),
                ],
            },
            ResultRow { entries: vec![] },
        ]))
        .await;
    let server = McpServer::new(Arc::new(backend));

    let result = call(
        &server,
        json!({
            "boardId": 1,
            "aggregations": [
                { "columnId": "status" },
                { "function": "AVERAGE", "columnId": "numbers" },
                { "columnId": "owner" }
            ],
            "groupBy": ["status", "owner"]
        }),
    )
    .await;

    let body: Value = serde_json::from_str(&text_of(&result)).unwrap();
    assert_eq!(
        body,
        json!({
            "results": [
                { "status": "Done", "AVERAGE_numbers_0": 2.5, "owner": null },
                {}
            ]
        })
    );
}

#[tokio::test]
async fn test_backend_result_decoded_from_wire() {
    let rows: Vec<ResultRow> = serde_json::from_value(json!([
        { "entries": [
            { "alias": "status", "value": { "value_string": "Working on it" } },
            { "alias": "COUNT_item_id_0", "value": { "result": 3 } }
        ] }
    ]))
    .unwrap();
    let backend = MockBackend::new();
    backend.set_aggregate_result(Some(rows)).await;
    let server = McpServer::new(Arc::new(backend));

    let result = call(
        &server,
        json!({
            "boardId": 1,
            "aggregations": [
                { "columnId": "status" },
                { "function": "COUNT", "columnId": "item_id" }
            ],
            "groupBy": ["status"]
        }),
    )
    .await;

    let body: Value = serde_json::from_str(&text_of(&result)).unwrap();
    assert_eq!(
        body["results"][0],
        json!({ "status": "Working on it", "COUNT_item_id_0": 3 })
    );
}

#[tokio::test]
async fn test_invalid_arguments_are_rejected() {
    let server = McpServer::new(Arc::new(MockBackend::new()));

    let err = server
        .call_tool_by_name("board_insights", json!({ "aggregations": [] }).as_object().cloned())
        .await
        .unwrap_err();

    assert!(err.message.contains("Invalid arguments"));
}
