//! Board insights: aggregation query building and result flattening
//!
//! An [`AggregationSpec`] is the agent-facing description of a summary over one
//! board ("count items per status", "sum of numbers per owner"). The
//! [`AggregationRequestBuilder`] compiles it into the platform's aggregate
//! query tree ([`AggregateQuery`]); the backend answers with rows of aliased,
//! typed values which the [`AggregationResultFlattener`] turns into plain
//! records.
//!
//! ## Aliasing
//!
//! Plain column selections are returned under the column id. Function
//! selections are returned under `FUNCTION_COLUMN_N`, where `N` counts earlier
//! selections of the same function over the same column in the same request.
//! An `N` whose key is already a selected or grouped column id is skipped, so
//! output keys are unique.
//!
//! ## Grouping
//!
//! Functions are classified by [`FunctionClassifier`]. Transforming functions
//! (e.g. `LABEL`, `START_OF_MONTH`) force their column into the group-by list,
//! and every group-by column is guaranteed a matching select expression.

mod alias;
mod builder;
mod flatten;
mod functions;
mod query;

pub use alias::AliasAllocator;
pub use builder::AggregationRequestBuilder;
pub use flatten::{
    entry_payload, AggregationResultFlattener, EntryValue, PlainRecord, ResultEntry, ResultRow,
};
pub use functions::{
    FunctionCategory, FunctionClassifier, TRANSFORMING_FUNCTIONS, UNSUPPORTED_FUNCTIONS,
};
pub use query::{
    AggregateQuery, ColumnRef, FunctionCall, GroupByColumn, QueryFilter, QueryRule,
    SelectExpression, TableKind, TableRef,
};

use crate::common::IdInput;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A summary request over one board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AggregationSpec {
    /// The board to aggregate over
    #[serde(rename = "boardId", alias = "tableId")]
    pub table_id: IdInput,
    /// Columns to select, optionally wrapped in an aggregate function
    pub aggregations: Vec<AggregationItem>,
    /// Column ids to group by, in order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_by: Option<Vec<String>>,
    /// Item filter applied before aggregating
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<FilterSpec>,
    /// Maximum number of result rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// One requested selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AggregationItem {
    /// Column to select
    pub column_id: String,
    /// Aggregate function applied to the column, e.g. `COUNT`, `SUM`, `LABEL`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
}

impl AggregationItem {
    /// Select a column as-is
    pub fn column(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            function: None,
        }
    }

    /// Select a column through an aggregate function
    pub fn function(function: impl Into<String>, column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            function: Some(function.into()),
        }
    }
}

/// Item filter: a list of rules joined by one operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    /// Rules to apply
    pub rules: Vec<FilterRule>,
    /// How the rules are combined
    #[serde(default)]
    pub combine_operator: CombineOperator,
}

/// One filter rule, passed to the backend verbatim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterRule {
    /// Column the rule applies to
    pub column_id: String,
    /// Value to compare against; shape depends on the column type
    #[serde(default)]
    pub compare_value: serde_json::Value,
    /// Comparison, e.g. `any_of`, `greater_than`, `is_empty`
    #[serde(default = "default_compare_operator")]
    pub compare_operator: String,
    /// Column attribute to compare, for columns with several
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_attribute: Option<String>,
}

fn default_compare_operator() -> String {
    "any_of".to_string()
}

/// Logical operator joining filter rules
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum CombineOperator {
    /// All rules must match
    #[default]
    #[serde(alias = "and")]
    And,
    /// Any rule may match
    #[serde(alias = "or")]
    Or,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_spec_accepts_numeric_board_id_and_camel_case_fields() {
        let spec: AggregationSpec = serde_json::from_value(json!({
            "boardId": 123,
            "aggregations": [{ "columnId": "status" }, { "columnId": "item_id", "function": "COUNT" }],
            "groupBy": ["status"],
            "filters": {
                "rules": [{ "columnId": "person", "compareValue": [1], "compareOperator": "any_of" }],
                "combineOperator": "or"
            },
            "limit": 10
        }))
        .unwrap();

        assert_eq!(spec.table_id.as_id_string(), "123");
        assert_eq!(spec.aggregations[1], AggregationItem::function("COUNT", "item_id"));
        assert_eq!(spec.group_by, Some(vec!["status".to_string()]));
        let filters = spec.filters.unwrap();
        assert_eq!(filters.combine_operator, CombineOperator::Or);
        assert_eq!(filters.rules[0].compare_attribute, None);
        assert_eq!(spec.limit, Some(10));
    }

    #[test]
    fn test_filter_rule_defaults() {
        let rule: FilterRule = serde_json::from_value(json!({ "columnId": "status" })).unwrap();
        assert_eq!(rule.compare_operator, "any_of");
        assert!(rule.compare_value.is_null());
    }

    #[test]
    fn test_table_id_alias() {
        let spec: AggregationSpec =
            serde_json::from_value(json!({ "tableId": "42", "aggregations": [] })).unwrap();
        assert_eq!(spec.table_id.as_id_string(), "42");
    }
}
