//! Compiles an [`AggregationSpec`] into an [`AggregateQuery`]

use super::{
    AggregateQuery, AggregationSpec, AliasAllocator, FilterSpec, FunctionCategory,
    FunctionClassifier, GroupByColumn, QueryFilter, QueryRule, SelectExpression, TableRef,
};
use crate::{MondayError, Result};

/// Builds aggregate query trees
pub struct AggregationRequestBuilder;

impl AggregationRequestBuilder {
    /// Compile `spec` into a query tree.
    ///
    /// Select expressions appear in aggregation order, followed by one plain
    /// column per group-by key that had no selection of its own.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError::UnsupportedFunction`] if any aggregation uses a
    /// function in [`super::UNSUPPORTED_FUNCTIONS`]. No partial tree is
    /// produced.
    pub fn build(spec: &AggregationSpec) -> Result<AggregateQuery> {
        let mut aliases = AliasAllocator::new();
        let mut group_by: Vec<String> = spec.group_by.clone().unwrap_or_default();
        let mut select: Vec<SelectExpression> = Vec::with_capacity(spec.aggregations.len());

        // column-keyed selections own their column id, function aliases go around them
        for key in &group_by {
            aliases.reserve(key);
        }
        for item in &spec.aggregations {
            let keyed_by_column = match item.function.as_deref() {
                None => true,
                Some(function) => matches!(
                    FunctionClassifier::classify(&function.trim().to_ascii_uppercase()),
                    FunctionCategory::Transforming
                ),
            };
            if keyed_by_column {
                aliases.reserve(&item.column_id);
            }
        }

        for item in &spec.aggregations {
            let column_id = item.column_id.as_str();

            let Some(function) = item.function.as_deref() else {
                let output_key = aliases.allocate(None, column_id);
                // a repeated plain column maps onto the existing selection
                if !select.iter().any(|s| s.output_key() == output_key) {
                    select.push(SelectExpression::column(column_id, output_key));
                }
                continue;
            };

            let function = function.trim().to_ascii_uppercase();
            match FunctionClassifier::classify(&function) {
                FunctionCategory::Unsupported => {
                    tracing::debug!("Rejecting aggregation with function {}", function);
                    return Err(MondayError::UnsupportedFunction(function));
                }
                FunctionCategory::Transforming => {
                    if !group_by.iter().any(|key| key == column_id) {
                        group_by.push(column_id.to_string());
                    }
                }
                FunctionCategory::Reducing => {}
            }

            let output_key = aliases.allocate(Some(&function), column_id);
            select.push(SelectExpression::function(function, column_id, output_key));
        }

        for key in &group_by {
            if !select.iter().any(|s| s.output_key() == key) {
                select.push(SelectExpression::column(key.as_str(), key.as_str()));
            }
        }

        let mut group_by_columns: Vec<GroupByColumn> = Vec::with_capacity(group_by.len());
        for column_id in group_by {
            if !group_by_columns.iter().any(|g| g.column_id == column_id) {
                group_by_columns.push(GroupByColumn { column_id });
            }
        }

        Ok(AggregateQuery {
            from: TableRef::table(spec.table_id.as_id_string()),
            select,
            group_by: group_by_columns,
            query: spec.filters.as_ref().map(Self::translate_filters),
            limit: spec.limit,
        })
    }

    /// Translate a caller filter into the backend filter shape, field for field
    pub fn translate_filters(filters: &FilterSpec) -> QueryFilter {
        QueryFilter {
            rules: filters
                .rules
                .iter()
                .map(|rule| QueryRule {
                    column_id: rule.column_id.clone(),
                    compare_value: rule.compare_value.clone(),
                    operator: rule.compare_operator.clone(),
                    compare_attribute: rule.compare_attribute.clone(),
                })
                .collect(),
            operator: filters.combine_operator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::{AggregationItem, CombineOperator, FilterRule};
    use serde_json::json;

    fn spec(aggregations: Vec<AggregationItem>, group_by: Option<Vec<&str>>) -> AggregationSpec {
        AggregationSpec {
            table_id: 123u64.into(),
            aggregations,
            group_by: group_by.map(|keys| keys.into_iter().map(String::from).collect()),
            filters: None,
            limit: None,
        }
    }

    fn keys(query: &AggregateQuery) -> Vec<&str> {
        query.output_keys().collect()
    }

    fn group_keys(query: &AggregateQuery) -> Vec<&str> {
        query.group_by.iter().map(|g| g.column_id.as_str()).collect()
    }

    #[test]
    fn test_count_per_status() {
        let query = AggregationRequestBuilder::build(&spec(
            vec![
                AggregationItem::column("status"),
                AggregationItem::function("COUNT", "item_id"),
            ],
            Some(vec!["status"]),
        ))
        .unwrap();

        assert_eq!(query.from, TableRef::table("123"));
        assert_eq!(
            query.select,
            vec![
                SelectExpression::column("status", "status"),
                SelectExpression::function("COUNT", "item_id", "COUNT_item_id_0"),
            ]
        );
        assert_eq!(group_keys(&query), vec!["status"]);
        assert_eq!(query.query, None);
    }

    #[test]
    fn test_repeated_function_gets_unique_keys() {
        let query = AggregationRequestBuilder::build(&spec(
            vec![
                AggregationItem::function("SUM", "numbers"),
                AggregationItem::function("SUM", "numbers"),
                AggregationItem::function("sum", "numbers"),
            ],
            None,
        ))
        .unwrap();

        assert_eq!(
            keys(&query),
            vec!["SUM_numbers_0", "SUM_numbers_1", "SUM_numbers_2"]
        );
        assert!(query.group_by.is_empty());
    }

    #[test]
    fn test_function_alias_never_shadows_a_column_id() {
        let query = AggregationRequestBuilder::build(&spec(
            vec![
                AggregationItem::column("SUM_numbers_0"),
                AggregationItem::function("SUM", "numbers"),
            ],
            None,
        ))
        .unwrap();
        assert_eq!(keys(&query), vec!["SUM_numbers_0", "SUM_numbers_1"]);

        let query = AggregationRequestBuilder::build(&spec(
            vec![
                AggregationItem::function("SUM", "numbers"),
                AggregationItem::column("SUM_numbers_0"),
            ],
            None,
        ))
        .unwrap();
        assert_eq!(keys(&query), vec!["SUM_numbers_1", "SUM_numbers_0"]);
    }

    #[test]
    fn test_grouped_column_keeps_its_own_selection() {
        let query = AggregationRequestBuilder::build(&spec(
            vec![
                AggregationItem::function("COUNT", "item_id"),
                AggregationItem::function("LABEL", "COUNT_item_id_0"),
            ],
            Some(vec!["LABEL_COUNT_item_id_0_0"]),
        ))
        .unwrap();

        assert_eq!(
            keys(&query),
            vec![
                "COUNT_item_id_1",
                "LABEL_COUNT_item_id_0_1",
                "LABEL_COUNT_item_id_0_0",
                "COUNT_item_id_0",
            ]
        );
        assert_eq!(
            group_keys(&query),
            vec!["LABEL_COUNT_item_id_0_0", "COUNT_item_id_0"]
        );
    }

    #[test]
    fn test_group_by_only_column_is_synthesized_once() {
        let query = AggregationRequestBuilder::build(&spec(
            vec![AggregationItem::function("COUNT", "item_id")],
            Some(vec!["status", "person"]),
        ))
        .unwrap();

        assert_eq!(keys(&query), vec!["COUNT_item_id_0", "status", "person"]);
        assert_eq!(group_keys(&query), vec!["status", "person"]);
    }

    #[test]
    fn test_transforming_function_groups_by_its_column() {
        let query = AggregationRequestBuilder::build(&spec(
            vec![
                AggregationItem::function("LABEL", "status"),
                AggregationItem::function("COUNT", "item_id"),
            ],
            None,
        ))
        .unwrap();

        assert_eq!(group_keys(&query), vec!["status"]);
        assert_eq!(
            keys(&query),
            vec!["LABEL_status_0", "COUNT_item_id_0", "status"]
        );
    }

    #[test]
    fn test_transforming_function_on_grouped_column_adds_nothing() {
        let query = AggregationRequestBuilder::build(&spec(
            vec![
                AggregationItem::column("date"),
                AggregationItem::function("START_OF_MONTH", "date"),
                AggregationItem::function("START_OF_MONTH", "date"),
            ],
            Some(vec!["date"]),
        ))
        .unwrap();

        assert_eq!(group_keys(&query), vec!["date"]);
        assert_eq!(
            keys(&query),
            vec!["date", "START_OF_MONTH_date_0", "START_OF_MONTH_date_1"]
        );
    }

    #[test]
    fn test_unsupported_function_fails_whole_build() {
        let err = AggregationRequestBuilder::build(&spec(
            vec![
                AggregationItem::column("status"),
                AggregationItem::function("case", "status"),
            ],
            Some(vec!["status"]),
        ))
        .unwrap_err();

        match err {
            MondayError::UnsupportedFunction(name) => assert_eq!(name, "CASE"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_plain_columns_share_one_selection() {
        let query = AggregationRequestBuilder::build(&spec(
            vec![
                AggregationItem::column("status"),
                AggregationItem::column("status"),
            ],
            Some(vec!["status", "status"]),
        ))
        .unwrap();

        assert_eq!(keys(&query), vec!["status"]);
        assert_eq!(group_keys(&query), vec!["status"]);
    }

    #[test]
    fn test_filters_and_limit_pass_through() {
        let mut request = spec(vec![AggregationItem::function("COUNT", "item_id")], None);
        request.limit = Some(25);
        request.filters = Some(FilterSpec {
            rules: vec![
                FilterRule {
                    column_id: "status".to_string(),
                    compare_value: json!([1, 2]),
                    compare_operator: "any_of".to_string(),
                    compare_attribute: None,
                },
                FilterRule {
                    column_id: "timeline".to_string(),
                    compare_value: json!("2025-01-01"),
                    compare_operator: "greater_than".to_string(),
                    compare_attribute: Some("START_DATE".to_string()),
                },
            ],
            combine_operator: CombineOperator::Or,
        });

        let query = AggregationRequestBuilder::build(&request).unwrap();
        assert_eq!(query.limit, Some(25));
        assert_eq!(
            serde_json::to_value(query.query.unwrap()).unwrap(),
            json!({
                "rules": [
                    { "column_id": "status", "compare_value": [1, 2], "operator": "any_of" },
                    {
                        "column_id": "timeline",
                        "compare_value": "2025-01-01",
                        "operator": "greater_than",
                        "compare_attribute": "START_DATE"
                    }
                ],
                "operator": "OR"
            })
        );
    }

    #[test]
    fn test_empty_filter_rules_are_kept() {
        let mut request = spec(vec![AggregationItem::function("COUNT", "item_id")], None);
        request.filters = Some(FilterSpec {
            rules: vec![],
            combine_operator: CombineOperator::And,
        });

        let query = AggregationRequestBuilder::build(&request).unwrap();
        assert_eq!(query.query.unwrap().rules.len(), 0);
    }
}
