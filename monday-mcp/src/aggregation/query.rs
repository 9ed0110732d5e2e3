//! Aggregate query tree sent to the backend

use serde::{Deserialize, Serialize};

/// Root of an aggregate query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateQuery {
    /// Table being aggregated
    pub from: TableRef,
    /// Selected values, each under a unique output key
    pub select: Vec<SelectExpression>,
    /// Grouping keys
    #[serde(rename = "groupBy")]
    pub group_by: Vec<GroupByColumn>,
    /// Item filter, absent when the request had none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<QueryFilter>,
    /// Maximum number of result rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl AggregateQuery {
    /// Output keys of the select list, in order
    pub fn output_keys(&self) -> impl Iterator<Item = &str> {
        self.select.iter().map(SelectExpression::output_key)
    }
}

/// Reference to the table being aggregated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRef {
    /// Board id in string form
    pub id: String,
    /// Always [`TableKind::Table`]
    #[serde(rename = "type")]
    pub kind: TableKind,
}

impl TableRef {
    /// Reference a board by id
    pub fn table(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: TableKind::Table,
        }
    }
}

/// Kind of source in the `from` clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TableKind {
    /// A board
    Table,
}

/// One selected value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum SelectExpression {
    /// A raw column value
    Column {
        /// Column being selected
        column: ColumnRef,
        /// Output key
        #[serde(rename = "as")]
        output_key: String,
    },
    /// A function applied to other expressions
    Function {
        /// Function and its parameters
        function: FunctionCall,
        /// Output key
        #[serde(rename = "as")]
        output_key: String,
    },
}

impl SelectExpression {
    /// Select `column_id` under `output_key`
    pub fn column(column_id: impl Into<String>, output_key: impl Into<String>) -> Self {
        SelectExpression::Column {
            column: ColumnRef::new(column_id),
            output_key: output_key.into(),
        }
    }

    /// Select `function(column_id)` under `output_key`
    pub fn function(
        function_name: impl Into<String>,
        column_id: impl Into<String>,
        output_key: impl Into<String>,
    ) -> Self {
        let column_id = column_id.into();
        SelectExpression::Function {
            function: FunctionCall {
                function: function_name.into(),
                params: vec![SelectExpression::column(column_id.clone(), column_id)],
            },
            output_key: output_key.into(),
        }
    }

    /// The key the value is returned under
    pub fn output_key(&self) -> &str {
        match self {
            SelectExpression::Column { output_key, .. }
            | SelectExpression::Function { output_key, .. } => output_key,
        }
    }
}

/// A column reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRef {
    /// Column id
    pub column_id: String,
}

impl ColumnRef {
    /// Reference a column by id
    pub fn new(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
        }
    }
}

/// A function call inside a select expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Upper-case function identifier
    pub function: String,
    /// Function arguments
    pub params: Vec<SelectExpression>,
}

/// A grouping key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupByColumn {
    /// Column id, matching the output key of a select expression
    pub column_id: String,
}

/// Filter clause of an aggregate query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryFilter {
    /// Filter rules
    pub rules: Vec<QueryRule>,
    /// Operator joining the rules
    pub operator: super::CombineOperator,
}

/// One filter rule in backend shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRule {
    /// Column the rule applies to
    pub column_id: String,
    /// Value to compare against
    pub compare_value: serde_json::Value,
    /// Comparison operator
    pub operator: String,
    /// Column attribute to compare
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_attribute: Option<String>,
}
