//! Flattening of aggregate results into plain records

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Number, Value};

/// One output record: output key to value, in backend entry order
pub type PlainRecord = Map<String, Value>;

/// One result row as returned by the backend
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResultRow {
    /// Aliased values of the row
    #[serde(default)]
    pub entries: Vec<ResultEntry>,
}

/// One aliased value in a result row
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResultEntry {
    /// Output key the value was selected under
    pub alias: String,
    /// The value, `None` when the backend returned null
    #[serde(default, deserialize_with = "deserialize_entry_value")]
    pub value: Option<EntryValue>,
}

impl ResultEntry {
    /// Entry with a value
    pub fn new(alias: impl Into<String>, value: EntryValue) -> Self {
        Self {
            alias: alias.into(),
            value: Some(value),
        }
    }

    /// Entry whose value is null
    pub fn null(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            value: None,
        }
    }
}

/// A typed result value; exactly one variant is active
#[derive(Debug, Clone, PartialEq)]
pub enum EntryValue {
    /// Scalar produced by a reducing function
    Reduction(Number),
    /// Group-by value of a text column
    Text(String),
    /// Group-by value of an integer column
    Integer(i64),
    /// Group-by value of a float column
    Float(f64),
    /// Group-by value of a boolean column
    Boolean(bool),
}

impl EntryValue {
    /// Payload of the active variant as JSON
    pub fn into_json(self) -> Value {
        match self {
            EntryValue::Reduction(n) => Value::Number(n),
            EntryValue::Text(s) => Value::String(s),
            EntryValue::Integer(i) => Value::from(i),
            EntryValue::Float(f) => Value::from(f),
            EntryValue::Boolean(b) => Value::Bool(b),
        }
    }
}

/// Extract the payload of an optional value, `null` when absent
pub fn entry_payload(value: Option<EntryValue>) -> Value {
    value.map(EntryValue::into_json).unwrap_or(Value::Null)
}

/// Backend union of the basic aggregation result and the group-by result
#[derive(Debug, Deserialize)]
struct WireValue {
    result: Option<Number>,
    value_string: Option<String>,
    value_int: Option<i64>,
    value_float: Option<f64>,
    value_boolean: Option<bool>,
}

impl WireValue {
    fn into_entry_value(self) -> Option<EntryValue> {
        if let Some(n) = self.result {
            Some(EntryValue::Reduction(n))
        } else if let Some(s) = self.value_string {
            Some(EntryValue::Text(s))
        } else if let Some(i) = self.value_int {
            Some(EntryValue::Integer(i))
        } else if let Some(f) = self.value_float {
            Some(EntryValue::Float(f))
        } else {
            self.value_boolean.map(EntryValue::Boolean)
        }
    }
}

fn deserialize_entry_value<'de, D>(deserializer: D) -> Result<Option<EntryValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let wire = Option::<WireValue>::deserialize(deserializer)?;
    Ok(wire.and_then(WireValue::into_entry_value))
}

/// Converts backend rows into plain records
pub struct AggregationResultFlattener;

impl AggregationResultFlattener {
    /// Flatten rows in order; entries with an empty alias are dropped
    pub fn flatten(rows: Vec<ResultRow>) -> Vec<PlainRecord> {
        rows.into_iter()
            .map(|row| {
                let mut record = PlainRecord::new();
                for entry in row.entries {
                    if entry.alias.is_empty() {
                        continue;
                    }
                    record.insert(entry.alias, entry_payload(entry.value));
                }
                record
            })
            .collect()
    }

    /// Flatten an optional backend result; absent and empty both yield no records
    pub fn flatten_result(rows: Option<Vec<ResultRow>>) -> Vec<PlainRecord> {
        rows.map(Self::flatten).unwrap_or_default()
    }
}
