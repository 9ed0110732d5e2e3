//! Identifier input coercion
//!
//! Agents send board and workspace identifiers either as JSON numbers or as
//! strings. The platform's GraphQL `ID` type expects strings, so every id is
//! carried as [`IdInput`] and converted with [`IdInput::as_id_string`] right
//! before it leaves the process.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A platform identifier given as a number or a string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum IdInput {
    /// Numeric form, e.g. `123456`
    Number(u64),
    /// String form, e.g. `"123456"`
    Text(String),
}

impl IdInput {
    /// The identifier in the backend's string representation
    pub fn as_id_string(&self) -> String {
        match self {
            IdInput::Number(n) => n.to_string(),
            IdInput::Text(s) => s.trim().to_string(),
        }
    }
}

impl fmt::Display for IdInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_id_string())
    }
}

impl From<u64> for IdInput {
    fn from(value: u64) -> Self {
        IdInput::Number(value)
    }
}

impl From<&str> for IdInput {
    fn from(value: &str) -> Self {
        IdInput::Text(value.to_string())
    }
}

impl From<String> for IdInput {
    fn from(value: String) -> Self {
        IdInput::Text(value)
    }
}
