//! Output key allocation for select expressions

use std::collections::{HashMap, HashSet};

/// Hands out output keys for one build call.
///
/// Create a fresh allocator per [`super::AggregationRequestBuilder::build`];
/// counters are never shared between requests. Every key handed out or
/// reserved is unique within the allocator.
#[derive(Debug, Default)]
pub struct AliasAllocator {
    occurrences: HashMap<String, usize>,
    taken: HashSet<String>,
}

impl AliasAllocator {
    /// Create an allocator with no keys handed out
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` as used so no function selection is given it
    pub fn reserve(&mut self, key: &str) {
        self.taken.insert(key.to_string());
    }

    /// Allocate the output key for a selection.
    ///
    /// A plain column is keyed by its id. A function selection is keyed
    /// `FUNCTION_COLUMN_N` with `N` the number of earlier allocations of the
    /// same pair, skipping any `N` whose key is already taken.
    pub fn allocate(&mut self, function_name: Option<&str>, column_id: &str) -> String {
        let Some(function_name) = function_name else {
            self.reserve(column_id);
            return column_id.to_string();
        };

        let base = format!("{function_name}_{column_id}");
        let occurrence = self.occurrences.entry(base.clone()).or_insert(0);
        let mut alias = format!("{base}_{occurrence}");
        while self.taken.contains(&alias) {
            *occurrence += 1;
            alias = format!("{base}_{occurrence}");
        }
        *occurrence += 1;
        self.taken.insert(alias.clone());
        alias
    }
}
