//! Lookup table domain types

use serde::{Deserialize, Serialize};

/// Name of the conventional key column checked for presence
pub const VALUE_COLUMN: &str = "value";

/// Column layout and rows of one lookup table, as currently known remotely
///
/// Snapshots are never cached: every existence check fetches a fresh one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableSnapshot {
    /// Index of the column with exactly this name
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Whether any row holds `value` at `column_index`
    ///
    /// Short rows that lack the column never match.
    pub fn has_value_at(&self, column_index: usize, value: &str) -> bool {
        self.rows
            .iter()
            .any(|row| row.get(column_index).is_some_and(|field| field == value))
    }
}
