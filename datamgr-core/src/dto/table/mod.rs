//! Lookup table DTOs

use serde::{Deserialize, Serialize};

use crate::domain::table::TableSnapshot;

/// Table contents as returned by the show-data-table endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataTableContent {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub fields: Vec<Vec<String>>,
}

impl From<DataTableContent> for TableSnapshot {
    fn from(content: DataTableContent) -> Self {
        TableSnapshot {
            name: content.name,
            columns: content.columns,
            rows: content.fields,
        }
    }
}
