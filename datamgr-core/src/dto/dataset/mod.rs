//! Dataset DTOs

use serde::{Deserialize, Serialize};

use crate::domain::dataset::DatasetState;

/// Dataset details as returned by the show-dataset endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub id: String,
    pub state: DatasetState,
    #[serde(default)]
    pub name: Option<String>,
}
