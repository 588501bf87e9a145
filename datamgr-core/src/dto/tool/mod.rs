//! Tool execution DTOs

use serde::{Deserialize, Serialize};

use crate::domain::dataset::DatasetState;
use crate::domain::job::ResolvedInputs;

/// Request to run a tool (data manager) on the remote platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunToolRequest {
    pub tool_id: String,
    pub inputs: ResolvedInputs,
    /// Data managers do not need a history; `None` is sent as `null`
    pub history_id: Option<String>,
}

/// Response of a tool submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunToolResponse {
    #[serde(default)]
    pub outputs: Vec<OutputDataset>,
    #[serde(default)]
    pub jobs: Vec<JobSummary>,
}

impl RunToolResponse {
    /// Identifiers of the produced output datasets
    pub fn output_ids(&self) -> Vec<String> {
        self.outputs.iter().map(|o| o.id.clone()).collect()
    }
}

/// An output dataset created by a submitted job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputDataset {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub state: Option<DatasetState>,
}

/// A remote job created by a tool submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSummary {
    pub id: String,
    #[serde(default)]
    pub state: Option<String>,
}
