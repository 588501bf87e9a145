//! Jobs repository
//!
//! Handles communication with the platform for job-related operations:
//! - Submitting data manager runs
//! - Reading the state of their output datasets

use async_trait::async_trait;
use datamgr_client::{GalaxyClient, Result, RunToolResponse};
use datamgr_core::domain::dataset::DatasetState;
use datamgr_core::domain::job::ResolvedInputs;
use std::sync::Arc;

/// Repository trait for job-related operations with the platform
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Submits a data manager run
    ///
    /// # Arguments
    /// * `tool_id` - Identifier of the data manager tool
    /// * `inputs` - Concrete tool inputs
    async fn submit_job(&self, tool_id: &str, inputs: &ResolvedInputs) -> Result<RunToolResponse>;

    /// Reads the current state of an output dataset
    async fn dataset_state(&self, dataset_id: &str) -> Result<DatasetState>;
}

/// HTTP implementation of JobRepository
pub struct HttpJobRepository {
    client: Arc<GalaxyClient>,
}

impl HttpJobRepository {
    pub fn new(client: Arc<GalaxyClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JobRepository for HttpJobRepository {
    async fn submit_job(&self, tool_id: &str, inputs: &ResolvedInputs) -> Result<RunToolResponse> {
        self.client.run_tool(tool_id, inputs).await
    }

    async fn dataset_state(&self, dataset_id: &str) -> Result<DatasetState> {
        self.client.dataset_state(dataset_id).await
    }
}
