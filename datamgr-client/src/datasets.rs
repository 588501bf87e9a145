//! Dataset endpoints

use datamgr_core::domain::dataset::DatasetState;
use datamgr_core::dto::dataset::DatasetInfo;
use reqwest::Method;

use crate::GalaxyClient;
use crate::error::Result;

impl GalaxyClient {
    /// Get a dataset's details
    pub async fn show_dataset(&self, dataset_id: &str) -> Result<DatasetInfo> {
        let path = format!("/api/datasets/{}", dataset_id);
        let response = self.request(Method::GET, &path).send().await?;

        self.handle_response(response).await
    }

    /// Get only the current state of a dataset
    pub async fn dataset_state(&self, dataset_id: &str) -> Result<DatasetState> {
        Ok(self.show_dataset(dataset_id).await?.state)
    }
}
