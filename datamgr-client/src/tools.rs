//! Tool execution endpoints

use datamgr_core::domain::job::ResolvedInputs;
use datamgr_core::dto::tool::{RunToolRequest, RunToolResponse};
use reqwest::Method;

use crate::GalaxyClient;
use crate::error::Result;

impl GalaxyClient {
    /// Submit a tool (data manager) run
    ///
    /// Data managers write into lookup tables rather than a history, so no
    /// history is attached to the request.
    ///
    /// # Arguments
    /// * `tool_id` - Identifier of the tool to run
    /// * `inputs` - Concrete tool inputs
    ///
    /// # Returns
    /// The submission, including the output datasets to poll
    pub async fn run_tool(&self, tool_id: &str, inputs: &ResolvedInputs) -> Result<RunToolResponse> {
        let request = RunToolRequest {
            tool_id: tool_id.to_string(),
            inputs: inputs.clone(),
            history_id: None,
        };
        let response = self
            .request(Method::POST, "/api/tools")
            .json(&request)
            .send()
            .await?;

        self.handle_response(response).await
    }
}
