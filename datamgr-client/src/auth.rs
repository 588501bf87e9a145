//! Authentication and connectivity endpoints

use datamgr_core::dto::auth::ApiKeyResponse;
use reqwest::Method;

use crate::GalaxyClient;
use crate::error::Result;

impl GalaxyClient {
    /// Exchange a user's email and password for their API key
    ///
    /// # Arguments
    /// * `user` - Account email
    /// * `password` - Account password
    ///
    /// # Returns
    /// The API key to attach with [`GalaxyClient::with_api_key`]
    pub async fn authenticate(&self, user: &str, password: &str) -> Result<String> {
        let response = self
            .request(Method::GET, "/api/authenticate/baseauth")
            .basic_auth(user, Some(password))
            .send()
            .await?;

        let body: ApiKeyResponse = self.handle_response(response).await?;
        Ok(body.api_key)
    }

    /// List the genome builds (dbkeys) known to the platform
    ///
    /// Cheap authenticated call, used to verify connectivity and
    /// credentials before any job is submitted.
    pub async fn list_genomes(&self) -> Result<Vec<serde_json::Value>> {
        let response = self.request(Method::GET, "/api/genomes").send().await?;

        self.handle_response(response).await
    }
}
