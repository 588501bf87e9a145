//! Tool data table endpoints

use datamgr_core::domain::table::TableSnapshot;
use datamgr_core::dto::table::DataTableContent;
use reqwest::Method;

use crate::GalaxyClient;
use crate::error::Result;

impl GalaxyClient {
    /// Fetch the current columns and rows of a lookup table
    ///
    /// # Arguments
    /// * `table_name` - Name of the tool data table (e.g., "all_fasta")
    pub async fn show_data_table(&self, table_name: &str) -> Result<TableSnapshot> {
        let path = format!("/api/tool_data/{}", table_name);
        let response = self.request(Method::GET, &path).send().await?;

        let content: DataTableContent = self.handle_response(response).await?;
        Ok(content.into())
    }

    /// Ask the platform to re-read a lookup table from its backing files
    pub async fn reload_data_table(&self, table_name: &str) -> Result<()> {
        let path = format!("/api/tool_data/{}/reload", table_name);
        let response = self.request(Method::GET, &path).send().await?;

        self.handle_empty_response(response).await
    }
}
