//! Tables repository
//!
//! Handles communication with the platform for lookup tables:
//! - Fetching a fresh snapshot of a table
//! - Reloading a table after a job may have changed it

use async_trait::async_trait;
use datamgr_client::{GalaxyClient, Result};
use datamgr_core::domain::table::TableSnapshot;
use std::sync::Arc;

/// Repository trait for lookup table operations with the platform
#[async_trait]
pub trait TableRepository: Send + Sync {
    /// Fetches the table's columns and rows as currently known remotely
    async fn describe_table(&self, table_name: &str) -> Result<TableSnapshot>;

    /// Asks the platform to refresh its view of the table
    async fn reload_table(&self, table_name: &str) -> Result<()>;
}

/// HTTP implementation of TableRepository
pub struct HttpTableRepository {
    client: Arc<GalaxyClient>,
}

impl HttpTableRepository {
    pub fn new(client: Arc<GalaxyClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TableRepository for HttpTableRepository {
    async fn describe_table(&self, table_name: &str) -> Result<TableSnapshot> {
        self.client.show_data_table(table_name).await
    }

    async fn reload_table(&self, table_name: &str) -> Result<()> {
        self.client.reload_data_table(table_name).await
    }
}
