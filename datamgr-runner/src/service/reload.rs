//! Reload service
//!
//! Forces the platform to refresh lookup tables after a job that may have
//! written to them. A single reload races with the platform populating the
//! table asynchronously, so every table is reloaded twice with a pause after
//! each call. This narrows the race but does not close it.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::repository::TableRepository;

/// Reload calls issued per table
pub const RELOAD_PASSES: usize = 2;

/// Service trait for refreshing lookup tables
#[async_trait]
pub trait ReloadService: Send + Sync {
    /// Reloads one table; failures are logged, never returned
    async fn reload(&self, table: &str);

    /// Reloads every table in order
    async fn reload_all(&self, tables: &[String]) {
        for table in tables {
            self.reload(table).await;
        }
    }
}

/// Standard implementation of ReloadService
pub struct StandardReloadService {
    tables: Arc<dyn TableRepository>,
    delay: Duration,
}

impl StandardReloadService {
    pub fn new(tables: Arc<dyn TableRepository>, delay: Duration) -> Self {
        Self { tables, delay }
    }
}

#[async_trait]
impl ReloadService for StandardReloadService {
    async fn reload(&self, table: &str) {
        for pass in 1..=RELOAD_PASSES {
            debug!("Reloading table {} ({}/{})", table, pass, RELOAD_PASSES);
            if let Err(e) = self.tables.reload_table(table).await {
                warn!("Failed to reload table {}: {}", table, e);
            }
            tokio::time::sleep(self.delay).await;
        }
    }
}
