//! Orchestrator
//!
//! Processes data managers strictly in declaration order, and each data
//! manager's items in order, one at a time. A later data manager may depend
//! on a lookup table an earlier one filled; the reload after every job is
//! what lets the later existence checks see that data.
//!
//! Per item: `Checking -> Skipped` when the tables already hold the values,
//! otherwise `Checking -> Running -> Waiting -> Reloading -> Done`.

use chrono::Utc;
use datamgr_core::RunConfig;
use datamgr_core::domain::job::{JobOutcome, JobSpec};
use datamgr_core::template::resolve_inputs;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::error::ProvisionError;
use crate::report::{ItemRecord, ItemStatus, RunReport};
use crate::service::{ExistenceService, JobRunnerService, ReloadService};

/// Where a (data manager, item) pair is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemPhase {
    Checking,
    Skipped,
    Running,
    Waiting,
    Reloading,
    Done,
}

impl std::fmt::Display for ItemPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemPhase::Checking => write!(f, "CHECKING"),
            ItemPhase::Skipped => write!(f, "SKIPPED"),
            ItemPhase::Running => write!(f, "RUNNING"),
            ItemPhase::Waiting => write!(f, "WAITING"),
            ItemPhase::Reloading => write!(f, "RELOADING"),
            ItemPhase::Done => write!(f, "DONE"),
        }
    }
}

/// Sequential data manager orchestrator
pub struct Orchestrator {
    existence: Arc<dyn ExistenceService>,
    runner: Arc<dyn JobRunnerService>,
    reloader: Arc<dyn ReloadService>,
}

impl Orchestrator {
    pub fn new(
        existence: Arc<dyn ExistenceService>,
        runner: Arc<dyn JobRunnerService>,
        reloader: Arc<dyn ReloadService>,
    ) -> Self {
        Self {
            existence,
            runner,
            reloader,
        }
    }

    /// Runs every data manager of `config`
    ///
    /// # Errors
    /// Only misconfigured or unreachable lookup tables abort the run. Failed
    /// submissions and jobs ending in `error` are recorded in the report and
    /// the run carries on with the next item.
    pub async fn run(&self, config: &RunConfig) -> Result<RunReport, ProvisionError> {
        info!(
            "Running {} data manager(s), {} item(s) in total",
            config.len(),
            config.item_count()
        );

        let mut report = RunReport::default();
        for spec in config.iter() {
            for item in &spec.items {
                let record = self.process_item(spec, item).await?;
                report.push(record);
            }
        }

        Ok(report)
    }

    async fn process_item(&self, spec: &JobSpec, item: &str) -> Result<ItemRecord, ProvisionError> {
        let started_at = Utc::now();
        if item.is_empty() {
            info!("Running DM: {}", spec.id);
        } else {
            info!("Running DM: {} (item {})", spec.id, item);
        }

        let inputs = resolve_inputs(&spec.params, item);
        debug!("Resolved inputs for {}: {:?}", spec.id, inputs);

        let finish = |status: ItemStatus| ItemRecord {
            job_id: spec.id.clone(),
            item: item.to_string(),
            status,
            started_at,
            finished_at: Utc::now(),
        };

        transition(spec, item, ItemPhase::Checking);
        if !spec.reload_targets.is_empty()
            && self
                .existence
                .already_provisioned(&spec.reload_targets, &inputs)
                .await?
        {
            info!(
                "Skipping {}: values already present in {}",
                spec.id,
                spec.reload_targets.join(", ")
            );
            transition(spec, item, ItemPhase::Skipped);
            return Ok(finish(ItemStatus::Skipped));
        }

        transition(spec, item, ItemPhase::Running);
        let submission = match self.runner.submit(&spec.id, &inputs).await {
            Ok(submission) => submission,
            Err(e) => {
                error!("Failed to submit data manager {}: {}", spec.id, e);
                return Ok(finish(ItemStatus::SubmitFailed(e.to_string())));
            }
        };

        transition(spec, item, ItemPhase::Waiting);
        let outcome = self.runner.wait(&submission).await;
        match outcome {
            JobOutcome::Ok => info!("Data manager {} finished", spec.id),
            JobOutcome::Error => warn!(
                "Data manager {} finished in error state, continuing with the next one",
                spec.id
            ),
        }

        // Tables are reloaded whatever the outcome.
        if !spec.reload_targets.is_empty() {
            transition(spec, item, ItemPhase::Reloading);
            info!("Reloading data managers table.");
            self.reloader.reload_all(&spec.reload_targets).await;
        }

        transition(spec, item, ItemPhase::Done);
        Ok(finish(ItemStatus::Completed(outcome)))
    }
}

fn transition(spec: &JobSpec, item: &str, phase: ItemPhase) {
    debug!("{} [{}] -> {}", spec.id, item, phase);
}
