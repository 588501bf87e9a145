//! Run report
//!
//! One record per (data manager, item) pair, in the order they were
//! processed. Per-item failures end up here instead of aborting the run.

use chrono::{DateTime, Utc};
use colored::*;
use datamgr_core::domain::job::JobOutcome;
use tracing::{info, warn};

/// How a (data manager, item) pair ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemStatus {
    /// Values already present in the lookup tables; nothing submitted
    Skipped,
    /// Submitted and waited on until a terminal state
    Completed(JobOutcome),
    /// The platform rejected the submission
    SubmitFailed(String),
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemStatus::Skipped => write!(f, "skipped"),
            ItemStatus::Completed(outcome) => write!(f, "{}", outcome),
            ItemStatus::SubmitFailed(_) => write!(f, "submit failed"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ItemRecord {
    pub job_id: String,
    pub item: String,
    pub status: ItemStatus,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ItemRecord {
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub records: Vec<ItemRecord>,
}

impl RunReport {
    pub fn push(&mut self, record: ItemRecord) {
        self.records.push(record);
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, ItemStatus::Skipped))
    }

    pub fn succeeded(&self) -> usize {
        self.count(|s| matches!(s, ItemStatus::Completed(JobOutcome::Ok)))
    }

    /// Items that ran and ended in `error`, or could not be submitted
    pub fn failed(&self) -> usize {
        self.count(|s| {
            matches!(
                s,
                ItemStatus::Completed(JobOutcome::Error) | ItemStatus::SubmitFailed(_)
            )
        })
    }

    /// Items that were sent to the platform
    pub fn submitted(&self) -> usize {
        self.count(|s| matches!(s, ItemStatus::Completed(_)))
    }

    fn count(&self, pred: impl Fn(&ItemStatus) -> bool) -> usize {
        self.records.iter().filter(|r| pred(&r.status)).count()
    }

    /// Logs the totals, as a warning if anything failed
    pub fn log_summary(&self) {
        let failed = self.failed();
        if failed > 0 {
            warn!(
                "Finished {} item(s): {} submitted, {} ok, {} skipped, {} failed",
                self.records.len(),
                self.submitted(),
                self.succeeded(),
                self.skipped(),
                failed
            );
        } else {
            info!(
                "Finished {} item(s): {} submitted, {} skipped",
                self.records.len(),
                self.submitted(),
                self.skipped()
            );
        }
    }

    /// Prints one line per item to stdout
    pub fn print_table(&self) {
        if self.records.is_empty() {
            println!("{}", "No data managers were run.".yellow());
            return;
        }

        println!("{}", "Data manager runs:".bold());
        for record in &self.records {
            let status = match &record.status {
                ItemStatus::Skipped => "SKIPPED".dimmed(),
                ItemStatus::Completed(JobOutcome::Ok) => "OK".green(),
                ItemStatus::Completed(JobOutcome::Error) => "ERROR".red(),
                ItemStatus::SubmitFailed(_) => "FAILED".red().bold(),
            };
            let item = if record.item.is_empty() {
                "-".to_string()
            } else {
                record.item.clone()
            };
            println!(
                "  {:<8} {} [{}] ({}s)",
                status,
                record.job_id.cyan(),
                item,
                record.duration().num_seconds()
            );
            if let ItemStatus::SubmitFailed(message) = &record.status {
                println!("           {}", message.red());
            }
        }
    }
}
