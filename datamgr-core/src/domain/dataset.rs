//! Dataset domain types
//!
//! Output datasets are how a submitted data manager job is observed: the job
//! is finished once every one of its outputs has reached a terminal state.

use serde::{Deserialize, Serialize};

use crate::domain::job::JobOutcome;

/// State of a dataset as reported by the remote platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetState {
    New,
    Upload,
    Queued,
    Running,
    Paused,
    SettingMetadata,
    Deferred,
    Empty,
    Discarded,
    FailedMetadata,
    Ok,
    Error,
    #[serde(other)]
    Unknown,
}

impl DatasetState {
    /// Whether polling can stop for this dataset
    ///
    /// Only `ok` and `error` end a wait; every other state keeps it going.
    pub fn is_terminal(&self) -> bool {
        matches!(self, DatasetState::Ok | DatasetState::Error)
    }

    /// Outcome for a terminal state, `None` while still pending
    pub fn outcome(&self) -> Option<JobOutcome> {
        match self {
            DatasetState::Ok => Some(JobOutcome::Ok),
            DatasetState::Error => Some(JobOutcome::Error),
            _ => None,
        }
    }
}

impl std::fmt::Display for DatasetState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DatasetState::New => "new",
            DatasetState::Upload => "upload",
            DatasetState::Queued => "queued",
            DatasetState::Running => "running",
            DatasetState::Paused => "paused",
            DatasetState::SettingMetadata => "setting_metadata",
            DatasetState::Deferred => "deferred",
            DatasetState::Empty => "empty",
            DatasetState::Discarded => "discarded",
            DatasetState::FailedMetadata => "failed_metadata",
            DatasetState::Ok => "ok",
            DatasetState::Error => "error",
            DatasetState::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}
