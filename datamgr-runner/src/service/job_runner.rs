//! Job runner service
//!
//! Submits one data manager run and blocks until the platform reports every
//! output dataset in a terminal state. There is no timeout: data manager
//! jobs can legitimately take hours and a stuck job is left to the operator.

use async_trait::async_trait;
use datamgr_client::{ClientError, RunToolResponse};
use datamgr_core::domain::job::{JobOutcome, ResolvedInputs};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::repository::JobRepository;

/// Handle of a submitted data manager run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub tool_id: String,
    /// Output datasets whose states decide the outcome
    pub output_ids: Vec<String>,
    /// Remote jobs created by the submission
    pub job_ids: Vec<String>,
}

impl Submission {
    fn from_response(tool_id: &str, response: RunToolResponse) -> Self {
        Self {
            tool_id: tool_id.to_string(),
            output_ids: response.output_ids(),
            job_ids: response.jobs.into_iter().map(|j| j.id).collect(),
        }
    }
}

/// Service trait for running data manager jobs
#[async_trait]
pub trait JobRunnerService: Send + Sync {
    /// Submits a data manager run
    async fn submit(&self, tool_id: &str, inputs: &ResolvedInputs)
    -> Result<Submission, ClientError>;

    /// Waits until every output dataset reaches `ok` or `error`
    ///
    /// Returns `Error` if any output ended in `error`. A terminal `error` is
    /// an outcome, not a failure of this call: the caller moves on.
    async fn wait(&self, submission: &Submission) -> JobOutcome;
}

/// JobRunnerService that polls output dataset states at a fixed interval
pub struct PollingJobRunner {
    jobs: Arc<dyn JobRepository>,
    poll_interval: Duration,
}

impl PollingJobRunner {
    pub fn new(jobs: Arc<dyn JobRepository>, poll_interval: Duration) -> Self {
        Self {
            jobs,
            poll_interval,
        }
    }
}

#[async_trait]
impl JobRunnerService for PollingJobRunner {
    async fn submit(
        &self,
        tool_id: &str,
        inputs: &ResolvedInputs,
    ) -> Result<Submission, ClientError> {
        let response = self.jobs.submit_job(tool_id, inputs).await?;
        let submission = Submission::from_response(tool_id, response);

        debug!(
            "Submitted {}: job(s) {:?}, output(s) {:?}",
            tool_id, submission.job_ids, submission.output_ids
        );
        Ok(submission)
    }

    async fn wait(&self, submission: &Submission) -> JobOutcome {
        if submission.output_ids.is_empty() {
            warn!(
                "Data manager {} produced no output datasets to wait on",
                submission.tool_id
            );
            return JobOutcome::Error;
        }

        let mut pending: Vec<&str> = submission.output_ids.iter().map(String::as_str).collect();
        let mut outcome = JobOutcome::Ok;

        loop {
            let mut still_pending = Vec::new();

            for dataset_id in pending {
                match self.jobs.dataset_state(dataset_id).await {
                    Ok(state) => match state.outcome() {
                        Some(JobOutcome::Ok) => debug!("Dataset {} is ok", dataset_id),
                        Some(JobOutcome::Error) => {
                            warn!("Dataset {} ended in error state", dataset_id);
                            outcome = JobOutcome::Error;
                        }
                        None => {
                            debug!("Dataset {} is {}", dataset_id, state);
                            still_pending.push(dataset_id);
                        }
                    },
                    Err(e) => {
                        warn!("Failed to get state of dataset {}: {}", dataset_id, e);
                        still_pending.push(dataset_id);
                    }
                }
            }

            if still_pending.is_empty() {
                return outcome;
            }

            info!(
                "Data manager still running ({} of {} output(s) pending)",
                still_pending.len(),
                submission.output_ids.len()
            );
            pending = still_pending;
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
