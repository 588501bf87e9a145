//! In-memory platform used by the service and scheduler tests
//!
//! Models the one behavior the runner relies on: rows written by a finished
//! job stay invisible to table queries until the table is reloaded.

use async_trait::async_trait;
use datamgr_client::{ClientError, Result, RunToolResponse};
use datamgr_core::domain::dataset::DatasetState;
use datamgr_core::domain::job::ResolvedInputs;
use datamgr_core::domain::table::{TableSnapshot, VALUE_COLUMN};
use datamgr_core::dto::tool::OutputDataset;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use tokio::time::Instant;

use crate::repository::{JobRepository, TableRepository};

/// Something the runner asked the platform to do
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Describe(String),
    Submit { tool: String, inputs: ResolvedInputs },
    Poll(String),
    Reload { table: String, at: Instant },
}

/// A table row a tool adds when it finishes successfully
#[derive(Debug, Clone)]
struct Effect {
    table: String,
    input_key: String,
}

#[derive(Debug)]
struct Dataset {
    tool: String,
    inputs: ResolvedInputs,
    polls_left: usize,
    finished: bool,
}

#[derive(Debug, Default)]
struct PlatformState {
    visible: HashMap<String, TableSnapshot>,
    staged: HashMap<String, TableSnapshot>,
    effects: HashMap<String, Vec<Effect>>,
    outcomes: HashMap<String, DatasetState>,
    no_outputs: HashSet<String>,
    failing_submits: HashSet<String>,
    failing_reloads: HashSet<String>,
    pending_polls: usize,
    datasets: HashMap<String, Dataset>,
    events: Vec<Event>,
    next_id: usize,
}

#[derive(Debug, Default)]
pub struct FakePlatform {
    state: Mutex<PlatformState>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table that is already loaded
    pub fn with_table(self, name: &str, columns: &[&str], rows: &[&[&str]]) -> Self {
        let snapshot = TableSnapshot {
            name: name.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|f| f.to_string()).collect())
                .collect(),
        };
        {
            let mut state = self.state.lock().unwrap();
            state.visible.insert(name.to_string(), snapshot.clone());
            state.staged.insert(name.to_string(), snapshot);
        }
        self
    }

    /// On success, `tool` writes its `input_key` input into `table`'s value column
    pub fn with_effect(self, tool: &str, table: &str, input_key: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .effects
            .entry(tool.to_string())
            .or_default()
            .push(Effect {
                table: table.to_string(),
                input_key: input_key.to_string(),
            });
        self
    }

    /// Terminal state the outputs of `tool` end in (default `ok`)
    pub fn with_outcome(self, tool: &str, state: DatasetState) -> Self {
        self.state
            .lock()
            .unwrap()
            .outcomes
            .insert(tool.to_string(), state);
        self
    }

    /// Number of polls each dataset answers `running` before finishing
    pub fn with_pending_polls(self, polls: usize) -> Self {
        self.state.lock().unwrap().pending_polls = polls;
        self
    }

    pub fn with_failing_submit(self, tool: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .failing_submits
            .insert(tool.to_string());
        self
    }

    pub fn with_failing_reload(self, table: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .failing_reloads
            .insert(table.to_string());
        self
    }

    /// Submissions of `tool` return no output datasets
    pub fn with_no_outputs(self, tool: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .no_outputs
            .insert(tool.to_string());
        self
    }

    pub fn events(&self) -> Vec<Event> {
        self.state.lock().unwrap().events.clone()
    }

    pub fn submissions(&self) -> Vec<(String, ResolvedInputs)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Submit { tool, inputs } => Some((tool, inputs)),
                _ => None,
            })
            .collect()
    }

    pub fn reloads(&self) -> Vec<(String, Instant)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Reload { table, at } => Some((table, at)),
                _ => None,
            })
            .collect()
    }

    pub fn polls(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, Event::Poll(_)))
            .count()
    }

    pub fn clear_events(&self) {
        self.state.lock().unwrap().events.clear();
    }

    /// Rows currently visible to table queries
    pub fn visible_rows(&self, table: &str) -> Vec<Vec<String>> {
        self.state
            .lock()
            .unwrap()
            .visible
            .get(table)
            .map(|t| t.rows.clone())
            .unwrap_or_default()
    }
}

impl PlatformState {
    fn apply_effects(&mut self, tool: &str, inputs: &ResolvedInputs) {
        let effects = self.effects.get(tool).cloned().unwrap_or_default();
        for effect in effects {
            let Some(table) = self.staged.get_mut(&effect.table) else {
                continue;
            };
            let value = inputs.get(&effect.input_key).cloned().unwrap_or_default();
            let row = table
                .columns
                .iter()
                .map(|c| if c == VALUE_COLUMN { value.clone() } else { String::new() })
                .collect();
            table.rows.push(row);
        }
    }
}

#[async_trait]
impl JobRepository for FakePlatform {
    async fn submit_job(&self, tool_id: &str, inputs: &ResolvedInputs) -> Result<RunToolResponse> {
        let mut state = self.state.lock().unwrap();
        state.events.push(Event::Submit {
            tool: tool_id.to_string(),
            inputs: inputs.clone(),
        });

        if state.failing_submits.contains(tool_id) {
            return Err(ClientError::api_error(400, "Tool request failed"));
        }
        if state.no_outputs.contains(tool_id) {
            return Ok(RunToolResponse {
                outputs: vec![],
                jobs: vec![],
            });
        }

        state.next_id += 1;
        let id = format!("dataset-{}", state.next_id);
        let polls_left = state.pending_polls;
        state.datasets.insert(
            id.clone(),
            Dataset {
                tool: tool_id.to_string(),
                inputs: inputs.clone(),
                polls_left,
                finished: false,
            },
        );

        Ok(RunToolResponse {
            outputs: vec![OutputDataset {
                id,
                name: None,
                state: Some(DatasetState::Queued),
            }],
            jobs: vec![],
        })
    }

    async fn dataset_state(&self, dataset_id: &str) -> Result<DatasetState> {
        let mut state = self.state.lock().unwrap();
        state.events.push(Event::Poll(dataset_id.to_string()));

        let Some(dataset) = state.datasets.get_mut(dataset_id) else {
            return Err(ClientError::api_error(404, "No such dataset"));
        };
        if dataset.polls_left > 0 {
            dataset.polls_left -= 1;
            return Ok(DatasetState::Running);
        }

        let tool = dataset.tool.clone();
        let inputs = dataset.inputs.clone();
        let first_completion = !dataset.finished;
        dataset.finished = true;

        let outcome = state
            .outcomes
            .get(&tool)
            .copied()
            .unwrap_or(DatasetState::Ok);
        if outcome == DatasetState::Ok && first_completion {
            state.apply_effects(&tool, &inputs);
        }
        Ok(outcome)
    }
}

#[async_trait]
impl TableRepository for FakePlatform {
    async fn describe_table(&self, table_name: &str) -> Result<TableSnapshot> {
        let mut state = self.state.lock().unwrap();
        state.events.push(Event::Describe(table_name.to_string()));

        state
            .visible
            .get(table_name)
            .cloned()
            .ok_or_else(|| ClientError::api_error(404, "No such data table"))
    }

    async fn reload_table(&self, table_name: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.events.push(Event::Reload {
            table: table_name.to_string(),
            at: Instant::now(),
        });

        if state.failing_reloads.contains(table_name) {
            return Err(ClientError::api_error(500, "Reload failed"));
        }
        if let Some(staged) = state.staged.get(table_name).cloned() {
            state.visible.insert(table_name.to_string(), staged);
        }
        Ok(())
    }
}
