//! Data manager job domain types

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Concrete tool inputs for one (job, item) pair
///
/// Insertion ordered. Inserting an existing key replaces its value in place,
/// so later duplicate parameter declarations win.
pub type ResolvedInputs = IndexMap<String, String>;

/// One data manager declared in the run document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSpec {
    /// Remote tool identifier of the data manager
    pub id: String,

    /// Items to instantiate the job for, in declaration order
    ///
    /// Never empty: a job declared without items carries a single `""`.
    pub items: Vec<String>,

    /// Parameter templates in declaration order (keys may repeat)
    pub params: Vec<(String, String)>,

    /// Lookup tables checked before running and reloaded afterwards
    pub reload_targets: Vec<String>,
}

impl JobSpec {
    /// Creates a job spec that runs once with no parameters and no tables
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            items: vec![String::new()],
            params: Vec::new(),
            reload_targets: Vec::new(),
        }
    }

    /// Sets the items, falling back to a single empty item when none are given
    pub fn with_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        self.items = if items.is_empty() {
            vec![String::new()]
        } else {
            items
        };
        self
    }

    /// Appends a parameter template
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Appends a lookup table to check and reload
    pub fn with_reload_target(mut self, table: impl Into<String>) -> Self {
        self.reload_targets.push(table.into());
        self
    }
}

/// Terminal outcome of a submitted data manager job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobOutcome {
    Ok,
    Error,
}

impl JobOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, JobOutcome::Ok)
    }
}

impl std::fmt::Display for JobOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobOutcome::Ok => write!(f, "ok"),
            JobOutcome::Error => write!(f, "error"),
        }
    }
}
