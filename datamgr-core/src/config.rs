//! Run document loading
//!
//! The run document is YAML with a top-level `data_managers` list:
//!
//! ```yaml
//! data_managers:
//!   - id: toolshed.example.org/repos/devteam/data_manager_fetch_genome/1.0
//!     items: [hg19, hg38]
//!     params:
//!       - dbkey_source|dbkey: "{{ item }}"
//!       - sequence_name: "{{ item }}"
//!     data_table_reload:
//!       - all_fasta
//!       - __dbkeys__
//! ```
//!
//! It is read once at startup into an immutable [`RunConfig`].

use std::path::Path;

use serde::Deserialize;
use serde_yaml::Value;

use crate::domain::job::JobSpec;
use crate::error::{ConfigError, Result};

/// Ordered list of data managers to run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunConfig {
    pub data_managers: Vec<JobSpec>,
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    data_managers: Option<Vec<RawDataManager>>,
}

#[derive(Debug, Deserialize)]
struct RawDataManager {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    items: Option<Vec<Value>>,
    #[serde(default)]
    params: Option<Vec<Value>>,
    #[serde(default)]
    data_table_reload: Option<Vec<String>>,
}

impl RunConfig {
    /// Reads and validates the run document at `path`
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&raw)
    }

    /// Parses and validates a run document
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        let doc: RawDocument = serde_yaml::from_str(raw)?;
        let raw_managers = doc
            .data_managers
            .ok_or(ConfigError::MissingDataManagers)?;

        let data_managers = raw_managers
            .into_iter()
            .enumerate()
            .map(|(index, dm)| dm.into_job_spec(index))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { data_managers })
    }

    pub fn len(&self) -> usize {
        self.data_managers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data_managers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JobSpec> {
        self.data_managers.iter()
    }

    /// Total number of (job, item) pairs the run will go through
    pub fn item_count(&self) -> usize {
        self.data_managers.iter().map(|dm| dm.items.len()).sum()
    }
}

impl RawDataManager {
    fn into_job_spec(self, index: usize) -> Result<JobSpec> {
        let id = self
            .id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or(ConfigError::EmptyId { index })?;

        let items = self
            .items
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(i, value)| {
                scalar_to_string(value).ok_or_else(|| ConfigError::InvalidItem {
                    data_manager: id.clone(),
                    index: i,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut params = Vec::new();
        for (i, entry) in self.params.unwrap_or_default().iter().enumerate() {
            let Value::Mapping(mapping) = entry else {
                return Err(ConfigError::InvalidParamEntry {
                    data_manager: id.clone(),
                    index: i,
                });
            };
            for (key, value) in mapping {
                let key = scalar_to_string(key).ok_or_else(|| ConfigError::InvalidParamEntry {
                    data_manager: id.clone(),
                    index: i,
                })?;
                let value = scalar_to_string(value).ok_or_else(|| ConfigError::InvalidParam {
                    data_manager: id.clone(),
                    key: key.clone(),
                })?;
                params.push((key, value));
            }
        }

        let mut spec = JobSpec::new(id).with_items(items);
        spec.params = params;
        spec.reload_targets = self.data_table_reload.unwrap_or_default();
        Ok(spec)
    }
}

/// Renders a YAML scalar the way it reads in the document; `None` for collections
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
    }
}
