use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the run document
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("config has no 'data_managers' list")]
    MissingDataManagers,

    #[error("data manager #{index} has no 'id'")]
    EmptyId { index: usize },

    #[error("data manager '{data_manager}': param entry #{index} must be a mapping")]
    InvalidParamEntry { data_manager: String, index: usize },

    #[error("data manager '{data_manager}': param '{key}' must be a scalar value")]
    InvalidParam { data_manager: String, key: String },

    #[error("data manager '{data_manager}': item #{index} must be a scalar value")]
    InvalidItem { data_manager: String, index: usize },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
