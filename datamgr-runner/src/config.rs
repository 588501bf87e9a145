//! Runner configuration
//!
//! Process-level settings: where the platform lives, how to authenticate,
//! which run document to execute and the timing of the polling and reload
//! loops.

use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;

/// Default platform URL when none is given
pub const DEFAULT_URL: &str = "http://localhost";

/// How long to wait between dataset state polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Pause after each lookup table reload call
pub const DEFAULT_RELOAD_DELAY: Duration = Duration::from_secs(5);

/// How a job with several reload tables decides it has already run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SkipPolicy {
    /// The last declared table's answer overwrites the earlier ones
    #[default]
    LastTableWins,
    /// Every declared table must already hold every input value
    AllTables,
}

impl std::fmt::Display for SkipPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipPolicy::LastTableWins => write!(f, "last-table-wins"),
            SkipPolicy::AllTables => write!(f, "all-tables"),
        }
    }
}

/// Credentials for the remote platform
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    ApiKey(String),
    UserPassword { user: String, password: String },
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::ApiKey(_) => write!(f, "ApiKey(***)"),
            Credentials::UserPassword { user, .. } => {
                write!(f, "UserPassword {{ user: {:?}, password: *** }}", user)
            }
        }
    }
}

impl Credentials {
    /// Picks the credential form from the command-line options
    pub fn from_options(
        api_key: Option<String>,
        user: Option<String>,
        password: Option<String>,
    ) -> anyhow::Result<Self> {
        match (api_key, user, password) {
            (Some(key), None, None) => Ok(Credentials::ApiKey(key)),
            (None, Some(user), Some(password)) => Ok(Credentials::UserPassword { user, password }),
            (Some(_), _, _) => anyhow::bail!("use either an API key or user/password, not both"),
            (None, Some(_), None) | (None, None, Some(_)) => {
                anyhow::bail!("user and password must be given together")
            }
            (None, None, None) => anyhow::bail!("an API key or user/password is required"),
        }
    }
}

/// Runner configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Platform base URL (e.g., "https://usegalaxy.example.org")
    pub galaxy_url: String,

    pub credentials: Credentials,

    /// Path of the run document listing the data managers
    pub config_path: PathBuf,

    /// How often to poll output dataset states while a job runs
    pub poll_interval: Duration,

    /// Pause after each lookup table reload call
    pub reload_delay: Duration,

    pub skip_policy: SkipPolicy,
}

impl Config {
    /// Creates a new configuration with default timings
    pub fn new(galaxy_url: String, credentials: Credentials, config_path: PathBuf) -> Self {
        Self {
            galaxy_url,
            credentials,
            config_path,
            poll_interval: DEFAULT_POLL_INTERVAL,
            reload_delay: DEFAULT_RELOAD_DELAY,
            skip_policy: SkipPolicy::default(),
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.galaxy_url.is_empty() {
            anyhow::bail!("galaxy_url cannot be empty");
        }

        if !self.galaxy_url.starts_with("http://") && !self.galaxy_url.starts_with("https://") {
            anyhow::bail!("galaxy_url must start with http:// or https://");
        }

        match &self.credentials {
            Credentials::ApiKey(key) if key.is_empty() => anyhow::bail!("API key cannot be empty"),
            Credentials::UserPassword { user, .. } if user.is_empty() => {
                anyhow::bail!("user cannot be empty")
            }
            _ => {}
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        Ok(())
    }
}
