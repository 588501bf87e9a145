//! Run Data Managers
//!
//! Provisions reference data on a remote analysis platform by running data
//! managers in a defined order with defined parameters.
//!
//! Architecture:
//! - Configuration: Command-line options and the YAML run document
//! - Repositories: HTTP communication with the platform (jobs, tables)
//! - Services: Existence checks, job submission and polling, table reloads
//! - Scheduler: The sequential check / run / wait / reload loop
//!
//! Lookup tables are reloaded after every job, so a data manager that
//! indexes a genome can run right after the one that fetched it.

mod config;
mod error;
mod report;
mod repository;
mod scheduler;
mod service;

#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use clap::Parser;
use datamgr_client::GalaxyClient;
use datamgr_core::RunConfig;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, Credentials, DEFAULT_URL, SkipPolicy};
use crate::repository::{HttpJobRepository, HttpTableRepository, JobRepository, TableRepository};
use crate::scheduler::Orchestrator;
use crate::service::{PollingJobRunner, StandardExistenceService, StandardReloadService};

#[derive(Parser, Debug)]
#[command(name = "run-data-managers")]
#[command(
    about = "Running data managers in a defined order with defined parameters",
    long_about = None
)]
struct Cli {
    /// Target platform URL
    #[arg(short, long, env = "GALAXY_URL", default_value = DEFAULT_URL)]
    galaxy: String,

    /// Admin user's API key
    #[arg(short, long, env = "GALAXY_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Admin user's email (with --password, instead of an API key)
    #[arg(short, long)]
    user: Option<String>,

    /// Admin user's password
    #[arg(short, long)]
    password: Option<String>,

    /// Path to the YAML config file with the list of data managers and data to install
    #[arg(long)]
    config: PathBuf,

    /// Print debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Seconds between output dataset state polls
    #[arg(long, default_value_t = 30)]
    poll_interval: u64,

    /// Seconds to pause after each lookup table reload call
    #[arg(long, default_value_t = 5)]
    reload_delay: u64,

    /// How jobs with several reload tables decide they already ran
    #[arg(long, value_enum, default_value_t = SkipPolicy::LastTableWins)]
    skip_policy: SkipPolicy,
}

impl Cli {
    fn into_config(self) -> Result<Config> {
        let credentials = Credentials::from_options(self.api_key, self.user, self.password)?;
        let mut config = Config::new(self.galaxy, credentials, self.config);
        config.poll_interval = Duration::from_secs(self.poll_interval);
        config.reload_delay = Duration::from_secs(self.reload_delay);
        config.skip_policy = self.skip_policy;
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    info!("Running data managers...");

    let config = cli.into_config().context("Invalid options")?;
    info!(
        "Loaded configuration: galaxy_url={}, config={}, skip_policy={}",
        config.galaxy_url,
        config.config_path.display(),
        config.skip_policy
    );

    let run_config = RunConfig::from_file(&config.config_path).with_context(|| {
        format!(
            "Failed to load data manager config {}",
            config.config_path.display()
        )
    })?;

    let client = Arc::new(connect(&config).await?);

    let jobs: Arc<dyn JobRepository> = Arc::new(HttpJobRepository::new(Arc::clone(&client)));
    let tables: Arc<dyn TableRepository> = Arc::new(HttpTableRepository::new(client));

    let orchestrator = Orchestrator::new(
        Arc::new(StandardExistenceService::new(
            Arc::clone(&tables),
            config.skip_policy,
        )),
        Arc::new(PollingJobRunner::new(jobs, config.poll_interval)),
        Arc::new(StandardReloadService::new(tables, config.reload_delay)),
    );

    let report = orchestrator
        .run(&run_config)
        .await
        .context("Data manager run aborted")?;

    report.log_summary();
    report.print_table();

    Ok(())
}

/// Initializes logging; `RUST_LOG` overrides the default filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "run_data_managers=debug,datamgr_client=debug"
    } else {
        "run_data_managers=info,datamgr_client=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Authenticates and verifies the platform is reachable before any job runs
async fn connect(config: &Config) -> Result<GalaxyClient> {
    let client = GalaxyClient::new(config.galaxy_url.clone());

    let client = match &config.credentials {
        Credentials::ApiKey(key) => client.with_api_key(key.clone()),
        Credentials::UserPassword { user, password } => {
            let key = client
                .authenticate(user, password)
                .await
                .with_context(|| format!("Failed to authenticate as {}", user))?;
            client.with_api_key(key)
        }
    };

    // Does not list genomes but the preconfigured dbkeys; any failure here
    // means a bad URL or bad credentials.
    let genomes = client
        .list_genomes()
        .await
        .with_context(|| format!("Failed to connect to {}", config.galaxy_url))?;
    info!("Number of possible dbkeys: {}", genomes.len());

    Ok(client)
}
