//! Service layer
//!
//! Services contain the business logic of a run. They drive the platform
//! through the repositories:
//! - Existence checks decide whether a job's data is already provisioned
//! - The job runner submits a data manager and waits for it to finish
//! - The reload service refreshes lookup tables after a job
//!
//! All services are trait-based to enable testing and dependency injection.

mod existence;
mod job_runner;
mod reload;

// Re-export traits
pub use existence::ExistenceService;
pub use job_runner::JobRunnerService;
pub use reload::ReloadService;

// Re-export implementations
pub use existence::StandardExistenceService;
pub use job_runner::PollingJobRunner;
pub use reload::StandardReloadService;
