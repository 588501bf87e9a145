//! Scheduler layer for the runner
//!
//! This layer walks the run document in order and drives each
//! (data manager, item) pair through check, run, wait and reload.

pub mod orchestrator;

pub use orchestrator::Orchestrator;
