//! Core domain types
//!
//! This module contains the core domain structures shared between the HTTP
//! client (which decodes them from the remote platform) and the runner
//! (which drives data manager jobs with them).

pub mod dataset;
pub mod job;
pub mod table;
