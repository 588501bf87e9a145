//! Datamgr Core
//!
//! Core types and abstractions for provisioning reference data with data managers.
//!
//! This crate contains:
//! - Domain types: Data manager jobs, lookup tables, dataset states
//! - DTOs: Request and response bodies of the remote platform API
//! - Configuration: Loading and validating the run document
//! - Templates: Substituting per-item values into job parameters

pub mod config;
pub mod domain;
pub mod dto;
pub mod error;
pub mod template;

pub use config::RunConfig;
pub use error::ConfigError;
