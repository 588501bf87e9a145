//! Data Transfer Objects
//!
//! Request and response bodies exchanged with the remote platform API.

pub mod auth;
pub mod dataset;
pub mod table;
pub mod tool;
