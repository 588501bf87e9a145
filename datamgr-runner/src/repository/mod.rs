//! Repository layer
//!
//! Repositories are stateless adapters over the platform HTTP client. They
//! expose the narrow set of calls the runner needs without any business
//! logic.
//!
//! All repositories are trait-based to enable testing and mocking.

mod jobs;
mod tables;

// Re-export traits
pub use jobs::JobRepository;
pub use tables::TableRepository;

// Re-export implementations
pub use jobs::HttpJobRepository;
pub use tables::HttpTableRepository;
