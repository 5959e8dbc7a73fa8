//! Khaki-Scout: concurrent price comparison across retailers
//!
//! This crate queries several retail websites for the same apparel line,
//! normalizes what each one returns into a common record shape, runs the
//! retailers concurrently with per-source failure isolation, and ranks the
//! combined results by price.

pub mod adapter;
pub mod aggregate;
pub mod config;
pub mod orchestrator;
pub mod output;
pub mod record;

use thiserror::Error;

/// Main error type for Khaki-Scout operations
///
/// Scraping failures never surface here: they are recorded inside the
/// aggregate result. These variants cover setting up a run.
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Adapter setup error: {0}")]
    Adapter(#[from] adapter::AdapterError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Unknown retailer: {0}")]
    UnknownRetailer(String),
}

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use aggregate::{AggregateResult, TaskError};
pub use config::Config;
pub use orchestrator::Orchestrator;
pub use record::{Availability, QueryInput, Retailer, SourceRecord};
