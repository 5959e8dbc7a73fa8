//! Output handler trait and errors
//!
//! Every writer takes a finished [`AggregateResult`] and persists it
//! somewhere, returning the path it wrote.

use crate::aggregate::AggregateResult;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for output handlers
///
/// Handlers are invoked once per run, after the orchestrator returns.
pub trait OutputHandler {
    /// Short label used in log lines
    fn name(&self) -> &'static str;

    /// Persists the result
    ///
    /// # Arguments
    ///
    /// * `result` - The finished aggregate result
    ///
    /// # Returns
    ///
    /// * `Ok(PathBuf)` - Where the output was written
    /// * `Err(OutputError)` - Writing failed
    fn write(&self, result: &AggregateResult) -> OutputResult<PathBuf>;
}
