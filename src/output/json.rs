//! JSON persistence of aggregate results
//!
//! The document mirrors [`AggregateResult`] field for field and reloads to
//! an equal value, prices included.

use crate::aggregate::AggregateResult;
use crate::output::traits::{OutputHandler, OutputResult};
use chrono::{DateTime, Utc};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes a result as pretty-printed JSON
///
/// # Arguments
///
/// * `result` - The result to persist
/// * `path` - Destination file; parent directories are created
///
/// # Returns
///
/// * `Ok(())` - File written
/// * `Err(OutputError)` - Serialization or IO failed
pub fn save_results(result: &AggregateResult, path: &Path) -> OutputResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, result)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    tracing::info!("Results saved to {}", path.display());
    Ok(())
}

/// Reads a result previously written by [`save_results`]
pub fn load_results(path: &Path) -> OutputResult<AggregateResult> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// File name for a run started at `timestamp`: `prices_YYYYMMDD_HHMMSS.json`
pub fn default_results_filename(timestamp: &DateTime<Utc>) -> String {
    format!("prices_{}.json", timestamp.format("%Y%m%d_%H%M%S"))
}

/// Writes results into a directory, or to a fixed file when one is given
#[derive(Debug, Clone)]
pub struct JsonOutput {
    results_dir: PathBuf,
    file_override: Option<PathBuf>,
}

impl JsonOutput {
    pub fn new(results_dir: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: results_dir.into(),
            file_override: None,
        }
    }

    /// Writes to `path` instead of a timestamped file
    pub fn with_file(mut self, path: Option<PathBuf>) -> Self {
        self.file_override = path;
        self
    }

    /// Destination for a given result
    pub fn path_for(&self, result: &AggregateResult) -> PathBuf {
        match &self.file_override {
            Some(path) => path.clone(),
            None => self
                .results_dir
                .join(default_results_filename(&result.timestamp)),
        }
    }
}

impl OutputHandler for JsonOutput {
    fn name(&self) -> &'static str {
        "json"
    }

    fn write(&self, result: &AggregateResult) -> OutputResult<PathBuf> {
        let path = self.path_for(result);
        save_results(result, &path)?;
        Ok(path)
    }
}
