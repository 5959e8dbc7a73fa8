//! Output module for reporting and persisting results
//!
//! This module handles:
//! - Rendering the console price report
//! - Saving and reloading results as JSON
//! - Generating markdown summaries
//! - Deriving run statistics

mod json;
mod markdown;
mod report;
pub mod stats;
mod traits;

pub use json::{default_results_filename, load_results, save_results, JsonOutput};
pub use markdown::{format_markdown_summary, generate_markdown_summary, MarkdownOutput};
pub use report::{format_price, format_report, print_report};
pub use stats::{print_statistics, RunStatistics};
pub use traits::{OutputError, OutputHandler, OutputResult};
