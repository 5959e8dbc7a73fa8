//! Markdown summary generation
//!
//! Renders the same data as the console report as a Markdown document:
//! a price-sorted comparison table, per-retailer sections and errors.

use crate::aggregate::{discount_percentage, lowest_price, price_comparison, AggregateResult};
use crate::output::report::format_price;
use crate::output::stats::RunStatistics;
use crate::output::traits::{OutputHandler, OutputResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes a markdown summary of a result
///
/// # Arguments
///
/// * `result` - The aggregate result
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(OutputError)` - Failed to write summary
pub fn generate_markdown_summary(result: &AggregateResult, output_path: &Path) -> OutputResult<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(output_path, format_markdown_summary(result))?;
    Ok(())
}

/// Formats a result as markdown
pub fn format_markdown_summary(result: &AggregateResult) -> String {
    let stats = RunStatistics::from_result(result);
    let mut md = String::new();

    md.push_str("# Khaki-Scout Price Summary\n\n");

    md.push_str("## Run Information\n\n");
    md.push_str(&format!(
        "- **Scraped**: {}\n",
        result.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    for (retailer, query) in &result.query {
        md.push_str(&format!(
            "- **{}** ({}): {}\n",
            retailer.display_name(),
            query.kind(),
            escape_cell(&query.to_string())
        ));
    }
    md.push('\n');

    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!("- **Total Products**: {}\n", stats.total_records));
    md.push_str(&format!("- **Priced**: {}\n", stats.priced_records));
    md.push_str(&format!("- **Discounted**: {}\n", stats.discounted_records));
    md.push_str(&format!("- **Record Errors**: {}\n", stats.record_errors));
    md.push_str(&format!("- **Task Errors**: {}\n", stats.task_errors));
    if let Some(best) = lowest_price(result) {
        md.push_str(&format!(
            "- **Best Price**: {} at {} ({})\n",
            format_price(best.price),
            best.retailer.display_name(),
            escape_cell(&best.name)
        ));
    }
    md.push('\n');

    let ranked = price_comparison(result);
    if !ranked.is_empty() {
        md.push_str("## Price Comparison\n\n");
        md.push_str("| Rank | Retailer | Product | Price | Discount | Availability |\n");
        md.push_str("|------|----------|---------|-------|----------|--------------|\n");
        for (rank, record) in ranked.iter().enumerate() {
            let discount = discount_percentage(record)
                .map(|p| format!("{:.2}%", p))
                .unwrap_or_else(|| "-".to_string());
            md.push_str(&format!(
                "| {} | {} | [{}]({}) | {} | {} | {} |\n",
                rank + 1,
                record.retailer.display_name(),
                escape_cell(&record.name),
                record.url,
                format_price(record.price),
                discount,
                record.availability
            ));
        }
        md.push('\n');
    }

    md.push_str("## By Retailer\n\n");
    for (retailer, records) in &result.by_source {
        md.push_str(&format!("### {}\n\n", retailer.display_name()));
        if records.is_empty() {
            md.push_str("No products found.\n\n");
            continue;
        }
        for record in records {
            md.push_str(&format!(
                "- [{}]({}): {}, {}",
                escape_cell(&record.name),
                record.url,
                format_price(record.price),
                record.availability
            ));
            if let Some(error) = &record.error {
                md.push_str(&format!(" (error: {})", escape_cell(error)));
            }
            md.push('\n');
        }
        md.push('\n');
    }

    if !result.task_errors.is_empty() {
        md.push_str("## Errors\n\n");
        md.push_str("| Retailer | Message |\n");
        md.push_str("|----------|---------|\n");
        for task_error in &result.task_errors {
            md.push_str(&format!(
                "| {} | {} |\n",
                task_error.retailer.display_name(),
                escape_cell(&task_error.message)
            ));
        }
        md.push('\n');
    }

    md
}

// Keeps table rows intact
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Writes the markdown summary to a fixed path
#[derive(Debug, Clone)]
pub struct MarkdownOutput {
    path: PathBuf,
}

impl MarkdownOutput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OutputHandler for MarkdownOutput {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn write(&self, result: &AggregateResult) -> OutputResult<PathBuf> {
        generate_markdown_summary(result, &self.path)?;
        Ok(self.path.clone())
    }
}
