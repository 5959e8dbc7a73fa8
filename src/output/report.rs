//! Console report of an aggregate result

use crate::aggregate::{discount_percentage, lowest_price, total_count, AggregateResult};
use crate::record::SourceRecord;
use std::fmt::Write;

const RULE_WIDTH: usize = 60;

/// Renders the full console report
///
/// The header echoes each retailer's query. The body lists each
/// retailer's records in source order with name, price, discount,
/// availability, any error and the URL, then the task errors, the total
/// product count and the best price line.
pub fn format_report(result: &AggregateResult) -> String {
    let mut out = String::new();
    let rule = "=".repeat(RULE_WIDTH);

    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "PRICE COMPARISON RESULTS");
    let _ = writeln!(
        out,
        "Scraped at: {}",
        result.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    );
    for (retailer, query) in &result.query {
        let _ = writeln!(out, "{} {}: {}", retailer.display_name(), query.kind(), query);
    }
    let _ = writeln!(out, "{}", rule);

    for (retailer, records) in &result.by_source {
        let _ = writeln!(out);
        let _ = writeln!(out, "{} ({} products)", retailer.display_name(), records.len());
        let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));

        if records.is_empty() {
            let _ = writeln!(out, "  No products found");
        }
        for (index, record) in records.iter().enumerate() {
            write_record(&mut out, index + 1, record);
        }
    }

    if !result.task_errors.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "ERRORS");
        let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
        for task_error in &result.task_errors {
            let _ = writeln!(
                out,
                "  {}: {}",
                task_error.retailer.display_name(),
                task_error.message
            );
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "Total products found: {}", total_count(result));
    match lowest_price(result) {
        Some(best) => {
            let _ = writeln!(
                out,
                "Best price: {} at {} - {}",
                format_price(best.price),
                best.retailer.display_name(),
                best.name
            );
        }
        None => {
            let _ = writeln!(out, "Best price: no priced products");
        }
    }
    let _ = writeln!(out, "{}", rule);

    out
}

/// Prints the report to stdout
pub fn print_report(result: &AggregateResult) {
    print!("{}", format_report(result));
}

fn write_record(out: &mut String, index: usize, record: &SourceRecord) {
    let _ = writeln!(out, "{}. {}", index, record.name);

    let mut price_line = format!("   Price: {}", format_price(record.price));
    if let (Some(original), Some(percent)) = (record.original_price, discount_percentage(record)) {
        let _ = write!(price_line, " (was ${:.2}, save {:.0}%)", original, percent);
    }
    let _ = writeln!(out, "{}", price_line);

    let _ = writeln!(out, "   Availability: {}", record.availability);
    if let Some(error) = &record.error {
        let _ = writeln!(out, "   Error: {}", error);
    }
    let _ = writeln!(out, "   URL: {}", record.url);
}

/// Formats an optional amount as `$12.34`, or `N/A`
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(amount) => format!("${:.2}", amount),
        None => "N/A".to_string(),
    }
}
