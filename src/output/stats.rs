//! Run statistics derived from an aggregate result

use crate::aggregate::AggregateResult;
use crate::record::Retailer;
use std::collections::BTreeMap;

/// Counts describing one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStatistics {
    /// Record count per retailer, in source order
    pub records_by_source: BTreeMap<Retailer, usize>,

    /// All records, including ones carrying an error
    pub total_records: usize,

    /// Records with a price
    pub priced_records: usize,

    /// Records whose original price exceeds the price
    pub discounted_records: usize,

    /// Records carrying an error
    pub record_errors: usize,

    /// Retailers whose whole task failed
    pub task_errors: usize,
}

impl RunStatistics {
    /// Tallies a finished result
    pub fn from_result(result: &AggregateResult) -> Self {
        let mut stats = Self {
            task_errors: result.task_errors.len(),
            ..Self::default()
        };

        for (retailer, records) in &result.by_source {
            stats.records_by_source.insert(*retailer, records.len());
            stats.total_records += records.len();
            for record in records {
                if record.price.is_some() {
                    stats.priced_records += 1;
                }
                if record.is_discounted() {
                    stats.discounted_records += 1;
                }
                if record.has_error() {
                    stats.record_errors += 1;
                }
            }
        }

        stats
    }

    /// Share of records that carry a price, as a percentage
    pub fn priced_rate(&self) -> f64 {
        if self.total_records == 0 {
            return 0.0;
        }
        (self.priced_records as f64 / self.total_records as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &RunStatistics) {
    println!("=== Run Statistics ===\n");

    println!("Records by Source:");
    for (retailer, count) in &stats.records_by_source {
        println!("  {}: {}", retailer.display_name(), count);
    }
    println!();

    println!("Overview:");
    println!("  Total records: {}", stats.total_records);
    println!(
        "  Priced: {} ({:.1}%)",
        stats.priced_records,
        stats.priced_rate()
    );
    println!("  Discounted: {}", stats.discounted_records);
    println!("  Record errors: {}", stats.record_errors);
    println!("  Task errors: {}", stats.task_errors);
}
