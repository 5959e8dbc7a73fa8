use crate::record::{QueryInput, Retailer, SourceRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A retailer whose whole task failed before producing records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskError {
    pub retailer: Retailer,
    pub message: String,
}

/// Merged view produced by one orchestration run
///
/// Every queried retailer has a `by_source` entry, empty when its task
/// failed or found nothing. Within an entry, records keep the order the
/// adapter returned them. `by_source` iterates in [`Retailer`] order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub timestamp: DateTime<Utc>,
    pub query: BTreeMap<Retailer, QueryInput>,
    pub by_source: BTreeMap<Retailer, Vec<SourceRecord>>,
    pub task_errors: Vec<TaskError>,
}

impl AggregateResult {
    /// Starts a run: one empty entry per queried retailer
    pub(crate) fn new(query: BTreeMap<Retailer, QueryInput>) -> Self {
        let by_source = query.keys().map(|retailer| (*retailer, Vec::new())).collect();
        Self {
            timestamp: Utc::now(),
            query,
            by_source,
            task_errors: Vec::new(),
        }
    }

    /// Stores the records of a finished task
    pub(crate) fn record_success(&mut self, retailer: Retailer, records: Vec<SourceRecord>) {
        let slot = self.by_source.entry(retailer).or_default();
        debug_assert!(slot.is_empty(), "{} written twice", retailer);
        *slot = records;
    }

    /// Records a whole-task failure, leaving the retailer's entry empty
    pub(crate) fn record_task_error(&mut self, retailer: Retailer, message: impl Into<String>) {
        self.by_source.entry(retailer).or_default();
        self.task_errors.push(TaskError {
            retailer,
            message: message.into(),
        });
    }

    /// Records of one retailer; empty when it was not queried
    pub fn records(&self, retailer: Retailer) -> &[SourceRecord] {
        self.by_source
            .get(&retailer)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// All records in flatten order: retailer order, then adapter order
    pub fn iter_records(&self) -> impl Iterator<Item = &SourceRecord> {
        self.by_source.values().flatten()
    }

    /// The task error of a retailer, if its task failed
    pub fn task_error(&self, retailer: Retailer) -> Option<&TaskError> {
        self.task_errors.iter().find(|e| e.retailer == retailer)
    }

    /// True when no retailer produced a single record
    pub fn is_empty(&self) -> bool {
        self.by_source.values().all(Vec::is_empty)
    }
}
