//! Concurrent orchestration of retailer adapters
//!
//! The orchestrator fans one query per retailer out to that retailer's
//! adapter, runs them all as independent tokio tasks, and merges whatever
//! comes back into an [`AggregateResult`](crate::aggregate::AggregateResult).

mod coordinator;

pub use coordinator::{run_scrape, Orchestrator};
