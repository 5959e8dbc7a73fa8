//! Retailer adapters
//!
//! An adapter turns one query into a list of normalized records. This
//! module contains:
//! - HTTP fetching with error classification
//! - HTML field extraction with selector fallback chains
//! - Pacing between successive page fetches
//! - The per-retailer adapters behind the [`SourceAdapter`] trait
//!
//! Adapters never fail for a single product page: those problems are
//! written into the record's `error`. An `Err` from [`SourceAdapter::fetch`]
//! means the whole task failed and is recorded as a task error.

mod fetcher;
mod pacing;
mod parser;
pub mod retailers;
mod search;

pub use fetcher::{build_http_client, fetch_page, FetchError};
pub use pacing::Pacer;
pub use parser::{
    classify_scoped_availability, extract_listing_links, extract_name, extract_product,
    first_attr, first_price, first_text, parse_price, ProductSelectors,
};
pub use retailers::{build_adapter, DockersAdapter, RetailerProfile};
pub use search::SearchAdapter;

use crate::config::ScraperConfig;
use crate::record::{QueryInput, QueryKind, Retailer, SourceRecord};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Task-level failures of an adapter
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("Search page {url} failed: {source}")]
    ListingFetch { url: String, source: FetchError },

    #[error("{retailer} expects a {expected}, got a {got}")]
    UnsupportedQuery {
        retailer: Retailer,
        expected: QueryKind,
        got: QueryKind,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unsupported option: {0}")]
    UnsupportedOption(String),

    #[error("Task exceeded its deadline of {0:?}")]
    DeadlineExceeded(Duration),
}

/// Knobs shared by all adapters of one run
#[derive(Debug, Clone)]
pub struct AdapterSettings {
    /// Maximum product pages fetched per search
    pub max_detail_fetches: usize,

    /// Pause between successive product page fetches
    pub pacing_delay: Duration,
}

impl Default for AdapterSettings {
    fn default() -> Self {
        Self {
            max_detail_fetches: 3,
            pacing_delay: Duration::from_secs(2),
        }
    }
}

impl From<&ScraperConfig> for AdapterSettings {
    fn from(config: &ScraperConfig) -> Self {
        Self {
            max_detail_fetches: config.max_detail_fetches,
            pacing_delay: config.pacing_delay(),
        }
    }
}

/// A retail source that can be queried for product records
///
/// Implementations must be cheap to share across tasks; the orchestrator
/// holds them behind `Arc` and calls `fetch` from a spawned task.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// The retailer this adapter queries
    fn retailer(&self) -> Retailer;

    /// Fetches and normalizes records for one query
    ///
    /// Records come back in the order the retailer listed them.
    async fn fetch(&self, query: &QueryInput) -> Result<Vec<SourceRecord>, AdapterError>;
}

/// Rejects a query whose kind this retailer cannot handle
pub(crate) fn expect_kind(retailer: Retailer, query: &QueryInput) -> Result<(), AdapterError> {
    let expected = retailer.query_kind();
    if query.kind() == expected {
        Ok(())
    } else {
        Err(AdapterError::UnsupportedQuery {
            retailer,
            expected,
            got: query.kind(),
        })
    }
}
