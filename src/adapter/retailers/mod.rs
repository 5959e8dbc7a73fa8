//! Per-retailer knowledge
//!
//! Listing retailers (Amazon, JCPenney, Macy's) share one adapter and
//! differ only in their [`RetailerProfile`]. Dockers is queried by product
//! URL and has its own adapter because its price block needs custom
//! handling.

mod amazon;
mod dockers;
mod jcpenney;
mod macys;

pub use dockers::{extract_dockers_product, DockersAdapter};

use crate::adapter::parser::ProductSelectors;
use crate::adapter::{AdapterError, AdapterSettings, SearchAdapter, SourceAdapter};
use crate::record::Retailer;
use reqwest::Client;
use std::sync::Arc;
use url::Url;

/// Everything needed to search one listing retailer
#[derive(Debug)]
pub struct RetailerProfile {
    pub retailer: Retailer,

    /// Site root used to build the search URL and resolve relative links
    pub base_url: &'static str,

    /// Path of the search endpoint, relative to the site root
    pub search_path: &'static str,

    /// Query parameter carrying the search term
    pub search_param: &'static str,

    /// Selectors for product links on the search page, tried in order
    pub link_selectors: &'static [&'static str],

    /// Selectors for the fields of a product page
    pub product: ProductSelectors,
}

/// Returns the search profile of a listing retailer
pub fn search_profile(retailer: Retailer) -> Option<&'static RetailerProfile> {
    match retailer {
        Retailer::Amazon => Some(&amazon::PROFILE),
        Retailer::JcPenney => Some(&jcpenney::PROFILE),
        Retailer::Macys => Some(&macys::PROFILE),
        Retailer::Dockers => None,
    }
}

/// Builds the adapter for a retailer
///
/// # Arguments
///
/// * `retailer` - Which retailer to build for
/// * `client` - Shared HTTP client
/// * `settings` - Fan-out cap and pacing
/// * `base_url` - Optional override of the retailer's site root
pub fn build_adapter(
    retailer: Retailer,
    client: Client,
    settings: &AdapterSettings,
    base_url: Option<&str>,
) -> Result<Arc<dyn SourceAdapter>, AdapterError> {
    match search_profile(retailer) {
        Some(profile) => {
            let root = base_url.unwrap_or(profile.base_url);
            let root = Url::parse(root)
                .map_err(|e| AdapterError::InvalidUrl(format!("{}: {}", root, e)))?;
            Ok(Arc::new(SearchAdapter::new(
                client,
                profile,
                root,
                settings.clone(),
            )))
        }
        None => match base_url {
            Some(root) => Err(AdapterError::UnsupportedOption(format!(
                "{} takes product URLs and has no base-url to override (got {})",
                retailer.key(),
                root
            ))),
            None => Ok(Arc::new(DockersAdapter::new(client, settings.pacing_delay))),
        },
    }
}
