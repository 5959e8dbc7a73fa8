//! Adapter for retailers queried through a search page

use crate::adapter::parser::{extract_listing_links, extract_product};
use crate::adapter::retailers::RetailerProfile;
use crate::adapter::{
    expect_kind, fetch_page, AdapterError, AdapterSettings, Pacer, SourceAdapter,
};
use crate::record::{QueryInput, Retailer, SourceRecord};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

/// Searches a listing retailer and scrapes the top product pages
///
/// Flow for one query:
/// 1. Fetch the search page (failure here fails the whole task)
/// 2. Collect deduplicated product links
/// 3. Fetch at most `max_detail_fetches` product pages, pausing between them
/// 4. Each product page becomes one record, failed pages included
pub struct SearchAdapter {
    client: Client,
    profile: &'static RetailerProfile,
    base_url: Url,
    settings: AdapterSettings,
}

impl SearchAdapter {
    pub fn new(
        client: Client,
        profile: &'static RetailerProfile,
        base_url: Url,
        settings: AdapterSettings,
    ) -> Self {
        Self {
            client,
            profile,
            base_url: as_directory(base_url),
            settings,
        }
    }

    /// Builds the search URL for a term, with proper query encoding
    pub fn search_url(&self, term: &str) -> Result<Url, AdapterError> {
        let mut url = self
            .base_url
            .join(self.profile.search_path)
            .map_err(|e| AdapterError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair(self.profile.search_param, term);
        Ok(url)
    }

    /// Scrapes one product page into a record, never failing
    async fn scrape_product(&self, url: &str) -> SourceRecord {
        let retailer = self.profile.retailer;
        tracing::info!("Scraping {}: {}", retailer, url);

        match fetch_page(&self.client, url).await {
            Ok(body) => {
                let record = extract_product(&body, retailer, &self.profile.product, url);
                tracing::info!("  ✓ {} - {:?}", record.name, record.price);
                record
            }
            Err(e) => {
                tracing::error!("  ✗ {}", e);
                SourceRecord::failed(retailer, url, e.to_string())
            }
        }
    }
}

#[async_trait]
impl SourceAdapter for SearchAdapter {
    fn retailer(&self) -> Retailer {
        self.profile.retailer
    }

    async fn fetch(&self, query: &QueryInput) -> Result<Vec<SourceRecord>, AdapterError> {
        expect_kind(self.profile.retailer, query)?;

        let term = query.search_term().unwrap_or_default();
        let search_url = self.search_url(term)?;
        tracing::info!(
            "Searching {} for \"{}\": {}",
            self.profile.retailer,
            term,
            search_url
        );

        let body = fetch_page(&self.client, search_url.as_str())
            .await
            .map_err(|source| AdapterError::ListingFetch {
                url: search_url.to_string(),
                source,
            })?;

        let links = extract_listing_links(&body, &self.base_url, self.profile.link_selectors);
        let take = links.len().min(self.settings.max_detail_fetches);
        tracing::info!(
            "{}: found {} products, fetching {}",
            self.profile.retailer,
            links.len(),
            take
        );

        let mut pacer = Pacer::new(self.settings.pacing_delay);
        let mut records = Vec::with_capacity(take);
        for (i, link) in links.iter().take(take).enumerate() {
            pacer.wait_turn().await;
            tracing::debug!("{} product {}/{}", self.profile.retailer, i + 1, take);
            records.push(self.scrape_product(link).await);
        }

        Ok(records)
    }
}

/// Ensures the root ends with `/` so relative joins keep its path prefix
fn as_directory(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
