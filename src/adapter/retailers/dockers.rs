//! Dockers storefront: product pages queried by URL

use crate::adapter::parser::{extract_name, first_attr, parse_price};
use crate::adapter::{expect_kind, fetch_page, AdapterError, Pacer, SourceAdapter};
use crate::record::{Availability, QueryInput, Retailer, SourceRecord};
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;

const NAME_SELECTORS: &[&str] = &["h1.product-form_title"];
const PRICE_SPANS: &str = "div[js-product-form=\"priceElements\"] span";
const PRICE_META: &[&str] = &["meta[itemprop=\"price\"]"];
const AVAILABILITY_META: &[&str] = &["meta[itemprop=\"availability\"]"];
const OUT_OF_STOCK_MARKER: &str = "[class*=\"out-of-stock\"]";

/// Adapter for Dockers product pages
///
/// Each configured URL yields exactly one record, in order. Successive
/// pages are fetched with the configured pacing delay between them.
pub struct DockersAdapter {
    client: Client,
    pacing_delay: Duration,
}

impl DockersAdapter {
    pub fn new(client: Client, pacing_delay: Duration) -> Self {
        Self {
            client,
            pacing_delay,
        }
    }

    async fn scrape_page(&self, url: &str) -> SourceRecord {
        tracing::info!("Scraping Dockers: {}", url);

        match fetch_page(&self.client, url).await {
            Ok(body) => extract_dockers_product(&body, url),
            Err(e) => {
                tracing::error!("Dockers fetch failed for {}: {}", url, e);
                SourceRecord::failed(Retailer::Dockers, url, e.to_string())
            }
        }
    }
}

#[async_trait]
impl SourceAdapter for DockersAdapter {
    fn retailer(&self) -> Retailer {
        Retailer::Dockers
    }

    async fn fetch(&self, query: &QueryInput) -> Result<Vec<SourceRecord>, AdapterError> {
        expect_kind(Retailer::Dockers, query)?;

        let urls = query.urls();
        let mut pacer = Pacer::new(self.pacing_delay);
        let mut records = Vec::with_capacity(urls.len());
        for (i, url) in urls.iter().enumerate() {
            pacer.wait_turn().await;
            tracing::debug!("Dockers product {}/{}", i + 1, urls.len());
            records.push(self.scrape_page(url).await);
        }

        Ok(records)
    }
}

/// Extracts a record from a Dockers product page
///
/// The price block lists the current price first and, when on sale, the
/// original price second. Nested spans repeat the same amount, so the
/// original price is the first `$` amount that differs from the current one.
/// Availability comes from schema.org metadata when present, else from an
/// out-of-stock marker; with neither the page gives no signal.
pub fn extract_dockers_product(html: &str, url: &str) -> SourceRecord {
    let document = Html::parse_document(html);

    let mut record = SourceRecord::new(Retailer::Dockers, url)
        .with_name(extract_name(&document, NAME_SELECTORS));

    let (price, original_price) = block_prices(&document);
    record.price = price.or_else(|| {
        first_attr(&document, PRICE_META, "content").and_then(|content| parse_price(&content))
    });
    record.original_price = original_price;
    record.availability = dockers_availability(&document);

    tracing::info!(
        "Dockers: {} - {:?} ({})",
        record.name,
        record.price,
        record.availability
    );
    record
}

fn block_prices(document: &Html) -> (Option<f64>, Option<f64>) {
    let Ok(selector) = Selector::parse(PRICE_SPANS) else {
        return (None, None);
    };

    let mut price = None;
    let mut original = None;
    for span in document.select(&selector) {
        let text = span.text().collect::<String>();
        let text = text.trim();
        if !text.starts_with('$') {
            continue;
        }
        let Some(amount) = parse_price(text) else {
            continue;
        };

        if price.is_none() {
            price = Some(amount);
        } else if original.is_none() && price != Some(amount) {
            original = Some(amount);
            break;
        }
    }

    (price, original)
}

fn dockers_availability(document: &Html) -> Availability {
    if let Some(schema) = first_attr(document, AVAILABILITY_META, "content") {
        if schema.contains("OutOfStock") {
            return Availability::OutOfStock;
        }
        if schema.contains("InStock") {
            return Availability::InStock;
        }
    }

    let marked_out = Selector::parse(OUT_OF_STOCK_MARKER)
        .map(|selector| document.select(&selector).next().is_some())
        .unwrap_or(false);
    if marked_out {
        Availability::OutOfStock
    } else {
        Availability::CheckSite
    }
}
