//! HTML field extraction
//!
//! Retailers change their markup often, so every field is looked up
//! through a list of selectors tried in order. All functions here are
//! synchronous and keep the parsed document local: `scraper::Html` is not
//! `Send` and must never be held across an await point.

use crate::record::{Availability, Retailer, SourceRecord, UNKNOWN_NAME};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;
use url::Url;

static PRICE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$?([\d,]+\.?\d*)").expect("price pattern is valid"));

/// Names shorter than this are treated as weak candidates (badges, icons)
const MIN_NAME_LEN: usize = 5;

/// Selector chains for the fields of a product detail page
#[derive(Debug, Clone, Copy)]
pub struct ProductSelectors {
    pub name: &'static [&'static str],
    pub price: &'static [&'static str],
    pub original_price: &'static [&'static str],
    pub availability: &'static [&'static str],
}

/// Parses a price out of display text
///
/// Takes the first run of digits (optionally `$`-prefixed, with thousands
/// separators and decimals) and drops the separators.
///
/// # Example
///
/// ```
/// use khaki_scout::adapter::parse_price;
///
/// assert_eq!(parse_price("Sale $1,049.50"), Some(1049.5));
/// assert_eq!(parse_price("See price in cart"), None);
/// ```
pub fn parse_price(text: &str) -> Option<f64> {
    let captures = PRICE_PATTERN.captures(text.trim())?;
    let digits = captures.get(1)?.as_str().replace(',', "");
    digits
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite() && *price >= 0.0)
}

/// Collects an element's text with whitespace collapsed
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns the first element matched by the first selector that matches anything
fn first_element<'a>(document: &'a Html, selectors: &[&str]) -> Option<ElementRef<'a>> {
    selectors.iter().find_map(|css| {
        let selector = Selector::parse(css).ok()?;
        document.select(&selector).next()
    })
}

/// Returns the text of the first element found through the selector chain
pub fn first_text(document: &Html, selectors: &[&str]) -> Option<String> {
    first_element(document, selectors).map(element_text)
}

/// Returns an attribute of the first element found through the selector chain
pub fn first_attr(document: &Html, selectors: &[&str], attr: &str) -> Option<String> {
    first_element(document, selectors)
        .and_then(|element| element.value().attr(attr))
        .map(|value| value.trim().to_string())
}

/// Extracts a product name through the selector chain
///
/// A candidate longer than five characters wins immediately. Otherwise the
/// last non-empty candidate seen is used, and failing that the
/// [`UNKNOWN_NAME`] sentinel.
pub fn extract_name(document: &Html, selectors: &[&str]) -> String {
    let mut candidate = None;

    for css in selectors {
        let Ok(selector) = Selector::parse(css) else {
            continue;
        };
        let Some(element) = document.select(&selector).next() else {
            continue;
        };

        let text = element_text(element);
        if text.chars().count() > MIN_NAME_LEN {
            return text;
        }
        if !text.is_empty() {
            candidate = Some(text);
        }
    }

    candidate.unwrap_or_else(|| UNKNOWN_NAME.to_string())
}

/// Returns the first price that parses, trying each selector in turn
pub fn first_price(document: &Html, selectors: &[&str]) -> Option<f64> {
    selectors.iter().find_map(|css| {
        let selector = Selector::parse(css).ok()?;
        let element = document.select(&selector).next()?;
        parse_price(&element_text(element))
    })
}

/// Classifies availability from the first scoped element found
///
/// Only the dedicated availability element is inspected. With no such
/// element the page gives no signal and the result is `CheckSite`.
pub fn classify_scoped_availability(document: &Html, selectors: &[&str]) -> Availability {
    first_text(document, selectors)
        .map(|text| Availability::classify(&text))
        .unwrap_or(Availability::CheckSite)
}

/// Extracts a product record from a detail page
pub fn extract_product(
    html: &str,
    retailer: Retailer,
    selectors: &ProductSelectors,
    url: &str,
) -> SourceRecord {
    let document = Html::parse_document(html);

    let mut record = SourceRecord::new(retailer, url)
        .with_name(extract_name(&document, selectors.name))
        .with_availability(classify_scoped_availability(
            &document,
            selectors.availability,
        ));
    record.price = first_price(&document, selectors.price);
    record.original_price = first_price(&document, selectors.original_price);

    if record.price.is_none() {
        tracing::warn!("No price found for {} at {}", retailer, url);
    }

    record
}

/// Extracts product links from a search results page
///
/// Selectors are tried in order and the first one yielding any link wins.
/// Relative links are resolved against `base_url`. Duplicates are dropped,
/// keeping first-seen order.
pub fn extract_listing_links(html: &str, base_url: &Url, selectors: &[&str]) -> Vec<String> {
    let document = Html::parse_document(html);

    for css in selectors {
        let Ok(selector) = Selector::parse(css) else {
            tracing::warn!("Skipping invalid listing selector: {}", css);
            continue;
        };

        let mut seen = HashSet::new();
        let links: Vec<String> = document
            .select(&selector)
            .filter_map(|element| element.value().attr("href"))
            .filter_map(|href| resolve_link(href, base_url))
            .filter(|link| seen.insert(link.clone()))
            .collect();

        if !links.is_empty() {
            return links;
        }
    }

    Vec::new()
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel:, data: schemes
/// - fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
        Some(absolute_url.to_string())
    } else {
        None
    }
}
