use crate::record::{Availability, Retailer};
use serde::{Deserialize, Serialize};

/// Name used when extraction could not find a product title
pub const UNKNOWN_NAME: &str = "Unknown";

/// One product at one retailer, normalized
///
/// `retailer` and `url` are always set. Everything else is best-effort:
/// a record may carry an `error` and still have some fields populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub retailer: Retailer,
    pub name: String,
    pub price: Option<f64>,
    pub original_price: Option<f64>,
    pub availability: Availability,
    pub url: String,
    pub error: Option<String>,
}

impl SourceRecord {
    /// Creates an empty record for a URL about to be scraped
    ///
    /// Availability starts as `Unknown` and only changes once the page has
    /// actually been examined.
    pub fn new(retailer: Retailer, url: impl Into<String>) -> Self {
        Self {
            retailer,
            name: UNKNOWN_NAME.to_string(),
            price: None,
            original_price: None,
            availability: Availability::Unknown,
            url: url.into(),
            error: None,
        }
    }

    /// Creates a record for a page that could not be retrieved at all
    pub fn failed(retailer: Retailer, url: impl Into<String>, error: impl Into<String>) -> Self {
        let mut record = Self::new(retailer, url);
        record.error = Some(error.into());
        record
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_original_price(mut self, original_price: f64) -> Self {
        self.original_price = Some(original_price);
        self
    }

    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }

    /// True when the pipeline for this record did not complete normally
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// True when both prices are known and the original is higher
    pub fn is_discounted(&self) -> bool {
        matches!((self.price, self.original_price), (Some(p), Some(o)) if o > p)
    }
}
