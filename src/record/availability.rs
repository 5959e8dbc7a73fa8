//! Stock status vocabulary

use serde::{Deserialize, Serialize};
use std::fmt;

/// Availability of a product as reported by the retailer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Availability {
    /// The scoped availability element says the item can be bought
    #[serde(rename = "In Stock")]
    InStock,

    /// The scoped availability element says the item is out of stock or unavailable
    #[serde(rename = "Out of Stock")]
    OutOfStock,

    /// The page was never successfully examined
    #[default]
    #[serde(rename = "Unknown")]
    Unknown,

    /// The page was examined but gave no usable stock signal
    #[serde(rename = "Check Site")]
    CheckSite,
}

impl Availability {
    /// Classifies the text of a scoped availability element
    ///
    /// Only the text of the dedicated element may be passed here. Matching
    /// against whole-page text picks up unrelated "in stock" mentions.
    pub fn classify(text: &str) -> Self {
        let text = text.to_lowercase();
        if text.contains("in stock") {
            Self::InStock
        } else if text.contains("out of stock") || text.contains("unavailable") {
            Self::OutOfStock
        } else {
            Self::CheckSite
        }
    }

    /// Returns the label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::InStock => "In Stock",
            Self::OutOfStock => "Out of Stock",
            Self::Unknown => "Unknown",
            Self::CheckSite => "Check Site",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
