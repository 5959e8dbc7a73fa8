//! Retailer identifiers
//!
//! The set of sources is closed: adding a retailer means adding a variant
//! here plus an adapter for it.

use crate::record::QueryKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A retail website queried independently by its own adapter
///
/// Variant order is the source iteration order used everywhere results are
/// flattened, which also makes it the tie-break order for equal prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Retailer {
    /// The brand's own storefront (single product page)
    Dockers,

    /// Amazon search results
    Amazon,

    /// JCPenney search results
    #[serde(rename = "jcpenney")]
    JcPenney,

    /// Macy's search results
    Macys,
}

impl Retailer {
    /// All retailers in source iteration order
    pub const ALL: [Retailer; 4] = [
        Retailer::Dockers,
        Retailer::Amazon,
        Retailer::JcPenney,
        Retailer::Macys,
    ];

    /// Returns the configuration key for this retailer
    pub fn key(&self) -> &'static str {
        match self {
            Self::Dockers => "dockers",
            Self::Amazon => "amazon",
            Self::JcPenney => "jcpenney",
            Self::Macys => "macys",
        }
    }

    /// Parses a retailer from its configuration key (case-insensitive)
    pub fn from_key(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dockers" => Some(Self::Dockers),
            "amazon" => Some(Self::Amazon),
            "jcpenney" => Some(Self::JcPenney),
            "macys" | "macy's" => Some(Self::Macys),
            _ => None,
        }
    }

    /// The kind of query this retailer's adapter accepts
    pub fn query_kind(&self) -> QueryKind {
        match self {
            Self::Dockers => QueryKind::Url,
            Self::Amazon | Self::JcPenney | Self::Macys => QueryKind::Search,
        }
    }

    /// Human-readable storefront name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Dockers => "Dockers",
            Self::Amazon => "Amazon",
            Self::JcPenney => "JCPenney",
            Self::Macys => "Macy's",
        }
    }
}

impl fmt::Display for Retailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
