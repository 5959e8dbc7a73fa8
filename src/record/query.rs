use serde::{Deserialize, Serialize};
use std::fmt;

/// What a source is asked for in one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryInput {
    /// Free-text search term for listing-style retailers
    Search(String),

    /// Product page URLs for single-product retailers, scraped in order
    Urls(Vec<String>),
}

/// The kind of input an adapter accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Search,
    Url,
}

impl QueryInput {
    /// A query for a single product page
    pub fn url(url: impl Into<String>) -> Self {
        Self::Urls(vec![url.into()])
    }

    pub fn kind(&self) -> QueryKind {
        match self {
            Self::Search(_) => QueryKind::Search,
            Self::Urls(_) => QueryKind::Url,
        }
    }

    /// The search term, for search queries
    pub fn search_term(&self) -> Option<&str> {
        match self {
            Self::Search(term) => Some(term),
            Self::Urls(_) => None,
        }
    }

    /// The product URLs; empty for search queries
    pub fn urls(&self) -> &[String] {
        match self {
            Self::Search(_) => &[],
            Self::Urls(urls) => urls,
        }
    }
}

impl fmt::Display for QueryInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Search(term) => f.write_str(term),
            Self::Urls(urls) => f.write_str(&urls.join(", ")),
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Search => f.write_str("search term"),
            Self::Url => f.write_str("product URL"),
        }
    }
}
