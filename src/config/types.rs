use crate::record::{QueryInput, Retailer};
use crate::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Main configuration structure for Khaki-Scout
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(rename = "source", default)]
    pub sources: Vec<SourceEntry>,
}

/// Scraping behavior shared by all adapters
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// Timeout for a single HTTP request (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Pause between successive detail page fetches at one retailer (milliseconds)
    #[serde(rename = "pacing-delay-ms", default = "default_pacing_delay_ms")]
    pub pacing_delay_ms: u64,

    /// Maximum number of product pages fetched per search
    #[serde(rename = "max-detail-fetches", default = "default_max_detail_fetches")]
    pub max_detail_fetches: usize,

    /// Deadline for one retailer's whole task (seconds); unset means none
    #[serde(rename = "task-timeout-secs", default)]
    pub task_timeout_secs: Option<u64>,
}

/// Request headers sent to retailers
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// User-Agent header value
    #[serde(default = "default_agent")]
    pub agent: String,

    /// Accept-Language header value
    #[serde(rename = "accept-language", default = "default_accept_language")]
    pub accept_language: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving timestamped JSON result files
    #[serde(rename = "results-dir", default = "default_results_dir")]
    pub results_dir: String,

    /// Optional path of a markdown summary written after each run
    #[serde(rename = "summary-path", default)]
    pub summary_path: Option<String>,
}

/// One retailer to query
#[derive(Debug, Clone, Deserialize)]
pub struct SourceEntry {
    /// Retailer key (e.g., "amazon", "jcpenney")
    pub retailer: String,

    /// Search term, for listing retailers
    #[serde(default)]
    pub query: Option<String>,

    /// Product page URL, for single-product retailers
    #[serde(default)]
    pub url: Option<String>,

    /// Several product page URLs, scraped in order with pacing between them
    #[serde(default)]
    pub urls: Option<Vec<String>>,

    /// Overrides the retailer's site root (mirrors, staging, tests)
    #[serde(rename = "base-url", default)]
    pub base_url: Option<String>,
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_pacing_delay_ms() -> u64 {
    2000
}

fn default_max_detail_fetches() -> usize {
    3
}

fn default_agent() -> String {
    concat!(
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) ",
        "AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
    )
    .to_string()
}

fn default_accept_language() -> String {
    "en-US,en;q=0.5".to_string()
}

fn default_results_dir() -> String {
    ".".to_string()
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
            pacing_delay_ms: default_pacing_delay_ms(),
            max_detail_fetches: default_max_detail_fetches(),
            task_timeout_secs: None,
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            agent: default_agent(),
            accept_language: default_accept_language(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
            summary_path: None,
        }
    }
}

impl ScraperConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.pacing_delay_ms)
    }

    pub fn task_timeout(&self) -> Option<Duration> {
        self.task_timeout_secs.map(Duration::from_secs)
    }
}

impl SourceEntry {
    /// Resolves the retailer key
    pub fn retailer(&self) -> ConfigResult<Retailer> {
        Retailer::from_key(&self.retailer)
            .ok_or_else(|| ConfigError::UnknownRetailer(self.retailer.clone()))
    }

    /// Builds the query input from whichever of `query`/`url`/`urls` is set
    pub fn query_input(&self) -> ConfigResult<QueryInput> {
        match (&self.query, &self.url, &self.urls) {
            (Some(query), None, None) => Ok(QueryInput::Search(query.trim().to_string())),
            (None, Some(url), None) => Ok(QueryInput::url(url.trim())),
            (None, None, Some(urls)) => Ok(QueryInput::Urls(
                urls.iter().map(|url| url.trim().to_string()).collect(),
            )),
            (None, None, None) => Err(ConfigError::Validation(format!(
                "Source '{}' must set query, url or urls",
                self.retailer
            ))),
            _ => Err(ConfigError::Validation(format!(
                "Source '{}' must set only one of query, url or urls",
                self.retailer
            ))),
        }
    }
}

impl Config {
    /// Returns the per-source queries in source iteration order
    pub fn source_queries(&self) -> ConfigResult<BTreeMap<Retailer, QueryInput>> {
        let mut queries = BTreeMap::new();
        for entry in &self.sources {
            let retailer = entry.retailer()?;
            if queries.insert(retailer, entry.query_input()?).is_some() {
                return Err(ConfigError::Validation(format!(
                    "Retailer '{}' is configured more than once",
                    retailer.key()
                )));
            }
        }
        Ok(queries)
    }

    /// Finds the configuration entry for a retailer
    pub fn source(&self, retailer: Retailer) -> Option<&SourceEntry> {
        self.sources
            .iter()
            .find(|entry| entry.retailer().ok() == Some(retailer))
    }
}
