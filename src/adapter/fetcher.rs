//! HTTP fetcher implementation
//!
//! Builds the shared HTTP client and retrieves raw page markup, mapping
//! every failure into a [`FetchError`] whose message is what ends up in a
//! record's `error` field.

use crate::config::UserAgentConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Failure to retrieve a page
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Server answered with a non-success status
    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },

    /// Request exceeded the client timeout
    #[error("Request Timeout")]
    Timeout,

    /// Connection refused, DNS failure, TLS error, body read error
    #[error("{0}")]
    Network(String),
}

/// Builds an HTTP client with browser-like request headers
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Per-request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    if let Ok(language) = HeaderValue::from_str(&config.accept_language) {
        headers.insert(ACCEPT_LANGUAGE, language);
    }

    Client::builder()
        .user_agent(config.agent.as_str())
        .default_headers(headers)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page and returns its body
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx | `Ok(body)` |
/// | any other status | `FetchError::Status` |
/// | timeout | `FetchError::Timeout` |
/// | anything else | `FetchError::Network` |
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, FetchError> {
    tracing::debug!("GET {}", url);

    let response = client.get(url).send().await.map_err(classify_error)?;
    let status = response.status();

    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            reason: format!(
                "{} for url: {}",
                status.canonical_reason().unwrap_or("Unknown Status"),
                url
            ),
        });
    }

    response.text().await.map_err(classify_error)
}

fn classify_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Network(e.to_string())
    }
}
