use crate::config::types::{Config, OutputConfig, ScraperConfig, SourceEntry, UserAgentConfig};
use crate::record::{QueryInput, QueryKind};
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scraper_config(&config.scraper)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_sources(&config.sources)?;
    Ok(())
}

/// Validates scraper configuration
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    if config.request_timeout_secs < 1 || config.request_timeout_secs > 120 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be between 1 and 120, got {}",
            config.request_timeout_secs
        )));
    }

    if config.pacing_delay_ms > 60_000 {
        return Err(ConfigError::Validation(format!(
            "pacing_delay_ms must be <= 60000ms, got {}ms",
            config.pacing_delay_ms
        )));
    }

    if config.max_detail_fetches < 1 || config.max_detail_fetches > 20 {
        return Err(ConfigError::Validation(format!(
            "max_detail_fetches must be between 1 and 20, got {}",
            config.max_detail_fetches
        )));
    }

    if config.task_timeout_secs == Some(0) {
        return Err(ConfigError::Validation(
            "task_timeout_secs must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.agent.trim().is_empty() {
        return Err(ConfigError::Validation("agent cannot be empty".to_string()));
    }

    // Header values must be visible ASCII
    for (field, value) in [
        ("agent", &config.agent),
        ("accept_language", &config.accept_language),
    ] {
        if !value.chars().all(|c| c.is_ascii() && !c.is_ascii_control()) {
            return Err(ConfigError::Validation(format!(
                "{} must contain only printable ASCII characters",
                field
            )));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.results_dir.is_empty() {
        return Err(ConfigError::Validation(
            "results_dir cannot be empty".to_string(),
        ));
    }

    if matches!(&config.summary_path, Some(path) if path.is_empty()) {
        return Err(ConfigError::Validation(
            "summary_path cannot be empty when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates source entries
fn validate_sources(sources: &[SourceEntry]) -> Result<(), ConfigError> {
    if sources.is_empty() {
        return Err(ConfigError::Validation(
            "At least one [[source]] must be configured".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for entry in sources {
        let retailer = entry.retailer()?;
        if !seen.insert(retailer) {
            return Err(ConfigError::Validation(format!(
                "Retailer '{}' is configured more than once",
                retailer.key()
            )));
        }

        let query = entry.query_input()?;
        if query.kind() != retailer.query_kind() {
            return Err(ConfigError::Validation(format!(
                "Retailer '{}' expects a {}, got a {}",
                retailer.key(),
                retailer.query_kind(),
                query.kind()
            )));
        }

        match &query {
            QueryInput::Search(term) if term.is_empty() => {
                return Err(ConfigError::Validation(format!(
                    "Search query for '{}' cannot be empty",
                    retailer.key()
                )));
            }
            QueryInput::Search(_) => {}
            QueryInput::Urls(urls) if urls.is_empty() => {
                return Err(ConfigError::Validation(format!(
                    "urls for '{}' cannot be empty",
                    retailer.key()
                )));
            }
            QueryInput::Urls(urls) => {
                for url in urls {
                    validate_http_url(url, "url")?;
                }
            }
        }

        if let Some(base_url) = &entry.base_url {
            // Only search retailers build URLs from a site root
            if retailer.query_kind() != QueryKind::Search {
                return Err(ConfigError::Validation(format!(
                    "base-url is not supported for '{}', which takes product URLs",
                    retailer.key()
                )));
            }
            validate_http_url(base_url, "base-url")?;
        }
    }

    Ok(())
}

/// Validates that a URL parses and uses HTTP or HTTPS
fn validate_http_url(value: &str, field: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            field, value
        )));
    }

    Ok(())
}
