//! Orchestrator - fan-out, failure isolation and merge
//!
//! Each retailer runs in its own spawned task. A task that returns an
//! error, panics, or overruns its deadline becomes a task error for that
//! retailer only; siblings are never cancelled and `run` always returns.

use crate::adapter::{
    build_adapter, build_http_client, AdapterError, AdapterSettings, SourceAdapter,
};
use crate::aggregate::AggregateResult;
use crate::config::Config;
use crate::record::{QueryInput, Retailer, SourceRecord};
use crate::ScoutError;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::{JoinError, JoinHandle};

type TaskOutcome = Result<Vec<SourceRecord>, AdapterError>;

/// Per-retailer slot while a run is in flight
enum TaskSlot {
    Spawned(JoinHandle<TaskOutcome>),
    Unregistered,
}

/// Runs retailer adapters concurrently and merges their results
pub struct Orchestrator {
    adapters: BTreeMap<Retailer, Arc<dyn SourceAdapter>>,
    task_timeout: Option<Duration>,
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl Orchestrator {
    /// Creates an orchestrator with no adapters and no task deadline
    pub fn new() -> Self {
        Self {
            adapters: BTreeMap::new(),
            task_timeout: None,
        }
    }

    /// Sets a deadline applied to each retailer's task
    pub fn with_task_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.task_timeout = timeout;
        self
    }

    /// Registers an adapter under its retailer, replacing any previous one
    pub fn register(&mut self, adapter: Arc<dyn SourceAdapter>) -> Option<Arc<dyn SourceAdapter>> {
        self.adapters.insert(adapter.retailer(), adapter)
    }

    /// Retailers that have an adapter, in source order
    pub fn retailers(&self) -> impl Iterator<Item = Retailer> + '_ {
        self.adapters.keys().copied()
    }

    /// Builds an orchestrator with one adapter per configured source
    ///
    /// # Arguments
    ///
    /// * `config` - The validated configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Orchestrator)` - Adapters built and registered
    /// * `Err(ScoutError)` - HTTP client or adapter construction failed
    pub fn from_config(config: &Config) -> Result<Self, ScoutError> {
        let client = build_http_client(&config.user_agent, config.scraper.request_timeout())?;
        let settings = AdapterSettings::from(&config.scraper);

        let mut orchestrator = Self::new().with_task_timeout(config.scraper.task_timeout());
        for entry in &config.sources {
            let retailer = entry.retailer()?;
            let adapter = build_adapter(
                retailer,
                client.clone(),
                &settings,
                entry.base_url.as_deref(),
            )?;
            orchestrator.register(adapter);
        }

        Ok(orchestrator)
    }

    /// Runs every query concurrently and waits for all of them
    ///
    /// Every queried retailer gets a `by_source` entry. Retailers without a
    /// registered adapter, and tasks that fail, panic or time out, end up in
    /// `task_errors` with an empty entry. This never fails.
    pub async fn run(&self, queries: &BTreeMap<Retailer, QueryInput>) -> AggregateResult {
        let mut result = AggregateResult::new(queries.clone());
        let start_time = Instant::now();

        tracing::info!("Starting {} retailer tasks", queries.len());

        let mut slots = Vec::with_capacity(queries.len());
        for (retailer, query) in queries {
            let slot = match self.adapters.get(retailer) {
                Some(adapter) => {
                    tracing::info!("✓ {} task started ({})", retailer, query);
                    TaskSlot::Spawned(tokio::spawn(run_adapter(
                        Arc::clone(adapter),
                        query.clone(),
                        self.task_timeout,
                    )))
                }
                None => TaskSlot::Unregistered,
            };
            slots.push((*retailer, slot));
        }

        // Join in source order; tasks keep running concurrently meanwhile
        for (retailer, slot) in slots {
            match slot {
                TaskSlot::Spawned(handle) => match handle.await {
                    Ok(Ok(records)) => {
                        tracing::info!("{} returned {} records", retailer, records.len());
                        result.record_success(retailer, records);
                    }
                    Ok(Err(e)) => {
                        tracing::error!("{} scraper error: {}", retailer, e);
                        result.record_task_error(retailer, e.to_string());
                    }
                    Err(e) => {
                        let message = describe_join_error(e);
                        tracing::error!("{} scraper error: {}", retailer, message);
                        result.record_task_error(retailer, message);
                    }
                },
                TaskSlot::Unregistered => {
                    tracing::warn!("No adapter registered for {}", retailer);
                    result.record_task_error(
                        retailer,
                        format!("No adapter registered for {}", retailer.key()),
                    );
                }
            }
        }

        tracing::info!(
            "All tasks completed in {:?}: {} task errors",
            start_time.elapsed(),
            result.task_errors.len()
        );

        result
    }
}

/// Body of one retailer task
async fn run_adapter(
    adapter: Arc<dyn SourceAdapter>,
    query: QueryInput,
    deadline: Option<Duration>,
) -> TaskOutcome {
    let fetch = adapter.fetch(&query);
    match deadline {
        Some(limit) => tokio::time::timeout(limit, fetch)
            .await
            .map_err(|_| AdapterError::DeadlineExceeded(limit))?,
        None => fetch.await,
    }
}

/// Turns a join failure into a task error message
fn describe_join_error(e: JoinError) -> String {
    if !e.is_panic() {
        return format!("Task cancelled: {}", e);
    }

    let payload = e.into_panic();
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string());
    format!("Task panicked: {}", message)
}

/// Loads the configured sources and runs them once
///
/// # Example
///
/// ```no_run
/// use khaki_scout::config::load_config;
/// use khaki_scout::orchestrator::run_scrape;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("scout.toml"))?;
/// let result = run_scrape(&config).await?;
/// println!("{} sources", result.by_source.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_scrape(config: &Config) -> Result<AggregateResult, ScoutError> {
    let orchestrator = Orchestrator::from_config(config)?;
    let queries = config.source_queries()?;
    Ok(orchestrator.run(&queries).await)
}
