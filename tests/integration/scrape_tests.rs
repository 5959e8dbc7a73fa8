//! Full runs: configuration, orchestration, ranking and persistence

use crate::support::{amazon_product, mount_amazon_search, mount_page, mount_status};
use async_trait::async_trait;
use khaki_scout::adapter::{AdapterError, SourceAdapter};
use khaki_scout::aggregate::{lowest_price, price_comparison, total_count};
use khaki_scout::config::parse_config;
use khaki_scout::orchestrator::{run_scrape, Orchestrator};
use khaki_scout::output::{format_report, load_results, save_results};
use khaki_scout::{Availability, QueryInput, Retailer, SourceRecord};
use std::collections::BTreeMap;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::MockServer;

struct FixedAdapter {
    retailer: Retailer,
    records: Vec<SourceRecord>,
}

#[async_trait]
impl SourceAdapter for FixedAdapter {
    fn retailer(&self) -> Retailer {
        self.retailer
    }

    async fn fetch(&self, _query: &QueryInput) -> Result<Vec<SourceRecord>, AdapterError> {
        Ok(self.records.clone())
    }
}

struct FailingAdapter(Retailer);

#[async_trait]
impl SourceAdapter for FailingAdapter {
    fn retailer(&self) -> Retailer {
        self.0
    }

    async fn fetch(&self, _query: &QueryInput) -> Result<Vec<SourceRecord>, AdapterError> {
        Err(AdapterError::InvalidUrl("search endpoint unreachable".to_string()))
    }
}

#[tokio::test]
async fn test_partial_failure_end_to_end() {
    let mut orchestrator = Orchestrator::new();
    orchestrator.register(Arc::new(FixedAdapter {
        retailer: Retailer::Amazon,
        records: vec![
            SourceRecord::new(Retailer::Amazon, "https://a/1")
                .with_name("Classic Fit Khaki")
                .with_price(34.5),
            SourceRecord::new(Retailer::Amazon, "https://a/2")
                .with_name("Slim Fit Khaki")
                .with_price(29.99),
        ],
    }));
    orchestrator.register(Arc::new(FailingAdapter(Retailer::Macys)));

    let queries = BTreeMap::from([
        (Retailer::Amazon, QueryInput::Search("Dockers Khakis".into())),
        (Retailer::Macys, QueryInput::Search("Dockers Khakis".into())),
    ]);
    let result = orchestrator.run(&queries).await;

    assert_eq!(result.records(Retailer::Amazon).len(), 2);
    assert!(result.records(Retailer::Macys).is_empty());
    assert!(result.by_source.contains_key(&Retailer::Macys));
    assert_eq!(result.task_errors.len(), 1);
    assert_eq!(result.task_errors[0].retailer, Retailer::Macys);
    assert!(result.task_errors[0].message.contains("search endpoint unreachable"));

    assert_eq!(total_count(&result), 2);
    assert_eq!(lowest_price(&result).unwrap().url, "https://a/2");
    let ranked: Vec<_> = price_comparison(&result).iter().map(|r| r.price).collect();
    assert_eq!(ranked, vec![Some(29.99), Some(34.5)]);
}

#[tokio::test]
async fn test_run_from_config_against_mock_sites() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_amazon_search(&server, "Dockers Khakis", &["/dp/A1", "/dp/A2"]).await;
    mount_page(
        &server,
        "/dp/A1",
        amazon_product("Dockers Men's Classic Fit Khaki", "$39.99", Some("$69.50")),
    )
    .await;
    mount_page(&server, "/dp/A2", amazon_product("Dockers Alpha Slim Khaki", "$24.00", None)).await;
    mount_page(
        &server,
        "/products/alpha",
        r#"<html><body>
            <h1 class="product-form_title">Alpha Khaki Slim Fit</h1>
            <div js-product-form="priceElements"><span>$49.99</span></div>
        </body></html>"#
            .to_string(),
    )
    .await;
    mount_status(&server, "/shop/search", 500).await;

    let config = parse_config(&format!(
        r#"
        [scraper]
        request-timeout-secs = 5
        pacing-delay-ms = 0
        max-detail-fetches = 3
        task-timeout-secs = 30

        [[source]]
        retailer = "dockers"
        url = "{base}/products/alpha"

        [[source]]
        retailer = "amazon"
        query = "Dockers Khakis"
        base-url = "{base}"

        [[source]]
        retailer = "macys"
        query = "Dockers Khakis"
        base-url = "{base}"
        "#,
        base = base
    ))
    .unwrap();

    let result = run_scrape(&config).await.unwrap();

    assert_eq!(
        result.by_source.keys().copied().collect::<Vec<_>>(),
        vec![Retailer::Dockers, Retailer::Amazon, Retailer::Macys]
    );
    assert_eq!(result.query[&Retailer::Amazon], QueryInput::Search("Dockers Khakis".into()));

    let dockers = result.records(Retailer::Dockers);
    assert_eq!(dockers.len(), 1);
    assert_eq!(dockers[0].price, Some(49.99));
    assert_eq!(dockers[0].availability, Availability::CheckSite);

    let amazon = result.records(Retailer::Amazon);
    assert_eq!(amazon.len(), 2);
    assert_eq!(amazon[0].price, Some(39.99));
    assert_eq!(amazon[1].price, Some(24.0));

    assert!(result.records(Retailer::Macys).is_empty());
    let macys_error = result.task_error(Retailer::Macys).unwrap();
    assert!(macys_error.message.contains("HTTP 500"));

    let best = lowest_price(&result).unwrap();
    assert_eq!(best.retailer, Retailer::Amazon);
    assert_eq!(best.price, Some(24.0));

    let report = format_report(&result);
    assert!(report.contains("Total products found: 3"));
    assert!(report.contains("Best price: $24.00 at Amazon - Dockers Alpha Slim Khaki"));
    assert!(report.contains("Macy's:"));
}

#[tokio::test]
async fn test_total_failure_still_returns() {
    let mut orchestrator = Orchestrator::new();
    for retailer in [Retailer::Amazon, Retailer::JcPenney, Retailer::Macys] {
        orchestrator.register(Arc::new(FailingAdapter(retailer)));
    }
    let queries: BTreeMap<_, _> = orchestrator
        .retailers()
        .map(|r| (r, QueryInput::Search("khakis".into())))
        .chain([(
            Retailer::Dockers,
            QueryInput::url("https://us.dockers.com/p"),
        )])
        .collect();

    let result = orchestrator.run(&queries).await;

    assert_eq!(result.by_source.len(), 4);
    assert!(result.is_empty());
    assert_eq!(result.task_errors.len(), 4);
    assert!(lowest_price(&result).is_none());
    assert!(format_report(&result).contains("Total products found: 0"));
}

#[tokio::test]
async fn test_saved_result_reloads_equal() {
    let mut orchestrator = Orchestrator::new();
    orchestrator.register(Arc::new(FixedAdapter {
        retailer: Retailer::Dockers,
        records: vec![SourceRecord::new(Retailer::Dockers, "https://us.dockers.com/p")
            .with_name("Signature Khaki")
            .with_price(0.1 + 0.2)
            .with_original_price(69.5)
            .with_availability(Availability::InStock)],
    }));
    orchestrator.register(Arc::new(FailingAdapter(Retailer::JcPenney)));

    let queries = BTreeMap::from([
        (Retailer::Dockers, QueryInput::url("https://us.dockers.com/p")),
        (Retailer::JcPenney, QueryInput::Search("khakis".into())),
    ]);
    let result = orchestrator.run(&queries).await;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prices.json");
    save_results(&result, &path).unwrap();

    assert_eq!(load_results(&path).unwrap(), result);
}
