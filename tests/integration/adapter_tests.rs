//! Adapters against mock retailer sites

use crate::support::{amazon_product, html, mount_amazon_search, mount_page, mount_status};
use khaki_scout::adapter::{build_adapter, build_http_client, AdapterError, AdapterSettings};
use khaki_scout::config::UserAgentConfig;
use khaki_scout::{Availability, QueryInput, Retailer};
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings(max_detail_fetches: usize) -> AdapterSettings {
    AdapterSettings {
        max_detail_fetches,
        pacing_delay: Duration::ZERO,
    }
}

fn client(timeout: Duration) -> reqwest::Client {
    build_http_client(&UserAgentConfig::default(), timeout).expect("client builds")
}

#[tokio::test]
async fn test_search_adapter_caps_and_dedups() {
    let server = MockServer::start().await;
    mount_amazon_search(
        &server,
        "Dockers Khakis",
        &["/dp/A1", "/dp/A1", "/dp/A2", "/dp/A3", "/dp/A4"],
    )
    .await;
    mount_page(
        &server,
        "/dp/A1",
        amazon_product("Dockers Men's Classic Fit Khaki", "$39.99", Some("$69.50")),
    )
    .await;
    mount_page(&server, "/dp/A2", amazon_product("Dockers Alpha Slim Khaki", "$44.00", None)).await;
    mount_status(&server, "/dp/A3", 404).await;

    // A4 is past the fetch cap and must never be requested
    Mock::given(method("GET"))
        .and(path("/dp/A4"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let adapter = build_adapter(
        Retailer::Amazon,
        client(Duration::from_secs(5)),
        &settings(3),
        Some(&server.uri()),
    )
    .unwrap();

    let records = adapter
        .fetch(&QueryInput::Search("Dockers Khakis".to_string()))
        .await
        .unwrap();

    assert_eq!(records.len(), 3);

    assert_eq!(records[0].name, "Dockers Men's Classic Fit Khaki");
    assert_eq!(records[0].price, Some(39.99));
    assert_eq!(records[0].original_price, Some(69.5));
    assert_eq!(records[0].availability, Availability::InStock);
    assert_eq!(records[0].url, format!("{}/dp/A1", server.uri()));

    assert_eq!(records[1].price, Some(44.0));
    assert_eq!(records[1].original_price, None);

    let failed = &records[2];
    assert_eq!(failed.url, format!("{}/dp/A3", server.uri()));
    assert_eq!(failed.availability, Availability::Unknown);
    assert!(failed.price.is_none());
    assert!(failed.error.as_deref().unwrap().starts_with("HTTP 404: Not Found"));
}

#[tokio::test]
async fn test_search_page_failure_fails_the_task() {
    let server = MockServer::start().await;
    mount_status(&server, "/s", 503).await;

    let adapter = build_adapter(
        Retailer::Amazon,
        client(Duration::from_secs(5)),
        &settings(3),
        Some(&server.uri()),
    )
    .unwrap();

    let err = adapter
        .fetch(&QueryInput::Search("Dockers Khakis".to_string()))
        .await
        .unwrap_err();

    assert!(matches!(err, AdapterError::ListingFetch { .. }));
    assert!(err.to_string().contains("HTTP 503"));
}

#[tokio::test]
async fn test_search_without_results() {
    let server = MockServer::start().await;
    mount_amazon_search(&server, "Dockers Khakis", &[]).await;

    let adapter = build_adapter(
        Retailer::Amazon,
        client(Duration::from_secs(5)),
        &settings(3),
        Some(&server.uri()),
    )
    .unwrap();

    let records = adapter
        .fetch(&QueryInput::Search("Dockers Khakis".to_string()))
        .await
        .unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_slow_product_page_times_out_into_record() {
    let server = MockServer::start().await;
    mount_amazon_search(&server, "khakis", &["/dp/SLOW"]).await;
    Mock::given(method("GET"))
        .and(path("/dp/SLOW"))
        .respond_with(html("<html></html>").set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let adapter = build_adapter(
        Retailer::Amazon,
        client(Duration::from_secs(1)),
        &settings(3),
        Some(&server.uri()),
    )
    .unwrap();

    let records = adapter
        .fetch(&QueryInput::Search("khakis".to_string()))
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].error.as_deref(), Some("Request Timeout"));
}

#[tokio::test]
async fn test_search_adapter_paces_detail_fetches() {
    let server = MockServer::start().await;
    mount_amazon_search(&server, "khakis", &["/dp/P1", "/dp/P2", "/dp/P3"]).await;
    for (page, price) in [("/dp/P1", "$30.00"), ("/dp/P2", "$31.00"), ("/dp/P3", "$32.00")] {
        mount_page(&server, page, amazon_product("Dockers Khaki Pants", price, None)).await;
    }

    let paced = AdapterSettings {
        max_detail_fetches: 3,
        pacing_delay: Duration::from_millis(100),
    };
    let adapter = build_adapter(
        Retailer::Amazon,
        client(Duration::from_secs(5)),
        &paced,
        Some(&server.uri()),
    )
    .unwrap();

    let start = Instant::now();
    let records = adapter
        .fetch(&QueryInput::Search("khakis".to_string()))
        .await
        .unwrap();

    assert_eq!(records.len(), 3);
    // Two pauses: before the second and before the third product page
    assert!(start.elapsed() >= Duration::from_millis(200));
}

#[tokio::test]
async fn test_dockers_adapter_reads_product_pages() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/products/alpha",
        r#"<html><head>
            <meta itemprop="availability" content="https://schema.org/OutOfStock">
        </head><body>
            <h1 class="product-form_title">Alpha Khaki Slim Fit</h1>
            <div js-product-form="priceElements"><span>$49.99</span><span>$69.50</span></div>
        </body></html>"#
            .to_string(),
    )
    .await;
    mount_status(&server, "/products/gone", 410).await;

    let paced = AdapterSettings {
        max_detail_fetches: 1,
        pacing_delay: Duration::from_millis(100),
    };
    let adapter = build_adapter(
        Retailer::Dockers,
        client(Duration::from_secs(5)),
        &paced,
        None,
    )
    .unwrap();

    let alpha = format!("{}/products/alpha", server.uri());
    let gone = format!("{}/products/gone", server.uri());

    let start = Instant::now();
    let records = adapter
        .fetch(&QueryInput::Urls(vec![alpha.clone(), gone.clone()]))
        .await
        .unwrap();

    // Every URL yields a record regardless of the detail fetch cap
    assert_eq!(records.len(), 2);
    assert!(start.elapsed() >= Duration::from_millis(100));

    assert_eq!(records[0].name, "Alpha Khaki Slim Fit");
    assert_eq!(records[0].price, Some(49.99));
    assert_eq!(records[0].original_price, Some(69.5));
    assert_eq!(records[0].availability, Availability::OutOfStock);
    assert_eq!(records[0].url, alpha);

    assert_eq!(records[1].url, gone);
    assert_eq!(records[1].availability, Availability::Unknown);
    assert!(records[1].error.as_deref().unwrap().starts_with("HTTP 410"));
}
