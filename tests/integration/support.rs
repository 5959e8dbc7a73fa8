//! Shared fixtures for integration tests

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn html(body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body.into())
        .insert_header("content-type", "text/html")
}

/// An Amazon-style search results page linking to the given paths
pub fn amazon_listing(base_url: &str, paths: &[&str]) -> String {
    let cards: String = paths
        .iter()
        .map(|p| {
            format!(
                r#"<div data-component-type="s-search-result">
                    <h2 class="s-size-mini"><a href="{}{}">card</a></h2>
                </div>"#,
                base_url, p
            )
        })
        .collect();
    format!("<html><body>{}</body></html>", cards)
}

/// An Amazon-style product page
pub fn amazon_product(name: &str, price: &str, original: Option<&str>) -> String {
    let original = original
        .map(|o| {
            format!(
                r#"<span class="a-price a-text-price"><span class="a-offscreen">{}</span></span>"#,
                o
            )
        })
        .unwrap_or_default();
    format!(
        r#"<html><body>
            <h1><span id="productTitle">{}</span></h1>
            <span class="a-price"><span class="a-offscreen">{}</span></span>
            {}
            <div id="availability"><span>In Stock.</span></div>
        </body></html>"#,
        name, price, original
    )
}

/// Mounts an Amazon search page for `term`
pub async fn mount_amazon_search(server: &MockServer, term: &str, paths: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/s"))
        .and(query_param("k", term))
        .respond_with(html(amazon_listing(&server.uri(), paths)))
        .mount(server)
        .await;
}

pub async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(html(body))
        .mount(server)
        .await;
}

pub async fn mount_status(server: &MockServer, page_path: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}
