use super::RetailerProfile;
use crate::adapter::parser::ProductSelectors;
use crate::record::Retailer;

pub(super) static PROFILE: RetailerProfile = RetailerProfile {
    retailer: Retailer::Amazon,
    base_url: "https://www.amazon.com",
    search_path: "s",
    search_param: "k",
    link_selectors: &["div[data-component-type=\"s-search-result\"] h2.s-size-mini a[href]"],
    product: ProductSelectors {
        name: &["h1 span", "span[id*=\"title\"]", ".product-title", "h1"],
        // a-offscreen carries the full "$49.99"; a-price-whole drops the cents
        price: &[
            "span.a-offscreen",
            ".a-color-price",
            "[data-a-color=\"price\"]",
        ],
        original_price: &[".a-price.a-text-price span.a-offscreen", ".a-price-old"],
        availability: &["#availability span"],
    },
};
