use super::RetailerProfile;
use crate::adapter::parser::ProductSelectors;
use crate::record::Retailer;

pub(super) static PROFILE: RetailerProfile = RetailerProfile {
    retailer: Retailer::JcPenney,
    base_url: "https://www.jcpenney.com",
    search_path: "search",
    search_param: "q",
    link_selectors: &["a[data-testid=\"productCardLink\"][href]", "a.productCardLink[href]"],
    product: ProductSelectors {
        name: &[
            "h1",
            "h1.productTitle",
            "[data-testid=\"product-title\"]",
            ".product-name",
        ],
        price: &[
            ".selling-price",
            "[data-testid=\"selling-price\"]",
            ".price",
            ".productPrice",
        ],
        original_price: &[
            ".original-price",
            ".was-price",
            "[data-testid=\"original-price\"]",
        ],
        availability: &["[data-testid=\"availability\"]", ".availability", "#availability"],
    },
};
