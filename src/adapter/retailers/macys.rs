use super::RetailerProfile;
use crate::adapter::parser::ProductSelectors;
use crate::record::Retailer;

pub(super) static PROFILE: RetailerProfile = RetailerProfile {
    retailer: Retailer::Macys,
    base_url: "https://www.macys.com",
    search_path: "shop/search",
    search_param: "q",
    link_selectors: &["a[data-testid=\"productCardLink\"][href]", "a.productCardLink[href]"],
    product: ProductSelectors {
        name: &[
            "h1",
            "h1.productTitle",
            "[data-testid=\"product-title\"]",
            ".productTitle",
        ],
        price: &[
            ".pricingSummary__pricingGroup",
            ".sale-price",
            "[data-testid=\"sale-price\"]",
            ".currentPrice",
        ],
        original_price: &[".original-price", ".was-price", ".regularPrice"],
        availability: &[
            "[data-testid=\"availability\"]",
            ".availability-msg",
            ".availabilityMessage",
        ],
    },
};
