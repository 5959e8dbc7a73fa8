//! Integration tests for khaki-scout
//!
//! Mock retailer sites are served by wiremock; adapters and the
//! orchestrator are driven against them end to end.

mod adapter_tests;
mod scrape_tests;
mod support;
