//! Normalized product data shared by every retailer
//!
//! Each adapter maps whatever it scraped into a [`SourceRecord`]. The
//! orchestrator, ranking functions and output writers only ever see this
//! shape, never retailer-specific markup.

mod availability;
mod query;
mod retailer;
mod source_record;

pub use availability::Availability;
pub use query::{QueryInput, QueryKind};
pub use retailer::Retailer;
pub use source_record::{SourceRecord, UNKNOWN_NAME};
