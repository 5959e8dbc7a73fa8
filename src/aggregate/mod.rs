//! Aggregated results of one orchestration run and the pure functions
//! that rank them

mod ranking;
mod result;

pub use ranking::{discount_percentage, lowest_price, price_comparison, total_count};
pub use result::{AggregateResult, TaskError};
