//! Price ranking over an aggregate result
//!
//! All functions are pure and total. Records are considered in flatten
//! order (retailer order, then the order each adapter returned them), and
//! that order is also the tie-break whenever prices are equal.

use crate::aggregate::AggregateResult;
use crate::record::SourceRecord;

/// Returns the record with the lowest price across all retailers
///
/// Records without a price are ignored. When several records share the
/// minimum price, the first in flatten order wins. Returns `None` when no
/// record has a price.
pub fn lowest_price(result: &AggregateResult) -> Option<&SourceRecord> {
    let mut best: Option<(&SourceRecord, f64)> = None;
    for record in result.iter_records() {
        let Some(price) = record.price else {
            continue;
        };
        match best {
            Some((_, best_price)) if price >= best_price => {}
            _ => best = Some((record, price)),
        }
    }
    best.map(|(record, _)| record)
}

/// Returns every priced record sorted by ascending price
///
/// The sort is stable: records with equal prices keep flatten order.
pub fn price_comparison(result: &AggregateResult) -> Vec<&SourceRecord> {
    let mut priced: Vec<(&SourceRecord, f64)> = result
        .iter_records()
        .filter_map(|record| record.price.map(|price| (record, price)))
        .collect();
    priced.sort_by(|a, b| a.1.total_cmp(&b.1));
    priced.into_iter().map(|(record, _)| record).collect()
}

/// Returns the discount of a record as a percentage rounded to 2 decimals
///
/// Only defined when both prices are known and the original price is
/// higher. `None` means "not on sale", which is different from 0% off.
pub fn discount_percentage(record: &SourceRecord) -> Option<f64> {
    let (price, original) = (record.price?, record.original_price?);
    if original <= price {
        return None;
    }
    let percent = (original - price) / original * 100.0;
    Some((percent * 100.0).round() / 100.0)
}

/// Counts all records across all retailers, including ones with errors
pub fn total_count(result: &AggregateResult) -> usize {
    result.by_source.values().map(Vec::len).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{QueryInput, Retailer};
    use std::collections::BTreeMap;

    fn record(retailer: Retailer, url: &str, price: Option<f64>) -> SourceRecord {
        let mut record = SourceRecord::new(retailer, url);
        record.price = price;
        record
    }

    fn result_with(sources: Vec<(Retailer, Vec<SourceRecord>)>) -> AggregateResult {
        let queries: BTreeMap<_, _> = sources
            .iter()
            .map(|(retailer, _)| (*retailer, QueryInput::Search("khakis".to_string())))
            .collect();
        let mut result = AggregateResult::new(queries);
        for (retailer, records) in sources {
            result.record_success(retailer, records);
        }
        result
    }

    #[test]
    fn test_lowest_price_across_sources() {
        let result = result_with(vec![
            (Retailer::Amazon, vec![record(Retailer::Amazon, "a", Some(29.99))]),
            (Retailer::JcPenney, vec![record(Retailer::JcPenney, "j", Some(19.99))]),
            (Retailer::Macys, vec![record(Retailer::Macys, "m", Some(49.00))]),
        ]);
        let lowest = lowest_price(&result).unwrap();
        assert_eq!(lowest.url, "j");
        assert_eq!(lowest.price, Some(19.99));
    }

    #[test]
    fn test_lowest_price_ignores_unpriced() {
        let result = result_with(vec![(
            Retailer::Amazon,
            vec![
                record(Retailer::Amazon, "none", None),
                record(Retailer::Amazon, "priced", Some(45.0)),
            ],
        )]);
        assert_eq!(lowest_price(&result).unwrap().url, "priced");
    }

    #[test]
    fn test_lowest_price_absent_without_prices() {
        let result = result_with(vec![
            (Retailer::Amazon, vec![record(Retailer::Amazon, "a", None)]),
            (Retailer::Macys, vec![]),
        ]);
        assert!(lowest_price(&result).is_none());
    }

    #[test]
    fn test_lowest_price_tie_goes_to_flatten_order() {
        // Inserted out of retailer order on purpose
        let result = result_with(vec![
            (Retailer::Macys, vec![record(Retailer::Macys, "m", Some(20.0))]),
            (
                Retailer::Amazon,
                vec![
                    record(Retailer::Amazon, "a1", Some(20.0)),
                    record(Retailer::Amazon, "a2", Some(20.0)),
                ],
            ),
        ]);
        assert_eq!(lowest_price(&result).unwrap().url, "a1");
    }

    #[test]
    fn test_price_comparison_is_stable() {
        let result = result_with(vec![(
            Retailer::Amazon,
            vec![
                record(Retailer::Amazon, "30", Some(30.0)),
                record(Retailer::Amazon, "10-first", Some(10.0)),
                record(Retailer::Amazon, "10-second", Some(10.0)),
                record(Retailer::Amazon, "20", Some(20.0)),
            ],
        )]);
        let urls: Vec<_> = price_comparison(&result)
            .into_iter()
            .map(|r| r.url.as_str())
            .collect();
        assert_eq!(urls, vec!["10-first", "10-second", "20", "30"]);
    }

    #[test]
    fn test_price_comparison_filters_unpriced() {
        let result = result_with(vec![
            (Retailer::Dockers, vec![record(Retailer::Dockers, "d", None)]),
            (Retailer::Macys, vec![record(Retailer::Macys, "m", Some(5.0))]),
        ]);
        let sorted = price_comparison(&result);
        assert_eq!(sorted.len(), 1);
        assert_eq!(sorted[0].url, "m");
    }

    #[test]
    fn test_discount_percentage() {
        let on_sale = SourceRecord::new(Retailer::Dockers, "d")
            .with_price(40.0)
            .with_original_price(50.0);
        assert_eq!(discount_percentage(&on_sale), Some(20.0));

        let odd = SourceRecord::new(Retailer::Dockers, "d")
            .with_price(39.99)
            .with_original_price(69.5);
        assert_eq!(discount_percentage(&odd), Some(42.46));
    }

    #[test]
    fn test_discount_percentage_absent() {
        let higher = SourceRecord::new(Retailer::Dockers, "d")
            .with_price(50.0)
            .with_original_price(40.0);
        assert_eq!(discount_percentage(&higher), None);

        let equal = SourceRecord::new(Retailer::Dockers, "d")
            .with_price(50.0)
            .with_original_price(50.0);
        assert_eq!(discount_percentage(&equal), None);

        let no_original = SourceRecord::new(Retailer::Dockers, "d").with_price(50.0);
        assert_eq!(discount_percentage(&no_original), None);

        let no_price = SourceRecord::new(Retailer::Dockers, "d").with_original_price(50.0);
        assert_eq!(discount_percentage(&no_price), None);
    }

    #[test]
    fn test_total_count_includes_errors() {
        let result = result_with(vec![
            (
                Retailer::Amazon,
                vec![
                    record(Retailer::Amazon, "a", Some(1.0)),
                    SourceRecord::failed(Retailer::Amazon, "b", "Request Timeout"),
                ],
            ),
            (Retailer::Macys, vec![]),
        ]);
        assert_eq!(total_count(&result), 2);
    }
}
