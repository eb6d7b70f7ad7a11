//! Period-over-period change analysis.
//!
//! Compares two independently aggregated periods of the same cohort size:
//!
//! - **Ownership**: tickers gaining ([`emerging`]) or losing ([`fading`])
//!   owners
//! - **Flows**: buy and sell leaders by value or percent change, over one or
//!   more quarters
//! - **Comparison**: period stats views annotated with the prior period's
//!   figures
//!
//! Ownership and flow analysis key on ticker alone. When a ticker appears
//! under several issuer names its rows are merged first; see
//! [`by_ticker`].

mod comparison;
mod flows;
mod ownership;

pub use comparison::*;
pub use flows::*;
pub use ownership::*;

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;

use crate::aggregation::AggregateRow;

/// One ticker's aggregate after merging issuer-name variants.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerSummary {
    /// Display ticker.
    pub ticker: String,

    /// Issuer name of the largest-value variant.
    pub issuer_name: String,

    /// Distinct owners across variants.
    pub owner_count: usize,

    /// Values summed across variants.
    pub total_value: Decimal,
}

/// Merges aggregate rows by ticker.
///
/// Values are summed. A manager reporting the ticker under several issuer
/// names is one owner: the merged count is the number of distinct owner
/// names across variants, never less than the largest variant's count. The
/// issuer name of the largest-value row is kept (ties go to the
/// alphabetically first issuer).
#[must_use]
pub fn by_ticker(rows: &[AggregateRow]) -> BTreeMap<String, TickerSummary> {
    let mut merged: BTreeMap<String, TickerSummary> = BTreeMap::new();
    let mut lead_value: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut owners: BTreeMap<String, BTreeSet<&str>> = BTreeMap::new();

    for row in rows {
        owners
            .entry(row.ticker.clone())
            .or_default()
            .extend(row.owner_names.iter().map(String::as_str));

        match merged.get_mut(&row.ticker) {
            None => {
                lead_value.insert(row.ticker.clone(), row.total_value);
                merged.insert(
                    row.ticker.clone(),
                    TickerSummary {
                        ticker: row.ticker.clone(),
                        issuer_name: row.issuer_name.clone(),
                        owner_count: row.owner_count,
                        total_value: row.total_value,
                    },
                );
            }
            Some(summary) => {
                let distinct = owners.get(&row.ticker).map_or(0, BTreeSet::len);
                summary.owner_count = distinct.max(summary.owner_count).max(row.owner_count);
                summary.total_value += row.total_value;

                let lead = lead_value.entry(row.ticker.clone()).or_insert(Decimal::ZERO);
                let replaces = row.total_value > *lead
                    || (row.total_value == *lead && row.issuer_name < summary.issuer_name);
                if replaces {
                    *lead = row.total_value;
                    summary.issuer_name = row.issuer_name.clone();
                }
            }
        }
    }

    merged
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::aggregation::AggregateRow;
    use rust_decimal::Decimal;

    pub fn row(ticker: &str, owners: usize, value: Decimal) -> AggregateRow {
        AggregateRow {
            ticker: ticker.to_string(),
            issuer_name: format!("{ticker} INC"),
            owner_count: owners,
            total_value: value,
            total_shares: 0,
            avg_position_pct: None,
            max_position_pct: None,
            min_position_pct: None,
            weighted_pct: 0.0,
            owner_names: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::row;
    use super::*;
    use rust_decimal_macros::dec;

    fn owned_by(mut r: AggregateRow, issuer: &str, owners: &[&str]) -> AggregateRow {
        r.issuer_name = issuer.to_string();
        r.owner_names = owners.iter().map(|o| o.to_string()).collect();
        r.owner_count = owners.len();
        r
    }

    #[test]
    fn test_merges_issuer_variants() {
        let class_a = owned_by(
            row("BRK", 0, dec!(100)),
            "BERKSHIRE HATHAWAY INC CL A",
            &["M1", "M2", "M3"],
        );
        let class_b = owned_by(
            row("BRK", 0, dec!(400)),
            "BERKSHIRE HATHAWAY INC CL B",
            &["M4", "M5", "M6", "M7", "M8"],
        );

        let merged = by_ticker(&[class_a, class_b, row("AAPL", 2, dec!(50))]);
        assert_eq!(merged.len(), 2);

        let brk = &merged["BRK"];
        assert_eq!(brk.owner_count, 8);
        assert_eq!(brk.total_value, dec!(500));
        assert_eq!(brk.issuer_name, "BERKSHIRE HATHAWAY INC CL B");
        assert_eq!(merged["AAPL"].owner_count, 2);
    }

    #[test]
    fn test_manager_under_two_issuer_names_counts_once() {
        let common = owned_by(row("GOOG", 0, dec!(300)), "ALPHABET INC CL A", &["ALPHA", "BETA"]);
        let class_c = owned_by(row("GOOG", 0, dec!(200)), "ALPHABET INC CL C", &["BETA", "GAMMA"]);

        let merged = by_ticker(&[common, class_c]);
        assert_eq!(merged["GOOG"].owner_count, 3);
        assert_eq!(merged["GOOG"].total_value, dec!(500));

        let prior = vec![owned_by(row("GOOG", 0, dec!(100)), "ALPHABET INC CL A", &["ALPHA"])];
        let current = vec![
            owned_by(row("GOOG", 0, dec!(300)), "ALPHABET INC CL A", &["ALPHA", "BETA"]),
            owned_by(row("GOOG", 0, dec!(200)), "ALPHABET INC CL C", &["BETA"]),
        ];
        let up = emerging(&current, &prior, 10);
        assert_eq!(up[0].current_owners, 2);
        assert_eq!(up[0].owner_change, 1);
    }

    #[test]
    fn test_equal_value_variants_keep_first_issuer_alphabetically() {
        let mut zed = row("X", 1, dec!(10));
        zed.issuer_name = "ZED".to_string();
        let mut alpha = row("X", 1, dec!(10));
        alpha.issuer_name = "ALPHA".to_string();

        assert_eq!(by_ticker(&[zed.clone(), alpha.clone()])["X"].issuer_name, "ALPHA");
        assert_eq!(by_ticker(&[alpha, zed])["X"].issuer_name, "ALPHA");
    }
}
