//! Ranked views over aggregate rows.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AggregateRow;
use crate::cohort::Cohort;
use crate::config::AnalyticsConfig;
use crate::ranking::{by_ticker_then_issuer, top_n};

/// Most widely held securities, default order, `consensus_limit` rows.
#[must_use]
pub fn consensus_holdings(rows: &[AggregateRow], config: &AnalyticsConfig) -> Vec<AggregateRow> {
    by_ownership(rows, config.consensus_limit)
}

/// Largest securities by combined value, `top_value_limit` rows.
#[must_use]
pub fn top_by_value(rows: &[AggregateRow], config: &AnalyticsConfig) -> Vec<AggregateRow> {
    top_n(
        rows.to_vec(),
        |r| r.total_value,
        config.top_value_limit,
        by_ticker_then_issuer,
    )
}

/// Securities held by at least `min_conviction_owners` managers, ranked by
/// the largest single position, `conviction_limit` rows.
#[must_use]
pub fn top_conviction(rows: &[AggregateRow], config: &AnalyticsConfig) -> Vec<AggregateRow> {
    let shared: Vec<AggregateRow> = rows
        .iter()
        .filter(|r| r.owner_count >= config.min_conviction_owners)
        .cloned()
        .collect();
    top_n(
        shared,
        |r| r.max_position_pct,
        config.conviction_limit,
        by_ticker_then_issuer,
    )
}

/// Most widely held securities for the period stats, `stats_limit` rows.
#[must_use]
pub fn top_by_ownership(rows: &[AggregateRow], config: &AnalyticsConfig) -> Vec<AggregateRow> {
    by_ownership(rows, config.stats_limit)
}

/// Securities with the largest summed position size, `stats_limit` rows.
#[must_use]
pub fn top_by_aggregate_pct(rows: &[AggregateRow], config: &AnalyticsConfig) -> Vec<AggregateRow> {
    top_n(
        rows.to_vec(),
        |r| r.weighted_pct,
        config.stats_limit,
        by_ticker_then_issuer,
    )
}

/// Largest single positions, `stats_limit` rows.
#[must_use]
pub fn big_bets(rows: &[AggregateRow], config: &AnalyticsConfig) -> Vec<AggregateRow> {
    top_n(
        rows.to_vec(),
        |r| r.max_position_pct,
        config.stats_limit,
        by_ticker_then_issuer,
    )
}

fn by_ownership(rows: &[AggregateRow], limit: usize) -> Vec<AggregateRow> {
    top_n(
        rows.to_vec(),
        |r| (r.owner_count, r.total_value),
        limit,
        by_ticker_then_issuer,
    )
}

/// Cohort-level summary of a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioStats {
    /// Cohort size.
    pub total_managers: usize,

    /// Distinct tickers held across the cohort.
    pub total_unique_stocks: usize,

    /// Combined value of all valued holdings.
    pub total_value: Decimal,

    /// Mean reported holdings count per manager, one decimal.
    pub avg_stocks_per_manager: f64,

    /// Most widely held security.
    pub most_popular: Option<AggregateRow>,
}

/// Summarizes a cohort and its aggregate rows.
#[must_use]
pub fn portfolio_stats(cohort: &Cohort, rows: &[AggregateRow]) -> PortfolioStats {
    let total_unique_stocks = rows
        .iter()
        .map(|r| r.ticker.as_str())
        .collect::<BTreeSet<_>>()
        .len();
    let total_value: Decimal = rows.iter().map(|r| r.total_value).sum();

    let avg_stocks_per_manager = if cohort.is_empty() {
        0.0
    } else {
        let holdings: u64 = cohort.members.iter().map(|m| u64::from(m.holdings_count)).sum();
        round_one_decimal(holdings as f64 / cohort.len() as f64)
    };

    PortfolioStats {
        total_managers: cohort.len(),
        total_unique_stocks,
        total_value,
        avg_stocks_per_manager,
        most_popular: by_ownership(rows, 1).into_iter().next(),
    }
}

fn round_one_decimal(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cohort::CohortMember;
    use approx::assert_relative_eq;
    use quorum_core::{FilingId, ManagerId, Period};
    use rust_decimal_macros::dec;

    fn row(ticker: &str, owners: usize, value: Decimal, max_pct: Option<f64>, weighted: f64) -> AggregateRow {
        AggregateRow {
            ticker: ticker.to_string(),
            issuer_name: format!("{ticker} INC"),
            owner_count: owners,
            total_value: value,
            total_shares: 0,
            avg_position_pct: max_pct,
            max_position_pct: max_pct,
            min_position_pct: max_pct,
            weighted_pct: weighted,
            owner_names: Vec::new(),
        }
    }

    fn rows() -> Vec<AggregateRow> {
        vec![
            row("AAPL", 5, dec!(900), Some(4.0), 12.0),
            row("MSFT", 5, dec!(1000), Some(3.0), 10.0),
            row("NVDA", 1, dec!(5000), Some(40.0), 40.0),
            row("TSLA", 2, dec!(200), None, 0.0),
            row("AMZN", 3, dec!(300), Some(9.0), 15.0),
        ]
    }

    fn tickers(rows: &[AggregateRow]) -> Vec<&str> {
        rows.iter().map(|r| r.ticker.as_str()).collect()
    }

    #[test]
    fn test_consensus_order() {
        let config = AnalyticsConfig::default();
        let view = consensus_holdings(&rows(), &config);
        assert_eq!(tickers(&view), vec!["MSFT", "AAPL", "AMZN", "TSLA", "NVDA"]);
    }

    #[test]
    fn test_top_by_value() {
        let config = AnalyticsConfig::default();
        let view = top_by_value(&rows(), &config);
        assert_eq!(tickers(&view)[0], "NVDA");
    }

    #[test]
    fn test_conviction_requires_shared_ownership() {
        let config = AnalyticsConfig::default();
        let view = top_conviction(&rows(), &config);
        assert_eq!(tickers(&view), vec!["AMZN", "AAPL", "MSFT", "TSLA"]);
    }

    #[test]
    fn test_stats_views_capped() {
        let config = AnalyticsConfig::default().with_stats_limit(2);
        assert_eq!(tickers(&top_by_ownership(&rows(), &config)), vec!["MSFT", "AAPL"]);
        assert_eq!(tickers(&top_by_aggregate_pct(&rows(), &config)), vec!["NVDA", "AMZN"]);
        assert_eq!(tickers(&big_bets(&rows(), &config)), vec!["NVDA", "AMZN"]);
    }

    #[test]
    fn test_portfolio_stats() {
        let member = |id: &str, count: u32| CohortMember {
            manager_id: ManagerId::new(id),
            name: id.to_string(),
            investor: id.to_string(),
            total_value: dec!(1),
            holdings_count: count,
            filing_id: FilingId::new(id),
        };
        let cohort = Cohort {
            period: Period::new(2025, 2).unwrap(),
            members: vec![member("A", 10), member("B", 11), member("C", 11)],
        };
        let stats = portfolio_stats(&cohort, &rows());
        assert_eq!(stats.total_managers, 3);
        assert_eq!(stats.total_unique_stocks, 5);
        assert_eq!(stats.total_value, dec!(7400));
        assert_relative_eq!(stats.avg_stocks_per_manager, 10.7);
        assert_eq!(stats.most_popular.unwrap().ticker, "MSFT");
    }

    #[test]
    fn test_portfolio_stats_empty_cohort() {
        let cohort = Cohort::empty(Period::new(2025, 2).unwrap());
        let stats = portfolio_stats(&cohort, &[]);
        assert_eq!(stats.total_managers, 0);
        assert_relative_eq!(stats.avg_stocks_per_manager, 0.0);
        assert!(stats.most_popular.is_none());
    }
}
