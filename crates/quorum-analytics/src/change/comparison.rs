//! Period stats compared against the prior period.
//!
//! Each of the three period stats views is matched by ticker against the same
//! view computed for the prior period. A ticker missing from the prior view is
//! marked new.

use std::collections::HashMap;

use quorum_core::Period;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregation::{big_bets, top_by_aggregate_pct, top_by_ownership, AggregateRow};
use crate::config::AnalyticsConfig;

/// The period stats views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatsMetric {
    /// Most widely held.
    TopOwned,
    /// Largest summed position size.
    AggregatePercent,
    /// Largest single position.
    BigBets,
}

impl StatsMetric {
    /// All metrics in report order.
    pub const ALL: [StatsMetric; 3] = [Self::TopOwned, Self::AggregatePercent, Self::BigBets];

    /// Computes this metric's view over aggregate rows.
    #[must_use]
    pub fn view(self, rows: &[AggregateRow], config: &AnalyticsConfig) -> Vec<AggregateRow> {
        match self {
            Self::TopOwned => top_by_ownership(rows, config),
            Self::AggregatePercent => top_by_aggregate_pct(rows, config),
            Self::BigBets => big_bets(rows, config),
        }
    }
}

/// A current-period row with its prior-period counterpart's figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparedRow {
    /// Current-period row.
    #[serde(flatten)]
    pub current: AggregateRow,

    /// True if the ticker was absent from the prior view.
    pub is_new: bool,

    /// Prior owner count.
    pub previous_owner_count: Option<usize>,

    /// Owner count change.
    pub owner_count_change: Option<i64>,

    /// Prior combined value.
    pub previous_value: Option<Decimal>,

    /// Combined value change.
    pub value_change: Option<Decimal>,

    /// Prior summed position size.
    pub previous_weighted_pct: Option<f64>,

    /// Summed position size change.
    pub weighted_pct_change: Option<f64>,

    /// Prior largest position size.
    pub previous_max_pct: Option<f64>,

    /// Largest position size change.
    pub max_pct_change: Option<f64>,
}

impl ComparedRow {
    fn new(current: AggregateRow, prior: Option<&AggregateRow>) -> Self {
        let Some(prior) = prior else {
            return Self {
                current,
                is_new: true,
                previous_owner_count: None,
                owner_count_change: None,
                previous_value: None,
                value_change: None,
                previous_weighted_pct: None,
                weighted_pct_change: None,
                previous_max_pct: None,
                max_pct_change: None,
            };
        };

        let owner_count_change = i64::try_from(current.owner_count).ok().and_then(|now| {
            i64::try_from(prior.owner_count)
                .ok()
                .map(|before| now - before)
        });
        let max_pct_change = current
            .max_position_pct
            .zip(prior.max_position_pct)
            .map(|(now, before)| now - before);

        Self {
            is_new: false,
            previous_owner_count: Some(prior.owner_count),
            owner_count_change,
            previous_value: Some(prior.total_value),
            value_change: Some(current.total_value - prior.total_value),
            previous_weighted_pct: Some(prior.weighted_pct),
            weighted_pct_change: Some(current.weighted_pct - prior.weighted_pct),
            previous_max_pct: prior.max_position_pct,
            max_pct_change,
            current,
        }
    }
}

/// The three period stats views, each annotated against the prior period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodComparison {
    /// Current period.
    pub period: Period,

    /// Period compared against.
    pub prior_period: Period,

    /// Most widely held.
    pub top_owned: Vec<ComparedRow>,

    /// Largest summed position size.
    pub top_by_aggregate_pct: Vec<ComparedRow>,

    /// Largest single positions.
    pub big_bets: Vec<ComparedRow>,
}

impl PeriodComparison {
    /// Rows for one metric.
    #[must_use]
    pub fn rows(&self, metric: StatsMetric) -> &[ComparedRow] {
        match metric {
            StatsMetric::TopOwned => &self.top_owned,
            StatsMetric::AggregatePercent => &self.top_by_aggregate_pct,
            StatsMetric::BigBets => &self.big_bets,
        }
    }
}

/// Compares one metric's view across two periods.
#[must_use]
pub fn compare_metric(
    metric: StatsMetric,
    current: &[AggregateRow],
    prior: &[AggregateRow],
    config: &AnalyticsConfig,
) -> Vec<ComparedRow> {
    let prior_view = metric.view(prior, config);
    let mut prior_by_ticker: HashMap<&str, &AggregateRow> = HashMap::new();
    for row in &prior_view {
        prior_by_ticker.entry(row.ticker.as_str()).or_insert(row);
    }

    metric
        .view(current, config)
        .into_iter()
        .map(|row| {
            let before = prior_by_ticker.get(row.ticker.as_str()).copied();
            ComparedRow::new(row, before)
        })
        .collect()
}

/// Compares all three stats views of `period` against `prior_period`.
#[must_use]
pub fn compare_periods(
    period: Period,
    current: &[AggregateRow],
    prior_period: Period,
    prior: &[AggregateRow],
    config: &AnalyticsConfig,
) -> PeriodComparison {
    PeriodComparison {
        period,
        prior_period,
        top_owned: compare_metric(StatsMetric::TopOwned, current, prior, config),
        top_by_aggregate_pct: compare_metric(StatsMetric::AggregatePercent, current, prior, config),
        big_bets: compare_metric(StatsMetric::BigBets, current, prior, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::fixtures::row;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    fn with_pct(mut r: AggregateRow, max: f64, weighted: f64) -> AggregateRow {
        r.max_position_pct = Some(max);
        r.weighted_pct = weighted;
        r
    }

    #[test]
    fn test_changes_against_prior_view() {
        let current = vec![
            with_pct(row("AAPL", 9, dec!(900)), 6.0, 30.0),
            with_pct(row("NEW", 4, dec!(100)), 2.0, 5.0),
        ];
        let prior = vec![with_pct(row("AAPL", 7, dec!(1000)), 5.0, 28.0)];
        let period = Period::new(2025, 2).unwrap();

        let cmp = compare_periods(
            period,
            &current,
            period.previous(),
            &prior,
            &AnalyticsConfig::default(),
        );

        let aapl = &cmp.top_owned[0];
        assert_eq!(aapl.current.ticker, "AAPL");
        assert!(!aapl.is_new);
        assert_eq!(aapl.previous_owner_count, Some(7));
        assert_eq!(aapl.owner_count_change, Some(2));
        assert_eq!(aapl.value_change, Some(dec!(-100)));
        assert_relative_eq!(aapl.weighted_pct_change.unwrap(), 2.0);
        assert_relative_eq!(aapl.max_pct_change.unwrap(), 1.0);

        let new = &cmp.top_owned[1];
        assert!(new.is_new);
        assert!(new.previous_value.is_none());
    }

    #[test]
    fn test_ticker_outside_prior_view_is_new() {
        let config = AnalyticsConfig::default().with_stats_limit(1);
        let current = vec![with_pct(row("B", 1, dec!(1)), 9.0, 9.0)];
        let prior = vec![
            with_pct(row("A", 1, dec!(1)), 50.0, 50.0),
            with_pct(row("B", 1, dec!(1)), 8.0, 8.0),
        ];
        let rows = compare_metric(StatsMetric::BigBets, &current, &prior, &config);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_new);
    }
}
