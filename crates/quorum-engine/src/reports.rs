//! Report records returned by the engine.
//!
//! Reports are plain serializable values assembled from analytics output;
//! they carry no behavior beyond construction.

use quorum_analytics::aggregation::{
    consensus_holdings, portfolio_stats, top_by_value, top_conviction, AggregateRow, PortfolioStats,
};
use quorum_analytics::change::{
    compare_periods, emerging, fading, flow_leaders, FlowLeaders, OwnershipChange, PeriodComparison,
};
use quorum_analytics::cohort::{Cohort, CohortFingerprint};
use quorum_analytics::diff::PortfolioDiff;
use quorum_analytics::AnalyticsConfig;
use quorum_core::{FilingId, ManagerId, Period};
use rust_decimal::Decimal;
use serde::Serialize;

/// Aggregated rows for the three periods a grand portfolio report spans.
#[derive(Debug, Clone, Copy)]
pub struct PeriodRows<'a> {
    /// Requested period
    pub current: &'a [AggregateRow],
    /// One quarter back
    pub previous: &'a [AggregateRow],
    /// Two quarters back
    pub two_back: &'a [AggregateRow],
}

/// Cohort-wide holdings and their quarter-over-quarter movement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrandPortfolioReport {
    /// Requested period
    pub period: Period,
    /// Period the one-quarter changes are measured against
    pub prior_period: Period,
    /// Number of cohort members
    pub cohort_size: usize,
    /// Cohort membership fingerprint
    pub cohort_fingerprint: CohortFingerprint,

    /// Most widely held securities
    pub consensus: Vec<AggregateRow>,
    /// Largest combined positions
    pub top_by_value: Vec<AggregateRow>,
    /// Largest single positions among shared holdings
    pub top_conviction: Vec<AggregateRow>,

    /// Securities that gained owners
    pub emerging: Vec<OwnershipChange>,
    /// Securities that lost owners
    pub fading: Vec<OwnershipChange>,

    /// Buy/sell leaders against the previous quarter
    pub one_quarter: FlowLeaders,
    /// Buy/sell leaders against two quarters back
    pub two_quarter: FlowLeaders,

    /// Cohort summary
    pub stats: PortfolioStats,
}

impl GrandPortfolioReport {
    /// Assemble the report for `cohort` from per-period aggregate rows.
    pub fn build(cohort: &Cohort, rows: PeriodRows<'_>, config: &AnalyticsConfig) -> Self {
        Self {
            period: cohort.period,
            prior_period: cohort.period.previous(),
            cohort_size: cohort.len(),
            cohort_fingerprint: cohort.fingerprint(),
            consensus: consensus_holdings(rows.current, config),
            top_by_value: top_by_value(rows.current, config),
            top_conviction: top_conviction(rows.current, config),
            emerging: emerging(rows.current, rows.previous, config.ownership_change_limit),
            fading: fading(rows.current, rows.previous, config.ownership_change_limit),
            one_quarter: flow_leaders(rows.current, rows.previous, config.flow_limit),
            two_quarter: flow_leaders(rows.current, rows.two_back, config.flow_limit),
            stats: portfolio_stats(cohort, rows.current),
        }
    }
}

/// Period stats with each view compared against the previous quarter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    /// Requested period
    pub period: Period,
    /// Number of cohort members
    pub cohort_size: usize,
    /// Cohort summary
    pub stats: PortfolioStats,
    /// Top owned, aggregate percent and big bets views against the prior quarter
    pub comparison: PeriodComparison,
}

impl StatsReport {
    /// Assemble the report from current and prior aggregate rows.
    pub fn build(
        cohort: &Cohort,
        current: &[AggregateRow],
        prior: &[AggregateRow],
        config: &AnalyticsConfig,
    ) -> Self {
        let period = cohort.period;
        Self {
            period,
            cohort_size: cohort.len(),
            stats: portfolio_stats(cohort, current),
            comparison: compare_periods(period, current, period.previous(), prior, config),
        }
    }
}

/// One manager's quarter-over-quarter position changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManagerDiffReport {
    /// Filer
    pub manager_id: ManagerId,
    /// Filer name as reported
    pub name: String,
    /// Cleaned display name
    pub investor: String,
    /// Requested period
    pub period: Period,
    /// Period compared against
    pub prior_period: Period,
    /// Live filing for the requested period
    pub filing_id: FilingId,
    /// Live filing for the prior period, if any
    pub prior_filing_id: Option<FilingId>,
    /// Reported portfolio value
    pub total_value: Decimal,
    /// Position rows and activity counts
    pub diff: PortfolioDiff,
}
