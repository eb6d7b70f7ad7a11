//! Cross-manager holdings aggregation.
//!
//! This module groups the holdings of every cohort member by security:
//!
//! - **Aggregation**: one [`AggregateRow`] per `(ticker, issuer)` with owner
//!   counts, value and share sums, and position-size statistics
//! - **Views**: ranked slices of the aggregate (consensus, top by value,
//!   conviction, period stats) plus [`PortfolioStats`]
//!
//! All functions are pure - they take a cohort and a snapshot and return
//! rows without touching any store.
//!
//! # Example
//!
//! ```rust,ignore
//! use quorum_analytics::prelude::*;
//!
//! let rows = aggregate(&cohort, &snapshot, &AnalyticsConfig::default());
//! for row in consensus_holdings(&rows, &config) {
//!     println!("{}: {} owners", row.ticker, row.owner_count);
//! }
//! ```

mod views;

pub use views::*;

use std::collections::{BTreeMap, BTreeSet};

use quorum_core::Filing;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cohort::Cohort;
use crate::config::AnalyticsConfig;
use crate::parallel::maybe_parallel_map;
use crate::ranking::{by_ticker_then_issuer, rank_desc, Ranked};
use crate::snapshot::PeriodSnapshot;

/// Cohort-wide aggregate of one security.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    /// Display ticker.
    pub ticker: String,

    /// Issuer name as reported.
    pub issuer_name: String,

    /// Distinct managers holding the security.
    pub owner_count: usize,

    /// Sum of reported values.
    pub total_value: Decimal,

    /// Sum of shares or principal (unknown counts as zero).
    pub total_shares: i64,

    /// Mean position size across contributing holdings, as a percent of the
    /// owning portfolio.
    pub avg_position_pct: Option<f64>,

    /// Largest position size (percent of portfolio).
    pub max_position_pct: Option<f64>,

    /// Smallest position size (percent of portfolio).
    pub min_position_pct: Option<f64>,

    /// Sum of position sizes across contributing holdings.
    pub weighted_pct: f64,

    /// Owner names, alphabetical.
    pub owner_names: Vec<String>,
}

impl Ranked for AggregateRow {
    fn ticker(&self) -> &str {
        &self.ticker
    }

    fn issuer_name(&self) -> &str {
        &self.issuer_name
    }
}

/// Position size of `value` in a portfolio worth `total`, in percent.
///
/// `None` when the portfolio total is not positive.
#[must_use]
pub fn position_pct(value: Decimal, total: Decimal) -> Option<f64> {
    if total <= Decimal::ZERO {
        return None;
    }
    value
        .checked_div(total)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .and_then(|pct| pct.to_f64())
}

/// One manager's contribution to one security group.
///
/// `positions` keeps each holding's value so position sizes are measured
/// per holding, while ownership counts the manager once.
#[derive(Debug, Clone)]
struct Contribution {
    value: Decimal,
    shares: i64,
    positions: Vec<Decimal>,
}

/// Groups one filing's valued holdings by `(ticker, issuer)`.
fn group_filing(
    filing: &Filing,
    snapshot: &PeriodSnapshot,
) -> BTreeMap<(String, String), Contribution> {
    let mut groups: BTreeMap<(String, String), Contribution> = BTreeMap::new();

    for holding in snapshot.holdings_for(&filing.id) {
        let Some(value) = holding.value else {
            continue;
        };
        let ticker = snapshot.tickers().resolve(&holding.security_id).to_string();
        let entry = groups
            .entry((ticker, holding.issuer_name.clone()))
            .or_insert(Contribution {
                value: Decimal::ZERO,
                shares: 0,
                positions: Vec::new(),
            });
        entry.value += value;
        entry.shares = entry.shares.saturating_add(holding.shares_or_zero());
        entry.positions.push(value);
    }

    groups
}

#[derive(Debug, Default)]
struct Accumulator {
    owner_count: usize,
    total_value: Decimal,
    total_shares: i64,
    pct_sum: f64,
    pct_count: usize,
    pct_max: Option<f64>,
    pct_min: Option<f64>,
    owner_names: BTreeSet<String>,
}

impl Accumulator {
    fn add(&mut self, filing: &Filing, contribution: &Contribution) {
        self.owner_count += 1;
        self.total_value += contribution.value;
        self.total_shares = self.total_shares.saturating_add(contribution.shares);
        for pct in contribution
            .positions
            .iter()
            .filter_map(|value| position_pct(*value, filing.total_value))
        {
            self.pct_sum += pct;
            self.pct_count += 1;
            self.pct_max = Some(self.pct_max.map_or(pct, |m| m.max(pct)));
            self.pct_min = Some(self.pct_min.map_or(pct, |m| m.min(pct)));
        }
        self.owner_names.insert(filing.name.clone());
    }

    fn into_row(self, ticker: String, issuer_name: String) -> AggregateRow {
        let avg_position_pct = (self.pct_count > 0).then(|| self.pct_sum / self.pct_count as f64);
        AggregateRow {
            ticker,
            issuer_name,
            owner_count: self.owner_count,
            total_value: self.total_value,
            total_shares: self.total_shares,
            avg_position_pct,
            max_position_pct: self.pct_max,
            min_position_pct: self.pct_min,
            weighted_pct: self.pct_sum,
            owner_names: self.owner_names.into_iter().collect(),
        }
    }
}

/// Aggregates the holdings of every cohort member by security.
///
/// Only holdings with a reported value count: they drive ownership, value
/// sums, and position statistics. A manager owns a security once however
/// many holdings report it, but each holding is its own position size. Holdings of a filing whose total is zero
/// still count toward ownership and sums but not toward the percentages.
///
/// Rows come back in the default order: owner count descending, total value
/// descending, then ticker and issuer ascending. Identical input always
/// produces identical output.
#[must_use]
pub fn aggregate(
    cohort: &Cohort,
    snapshot: &PeriodSnapshot,
    config: &AnalyticsConfig,
) -> Vec<AggregateRow> {
    let filings: Vec<&Filing> = cohort
        .members
        .iter()
        .filter_map(|m| snapshot.filing_for(&m.manager_id))
        .collect();

    let grouped = maybe_parallel_map(&filings, config, |filing| {
        (*filing, group_filing(filing, snapshot))
    });

    let mut merged: BTreeMap<(String, String), Accumulator> = BTreeMap::new();
    for (filing, groups) in grouped {
        for (key, contribution) in groups {
            merged.entry(key).or_default().add(filing, &contribution);
        }
    }

    let mut rows: Vec<AggregateRow> = merged
        .into_iter()
        .map(|((ticker, issuer), acc)| acc.into_row(ticker, issuer))
        .collect();
    sort_default(&mut rows);

    log::debug!(
        "aggregated {} filings into {} securities for {}",
        filings.len(),
        rows.len(),
        snapshot.period()
    );

    rows
}

/// Sorts rows in the default aggregate order.
pub fn sort_default(rows: &mut [AggregateRow]) {
    rank_desc(
        rows,
        |r| (r.owner_count, r.total_value),
        by_ticker_then_issuer,
    );
}
