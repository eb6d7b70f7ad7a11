//! Quarter-over-quarter position changes for one manager.
//!
//! [`diff_portfolios`] compares a manager's current filing against the prior
//! one position by position. Holdings that share a ticker within a filing are
//! merged first, so share classes and option lines reported separately count
//! as one position.

use std::collections::BTreeMap;
use std::fmt;

use quorum_core::Holding;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregation::position_pct;
use crate::ranking::Ranked;
use crate::ticker::TickerResolver;

/// What happened to a position between two filings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionActivity {
    /// Not held in the prior filing.
    New,
    /// More shares than before.
    Increased,
    /// Fewer shares than before.
    Decreased,
    /// Same share count.
    Unchanged,
    /// Held before, gone now.
    Sold,
}

impl fmt::Display for PositionActivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::New => "new",
            Self::Increased => "increased",
            Self::Decreased => "decreased",
            Self::Unchanged => "unchanged",
            Self::Sold => "sold",
        };
        f.write_str(label)
    }
}

/// One position with its change since the prior filing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionRow {
    /// Display ticker.
    pub ticker: String,

    /// Issuer name.
    pub issuer_name: String,

    /// Current shares (0 for sold positions).
    pub shares: i64,

    /// Current value (0 for sold positions).
    pub value: Decimal,

    /// Current value as a percent of the current portfolio.
    pub percent_of_portfolio: f64,

    /// Prior shares (0 for new positions).
    pub prev_shares: i64,

    /// Prior value (0 for new positions).
    pub prev_value: Decimal,

    /// Share change.
    pub change_shares: i64,

    /// Value change.
    pub change_value: Decimal,

    /// Share change as a percent of prior shares.
    pub change_percent: Option<f64>,

    /// Change classification.
    pub activity: PositionActivity,
}

impl Ranked for PositionRow {
    fn ticker(&self) -> &str {
        &self.ticker
    }

    fn issuer_name(&self) -> &str {
        &self.issuer_name
    }
}

/// Position counts per activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActivitySummary {
    /// New positions.
    pub new: usize,
    /// Increased positions.
    pub increased: usize,
    /// Decreased positions.
    pub decreased: usize,
    /// Unchanged positions.
    pub unchanged: usize,
    /// Sold positions.
    pub sold: usize,
}

impl ActivitySummary {
    /// Counts the activities of a set of rows.
    #[must_use]
    pub fn from_rows(rows: &[PositionRow]) -> Self {
        let mut summary = Self::default();
        for row in rows {
            match row.activity {
                PositionActivity::New => summary.new += 1,
                PositionActivity::Increased => summary.increased += 1,
                PositionActivity::Decreased => summary.decreased += 1,
                PositionActivity::Unchanged => summary.unchanged += 1,
                PositionActivity::Sold => summary.sold += 1,
            }
        }
        summary
    }

    /// Total positions counted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.new + self.increased + self.decreased + self.unchanged + self.sold
    }
}

/// A manager's position-level changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioDiff {
    /// Rows by portfolio weight descending, then issuer, then ticker.
    pub rows: Vec<PositionRow>,

    /// Counts per activity.
    pub summary: ActivitySummary,
}

#[derive(Debug, Clone)]
struct Position {
    issuer_name: String,
    lead_value: Decimal,
    shares: i64,
    value: Decimal,
}

/// Merges holdings by display ticker. Unknown values and shares count as 0.
fn positions(holdings: &[Holding], resolver: &TickerResolver) -> BTreeMap<String, Position> {
    let mut merged: BTreeMap<String, Position> = BTreeMap::new();
    for holding in holdings {
        let ticker = resolver.resolve(&holding.security_id).to_string();
        let value = holding.value_or_zero();
        let shares = holding.shares_or_zero();

        let position = merged.entry(ticker).or_insert_with(|| Position {
            issuer_name: holding.issuer_name.clone(),
            lead_value: value,
            shares: 0,
            value: Decimal::ZERO,
        });
        if value > position.lead_value
            || (value == position.lead_value && holding.issuer_name < position.issuer_name)
        {
            position.lead_value = value;
            position.issuer_name = holding.issuer_name.clone();
        }
        position.shares = position.shares.saturating_add(shares);
        position.value += value;
    }
    merged
}

fn share_change_pct(change: i64, prior: i64) -> Option<f64> {
    if prior <= 0 {
        return None;
    }
    let change = Decimal::from(change);
    let prior = Decimal::from(prior);
    change
        .checked_div(prior)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .and_then(|p| p.to_f64())
}

/// Diffs a manager's current holdings against the prior filing's.
///
/// With no prior filing every position is [`PositionActivity::New`]. Prior
/// positions missing from the current filing appear as
/// [`PositionActivity::Sold`] rows with zeroed current fields.
#[must_use]
pub fn diff_portfolios(
    current: &[Holding],
    current_total_value: Decimal,
    prior: Option<&[Holding]>,
    resolver: &TickerResolver,
) -> PortfolioDiff {
    let now = positions(current, resolver);
    let before = prior.map(|p| positions(p, resolver)).unwrap_or_default();

    let mut rows: Vec<PositionRow> = Vec::with_capacity(now.len() + before.len());

    for (ticker, position) in &now {
        let percent_of_portfolio = position_pct(position.value, current_total_value).unwrap_or(0.0);
        let row = match before.get(ticker) {
            None => PositionRow {
                ticker: ticker.clone(),
                issuer_name: position.issuer_name.clone(),
                shares: position.shares,
                value: position.value,
                percent_of_portfolio,
                prev_shares: 0,
                prev_value: Decimal::ZERO,
                change_shares: position.shares,
                change_value: position.value,
                change_percent: None,
                activity: PositionActivity::New,
            },
            Some(prev) => {
                let change_shares = position.shares.saturating_sub(prev.shares);
                let activity = match change_shares.signum() {
                    1 => PositionActivity::Increased,
                    -1 => PositionActivity::Decreased,
                    _ => PositionActivity::Unchanged,
                };
                PositionRow {
                    ticker: ticker.clone(),
                    issuer_name: position.issuer_name.clone(),
                    shares: position.shares,
                    value: position.value,
                    percent_of_portfolio,
                    prev_shares: prev.shares,
                    prev_value: prev.value,
                    change_shares,
                    change_value: position.value - prev.value,
                    change_percent: share_change_pct(change_shares, prev.shares),
                    activity,
                }
            }
        };
        rows.push(row);
    }

    for (ticker, prev) in before.iter().filter(|(t, _)| !now.contains_key(*t)) {
        rows.push(PositionRow {
            ticker: ticker.clone(),
            issuer_name: prev.issuer_name.clone(),
            shares: 0,
            value: Decimal::ZERO,
            percent_of_portfolio: 0.0,
            prev_shares: prev.shares,
            prev_value: prev.value,
            change_shares: prev.shares.saturating_neg(),
            change_value: -prev.value,
            change_percent: share_change_pct(prev.shares.saturating_neg(), prev.shares),
            activity: PositionActivity::Sold,
        });
    }

    rows.sort_by(|a, b| {
        b.percent_of_portfolio
            .total_cmp(&a.percent_of_portfolio)
            .then_with(|| a.issuer_name.cmp(&b.issuer_name))
            .then_with(|| a.ticker.cmp(&b.ticker))
    });

    let summary = ActivitySummary::from_rows(&rows);
    PortfolioDiff { rows, summary }
}
