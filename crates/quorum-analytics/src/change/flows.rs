//! Buy and sell leaders at cohort level.
//!
//! A flow is the change in a ticker's combined cohort value between two
//! periods. Buys are positive flows, sells negative; sells are reported as
//! positive magnitudes so both lists rank the same way.

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::by_ticker;
use crate::aggregation::AggregateRow;
use crate::ranking::{by_ticker_then_issuer, top_n, Ranked};

/// Percent change reported for a ticker absent from the compared period.
pub const FULL_CHANGE_PCT: f64 = 100.0;

/// Direction of a value flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowDirection {
    /// Combined value rose.
    Buy,
    /// Combined value fell.
    Sell,
}

impl fmt::Display for FlowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// Ranking key for buy/sell leaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankMode {
    /// Absolute value change.
    #[default]
    Value,
    /// Percent change relative to the prior value.
    Percent,
}

/// One ticker's value flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuySellRow {
    /// Display ticker.
    pub ticker: String,

    /// Issuer name.
    pub issuer_name: String,

    /// Buy or sell.
    pub direction: FlowDirection,

    /// Combined value in the current period (0 if absent).
    pub current_value: Decimal,

    /// Combined value in the prior period (0 if absent).
    pub previous_value: Decimal,

    /// Magnitude of the value change.
    pub value_change: Decimal,

    /// Magnitude of the change as a percent of the prior value.
    ///
    /// Exactly 100 when the ticker is absent from one side; `None` when
    /// the prior value is zero.
    pub pct_change: Option<f64>,
}

impl Ranked for BuySellRow {
    fn ticker(&self) -> &str {
        &self.ticker
    }

    fn issuer_name(&self) -> &str {
        &self.issuer_name
    }
}

/// Computes every non-zero flow between two periods, ordered by ticker.
#[must_use]
pub fn value_flows(current: &[AggregateRow], prior: &[AggregateRow]) -> Vec<BuySellRow> {
    let current = by_ticker(current);
    let prior = by_ticker(prior);
    let mut flows = Vec::new();

    for now in current.values() {
        let row = match prior.get(&now.ticker) {
            None => BuySellRow {
                ticker: now.ticker.clone(),
                issuer_name: now.issuer_name.clone(),
                direction: FlowDirection::Buy,
                current_value: now.total_value,
                previous_value: Decimal::ZERO,
                value_change: now.total_value,
                pct_change: Some(FULL_CHANGE_PCT),
            },
            Some(before) => {
                let change = now.total_value - before.total_value;
                if change.is_zero() {
                    continue;
                }
                BuySellRow {
                    ticker: now.ticker.clone(),
                    issuer_name: now.issuer_name.clone(),
                    direction: if change > Decimal::ZERO {
                        FlowDirection::Buy
                    } else {
                        FlowDirection::Sell
                    },
                    current_value: now.total_value,
                    previous_value: before.total_value,
                    value_change: change.abs(),
                    pct_change: pct_of(change.abs(), before.total_value),
                }
            }
        };
        flows.push(row);
    }

    for before in prior.values().filter(|p| !current.contains_key(&p.ticker)) {
        flows.push(BuySellRow {
            ticker: before.ticker.clone(),
            issuer_name: before.issuer_name.clone(),
            direction: FlowDirection::Sell,
            current_value: Decimal::ZERO,
            previous_value: before.total_value,
            value_change: before.total_value,
            pct_change: Some(FULL_CHANGE_PCT),
        });
    }

    flows.retain(|f| !f.value_change.is_zero());
    flows.sort_by(|a, b| by_ticker_then_issuer(a, b));
    flows
}

fn pct_of(change: Decimal, base: Decimal) -> Option<f64> {
    if base <= Decimal::ZERO {
        return None;
    }
    change
        .checked_div(base)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .and_then(|p| p.to_f64())
}

/// Ranks flows of one direction.
#[must_use]
pub fn rank_flows(
    flows: &[BuySellRow],
    direction: FlowDirection,
    mode: RankMode,
    limit: usize,
) -> Vec<BuySellRow> {
    let selected: Vec<BuySellRow> = flows
        .iter()
        .filter(|f| f.direction == direction)
        .cloned()
        .collect();
    match mode {
        RankMode::Value => top_n(selected, |f| f.value_change, limit, by_ticker_then_issuer),
        RankMode::Percent => top_n(selected, |f| f.pct_change, limit, by_ticker_then_issuer),
    }
}

/// Largest cohort-level buys.
#[must_use]
pub fn top_buys(
    current: &[AggregateRow],
    prior: &[AggregateRow],
    mode: RankMode,
    limit: usize,
) -> Vec<BuySellRow> {
    rank_flows(&value_flows(current, prior), FlowDirection::Buy, mode, limit)
}

/// Largest cohort-level sells.
#[must_use]
pub fn top_sells(
    current: &[AggregateRow],
    prior: &[AggregateRow],
    mode: RankMode,
    limit: usize,
) -> Vec<BuySellRow> {
    rank_flows(&value_flows(current, prior), FlowDirection::Sell, mode, limit)
}

/// Buy and sell leaders over one horizon, by value and by percent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlowLeaders {
    /// Largest buys by value change.
    pub buys_by_value: Vec<BuySellRow>,

    /// Largest sells by value change.
    pub sells_by_value: Vec<BuySellRow>,

    /// Largest buys by percent change.
    pub buys_by_percent: Vec<BuySellRow>,

    /// Largest sells by percent change.
    pub sells_by_percent: Vec<BuySellRow>,
}

/// Computes all four leader lists for one horizon.
#[must_use]
pub fn flow_leaders(current: &[AggregateRow], prior: &[AggregateRow], limit: usize) -> FlowLeaders {
    let flows = value_flows(current, prior);
    FlowLeaders {
        buys_by_value: rank_flows(&flows, FlowDirection::Buy, RankMode::Value, limit),
        sells_by_value: rank_flows(&flows, FlowDirection::Sell, RankMode::Value, limit),
        buys_by_percent: rank_flows(&flows, FlowDirection::Buy, RankMode::Percent, limit),
        sells_by_percent: rank_flows(&flows, FlowDirection::Sell, RankMode::Percent, limit),
    }
}
