//! Emerging and fading ownership.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::by_ticker;
use crate::aggregation::AggregateRow;
use crate::ranking::{top_n, Ranked};

/// A ticker whose owner count moved between two periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnershipChange {
    /// Display ticker.
    pub ticker: String,

    /// Issuer name.
    pub issuer_name: String,

    /// Owners in the current period.
    pub current_owners: usize,

    /// Owners in the prior period.
    pub previous_owners: usize,

    /// Magnitude of the owner change (always positive).
    pub owner_change: usize,

    /// Combined value on the side the ticker was found (current for
    /// emerging, prior for fading).
    pub total_value: Decimal,
}

impl Ranked for OwnershipChange {
    fn ticker(&self) -> &str {
        &self.ticker
    }

    fn issuer_name(&self) -> &str {
        &self.issuer_name
    }
}

/// Tickers that gained owners, largest gain first.
#[must_use]
pub fn emerging(
    current: &[AggregateRow],
    prior: &[AggregateRow],
    limit: usize,
) -> Vec<OwnershipChange> {
    let prior = by_ticker(prior);
    let changes = by_ticker(current)
        .into_values()
        .filter_map(|now| {
            let before = prior.get(&now.ticker).map_or(0, |p| p.owner_count);
            (now.owner_count > before).then(|| OwnershipChange {
                owner_change: now.owner_count - before,
                current_owners: now.owner_count,
                previous_owners: before,
                total_value: now.total_value,
                ticker: now.ticker,
                issuer_name: now.issuer_name,
            })
        })
        .collect();

    rank_changes(changes, limit)
}

/// Tickers that lost owners, largest loss first.
#[must_use]
pub fn fading(
    current: &[AggregateRow],
    prior: &[AggregateRow],
    limit: usize,
) -> Vec<OwnershipChange> {
    let current = by_ticker(current);
    let changes = by_ticker(prior)
        .into_values()
        .filter_map(|before| {
            let now = current.get(&before.ticker).map_or(0, |c| c.owner_count);
            (before.owner_count > now).then(|| OwnershipChange {
                owner_change: before.owner_count - now,
                current_owners: now,
                previous_owners: before.owner_count,
                total_value: before.total_value,
                ticker: before.ticker,
                issuer_name: before.issuer_name,
            })
        })
        .collect();

    rank_changes(changes, limit)
}

fn rank_changes(changes: Vec<OwnershipChange>, limit: usize) -> Vec<OwnershipChange> {
    top_n(changes, |c| c.owner_change, limit, |a, b| a.ticker.cmp(&b.ticker))
}
