//! Read-only period snapshots.
//!
//! A [`PeriodSnapshot`] is everything one computation needs for one period:
//! the live filings (one per manager), their holdings, and the ticker
//! resolver. It is built once per request and passed by reference.

use std::collections::{BTreeMap, HashMap};

use log::warn;
use quorum_core::{Filing, FilingId, Holding, ManagerId, Period};

use crate::ticker::TickerResolver;

/// Reduces raw filings to the live filing of each manager for `period`.
///
/// Filings of other periods and restated filings are dropped. When a manager
/// still has more than one live filing, the latest `date_filed` wins (ties go
/// to the greater filing id) and the inconsistency is logged.
///
/// Output is ordered by manager id.
#[must_use]
pub fn resolve_live_filings(period: Period, filings: &[Filing]) -> Vec<Filing> {
    let mut by_manager: BTreeMap<&ManagerId, &Filing> = BTreeMap::new();

    for filing in filings
        .iter()
        .filter(|f| f.period == period && !f.is_restated())
    {
        match by_manager.get(&filing.manager_id) {
            None => {
                by_manager.insert(&filing.manager_id, filing);
            }
            Some(kept) => {
                let newer = (filing.date_filed, &filing.id) > (kept.date_filed, &kept.id);
                let (winner, loser) = if newer { (filing, *kept) } else { (*kept, filing) };
                warn!(
                    "duplicate live filings for manager {} in {}: keeping {} (filed {}), ignoring {} (filed {})",
                    filing.manager_id, period, winner.id, winner.date_filed, loser.id, loser.date_filed
                );
                by_manager.insert(&filing.manager_id, winner);
            }
        }
    }

    by_manager.into_values().cloned().collect()
}

/// Live filings, holdings, and ticker mappings for one period.
#[derive(Debug, Clone)]
pub struct PeriodSnapshot {
    period: Period,
    filings: Vec<Filing>,
    holdings: HashMap<FilingId, Vec<Holding>>,
    tickers: TickerResolver,
}

impl PeriodSnapshot {
    /// Builds a snapshot from raw store output.
    ///
    /// Filings pass through [`resolve_live_filings`]; holdings that do not
    /// belong to a surviving filing are discarded.
    #[must_use]
    pub fn new(
        period: Period,
        filings: &[Filing],
        holdings: Vec<Holding>,
        tickers: TickerResolver,
    ) -> Self {
        let filings = resolve_live_filings(period, filings);

        let mut grouped: HashMap<FilingId, Vec<Holding>> = filings
            .iter()
            .map(|f| (f.id.clone(), Vec::new()))
            .collect();
        for holding in holdings {
            if let Some(bucket) = grouped.get_mut(&holding.filing_id) {
                bucket.push(holding);
            }
        }

        Self {
            period,
            filings,
            holdings: grouped,
            tickers,
        }
    }

    /// Creates a snapshot with no filings.
    #[must_use]
    pub fn empty(period: Period) -> Self {
        Self {
            period,
            filings: Vec::new(),
            holdings: HashMap::new(),
            tickers: TickerResolver::empty(),
        }
    }

    /// Reporting period.
    #[must_use]
    pub fn period(&self) -> Period {
        self.period
    }

    /// Live filings, one per manager, ordered by manager id.
    #[must_use]
    pub fn filings(&self) -> &[Filing] {
        &self.filings
    }

    /// The live filing of a manager, if any.
    #[must_use]
    pub fn filing_for(&self, manager_id: &ManagerId) -> Option<&Filing> {
        self.filings
            .binary_search_by(|f| f.manager_id.cmp(manager_id))
            .ok()
            .map(|i| &self.filings[i])
    }

    /// Holdings of a filing (empty for unknown filings).
    #[must_use]
    pub fn holdings_for(&self, filing_id: &FilingId) -> &[Holding] {
        self.holdings.get(filing_id).map_or(&[], Vec::as_slice)
    }

    /// Ticker resolver for this snapshot.
    #[must_use]
    pub fn tickers(&self) -> &TickerResolver {
        &self.tickers
    }

    /// Number of live filings.
    #[must_use]
    pub fn filing_count(&self) -> usize {
        self.filings.len()
    }
}
