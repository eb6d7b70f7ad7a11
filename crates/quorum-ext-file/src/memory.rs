//! In-memory filing store.

use std::collections::HashMap;

use async_trait::async_trait;
use dashmap::DashMap;

use quorum_core::{Filing, FilingId, Holding, ManagerId, Period, SecurityId, TickerMap};
use quorum_traits::error::TraitError;
use quorum_traits::filing_store::FilingStore;

// =============================================================================
// IN-MEMORY FILING STORE
// =============================================================================

/// Filing store backed by concurrent maps.
///
/// Builder methods (`with_*`) are convenient for fixtures; `insert_*` methods
/// take `&self` and may be called while the store is shared.
#[derive(Debug, Default)]
pub struct InMemoryFilingStore {
    filings: DashMap<FilingId, Filing>,
    holdings: DashMap<FilingId, Vec<Holding>>,
    tickers: DashMap<SecurityId, String>,
}

impl InMemoryFilingStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filing.
    #[must_use]
    pub fn with_filing(self, filing: Filing) -> Self {
        self.insert_filing(filing);
        self
    }

    /// Add several filings.
    #[must_use]
    pub fn with_filings(self, filings: impl IntoIterator<Item = Filing>) -> Self {
        for filing in filings {
            self.insert_filing(filing);
        }
        self
    }

    /// Add holdings.
    #[must_use]
    pub fn with_holdings(self, holdings: impl IntoIterator<Item = Holding>) -> Self {
        for holding in holdings {
            self.insert_holding(holding);
        }
        self
    }

    /// Add a ticker mapping.
    #[must_use]
    pub fn with_ticker(self, security_id: impl Into<SecurityId>, symbol: impl Into<String>) -> Self {
        self.insert_ticker(security_id.into(), symbol.into());
        self
    }

    /// Add ticker mappings.
    #[must_use]
    pub fn with_tickers(self, tickers: TickerMap) -> Self {
        for (id, symbol) in tickers {
            self.insert_ticker(id, symbol);
        }
        self
    }

    /// Insert or replace a filing.
    pub fn insert_filing(&self, filing: Filing) {
        self.filings.insert(filing.id.clone(), filing);
    }

    /// Append a holding to its filing.
    pub fn insert_holding(&self, holding: Holding) {
        self.holdings
            .entry(holding.filing_id.clone())
            .or_default()
            .push(holding);
    }

    /// Insert or replace a ticker mapping.
    pub fn insert_ticker(&self, security_id: SecurityId, symbol: String) {
        self.tickers.insert(security_id, symbol);
    }

    /// Number of filings stored.
    pub fn filing_count(&self) -> usize {
        self.filings.len()
    }

    /// Number of holdings stored.
    pub fn holding_count(&self) -> usize {
        self.holdings.iter().map(|h| h.value().len()).sum()
    }

    /// Number of ticker mappings stored.
    pub fn ticker_count(&self) -> usize {
        self.tickers.len()
    }
}

#[async_trait]
impl FilingStore for InMemoryFilingStore {
    async fn list_filings(
        &self,
        manager_ids: Option<&[ManagerId]>,
        period: Period,
        exclude_restated: bool,
    ) -> Result<Vec<Filing>, TraitError> {
        let mut filings: Vec<Filing> = self
            .filings
            .iter()
            .map(|entry| entry.value().clone())
            .filter(|f| f.period == period)
            .filter(|f| !(exclude_restated && f.is_restated()))
            .filter(|f| manager_ids.map_or(true, |ids| ids.contains(&f.manager_id)))
            .collect();
        filings.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(filings)
    }

    async fn list_holdings(&self, filing_id: &FilingId) -> Result<Vec<Holding>, TraitError> {
        Ok(self
            .holdings
            .get(filing_id)
            .map(|h| h.value().clone())
            .unwrap_or_default())
    }

    async fn resolve_tickers(
        &self,
        security_ids: &[SecurityId],
    ) -> Result<HashMap<SecurityId, String>, TraitError> {
        Ok(security_ids
            .iter()
            .filter_map(|id| self.tickers.get(id).map(|s| (id.clone(), s.value().clone())))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn period() -> Period {
        Period::new(2025, 2).unwrap()
    }

    fn store() -> InMemoryFilingStore {
        let filed = NaiveDate::from_ymd_opt(2025, 8, 14).unwrap();
        InMemoryFilingStore::new()
            .with_filings([
                Filing::new("F1", "M1", "ALPHA", period(), filed, dec!(100)).superseded_by("F3"),
                Filing::new("F2", "M2", "BETA", period(), filed, dec!(200)),
                Filing::new("F3", "M1", "ALPHA", period(), filed, dec!(110)),
                Filing::new("F4", "M1", "ALPHA", period().previous(), filed, dec!(90)),
            ])
            .with_holdings([
                Holding::new("F2", "037833100", "APPLE INC", Some(dec!(10)), Some(1)),
                Holding::new("F2", "594918104", "MICROSOFT CORP", Some(dec!(20)), Some(2)),
            ])
            .with_ticker("037833100", "AAPL")
    }

    #[tokio::test]
    async fn test_list_filings_filters() {
        let store = store();

        let all = store.list_filings(None, period(), false).await.unwrap();
        assert_eq!(all.len(), 3);

        let live = store.list_filings(None, period(), true).await.unwrap();
        let ids: Vec<_> = live.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["F2", "F3"]);

        let m1 = [ManagerId::new("M1")];
        let only = store.list_filings(Some(&m1), period(), true).await.unwrap();
        assert_eq!(only.len(), 1);
        assert_eq!(only[0].id.as_str(), "F3");
    }

    #[tokio::test]
    async fn test_list_holdings() {
        let store = store();
        assert_eq!(store.list_holdings(&FilingId::new("F2")).await.unwrap().len(), 2);
        assert!(store.list_holdings(&FilingId::new("F9")).await.unwrap().is_empty());
        assert_eq!(store.holding_count(), 2);
    }

    #[tokio::test]
    async fn test_resolve_tickers_omits_unmapped() {
        let store = store();
        let ids = [SecurityId::new("037833100"), SecurityId::new("594918104")];
        let resolved = store.resolve_tickers(&ids).await.unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[&ids[0]], "AAPL");
    }
}
