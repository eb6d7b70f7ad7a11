//! JSON snapshot filing store.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use quorum_core::{Filing, FilingId, Holding, ManagerId, Period, SecurityId, TickerMap};
use quorum_traits::error::TraitError;
use quorum_traits::filing_store::FilingStore;

use crate::memory::InMemoryFilingStore;
use crate::tickers::load_ticker_csv;

/// On-disk snapshot of filings and holdings.
///
/// ```json
/// {
///   "filings": [{"id": "F1", "manager_id": "0001067983", "name": "BERKSHIRE HATHAWAY INC",
///                "period": {"year": 2025, "quarter": 2}, "date_filed": "2025-08-14",
///                "total_value": "257000000000", "holdings_count": 41}],
///   "holdings": [{"filing_id": "F1", "security_id": "037833100", "issuer_name": "APPLE INC",
///                 "value": "57000000000", "shares_or_principal": 280000000}],
///   "tickers": {"037833100": "AAPL"}
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilingSnapshot {
    /// Filings, live and restated.
    pub filings: Vec<Filing>,

    /// Holdings of every filing.
    #[serde(default)]
    pub holdings: Vec<Holding>,

    /// Optional embedded ticker mapping.
    #[serde(default)]
    pub tickers: TickerMap,
}

/// Filing store loaded from a JSON snapshot file.
#[derive(Debug)]
pub struct JsonFilingStore {
    file_path: PathBuf,
    inner: InMemoryFilingStore,
}

impl JsonFilingStore {
    /// Load a store from a JSON snapshot.
    pub fn from_path(file_path: impl AsRef<Path>) -> Result<Self, TraitError> {
        let file_path = file_path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&file_path)?;
        let snapshot: FilingSnapshot =
            serde_json::from_str(&content).map_err(|e| TraitError::ParseError(e.to_string()))?;

        log::info!(
            "loaded {} filings and {} holdings from {}",
            snapshot.filings.len(),
            snapshot.holdings.len(),
            file_path.display()
        );

        let inner = InMemoryFilingStore::new()
            .with_filings(snapshot.filings)
            .with_holdings(snapshot.holdings)
            .with_tickers(snapshot.tickers);

        Ok(Self { file_path, inner })
    }

    /// Add ticker mappings from a `cusip,symbol` CSV file.
    ///
    /// CSV rows override mappings embedded in the snapshot.
    pub fn with_ticker_csv(self, csv_path: impl AsRef<Path>) -> Result<Self, TraitError> {
        let tickers = load_ticker_csv(csv_path)?;
        Ok(Self {
            file_path: self.file_path,
            inner: self.inner.with_tickers(tickers),
        })
    }

    /// Path the snapshot was loaded from.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Number of filings loaded.
    pub fn filing_count(&self) -> usize {
        self.inner.filing_count()
    }
}

#[async_trait]
impl FilingStore for JsonFilingStore {
    async fn list_filings(
        &self,
        manager_ids: Option<&[ManagerId]>,
        period: Period,
        exclude_restated: bool,
    ) -> Result<Vec<Filing>, TraitError> {
        self.inner
            .list_filings(manager_ids, period, exclude_restated)
            .await
    }

    async fn list_holdings(&self, filing_id: &FilingId) -> Result<Vec<Holding>, TraitError> {
        self.inner.list_holdings(filing_id).await
    }

    async fn resolve_tickers(
        &self,
        security_ids: &[SecurityId],
    ) -> Result<HashMap<SecurityId, String>, TraitError> {
        self.inner.resolve_tickers(security_ids).await
    }
}
