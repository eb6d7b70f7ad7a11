//! Filing store traits.
//!
//! The engine reads a fixed, already-ingested snapshot of 13F data through
//! [`FilingStore`]. Ingestion, schema, and migrations belong to the store.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::TraitError;
use quorum_core::{Filing, FilingId, Holding, ManagerId, Period, SecurityId};

/// Read-only source of filings, holdings, and ticker mappings.
///
/// Implementations must be safe to call from concurrent requests; the engine
/// never writes through this trait.
#[async_trait]
pub trait FilingStore: Send + Sync {
    /// List filings for a period.
    ///
    /// `manager_ids = None` lists every filer's filings for the period.
    /// With `exclude_restated`, filings carrying `superseded_by` are omitted.
    /// Duplicate live filings for one manager may be returned; the engine
    /// resolves them.
    async fn list_filings(
        &self,
        manager_ids: Option<&[ManagerId]>,
        period: Period,
        exclude_restated: bool,
    ) -> Result<Vec<Filing>, TraitError>;

    /// List the holdings reported by a filing.
    async fn list_holdings(&self, filing_id: &FilingId) -> Result<Vec<Holding>, TraitError>;

    /// Resolve display symbols for security ids.
    ///
    /// Ids without a live mapping are absent from the result.
    async fn resolve_tickers(
        &self,
        security_ids: &[SecurityId],
    ) -> Result<HashMap<SecurityId, String>, TraitError>;
}
