//! # Quorum Ext File
//!
//! File-based and in-memory filing stores for the Quorum holdings engine.
//!
//! This crate provides default [`FilingStore`](quorum_traits::FilingStore)
//! implementations for tests, fixtures, and offline analysis:
//! - In-memory store with builder-style inserts
//! - JSON snapshot store (filings + holdings + optional tickers)
//! - CSV ticker mappings (`cusip,symbol`)
//!
//! Production deployments read from the relational store that owns ingestion.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod json;
mod memory;
mod tickers;

pub use json::*;
pub use memory::*;
pub use tickers::*;

use std::path::Path;

use quorum_traits::error::TraitError;

/// Create a JSON-backed filing store, optionally with a ticker CSV.
pub fn create_file_store(
    snapshot_json: impl AsRef<Path>,
    tickers_csv: Option<&Path>,
) -> Result<JsonFilingStore, TraitError> {
    let store = JsonFilingStore::from_path(snapshot_json)?;
    match tickers_csv {
        Some(path) => store.with_ticker_csv(path),
        None => Ok(store),
    }
}
