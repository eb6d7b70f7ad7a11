//! # Quorum Engine
//!
//! Request orchestration for the Quorum 13F holdings engine.
//!
//! This crate provides:
//! - [`HoldingsEngine`]: cohort selection, snapshot loading, and reports
//! - [`EngineConfig`]: thresholds, deadlines, and cache lifetimes (TOML)
//! - TTL caches for cohorts and computed reports
//!
//! ## Architecture
//!
//! ```text
//! FilingStore ─> select_cohort ─> load_snapshot ─> aggregate ─┬─> GrandPortfolioReport
//!   (timeout)     (CohortCache)                                ├─> StatsReport
//!                                                              └─> CohortOverview
//!                                                                   (ReportCache)
//! FilingStore ─> manager_diff ─> ManagerDiffReport
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let store = Arc::new(JsonFilingStore::from_path("filings.json")?);
//! let engine = HoldingsEngine::new(store, EngineConfig::from_file("quorum.toml")?)?;
//!
//! let period = HoldingsEngine::parse_period("2025Q2")?;
//! let report = engine.grand_portfolio(period).await?;
//! for row in &report.consensus {
//!     println!("{} held by {}", row.ticker, row.owner_count);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod reports;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::engine::HoldingsEngine;
    pub use crate::error::{EngineError, EngineResult};
    pub use crate::reports::{GrandPortfolioReport, ManagerDiffReport, StatsReport};
}

// Re-exports
pub use config::EngineConfig;
pub use engine::HoldingsEngine;
pub use error::{EngineError, EngineResult};
pub use reports::{GrandPortfolioReport, ManagerDiffReport, StatsReport};
