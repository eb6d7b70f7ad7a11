//! # Quorum Analytics
//!
//! Cross-manager analytics over 13F filings.
//!
//! This crate turns one period's filings into ranked, derived views:
//!
//! - **Cohort**: the largest live filers of a period ([`cohort`])
//! - **Aggregation**: per-security owner counts, values, and position sizes
//!   ([`aggregation`])
//! - **Change**: emerging/fading ownership and buy/sell leaders between two
//!   periods ([`change`])
//! - **Diff**: one manager's position changes quarter over quarter ([`diff`])
//!
//! ## Design Philosophy
//!
//! Every function is pure. Inputs arrive as a [`PeriodSnapshot`] plus an
//! [`AnalyticsConfig`]; nothing here performs I/O, caches, or holds state.
//! Identical inputs always produce identical, identically ordered output.
//!
//! ## Example
//!
//! ```rust
//! use quorum_analytics::prelude::*;
//! use quorum_core::{Filing, Holding, Period};
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//!
//! let period = Period::new(2025, 2).unwrap();
//! let filed = NaiveDate::from_ymd_opt(2025, 8, 14).unwrap();
//! let filings = vec![
//!     Filing::new("F1", "0001", "ALPHA CAPITAL LLC", period, filed, dec!(1000)),
//!     Filing::new("F2", "0002", "BETA PARTNERS LP", period, filed, dec!(2000)),
//! ];
//! let holdings = vec![
//!     Holding::new("F1", "037833100", "APPLE INC", Some(dec!(100)), Some(10)),
//!     Holding::new("F2", "037833100", "APPLE INC", Some(dec!(300)), Some(30)),
//! ];
//!
//! let snapshot = PeriodSnapshot::new(period, &filings, holdings, TickerResolver::empty());
//! let cohort = select_cohort(period, &filings, &CohortCriteria::new(dec!(0), 100));
//! let rows = aggregate(&cohort, &snapshot, &AnalyticsConfig::default());
//!
//! assert_eq!(rows[0].owner_count, 2);
//! assert_eq!(rows[0].avg_position_pct, Some(12.5));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregation;
pub mod change;
pub mod cohort;
pub mod config;
pub mod diff;
pub mod parallel;
pub mod ranking;
pub mod snapshot;
pub mod ticker;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::aggregation::{
        aggregate, big_bets, consensus_holdings, portfolio_stats, top_by_aggregate_pct,
        top_by_ownership, top_by_value, top_conviction, AggregateRow, PortfolioStats,
    };
    pub use crate::change::{
        compare_periods, emerging, fading, flow_leaders, top_buys, top_sells, BuySellRow,
        ComparedRow, FlowDirection, FlowLeaders, OwnershipChange, PeriodComparison, RankMode,
        StatsMetric,
    };
    pub use crate::cohort::{
        cohort_overview, select_cohort, Cohort, CohortCriteria, CohortFingerprint, CohortMember,
        CohortOverview, CohortOverviewRow,
    };
    pub use crate::config::AnalyticsConfig;
    pub use crate::diff::{
        diff_portfolios, ActivitySummary, PortfolioDiff, PositionActivity, PositionRow,
    };
    pub use crate::ranking::{by_ticker_then_issuer, top_n, RankKey, Ranked};
    pub use crate::snapshot::{resolve_live_filings, PeriodSnapshot};
    pub use crate::ticker::TickerResolver;
}

// Re-export commonly used types at crate root
pub use aggregation::{aggregate, AggregateRow, PortfolioStats};
pub use cohort::{select_cohort, Cohort, CohortCriteria, CohortFingerprint, CohortMember};
pub use config::AnalyticsConfig;
pub use diff::{diff_portfolios, PortfolioDiff};
pub use snapshot::PeriodSnapshot;
pub use ticker::TickerResolver;
