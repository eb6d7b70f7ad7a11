//! # Quorum Core
//!
//! Core types for the Quorum 13F holdings analytics library.
//!
//! This crate provides the building blocks shared by every other Quorum crate:
//!
//! - **Types**: reporting periods, filer/security/filing identifiers, filings and holdings
//! - **Names**: investor display-name cleanup for filer names
//! - **Errors**: validation errors raised when constructing domain values
//!
//! ## Example
//!
//! ```rust
//! use quorum_core::prelude::*;
//!
//! let period = Period::new(2025, 2).unwrap();
//! assert_eq!(period.previous().to_string(), "Q1 2025");
//! assert_eq!(investor_display_name("LONE PINE CAPITAL LLC"), "LONE PINE CAPITAL");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod names;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::names::investor_display_name;
    pub use crate::types::{
        Filing, FilingId, Holding, ManagerId, Period, SecurityId, TickerMap,
    };
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use names::investor_display_name;
pub use types::{Filing, FilingId, Holding, ManagerId, Period, SecurityId, TickerMap};
