//! # Quorum Traits
//!
//! Trait definitions for the Quorum holdings engine.
//!
//! This crate contains ONLY trait definitions and their error type. Storage
//! implementations live in extension crates (`quorum-ext-file`, or a
//! relational store owned by the surrounding application).
//!
//! ## Module Structure
//!
//! - [`filing_store`]: read-only access to filings, holdings, and ticker mappings
//! - [`error`]: the shared [`TraitError`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod filing_store;

// Re-export commonly used types
pub use error::TraitError;
pub use filing_store::FilingStore;
