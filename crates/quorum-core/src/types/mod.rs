//! Domain types for 13F holdings analytics.
//!
//! - [`Period`]: a calendar-quarter reporting period
//! - [`ManagerId`], [`SecurityId`], [`FilingId`]: identifier newtypes
//! - [`Filing`], [`Holding`]: the read-only source records

mod filing;
mod ids;
mod period;

pub use filing::{Filing, Holding, TickerMap};
pub use ids::{FilingId, ManagerId, SecurityId};
pub use period::{Period, MAX_REPORT_YEAR, MIN_REPORT_YEAR};
