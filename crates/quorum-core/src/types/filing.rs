//! 13F filings and the holdings they report.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{FilingId, ManagerId, Period, SecurityId};

/// Security id to display symbol, as supplied by the ticker mapping source.
pub type TickerMap = HashMap<SecurityId, String>;

/// One manager's 13F report for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filing {
    /// Storage identifier.
    pub id: FilingId,

    /// Filer (CIK).
    pub manager_id: ManagerId,

    /// Filer name as reported.
    pub name: String,

    /// Reporting period.
    pub period: Period,

    /// Date the filing was submitted.
    pub date_filed: NaiveDate,

    /// Reported portfolio value. May be zero.
    pub total_value: Decimal,

    /// Number of holdings reported.
    #[serde(default)]
    pub holdings_count: u32,

    /// Later filing that restates this one, if any.
    #[serde(default)]
    pub superseded_by: Option<FilingId>,
}

impl Filing {
    /// Creates a live filing.
    pub fn new(
        id: impl Into<String>,
        manager_id: impl Into<ManagerId>,
        name: impl Into<String>,
        period: Period,
        date_filed: NaiveDate,
        total_value: Decimal,
    ) -> Self {
        Self {
            id: FilingId::new(id),
            manager_id: manager_id.into(),
            name: name.into(),
            period,
            date_filed,
            total_value,
            holdings_count: 0,
            superseded_by: None,
        }
    }

    /// Sets the reported holdings count.
    #[must_use]
    pub fn with_holdings_count(mut self, count: u32) -> Self {
        self.holdings_count = count;
        self
    }

    /// Marks this filing as restated by `other`.
    #[must_use]
    pub fn superseded_by(mut self, other: impl Into<String>) -> Self {
        self.superseded_by = Some(FilingId::new(other));
        self
    }

    /// Returns true if a later filing restates this one.
    #[must_use]
    pub fn is_restated(&self) -> bool {
        self.superseded_by.is_some()
    }

    /// Returns true if the portfolio value can serve as a percentage base.
    #[must_use]
    pub fn has_positive_value(&self) -> bool {
        self.total_value > Decimal::ZERO
    }
}

/// A single line of a 13F filing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Owning filing.
    pub filing_id: FilingId,

    /// Security identifier (CUSIP).
    pub security_id: SecurityId,

    /// Issuer name as reported.
    pub issuer_name: String,

    /// Title of class (e.g. "COM", "CL A").
    #[serde(default)]
    pub class_title: String,

    /// Reported value. `None` means unknown, not zero.
    pub value: Option<Decimal>,

    /// Shares or principal amount.
    pub shares_or_principal: Option<i64>,
}

impl Holding {
    /// Creates a holding.
    pub fn new(
        filing_id: impl Into<String>,
        security_id: impl Into<SecurityId>,
        issuer_name: impl Into<String>,
        value: Option<Decimal>,
        shares_or_principal: Option<i64>,
    ) -> Self {
        Self {
            filing_id: FilingId::new(filing_id),
            security_id: security_id.into(),
            issuer_name: issuer_name.into(),
            class_title: String::new(),
            value,
            shares_or_principal,
        }
    }

    /// Sets the class title.
    #[must_use]
    pub fn with_class_title(mut self, class_title: impl Into<String>) -> Self {
        self.class_title = class_title.into();
        self
    }

    /// Returns the shares, treating an unknown count as zero.
    #[must_use]
    pub fn shares_or_zero(&self) -> i64 {
        self.shares_or_principal.unwrap_or(0)
    }

    /// Returns the value, treating an unknown value as zero.
    #[must_use]
    pub fn value_or_zero(&self) -> Decimal {
        self.value.unwrap_or(Decimal::ZERO)
    }
}
