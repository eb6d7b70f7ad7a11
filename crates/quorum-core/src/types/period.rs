//! Calendar-quarter reporting periods.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// Earliest plausible 13F reporting year (Section 13(f) dates from 1975).
pub const MIN_REPORT_YEAR: i32 = 1975;

/// Latest year a period may carry.
pub const MAX_REPORT_YEAR: i32 = 9999;

/// A 13F reporting period: one calendar quarter of one year.
///
/// Periods order by year, then quarter. The only ways to obtain one are the
/// validating constructors and deserialization, which runs the same checks,
/// so a `Period` in hand always has a quarter in `1..=4`. Quarter arithmetic
/// (`previous`, `next`) is total and does not re-check the year bounds.
///
/// # Example
///
/// ```rust
/// use quorum_core::types::Period;
///
/// let q1 = Period::new(2025, 1).unwrap();
/// assert_eq!(q1.previous(), Period::new(2024, 4).unwrap());
/// assert_eq!(q1.to_string(), "Q1 2025");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPeriod")]
pub struct Period {
    year: i32,
    quarter: u8,
}

#[derive(Deserialize)]
struct RawPeriod {
    year: i32,
    quarter: u32,
}

impl TryFrom<RawPeriod> for Period {
    type Error = CoreError;

    fn try_from(raw: RawPeriod) -> Result<Self, Self::Error> {
        Period::new(raw.year, raw.quarter)
    }
}

impl Period {
    /// Creates a period, validating quarter and year.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidPeriod` if the quarter is not in `1..=4` or
    /// the year lies outside `MIN_REPORT_YEAR..=MAX_REPORT_YEAR`.
    pub fn new(year: i32, quarter: u32) -> CoreResult<Self> {
        if !(1..=4).contains(&quarter) {
            return Err(CoreError::invalid_period(
                year,
                quarter,
                "quarter must be between 1 and 4",
            ));
        }
        if !(MIN_REPORT_YEAR..=MAX_REPORT_YEAR).contains(&year) {
            return Err(CoreError::invalid_period(
                year,
                quarter,
                format!("year must be between {MIN_REPORT_YEAR} and {MAX_REPORT_YEAR}"),
            ));
        }
        Ok(Self {
            year,
            quarter: quarter as u8,
        })
    }

    /// Returns the period containing the given date.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidPeriod` if the date's year is out of range.
    pub fn containing(date: NaiveDate) -> CoreResult<Self> {
        Self::new(date.year(), (date.month() - 1) / 3 + 1)
    }

    /// Returns the reporting year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the quarter (1-4).
    #[must_use]
    pub const fn quarter(&self) -> u32 {
        self.quarter as u32
    }

    /// Returns the preceding quarter. Q1 wraps to Q4 of the prior year.
    #[must_use]
    pub const fn previous(&self) -> Self {
        if self.quarter == 1 {
            Self {
                year: self.year - 1,
                quarter: 4,
            }
        } else {
            Self {
                year: self.year,
                quarter: self.quarter - 1,
            }
        }
    }

    /// Returns the following quarter. Q4 wraps to Q1 of the next year.
    #[must_use]
    pub const fn next(&self) -> Self {
        if self.quarter == 4 {
            Self {
                year: self.year + 1,
                quarter: 1,
            }
        } else {
            Self {
                year: self.year,
                quarter: self.quarter + 1,
            }
        }
    }

    /// Steps back `n` quarters.
    #[must_use]
    pub fn quarters_back(&self, n: u32) -> Self {
        (0..n).fold(*self, |p, _| p.previous())
    }

    /// Returns the calendar quarter-end date (the 13F "report date").
    #[must_use]
    pub fn report_date(&self) -> NaiveDate {
        let (month, day) = match self.quarter {
            1 => (3, 31),
            2 => (6, 30),
            3 => (9, 30),
            _ => (12, 31),
        };
        NaiveDate::from_ymd_opt(self.year, month, day)
            .expect("quarter-end dates exist for every period year")
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{} {}", self.quarter, self.year)
    }
}

impl FromStr for Period {
    type Err = CoreError;

    /// Parses `2025Q2`, `2025-Q2`, `Q2 2025` or `Q2-2025` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect::<String>()
            .to_ascii_uppercase();

        let (year, quarter) = if let Some(rest) = compact.strip_prefix('Q') {
            let split = rest.char_indices().nth(1).map_or(rest.len(), |(i, _)| i);
            let (q, y) = rest.split_at(split);
            (y, q)
        } else if let Some((y, q)) = compact.split_once('Q') {
            (y, q)
        } else {
            return Err(CoreError::unparseable_period(s));
        };

        let year: i32 = year
            .parse()
            .map_err(|_| CoreError::unparseable_period(s))?;
        let quarter: u32 = quarter
            .parse()
            .map_err(|_| CoreError::unparseable_period(s))?;
        Self::new(year, quarter)
    }
}
