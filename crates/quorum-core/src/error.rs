//! Error types for the Quorum core types.
//!
//! Construction of domain values is the only fallible thing in this crate,
//! so the error surface is small.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The main error type for core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Quarter outside 1..=4 or an implausible reporting year.
    #[error("Invalid period {year} Q{quarter}: {reason}")]
    InvalidPeriod {
        /// The requested year.
        year: i32,
        /// The requested quarter.
        quarter: u32,
        /// Why the period was rejected.
        reason: String,
    },

    /// A period string that could not be parsed.
    #[error("Cannot parse period: {input}")]
    UnparseablePeriod {
        /// The raw input.
        input: String,
    },

    /// Empty or malformed identifier.
    #[error("Invalid {kind} identifier: '{value}'")]
    InvalidIdentifier {
        /// Identifier kind (CIK, CUSIP, filing).
        kind: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl CoreError {
    /// Creates an invalid period error.
    #[must_use]
    pub fn invalid_period(year: i32, quarter: u32, reason: impl Into<String>) -> Self {
        Self::InvalidPeriod {
            year,
            quarter,
            reason: reason.into(),
        }
    }

    /// Creates an unparseable period error.
    #[must_use]
    pub fn unparseable_period(input: impl Into<String>) -> Self {
        Self::UnparseablePeriod {
            input: input.into(),
        }
    }

    /// Creates an invalid identifier error.
    #[must_use]
    pub fn invalid_identifier(kind: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            kind,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_period(2025, 5, "quarter must be between 1 and 4");
        assert!(err.to_string().contains("2025 Q5"));
        assert!(err.to_string().contains("between 1 and 4"));

        let err = CoreError::invalid_identifier("CUSIP", "");
        assert!(err.to_string().contains("CUSIP"));
    }
}
