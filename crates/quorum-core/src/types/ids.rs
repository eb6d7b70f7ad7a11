//! Identifier types used across the holdings engine.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// Filer identifier (SEC Central Index Key).
///
/// Opaque to the engine; equality is exact string equality.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManagerId(pub String);

impl ManagerId {
    /// Create a new manager ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ManagerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ManagerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ManagerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Security identifier (CUSIP-like).
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecurityId(pub String);

impl SecurityId {
    /// Create a new security ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse a CUSIP, trimming whitespace and upper-casing.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidIdentifier` unless the result is nine
    /// ASCII alphanumeric characters.
    pub fn parse_cusip(raw: &str) -> CoreResult<Self> {
        let cusip = raw.trim().to_ascii_uppercase();
        if cusip.len() == 9 && cusip.chars().all(|c| c.is_ascii_alphanumeric()) {
            Ok(Self(cusip))
        } else {
            Err(CoreError::invalid_identifier("CUSIP", raw))
        }
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SecurityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SecurityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SecurityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Filing identifier (accession number or storage key).
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilingId(pub String);

impl FilingId {
    /// Create a new filing ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FilingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FilingId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
