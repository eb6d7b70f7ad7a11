//! Engine error types.

use quorum_core::{CoreError, ManagerId, Period};
use quorum_traits::TraitError;
use thiserror::Error;

/// Engine error type.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Invalid reporting period
    #[error("invalid period: {0}")]
    InvalidPeriod(#[source] CoreError),

    /// Malformed identifier or other rejected input
    #[error("invalid input: {0}")]
    InvalidInput(#[source] CoreError),

    /// Manager has no live filing for the period
    #[error("no live filing for manager {manager_id} in {period}")]
    ManagerNotFound {
        /// Requested manager
        manager_id: ManagerId,
        /// Requested period
        period: Period,
    },

    /// A store call exceeded its deadline
    #[error("store call timed out: {operation}")]
    Timeout {
        /// Store operation that timed out
        operation: String,
    },

    /// Store error
    #[error("store error: {0}")]
    Store(#[from] TraitError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl EngineError {
    /// Create a manager-not-found error.
    #[must_use]
    pub fn manager_not_found(manager_id: ManagerId, period: Period) -> Self {
        Self::ManagerNotFound { manager_id, period }
    }

    /// Create a timeout error.
    #[must_use]
    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::Timeout {
            operation: operation.into(),
        }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<CoreError> for EngineError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidPeriod { .. } | CoreError::UnparseablePeriod { .. } => {
                EngineError::InvalidPeriod(e)
            }
            CoreError::InvalidIdentifier { .. } => EngineError::InvalidInput(e),
        }
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
