//! Engine configuration.

use std::path::Path;
use std::time::Duration;

use quorum_analytics::cohort::{CohortCriteria, DEFAULT_MAX_COHORT_SIZE, DEFAULT_MIN_TOTAL_VALUE};
use quorum_analytics::AnalyticsConfig;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Engine configuration.
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```toml
/// min_total_value = "1000000000"
/// store_timeout_ms = 2000
///
/// [analytics]
/// flow_limit = 25
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Cohort members must report a portfolio value above this
    #[serde(default = "default_min_total_value")]
    pub min_total_value: Decimal,

    /// Maximum cohort size
    #[serde(default = "default_max_cohort_size")]
    pub max_cohort_size: usize,

    /// Deadline for each store call, in milliseconds
    #[serde(default = "default_store_timeout_ms")]
    pub store_timeout_ms: u64,

    /// Lifetime of cached reports, in seconds
    #[serde(default = "default_report_ttl_secs")]
    pub report_ttl_secs: u64,

    /// Lifetime of cached cohorts, in seconds
    #[serde(default = "default_cohort_ttl_secs")]
    pub cohort_ttl_secs: u64,

    /// Ranking limits and parallelism
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

fn default_min_total_value() -> Decimal {
    DEFAULT_MIN_TOTAL_VALUE
}

fn default_max_cohort_size() -> usize {
    DEFAULT_MAX_COHORT_SIZE
}

fn default_store_timeout_ms() -> u64 {
    5_000
}

fn default_report_ttl_secs() -> u64 {
    3_600
}

fn default_cohort_ttl_secs() -> u64 {
    300
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_total_value: default_min_total_value(),
            max_cohort_size: default_max_cohort_size(),
            store_timeout_ms: default_store_timeout_ms(),
            report_ttl_secs: default_report_ttl_secs(),
            cohort_ttl_secs: default_cohort_ttl_secs(),
            analytics: AnalyticsConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| EngineError::config(format!("{}: {e}", path.display())))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> EngineResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| EngineError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> EngineResult<()> {
        if self.min_total_value.is_sign_negative() {
            return Err(EngineError::config("min_total_value must not be negative"));
        }
        if self.max_cohort_size == 0 {
            return Err(EngineError::config("max_cohort_size must be at least 1"));
        }
        if self.store_timeout_ms == 0 {
            return Err(EngineError::config("store_timeout_ms must be positive"));
        }
        Ok(())
    }

    /// Set the cohort value threshold.
    #[must_use]
    pub fn with_min_total_value(mut self, value: Decimal) -> Self {
        self.min_total_value = value;
        self
    }

    /// Set the cohort size cap.
    #[must_use]
    pub fn with_max_cohort_size(mut self, size: usize) -> Self {
        self.max_cohort_size = size;
        self
    }

    /// Set the store call deadline.
    #[must_use]
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the report lifetime.
    #[must_use]
    pub fn with_report_ttl(mut self, ttl: Duration) -> Self {
        self.report_ttl_secs = ttl.as_secs();
        self
    }

    /// Set the cohort lifetime.
    #[must_use]
    pub fn with_cohort_ttl(mut self, ttl: Duration) -> Self {
        self.cohort_ttl_secs = ttl.as_secs();
        self
    }

    /// Set the analytics configuration.
    #[must_use]
    pub fn with_analytics(mut self, analytics: AnalyticsConfig) -> Self {
        self.analytics = analytics;
        self
    }

    /// Cohort selection thresholds.
    pub fn cohort_criteria(&self) -> CohortCriteria {
        CohortCriteria::new(self.min_total_value, self.max_cohort_size)
    }

    /// Store call deadline.
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    /// Report lifetime.
    pub fn report_ttl(&self) -> Duration {
        Duration::from_secs(self.report_ttl_secs)
    }

    /// Cohort lifetime.
    pub fn cohort_ttl(&self) -> Duration {
        Duration::from_secs(self.cohort_ttl_secs)
    }
}
