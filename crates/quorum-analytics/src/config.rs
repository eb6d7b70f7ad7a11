//! Configuration for holdings analytics.

use serde::{Deserialize, Serialize};

/// Configuration for holdings analytics computation.
///
/// Controls ranking limits and parallelism. Every limit bounds the size of
/// one ranked output list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Enable parallel grouping (requires 'parallel' feature).
    pub parallel: bool,

    /// Minimum filing count to trigger parallel grouping.
    /// Below this threshold, sequential is faster due to thread overhead.
    pub parallel_threshold: usize,

    /// Rows kept in the consensus holdings list.
    pub consensus_limit: usize,

    /// Rows kept in the top-by-value list.
    pub top_value_limit: usize,

    /// Rows kept in the top-conviction list.
    pub conviction_limit: usize,

    /// Minimum distinct owners for a conviction row.
    pub min_conviction_owners: usize,

    /// Rows kept in each of the period stats views
    /// (top owned, top by aggregate percent, big bets).
    pub stats_limit: usize,

    /// Rows kept in the emerging and fading lists.
    pub ownership_change_limit: usize,

    /// Rows kept in each buy/sell leader list.
    pub flow_limit: usize,

    /// Tickers listed per cohort member in the cohort overview.
    pub overview_top_holdings: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: 100,
            consensus_limit: 100,
            top_value_limit: 50,
            conviction_limit: 50,
            min_conviction_owners: 2,
            stats_limit: 10,
            ownership_change_limit: 20,
            flow_limit: 10,
            overview_top_holdings: 10,
        }
    }
}

impl AnalyticsConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always groups sequentially.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Sets the consensus list size.
    #[must_use]
    pub fn with_consensus_limit(mut self, limit: usize) -> Self {
        self.consensus_limit = limit;
        self
    }

    /// Sets the size of the period stats views.
    #[must_use]
    pub fn with_stats_limit(mut self, limit: usize) -> Self {
        self.stats_limit = limit;
        self
    }

    /// Sets the emerging/fading list size.
    #[must_use]
    pub fn with_ownership_change_limit(mut self, limit: usize) -> Self {
        self.ownership_change_limit = limit;
        self
    }

    /// Sets the buy/sell leader list size.
    #[must_use]
    pub fn with_flow_limit(mut self, limit: usize) -> Self {
        self.flow_limit = limit;
        self
    }

    /// Sets the minimum owners for conviction rows.
    #[must_use]
    pub fn with_min_conviction_owners(mut self, owners: usize) -> Self {
        self.min_conviction_owners = owners;
        self
    }

    /// Returns true if parallel processing should be used for the given count.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = AnalyticsConfig::default();
        assert!(config.parallel);
        assert_eq!(config.consensus_limit, 100);
        assert_eq!(config.top_value_limit, 50);
        assert_eq!(config.conviction_limit, 50);
        assert_eq!(config.min_conviction_owners, 2);
        assert_eq!(config.stats_limit, 10);
        assert_eq!(config.ownership_change_limit, 20);
        assert_eq!(config.flow_limit, 10);
    }

    #[test]
    fn test_builder_pattern() {
        let config = AnalyticsConfig::new()
            .with_parallel(false)
            .with_threshold(50)
            .with_flow_limit(5)
            .with_ownership_change_limit(3);

        assert!(!config.parallel);
        assert_eq!(config.parallel_threshold, 50);
        assert_eq!(config.flow_limit, 5);
        assert_eq!(config.ownership_change_limit, 3);
    }

    #[test]
    fn test_should_parallelize() {
        let config = AnalyticsConfig::new().with_threshold(100);

        #[cfg(feature = "parallel")]
        {
            assert!(!config.should_parallelize(50));
            assert!(config.should_parallelize(100));
        }

        #[cfg(not(feature = "parallel"))]
        {
            assert!(!config.should_parallelize(50));
            assert!(!config.should_parallelize(100));
        }

        assert!(!AnalyticsConfig::sequential().should_parallelize(10_000));
    }

    #[test]
    fn test_serde_partial() {
        let parsed: AnalyticsConfig = serde_json::from_str(r#"{"flow_limit": 25}"#).unwrap();
        assert_eq!(parsed.flow_limit, 25);
        assert_eq!(parsed.consensus_limit, 100);
    }
}
