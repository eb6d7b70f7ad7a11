//! In-memory caches for the holdings engine.
//!
//! Entries carry their insertion instant and expire after a fixed TTL.
//! Expired entries are never served; [`TtlCache::purge_expired`] reclaims
//! them. Values are shared as `Arc` so cache hits never copy reports.

use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use quorum_analytics::cohort::{Cohort, CohortCriteria, CohortFingerprint, CohortOverview};
use quorum_core::Period;

use crate::reports::{GrandPortfolioReport, StatsReport};

/// TTL cache over a concurrent map.
pub struct TtlCache<K, V> {
    entries: DashMap<K, CachedEntry<V>>,
    ttl: Duration,
}

struct CachedEntry<V> {
    value: Arc<V>,
    inserted_at: Instant,
}

impl<K: Eq + Hash, V> TtlCache<K, V> {
    /// Create a cache with the given entry lifetime.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Entry lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Store a value, replacing any previous entry.
    pub fn insert(&self, key: K, value: Arc<V>) {
        self.entries.insert(
            key,
            CachedEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Get a live value.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.entries
            .get(key)
            .filter(|e| e.inserted_at.elapsed() < self.ttl)
            .map(|e| Arc::clone(&e.value))
    }

    /// Remove expired entries. Returns the number removed.
    pub fn purge_expired(&self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, e| e.inserted_at.elapsed() < self.ttl);
        before.saturating_sub(self.entries.len())
    }

    /// Number of entries, live or expired.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all entries.
    pub fn clear(&self) {
        self.entries.clear();
    }
}

// =============================================================================
// COHORT CACHE
// =============================================================================

/// Cohort cache key: a period and the selection thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CohortKey {
    /// Reporting period
    pub period: Period,
    /// Selection thresholds
    pub criteria: CohortCriteria,
}

/// Selected cohorts, default lifetime five minutes.
pub type CohortCache = TtlCache<CohortKey, Cohort>;

impl Default for CohortCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(300))
    }
}

// =============================================================================
// REPORT CACHE
// =============================================================================

/// Kinds of cached analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    /// Grand portfolio report
    GrandPortfolio,
    /// Period stats report
    SuperinvestorStats,
    /// Cohort overview
    CohortOverview,
}

/// Report cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReportKey {
    /// Reporting period
    pub period: Period,
    /// Cohort membership
    pub cohort: CohortFingerprint,
    /// Analysis kind
    pub kind: ReportKind,
}

impl ReportKey {
    /// Create a key.
    pub fn new(period: Period, cohort: CohortFingerprint, kind: ReportKind) -> Self {
        Self {
            period,
            cohort,
            kind,
        }
    }
}

/// A cached report of any kind.
#[derive(Debug, Clone)]
pub enum CachedReport {
    /// Grand portfolio report
    GrandPortfolio(Arc<GrandPortfolioReport>),
    /// Period stats report
    SuperinvestorStats(Arc<StatsReport>),
    /// Cohort overview
    CohortOverview(Arc<CohortOverview>),
}

/// Computed reports, default lifetime one hour.
pub struct ReportCache {
    inner: TtlCache<ReportKey, CachedReport>,
}

impl ReportCache {
    /// Create a report cache with the given lifetime.
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: TtlCache::new(ttl),
        }
    }

    /// Get a cached grand portfolio report.
    pub fn grand_portfolio(&self, key: &ReportKey) -> Option<Arc<GrandPortfolioReport>> {
        match self.inner.get(key)?.as_ref() {
            CachedReport::GrandPortfolio(report) => Some(Arc::clone(report)),
            _ => None,
        }
    }

    /// Get a cached stats report.
    pub fn superinvestor_stats(&self, key: &ReportKey) -> Option<Arc<StatsReport>> {
        match self.inner.get(key)?.as_ref() {
            CachedReport::SuperinvestorStats(report) => Some(Arc::clone(report)),
            _ => None,
        }
    }

    /// Get a cached cohort overview.
    pub fn cohort_overview(&self, key: &ReportKey) -> Option<Arc<CohortOverview>> {
        match self.inner.get(key)?.as_ref() {
            CachedReport::CohortOverview(report) => Some(Arc::clone(report)),
            _ => None,
        }
    }

    /// Store a completed report.
    pub fn insert(&self, key: ReportKey, report: CachedReport) {
        self.inner.insert(key, Arc::new(report));
    }

    /// Remove expired reports. Returns the number removed.
    pub fn purge_expired(&self) -> usize {
        self.inner.purge_expired()
    }

    /// Number of cached reports, live or expired.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if no reports are cached.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Clear all reports.
    pub fn clear(&self) {
        self.inner.clear();
    }
}

impl Default for ReportCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(3600))
    }
}
