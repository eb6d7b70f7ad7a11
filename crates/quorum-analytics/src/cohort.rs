//! Cohort selection.
//!
//! A cohort is the set of large managers whose holdings are aggregated for a
//! period: live filings above a value threshold, largest first, capped in
//! size. Cohorts are cheap to recompute and are never frozen at startup.

use std::collections::HashMap;
use std::fmt;

use quorum_core::{investor_display_name, Filing, FilingId, ManagerId, Period};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::AnalyticsConfig;
use crate::ranking::{top_n, RankKey};
use crate::snapshot::{resolve_live_filings, PeriodSnapshot};

/// Default minimum portfolio value for cohort membership (exclusive).
pub const DEFAULT_MIN_TOTAL_VALUE: Decimal = Decimal::from_parts(500_000_000, 0, 0, false, 0);

/// Default cohort size cap.
pub const DEFAULT_MAX_COHORT_SIZE: usize = 100;

/// Selection thresholds for a cohort.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CohortCriteria {
    /// Members must report a total value strictly above this.
    pub min_total_value: Decimal,

    /// Maximum number of members.
    pub max_size: usize,
}

impl Default for CohortCriteria {
    fn default() -> Self {
        Self {
            min_total_value: DEFAULT_MIN_TOTAL_VALUE,
            max_size: DEFAULT_MAX_COHORT_SIZE,
        }
    }
}

impl CohortCriteria {
    /// Creates criteria with explicit thresholds.
    #[must_use]
    pub fn new(min_total_value: Decimal, max_size: usize) -> Self {
        Self {
            min_total_value,
            max_size,
        }
    }

    /// Sets the minimum total value.
    #[must_use]
    pub fn with_min_total_value(mut self, value: Decimal) -> Self {
        self.min_total_value = value;
        self
    }

    /// Sets the size cap.
    #[must_use]
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }
}

/// One manager in a cohort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortMember {
    /// Filer.
    pub manager_id: ManagerId,

    /// Filer name as reported.
    pub name: String,

    /// Cleaned display name.
    pub investor: String,

    /// Reported portfolio value.
    pub total_value: Decimal,

    /// Reported holdings count.
    pub holdings_count: u32,

    /// Live filing the member was selected from.
    pub filing_id: FilingId,
}

impl CohortMember {
    /// Builds a member from its live filing.
    #[must_use]
    pub fn from_filing(filing: &Filing) -> Self {
        Self {
            manager_id: filing.manager_id.clone(),
            name: filing.name.clone(),
            investor: investor_display_name(&filing.name),
            total_value: filing.total_value,
            holdings_count: filing.holdings_count,
            filing_id: filing.id.clone(),
        }
    }
}

/// Stable 64-bit identity of a cohort's ordered membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CohortFingerprint(pub u64);

impl fmt::Display for CohortFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Ordered cohort for one period, largest portfolio first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cohort {
    /// Reporting period.
    pub period: Period,

    /// Members, by total value descending.
    pub members: Vec<CohortMember>,
}

impl Cohort {
    /// Creates an empty cohort.
    #[must_use]
    pub fn empty(period: Period) -> Self {
        Self {
            period,
            members: Vec::new(),
        }
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if the cohort has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member manager ids, in cohort order.
    #[must_use]
    pub fn manager_ids(&self) -> Vec<ManagerId> {
        self.members.iter().map(|m| m.manager_id.clone()).collect()
    }

    /// Returns true if the manager is a member.
    #[must_use]
    pub fn contains(&self, manager_id: &ManagerId) -> bool {
        self.members.iter().any(|m| &m.manager_id == manager_id)
    }

    /// FNV-1a hash over the ordered manager ids.
    ///
    /// Identical membership in identical order always yields the same value,
    /// across processes and platforms.
    #[must_use]
    pub fn fingerprint(&self) -> CohortFingerprint {
        const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
        const PRIME: u64 = 0x0100_0000_01b3;

        let mut hash = OFFSET;
        for member in &self.members {
            for byte in member.manager_id.as_str().bytes().chain(std::iter::once(0xff)) {
                hash ^= u64::from(byte);
                hash = hash.wrapping_mul(PRIME);
            }
        }
        CohortFingerprint(hash)
    }
}

/// Selects the cohort for `period` from raw filings.
///
/// Filings are first reduced to one live filing per manager. Members must
/// exceed `criteria.min_total_value`; they are ordered by total value
/// descending (ties by manager id) and capped at `criteria.max_size`.
#[must_use]
pub fn select_cohort(period: Period, filings: &[Filing], criteria: &CohortCriteria) -> Cohort {
    let eligible: Vec<Filing> = resolve_live_filings(period, filings)
        .into_iter()
        .filter(|f| f.total_value > criteria.min_total_value)
        .collect();

    let selected = top_n(
        eligible,
        |f| f.total_value,
        criteria.max_size,
        |a, b| a.manager_id.cmp(&b.manager_id),
    );

    log::debug!(
        "selected {} cohort members for {} (min value {}, cap {})",
        selected.len(),
        period,
        criteria.min_total_value,
        criteria.max_size
    );

    Cohort {
        period,
        members: selected.iter().map(CohortMember::from_filing).collect(),
    }
}

// =============================================================================
// Cohort overview
// =============================================================================

/// One row of the cohort overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortOverviewRow {
    /// Filer.
    pub manager_id: ManagerId,

    /// Filer name as reported.
    pub name: String,

    /// Cleaned display name.
    pub investor: String,

    /// Reported portfolio value.
    pub total_value: Decimal,

    /// Reported holdings count.
    pub holdings_count: u32,

    /// Largest positions by value, as display tickers.
    pub top_holdings: Vec<String>,
}

/// Cohort members with their largest positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortOverview {
    /// Reporting period.
    pub period: Period,

    /// Rows by portfolio value descending.
    pub rows: Vec<CohortOverviewRow>,
}

/// Builds the cohort overview.
///
/// Each member lists up to `config.overview_top_holdings` tickers, largest
/// position first. Holdings are merged by ticker; positions with no reported
/// value rank last.
#[must_use]
pub fn cohort_overview(
    cohort: &Cohort,
    snapshot: &PeriodSnapshot,
    config: &AnalyticsConfig,
) -> CohortOverview {
    let mut rows: Vec<CohortOverviewRow> = cohort
        .members
        .iter()
        .map(|member| CohortOverviewRow {
            manager_id: member.manager_id.clone(),
            name: member.name.clone(),
            investor: member.investor.clone(),
            total_value: member.total_value,
            holdings_count: member.holdings_count,
            top_holdings: top_tickers(member, snapshot, config.overview_top_holdings),
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total_value
            .rank_cmp(&a.total_value)
            .then_with(|| a.manager_id.cmp(&b.manager_id))
    });

    CohortOverview {
        period: cohort.period,
        rows,
    }
}

fn top_tickers(member: &CohortMember, snapshot: &PeriodSnapshot, limit: usize) -> Vec<String> {
    let Some(filing) = snapshot.filing_for(&member.manager_id) else {
        return Vec::new();
    };

    let mut by_ticker: HashMap<&str, Option<Decimal>> = HashMap::new();
    for holding in snapshot.holdings_for(&filing.id) {
        let ticker = snapshot.tickers().resolve(&holding.security_id);
        let entry = by_ticker.entry(ticker).or_insert(None);
        if let Some(value) = holding.value {
            *entry = Some(entry.unwrap_or(Decimal::ZERO) + value);
        }
    }

    top_n(
        by_ticker.into_iter().collect(),
        |(_, value)| *value,
        limit,
        |a, b| a.0.cmp(b.0),
    )
    .into_iter()
    .map(|(ticker, _)| ticker.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticker::TickerResolver;
    use chrono::NaiveDate;
    use quorum_core::{Holding, SecurityId, TickerMap};
    use rust_decimal_macros::dec;

    fn period() -> Period {
        Period::new(2025, 2).unwrap()
    }

    fn filing(id: &str, manager: &str, name: &str, value: Decimal) -> Filing {
        let date = NaiveDate::from_ymd_opt(2025, 8, 14).unwrap();
        Filing::new(id, manager, name, period(), date, value)
    }

    #[test]
    fn test_default_criteria() {
        let criteria = CohortCriteria::default();
        assert_eq!(criteria.min_total_value, dec!(500000000));
        assert_eq!(criteria.max_size, 100);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let filings = vec![
            filing("F1", "M1", "ALPHA CAPITAL LLC", dec!(500)),
            filing("F2", "M2", "BETA LP", dec!(501)),
        ];
        let cohort = select_cohort(period(), &filings, &CohortCriteria::new(dec!(500), 10));
        assert_eq!(cohort.len(), 1);
        assert_eq!(cohort.members[0].manager_id.as_str(), "M2");
        assert_eq!(cohort.members[0].investor, "BETA");
    }

    #[test]
    fn test_sorted_and_capped() {
        let filings = vec![
            filing("F1", "M1", "A", dec!(100)),
            filing("F2", "M2", "B", dec!(300)),
            filing("F3", "M3", "C", dec!(200)),
            filing("F4", "M4", "D", dec!(300)),
        ];
        let cohort = select_cohort(period(), &filings, &CohortCriteria::new(dec!(0), 3));
        let ids: Vec<_> = cohort.members.iter().map(|m| m.manager_id.as_str()).collect();
        assert_eq!(ids, vec!["M2", "M4", "M3"]);
    }

    #[test]
    fn test_no_matches_is_empty() {
        let filings = vec![filing("F1", "M1", "A", dec!(100))];
        let cohort = select_cohort(period(), &filings, &CohortCriteria::default());
        assert!(cohort.is_empty());
    }

    #[test]
    fn test_fingerprint_depends_on_order() {
        let filings = vec![
            filing("F1", "M1", "A", dec!(100)),
            filing("F2", "M2", "B", dec!(200)),
        ];
        let cohort = select_cohort(period(), &filings, &CohortCriteria::new(dec!(0), 10));
        let mut reversed = cohort.clone();
        reversed.members.reverse();

        assert_eq!(cohort.fingerprint(), cohort.clone().fingerprint());
        assert_ne!(cohort.fingerprint(), reversed.fingerprint());
        assert_ne!(cohort.fingerprint(), Cohort::empty(period()).fingerprint());
    }

    #[test]
    fn test_overview_top_holdings() {
        let filings = vec![filing("F1", "M1", "ALPHA MANAGEMENT", dec!(1000))];
        let holdings = vec![
            Holding::new("F1", "111111111", "SMALL CO", Some(dec!(10)), Some(1)),
            Holding::new("F1", "222222222", "BIG CO", Some(dec!(600)), Some(1)),
            Holding::new("F1", "333333333", "UNKNOWN CO", None, Some(1)),
            Holding::new("F1", "222222222", "BIG CO", Some(dec!(50)), Some(1)),
            Holding::new("F1", "444444444", "MID CO", Some(dec!(300)), Some(1)),
        ];
        let mut map = TickerMap::new();
        map.insert(SecurityId::new("222222222"), "BIG".to_string());

        let snapshot = PeriodSnapshot::new(period(), &filings, holdings, TickerResolver::new(map));
        let cohort = select_cohort(period(), &filings, &CohortCriteria::new(dec!(0), 10));
        let config = AnalyticsConfig::default();
        let overview = cohort_overview(&cohort, &snapshot, &config);

        assert_eq!(overview.rows.len(), 1);
        assert_eq!(overview.rows[0].investor, "ALPHA");
        assert_eq!(
            overview.rows[0].top_holdings,
            vec!["BIG", "444444444", "111111111", "333333333"]
        );
    }
}
