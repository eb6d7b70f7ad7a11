//! Holdings engine: store access, cohort selection, and cached reports.

use std::collections::{BTreeSet, HashMap};
use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info, warn};

use quorum_analytics::aggregation::{aggregate, AggregateRow};
use quorum_analytics::cohort::{self, Cohort, CohortOverview};
use quorum_analytics::diff::diff_portfolios;
use quorum_analytics::snapshot::{resolve_live_filings, PeriodSnapshot};
use quorum_analytics::TickerResolver;
use quorum_core::{investor_display_name, Filing, Holding, ManagerId, Period, SecurityId};
use quorum_traits::{FilingStore, TraitError};

use crate::cache::{CachedReport, CohortCache, CohortKey, ReportCache, ReportKey, ReportKind};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::reports::{GrandPortfolioReport, ManagerDiffReport, PeriodRows, StatsReport};

/// The holdings engine.
///
/// Every store call runs under the configured deadline. Reports are cached
/// by period, cohort fingerprint and kind, and written only once a
/// computation has completed.
pub struct HoldingsEngine {
    store: Arc<dyn FilingStore>,
    config: EngineConfig,
    reports: ReportCache,
    cohorts: CohortCache,
}

impl HoldingsEngine {
    /// Create an engine over `store`.
    pub fn new(store: Arc<dyn FilingStore>, config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            reports: ReportCache::new(config.report_ttl()),
            cohorts: CohortCache::new(config.cohort_ttl()),
            store,
            config,
        })
    }

    /// Create an engine with default configuration.
    pub fn with_defaults(store: Arc<dyn FilingStore>) -> Self {
        let config = EngineConfig::default();
        Self {
            reports: ReportCache::new(config.report_ttl()),
            cohorts: CohortCache::new(config.cohort_ttl()),
            store,
            config,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Parse a period such as `2025Q2` or `Q2 2025`.
    pub fn parse_period(input: &str) -> EngineResult<Period> {
        Ok(input.parse::<Period>()?)
    }

    // =========================================================================
    // COHORTS AND SNAPSHOTS
    // =========================================================================

    /// Select the cohort for a period.
    pub async fn select_cohort(&self, period: Period) -> EngineResult<Arc<Cohort>> {
        let key = CohortKey {
            period,
            criteria: self.config.cohort_criteria(),
        };
        if let Some(cohort) = self.cohorts.get(&key) {
            debug!(%period, members = cohort.len(), "cohort cache hit");
            return Ok(cohort);
        }

        let filings = self
            .timed("list_filings", self.store.list_filings(None, period, true))
            .await?;
        let cohort = Arc::new(cohort::select_cohort(period, &filings, &key.criteria));

        info!(
            %period,
            members = cohort.len(),
            fingerprint = %cohort.fingerprint(),
            "selected cohort"
        );
        self.cohorts.insert(key, Arc::clone(&cohort));
        Ok(cohort)
    }

    /// Load the live filings, holdings and tickers of a cohort's managers.
    pub async fn load_snapshot(&self, cohort: &Cohort) -> EngineResult<PeriodSnapshot> {
        let period = cohort.period;
        if cohort.is_empty() {
            return Ok(PeriodSnapshot::empty(period));
        }

        let manager_ids = cohort.manager_ids();
        let filings = self
            .timed(
                "list_filings",
                self.store.list_filings(Some(manager_ids.as_slice()), period, true),
            )
            .await?;
        let live = resolve_live_filings(period, &filings);

        let holdings = self.load_holdings(&live).await?;
        let tickers = self.load_tickers(&holdings).await?;

        debug!(
            %period,
            filings = live.len(),
            holdings = holdings.len(),
            mapped = tickers.len(),
            "loaded snapshot"
        );
        Ok(PeriodSnapshot::new(period, &live, holdings, tickers))
    }

    /// Aggregate holdings of the cohort selected for a period.
    pub async fn aggregate_period(&self, period: Period) -> EngineResult<Vec<AggregateRow>> {
        let cohort = self.select_cohort(period).await?;
        self.aggregate_cohort(&cohort).await
    }

    async fn aggregate_cohort(&self, cohort: &Cohort) -> EngineResult<Vec<AggregateRow>> {
        let snapshot = self.load_snapshot(cohort).await?;
        let rows = aggregate(cohort, &snapshot, &self.config.analytics);
        debug!(period = %cohort.period, rows = rows.len(), "aggregated holdings");
        Ok(rows)
    }

    // =========================================================================
    // REPORTS
    // =========================================================================

    /// Cohort holdings for a period with one- and two-quarter changes.
    ///
    /// Each period aggregates its own cohort.
    pub async fn grand_portfolio(&self, period: Period) -> EngineResult<Arc<GrandPortfolioReport>> {
        let cohort = self.select_cohort(period).await?;
        let key = ReportKey::new(period, cohort.fingerprint(), ReportKind::GrandPortfolio);
        if let Some(report) = self.reports.grand_portfolio(&key) {
            debug!(%period, "grand portfolio cache hit");
            return Ok(report);
        }

        let current = self.aggregate_cohort(&cohort).await?;
        let previous = self.aggregate_period(period.previous()).await?;
        let two_back = self.aggregate_period(period.quarters_back(2)).await?;

        let rows = PeriodRows {
            current: &current,
            previous: &previous,
            two_back: &two_back,
        };
        let report = Arc::new(GrandPortfolioReport::build(&cohort, rows, &self.config.analytics));

        info!(%period, consensus = report.consensus.len(), "computed grand portfolio");
        self.reports
            .insert(key, CachedReport::GrandPortfolio(Arc::clone(&report)));
        Ok(report)
    }

    /// Period stats compared against the previous quarter.
    pub async fn superinvestor_stats(&self, period: Period) -> EngineResult<Arc<StatsReport>> {
        let cohort = self.select_cohort(period).await?;
        let key = ReportKey::new(period, cohort.fingerprint(), ReportKind::SuperinvestorStats);
        if let Some(report) = self.reports.superinvestor_stats(&key) {
            debug!(%period, "stats cache hit");
            return Ok(report);
        }

        let current = self.aggregate_cohort(&cohort).await?;
        let prior = self.aggregate_period(period.previous()).await?;
        let report = Arc::new(StatsReport::build(
            &cohort,
            &current,
            &prior,
            &self.config.analytics,
        ));

        info!(%period, unique = report.stats.total_unique_stocks, "computed period stats");
        self.reports
            .insert(key, CachedReport::SuperinvestorStats(Arc::clone(&report)));
        Ok(report)
    }

    /// Cohort members with their largest positions.
    pub async fn cohort_overview(&self, period: Period) -> EngineResult<Arc<CohortOverview>> {
        let cohort = self.select_cohort(period).await?;
        let key = ReportKey::new(period, cohort.fingerprint(), ReportKind::CohortOverview);
        if let Some(overview) = self.reports.cohort_overview(&key) {
            debug!(%period, "cohort overview cache hit");
            return Ok(overview);
        }

        let snapshot = self.load_snapshot(&cohort).await?;
        let overview = Arc::new(cohort::cohort_overview(
            &cohort,
            &snapshot,
            &self.config.analytics,
        ));

        info!(%period, rows = overview.rows.len(), "computed cohort overview");
        self.reports
            .insert(key, CachedReport::CohortOverview(Arc::clone(&overview)));
        Ok(overview)
    }

    /// A manager's position changes against the previous quarter.
    ///
    /// The manager need not be a cohort member. Fails with
    /// [`EngineError::ManagerNotFound`] when the manager has no live filing
    /// for `period`.
    pub async fn manager_diff(
        &self,
        manager_id: &ManagerId,
        period: Period,
    ) -> EngineResult<ManagerDiffReport> {
        let prior_period = period.previous();

        let filing = self
            .live_filing(manager_id, period)
            .await?
            .ok_or_else(|| EngineError::manager_not_found(manager_id.clone(), period))?;
        let prior_filing = self.live_filing(manager_id, prior_period).await?;

        let current = self
            .timed("list_holdings", self.store.list_holdings(&filing.id))
            .await?;
        let prior = match &prior_filing {
            Some(f) => Some(
                self.timed("list_holdings", self.store.list_holdings(&f.id))
                    .await?,
            ),
            None => None,
        };

        let all: Vec<Holding> = current
            .iter()
            .chain(prior.iter().flatten())
            .cloned()
            .collect();
        let resolver = self.load_tickers(&all).await?;

        let diff = diff_portfolios(&current, filing.total_value, prior.as_deref(), &resolver);
        debug!(
            %manager_id,
            %period,
            rows = diff.rows.len(),
            has_prior = prior_filing.is_some(),
            "computed manager diff"
        );

        Ok(ManagerDiffReport {
            investor: investor_display_name(&filing.name),
            manager_id: filing.manager_id,
            name: filing.name,
            period,
            prior_period,
            filing_id: filing.id,
            prior_filing_id: prior_filing.map(|f| f.id),
            total_value: filing.total_value,
            diff,
        })
    }

    // =========================================================================
    // CACHE MAINTENANCE
    // =========================================================================

    /// Drop expired cohorts and reports. Returns the number removed.
    pub fn purge_expired(&self) -> usize {
        let removed = self.cohorts.purge_expired() + self.reports.purge_expired();
        if removed > 0 {
            debug!(removed, "purged expired cache entries");
        }
        removed
    }

    /// Drop every cached cohort and report.
    pub fn clear_caches(&self) {
        self.cohorts.clear();
        self.reports.clear();
    }

    /// Number of cached reports, live or expired.
    pub fn cached_report_count(&self) -> usize {
        self.reports.len()
    }

    // =========================================================================
    // STORE ACCESS
    // =========================================================================

    async fn timed<T, F>(&self, operation: &str, fut: F) -> EngineResult<T>
    where
        F: Future<Output = Result<T, TraitError>>,
    {
        let deadline = self.config.store_timeout();
        match tokio::time::timeout(deadline, fut).await {
            Ok(result) => Ok(result?),
            Err(_) => {
                warn!(operation, timeout_ms = deadline.as_millis() as u64, "store call timed out");
                Err(EngineError::timeout(operation))
            }
        }
    }

    async fn live_filing(&self, manager_id: &ManagerId, period: Period) -> EngineResult<Option<Filing>> {
        let ids = std::slice::from_ref(manager_id);
        let filings = self
            .timed("list_filings", self.store.list_filings(Some(ids), period, true))
            .await?;
        Ok(resolve_live_filings(period, &filings).into_iter().next())
    }

    async fn load_holdings(&self, filings: &[Filing]) -> EngineResult<Vec<Holding>> {
        let mut holdings = Vec::new();
        for filing in filings {
            let rows = self
                .timed("list_holdings", self.store.list_holdings(&filing.id))
                .await?;
            holdings.extend(rows);
        }
        Ok(holdings)
    }

    async fn load_tickers(&self, holdings: &[Holding]) -> EngineResult<TickerResolver> {
        let ids: Vec<SecurityId> = holdings
            .iter()
            .map(|h| h.security_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if ids.is_empty() {
            return Ok(TickerResolver::empty());
        }

        let mapping: HashMap<SecurityId, String> = self
            .timed("resolve_tickers", self.store.resolve_tickers(&ids))
            .await?;
        Ok(TickerResolver::new(mapping))
    }
}

impl std::fmt::Debug for HoldingsEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HoldingsEngine")
            .field("config", &self.config)
            .field("cached_reports", &self.reports.len())
            .field("cached_cohorts", &self.cohorts.len())
            .finish_non_exhaustive()
    }
}
