//! Property-based tests for analytics invariants.
//!
//! These tests verify properties that should always hold:
//! - Cohorts respect their size cap and value threshold and are sorted
//! - Aggregation is deterministic and independent of input order
//! - Owner counts never exceed the cohort size
//! - Emerging and fading never report the same ticker

use proptest::prelude::*;
use quorum_analytics::prelude::*;
use quorum_core::{Filing, Holding, Period};
use rust_decimal::Decimal;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn simple_hash(seed: u64, i: u64) -> u64 {
    let mut h = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ i.wrapping_mul(0xC2B2_AE3D_27D4_EB4F);
    h ^= h >> 33;
    h = h.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    h ^= h >> 33;
    h
}

/// Generates `managers` filings with up to 12 holdings each over a pool of
/// 20 securities. Roughly one holding in ten has no reported value.
fn generate_period(period: Period, managers: usize, seed: u64) -> (Vec<Filing>, Vec<Holding>) {
    let filed = period.report_date() + chrono::Duration::days(45);
    let mut filings = Vec::with_capacity(managers);
    let mut holdings = Vec::new();

    for m in 0..managers {
        let hash = simple_hash(seed, m as u64);
        let filing_id = format!("{period}-F{m}");
        let count = 1 + (hash % 12) as usize;
        let mut total = Decimal::ZERO;

        for h in 0..count {
            let hh = simple_hash(hash, h as u64);
            let security = format!("SEC{:06}", hh % 20);
            let value = (hh % 10 != 0).then(|| Decimal::from(1 + hh % 5_000));
            total += value.unwrap_or(Decimal::ZERO);
            holdings.push(Holding::new(
                filing_id.as_str(),
                security.as_str(),
                format!("ISSUER {}", hh % 20),
                value,
                Some((hh % 1_000) as i64),
            ));
        }

        let total_value = if hash % 17 == 0 { Decimal::ZERO } else { total };
        filings.push(
            Filing::new(
                filing_id,
                format!("{:010}", m),
                format!("MANAGER {m} LLC"),
                period,
                filed,
                total_value,
            )
            .with_holdings_count(count as u32),
        );
    }

    (filings, holdings)
}

fn run(
    period: Period,
    filings: &[Filing],
    holdings: Vec<Holding>,
    config: &AnalyticsConfig,
) -> (Cohort, Vec<AggregateRow>) {
    let snapshot = PeriodSnapshot::new(period, filings, holdings, TickerResolver::empty());
    let cohort = select_cohort(period, filings, &CohortCriteria::new(Decimal::ZERO, 25));
    let rows = aggregate(&cohort, &snapshot, config);
    (cohort, rows)
}

// =============================================================================
// COHORT PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn prop_cohort_bounds(
        values in proptest::collection::vec(0u64..10_000, 0..60),
        threshold in 0u64..5_000,
        cap in 0usize..30,
    ) {
        let period = Period::new(2024, 4).unwrap();
        let filed = period.report_date();
        let filings: Vec<Filing> = values
            .iter()
            .enumerate()
            .map(|(i, v)| Filing::new(format!("F{i}"), format!("M{i:03}"), "X", period, filed, Decimal::from(*v)))
            .collect();
        let criteria = CohortCriteria::new(Decimal::from(threshold), cap);
        let cohort = select_cohort(period, &filings, &criteria);

        prop_assert!(cohort.len() <= cap);
        for member in &cohort.members {
            prop_assert!(member.total_value > criteria.min_total_value);
        }
        for pair in cohort.members.windows(2) {
            prop_assert!(pair[0].total_value >= pair[1].total_value);
            if pair[0].total_value == pair[1].total_value {
                prop_assert!(pair[0].manager_id < pair[1].manager_id);
            }
        }

        let eligible = values.iter().filter(|v| **v > threshold).count();
        prop_assert_eq!(cohort.len(), eligible.min(cap));
    }
}

// =============================================================================
// AGGREGATION PROPERTIES
// =============================================================================

#[test]
fn test_aggregation_deterministic_across_seeds() {
    let period = Period::new(2025, 2).unwrap();
    let config = AnalyticsConfig::default();

    for seed in 0..20 {
        let (filings, holdings) = generate_period(period, 30, seed);
        let (_, first) = run(period, &filings, holdings.clone(), &config);
        let (_, second) = run(period, &filings, holdings, &config);
        assert_eq!(first, second, "seed {seed}");
    }
}

#[test]
fn test_aggregation_independent_of_input_order() {
    let period = Period::new(2025, 2).unwrap();
    let config = AnalyticsConfig::default();

    for seed in 0..20 {
        let (filings, holdings) = generate_period(period, 30, seed);
        let (_, forward) = run(period, &filings, holdings.clone(), &config);

        let mut rev_filings = filings.clone();
        rev_filings.reverse();
        let mut rev_holdings = holdings;
        rev_holdings.reverse();
        let (_, backward) = run(period, &rev_filings, rev_holdings, &config);

        assert_eq!(forward.len(), backward.len(), "seed {seed}");
        for (a, b) in forward.iter().zip(&backward) {
            assert_eq!(a.ticker, b.ticker);
            assert_eq!(a.owner_count, b.owner_count);
            assert_eq!(a.total_value, b.total_value);
            assert_eq!(a.owner_names, b.owner_names);
        }
    }
}

#[test]
fn test_owner_counts_bounded_by_cohort() {
    let period = Period::new(2025, 2).unwrap();
    let config = AnalyticsConfig::default();

    for seed in 0..20 {
        let (filings, holdings) = generate_period(period, 40, seed);
        let (cohort, rows) = run(period, &filings, holdings, &config);
        for row in &rows {
            assert!(row.owner_count >= 1);
            assert!(row.owner_count <= cohort.len());
            assert_eq!(row.owner_names.len(), row.owner_count);
            if let (Some(min), Some(max), Some(avg)) =
                (row.min_position_pct, row.max_position_pct, row.avg_position_pct)
            {
                assert!(min <= avg + 1e-9 && avg <= max + 1e-9);
            }
        }
    }
}

#[test]
fn test_views_respect_limits() {
    let period = Period::new(2025, 2).unwrap();
    let config = AnalyticsConfig::default().with_stats_limit(5);

    for seed in 0..10 {
        let (filings, holdings) = generate_period(period, 30, seed);
        let (_, rows) = run(period, &filings, holdings, &config);
        assert!(consensus_holdings(&rows, &config).len() <= config.consensus_limit);
        assert!(top_by_value(&rows, &config).len() <= config.top_value_limit);
        assert!(big_bets(&rows, &config).len() <= 5);
        assert!(top_conviction(&rows, &config)
            .iter()
            .all(|r| r.owner_count >= config.min_conviction_owners));
    }
}

// =============================================================================
// CHANGE PROPERTIES
// =============================================================================

#[test]
fn test_emerging_and_fading_disjoint() {
    let current_period = Period::new(2025, 2).unwrap();
    let prior_period = current_period.previous();
    let config = AnalyticsConfig::default().with_ownership_change_limit(100);

    for seed in 0..20 {
        let (cf, ch) = generate_period(current_period, 30, seed);
        let (pf, ph) = generate_period(prior_period, 30, seed + 1_000);
        let (_, now) = run(current_period, &cf, ch, &config);
        let (_, before) = run(prior_period, &pf, ph, &config);

        let up = emerging(&now, &before, config.ownership_change_limit);
        let down = fading(&now, &before, config.ownership_change_limit);
        for change in &up {
            assert!(change.owner_change > 0);
            assert!(down.iter().all(|d| d.ticker != change.ticker));
        }
        for pair in up.windows(2) {
            assert!(pair[0].owner_change >= pair[1].owner_change);
        }
    }
}

#[test]
fn test_flow_directions_consistent() {
    let current_period = Period::new(2025, 2).unwrap();
    let prior_period = current_period.previous();
    let config = AnalyticsConfig::default();

    for seed in 0..20 {
        let (cf, ch) = generate_period(current_period, 20, seed);
        let (pf, ph) = generate_period(prior_period, 20, seed + 500);
        let (_, now) = run(current_period, &cf, ch, &config);
        let (_, before) = run(prior_period, &pf, ph, &config);

        for buy in top_buys(&now, &before, RankMode::Value, 50) {
            assert_eq!(buy.current_value - buy.previous_value, buy.value_change);
        }
        for sell in top_sells(&now, &before, RankMode::Value, 50) {
            assert_eq!(sell.previous_value - sell.current_value, sell.value_change);
            assert!(sell.value_change > Decimal::ZERO);
        }
    }
}
