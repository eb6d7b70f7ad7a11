//! Deterministic top-N ranking.
//!
//! Every ranked list in the crate is produced here: a primary key sorted
//! descending, then an explicit ascending tie-break. The default tie-break is
//! ticker, then issuer name, so identical input always ranks identically.

use rust_decimal::Decimal;
use std::cmp::Ordering;

/// A value that can serve as a descending ranking key.
///
/// Implementations must be total orders. Floats use `f64::total_cmp`;
/// `None` ranks below every `Some`, so rows missing the key fall to the end.
pub trait RankKey {
    /// Compares two keys.
    fn rank_cmp(&self, other: &Self) -> Ordering;
}

impl RankKey for f64 {
    fn rank_cmp(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl RankKey for Decimal {
    fn rank_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl RankKey for usize {
    fn rank_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl RankKey for i64 {
    fn rank_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl<K: RankKey> RankKey for Option<K> {
    fn rank_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Some(a), Some(b)) => a.rank_cmp(b),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => Ordering::Equal,
        }
    }
}

impl<A: RankKey, B: RankKey> RankKey for (A, B) {
    fn rank_cmp(&self, other: &Self) -> Ordering {
        self.0
            .rank_cmp(&other.0)
            .then_with(|| self.1.rank_cmp(&other.1))
    }
}

/// Rows that carry a display ticker and issuer name.
pub trait Ranked {
    /// Display ticker.
    fn ticker(&self) -> &str;

    /// Issuer name.
    fn issuer_name(&self) -> &str;
}

/// Default tie-break: ticker ascending, then issuer name ascending.
pub fn by_ticker_then_issuer<T: Ranked>(a: &T, b: &T) -> Ordering {
    a.ticker()
        .cmp(b.ticker())
        .then_with(|| a.issuer_name().cmp(b.issuer_name()))
}

/// Sorts rows in place: `key_fn` descending, then `tie_break` ascending.
///
/// The sort is stable, so rows equal under both keep their input order.
pub fn rank_desc<T, K, F, B>(rows: &mut [T], key_fn: F, tie_break: B)
where
    K: RankKey,
    F: Fn(&T) -> K,
    B: Fn(&T, &T) -> Ordering,
{
    rows.sort_by(|a, b| {
        key_fn(b)
            .rank_cmp(&key_fn(a))
            .then_with(|| tie_break(a, b))
    });
}

/// Returns the first `n` rows ranked by `key_fn` descending, ties broken by
/// `tie_break` ascending.
///
/// # Example
///
/// ```rust
/// use quorum_analytics::ranking::top_n;
///
/// let rows = vec![("B", 3), ("A", 3), ("C", 9)];
/// let top = top_n(rows, |r| r.1 as usize, 2, |a, b| a.0.cmp(b.0));
/// assert_eq!(top, vec![("C", 9), ("A", 3)]);
/// ```
pub fn top_n<T, K, F, B>(mut rows: Vec<T>, key_fn: F, n: usize, tie_break: B) -> Vec<T>
where
    K: RankKey,
    F: Fn(&T) -> K,
    B: Fn(&T, &T) -> Ordering,
{
    rank_desc(&mut rows, key_fn, tie_break);
    rows.truncate(n);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        ticker: &'static str,
        issuer: &'static str,
        score: Option<f64>,
    }

    impl Ranked for Row {
        fn ticker(&self) -> &str {
            self.ticker
        }

        fn issuer_name(&self) -> &str {
            self.issuer
        }
    }

    fn row(ticker: &'static str, issuer: &'static str, score: Option<f64>) -> Row {
        Row {
            ticker,
            issuer,
            score,
        }
    }

    #[test]
    fn test_descending_with_ticker_tie_break() {
        let rows = vec![
            row("MSFT", "MICROSOFT", Some(5.0)),
            row("AAPL", "APPLE", Some(5.0)),
            row("NVDA", "NVIDIA", Some(7.0)),
        ];
        let ranked = top_n(rows, |r| r.score, 3, by_ticker_then_issuer);
        let tickers: Vec<_> = ranked.iter().map(|r| r.ticker).collect();
        assert_eq!(tickers, vec!["NVDA", "AAPL", "MSFT"]);
    }

    #[test]
    fn test_missing_keys_rank_last() {
        let rows = vec![
            row("A", "A", None),
            row("B", "B", Some(-1.0)),
            row("C", "C", Some(0.0)),
        ];
        let ranked = top_n(rows, |r| r.score, 3, by_ticker_then_issuer);
        let tickers: Vec<_> = ranked.iter().map(|r| r.ticker).collect();
        assert_eq!(tickers, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_issuer_breaks_ticker_ties() {
        let rows = vec![
            row("BRK", "BERKSHIRE HATHAWAY INC DEL CL B", Some(1.0)),
            row("BRK", "BERKSHIRE HATHAWAY INC DEL CL A", Some(1.0)),
        ];
        let ranked = top_n(rows, |r| r.score, 2, by_ticker_then_issuer);
        assert_eq!(ranked[0].issuer, "BERKSHIRE HATHAWAY INC DEL CL A");
    }

    #[test]
    fn test_truncates() {
        let rows: Vec<_> = (0..50).map(|i| row("X", "X", Some(f64::from(i)))).collect();
        assert_eq!(top_n(rows, |r| r.score, 10, by_ticker_then_issuer).len(), 10);
        assert!(top_n(Vec::<Row>::new(), |r| r.score, 10, by_ticker_then_issuer).is_empty());
    }

    #[test]
    fn test_compound_key() {
        let rows = vec![("A", 1usize, 10i64), ("B", 2, 1), ("C", 1, 20)];
        let ranked = top_n(rows, |r| (r.1, r.2), 3, |a, b| a.0.cmp(b.0));
        let names: Vec<_> = ranked.iter().map(|r| r.0).collect();
        assert_eq!(names, vec!["B", "C", "A"]);
    }
}
