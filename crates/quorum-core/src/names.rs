//! Investor display names.
//!
//! Filers report legal entity names ("LONE PINE CAPITAL LLC"); listings show
//! a shorter investor name. The cleanup is a single pure transform.

use once_cell::sync::Lazy;
use regex::Regex;

/// Legal-entity suffixes stripped from the end of a filer name.
///
/// Matching is case-insensitive, requires whitespace before the suffix, and
/// allows one trailing period (`CORP.`).
pub const ENTITY_SUFFIXES: &[&str] = &[
    "LLC",
    "LP",
    "L.P.",
    "INC",
    "CORP",
    "LTD",
    "LIMITED",
    "PARTNERS",
    "CAPITAL",
    "MANAGEMENT",
    "ADVISORS",
    "ADVISOR",
    "FUND",
    "FUNDS",
    "ASSET",
    "INVESTMENTS",
    "GROUP",
    "TRUST",
    "CO",
];

static SUFFIX_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let alternatives = ENTITY_SUFFIXES
        .iter()
        .map(|s| regex::escape(s))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\s+(?:{alternatives})\.?\s*$"))
        .expect("suffix pattern is built from escaped literals")
});

/// Returns the investor display name for a filer name.
///
/// Strips at most one trailing suffix from [`ENTITY_SUFFIXES`], then any
/// trailing comma left behind ("Scion Asset Management, LLC"). A name that
/// would become empty is returned trimmed instead.
///
/// ```rust
/// use quorum_core::names::investor_display_name;
///
/// assert_eq!(investor_display_name("BERKSHIRE HATHAWAY INC"), "BERKSHIRE HATHAWAY");
/// assert_eq!(investor_display_name("Third Point LLC"), "Third Point");
/// ```
#[must_use]
pub fn investor_display_name(name: &str) -> String {
    let trimmed = name.trim();
    let stripped = SUFFIX_PATTERN.replace(trimmed, "");
    let cleaned = stripped.trim_end_matches(|c: char| c == ',' || c.is_whitespace());

    if cleaned.is_empty() {
        trimmed.to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_single_suffix() {
        assert_eq!(
            investor_display_name("RENAISSANCE TECHNOLOGIES LLC"),
            "RENAISSANCE TECHNOLOGIES"
        );
        assert_eq!(
            investor_display_name("TIGER GLOBAL MANAGEMENT LLC"),
            "TIGER GLOBAL MANAGEMENT"
        );
        assert_eq!(
            investor_display_name("GATES FOUNDATION TRUST"),
            "GATES FOUNDATION"
        );
    }

    #[test]
    fn test_case_insensitive_with_period() {
        assert_eq!(
            investor_display_name("Point72 Asset Management, L.P."),
            "Point72 Asset Management"
        );
        assert_eq!(investor_display_name("Acme Holdings Corp."), "Acme Holdings");
        assert_eq!(investor_display_name("acme co"), "acme");
    }

    #[test]
    fn test_trailing_position_only() {
        assert_eq!(
            investor_display_name("BAUPOST GROUP LLC/MA"),
            "BAUPOST GROUP LLC/MA"
        );
        assert_eq!(investor_display_name("CONAGRA"), "CONAGRA");
        assert_eq!(investor_display_name("LLC Partners Fund X"), "LLC Partners Fund X");
    }

    #[test]
    fn test_never_empties() {
        assert_eq!(investor_display_name("  LLC "), "LLC");
        assert_eq!(investor_display_name(""), "");
    }

    #[test]
    fn test_applied_once() {
        assert_eq!(investor_display_name("Bridgewater Associates, LP"), "Bridgewater Associates");
        assert_eq!(
            investor_display_name("SOROS FUND MANAGEMENT LLC"),
            "SOROS FUND MANAGEMENT"
        );
    }
}
