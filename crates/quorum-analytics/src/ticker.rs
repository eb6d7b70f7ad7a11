//! Security id to display ticker resolution.
//!
//! Every grouping and display path goes through [`TickerResolver`], so two
//! views never disagree on a security's display key.

use quorum_core::{SecurityId, TickerMap};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Resolves security ids to display tickers, falling back to the id itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickerResolver {
    symbols: HashMap<SecurityId, String>,
}

impl TickerResolver {
    /// Creates a resolver from a ticker mapping.
    ///
    /// Symbols are trimmed; blank symbols are dropped so those ids fall back.
    #[must_use]
    pub fn new(mapping: TickerMap) -> Self {
        let symbols = mapping
            .into_iter()
            .filter_map(|(id, symbol)| {
                let symbol = symbol.trim();
                (!symbol.is_empty()).then(|| (id, symbol.to_string()))
            })
            .collect();
        Self { symbols }
    }

    /// Creates a resolver with no mappings (every id is its own ticker).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the display ticker for a security id.
    #[must_use]
    pub fn resolve<'a>(&'a self, security_id: &'a SecurityId) -> &'a str {
        self.symbols
            .get(security_id)
            .map_or(security_id.as_str(), String::as_str)
    }

    /// Number of mapped ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if no ids are mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping() -> TickerMap {
        let mut map = TickerMap::new();
        map.insert(SecurityId::new("037833100"), "AAPL".to_string());
        map.insert(SecurityId::new("594918104"), " MSFT ".to_string());
        map.insert(SecurityId::new("G0403H108"), "   ".to_string());
        map
    }

    #[test]
    fn test_mapped_symbol() {
        let resolver = TickerResolver::new(mapping());
        assert_eq!(resolver.resolve(&SecurityId::new("037833100")), "AAPL");
        assert_eq!(resolver.resolve(&SecurityId::new("594918104")), "MSFT");
    }

    #[test]
    fn test_fallback_to_security_id() {
        let resolver = TickerResolver::new(mapping());
        let unmapped = SecurityId::new("023135106");
        assert_eq!(resolver.resolve(&unmapped), "023135106");
        assert_eq!(resolver.len(), 2);
    }

    #[test]
    fn test_blank_symbol_falls_back() {
        let resolver = TickerResolver::new(mapping());
        let id = SecurityId::new("G0403H108");
        assert_eq!(resolver.resolve(&id), "G0403H108");
        assert_eq!(resolver.len(), 2);
    }
}
