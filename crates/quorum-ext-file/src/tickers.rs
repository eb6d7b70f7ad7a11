//! CSV ticker mappings.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use quorum_core::{SecurityId, TickerMap};
use quorum_traits::error::TraitError;

/// CSV record: `cusip,symbol`.
#[derive(Debug, Deserialize)]
struct TickerRecord {
    cusip: String,
    #[serde(default)]
    symbol: Option<String>,
}

/// Load a ticker mapping from a `cusip,symbol` CSV file.
///
/// A missing file yields an empty mapping. Cusips are normalized to upper
/// case. Rows with a blank symbol or a malformed cusip are skipped; a later
/// row for the same cusip replaces an earlier one.
pub fn load_ticker_csv(path: impl AsRef<Path>) -> Result<TickerMap, TraitError> {
    let path = path.as_ref();
    if !path.exists() {
        log::warn!("ticker mapping {} not found, using security ids", path.display());
        return Ok(TickerMap::new());
    }

    let reader = csv::Reader::from_path(path).map_err(|e| TraitError::IoError(e.to_string()))?;
    read_records(reader)
}

/// Parse a ticker mapping from CSV text with a `cusip,symbol` header.
pub fn parse_ticker_csv(input: impl Read) -> Result<TickerMap, TraitError> {
    read_records(csv::Reader::from_reader(input))
}

fn read_records<R: Read>(mut reader: csv::Reader<R>) -> Result<TickerMap, TraitError> {
    let mut map = TickerMap::new();
    for result in reader.deserialize() {
        let record: TickerRecord = result.map_err(|e| TraitError::ParseError(e.to_string()))?;
        let cusip = record.cusip.trim();
        let symbol = record.symbol.as_deref().map(str::trim).unwrap_or_default();
        if cusip.is_empty() || symbol.is_empty() {
            continue;
        }
        match SecurityId::parse_cusip(cusip) {
            Ok(security_id) => {
                map.insert(security_id, symbol.to_string());
            }
            Err(e) => log::warn!("skipping ticker row for {symbol}: {e}"),
        }
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_skips_blank_symbols() {
        let csv = "cusip,symbol\n037833100,AAPL\n594918104, MSFT \n023135106,\n";
        let map = parse_ticker_csv(csv.as_bytes()).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map[&SecurityId::new("594918104")], "MSFT");
    }

    #[test]
    fn test_parse_normalizes_and_skips_bad_cusips() {
        let csv = "cusip,symbol\ng0403h108,AON\n0378331,AAPL\n594918104,MSFT\n";
        let map = parse_ticker_csv(csv.as_bytes()).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map[&SecurityId::new("G0403H108")], "AON");
        assert!(!map.values().any(|symbol| symbol == "AAPL"));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let map = load_ticker_csv(dir.path().join("tickers.csv")).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cusip,symbol").unwrap();
        writeln!(file, "67066G104,NVDA").unwrap();
        file.flush().unwrap();

        let map = load_ticker_csv(file.path()).unwrap();
        assert_eq!(map[&SecurityId::new("67066G104")], "NVDA");
    }

    #[test]
    fn test_malformed_row_is_parse_error() {
        let csv = "cusip,symbol\n037833100,AAPL,EXTRA\n";
        let err = parse_ticker_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, TraitError::ParseError(_)));
    }
}
