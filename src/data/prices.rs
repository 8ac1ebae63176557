//! Mythic price list
//!
//! Prices come from a flat comma-delimited file with one `<name>,<price>`
//! row per item and no header. Prices are raw emerald counts.

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::warn;

/// Errors that can occur when loading the price list
#[derive(Debug, Error)]
pub enum PriceListError {
    /// The price list file could not be read
    #[error("Failed to read price list {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Item prices in file order
///
/// A `None` price marks an item listed with a negative price, which counts
/// as not priced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceTable {
    rows: Vec<(String, Option<u64>)>,
}

impl PriceTable {
    /// Creates a table from `(name, price)` pairs
    pub fn new(rows: Vec<(String, u64)>) -> Self {
        Self {
            rows: rows
                .into_iter()
                .map(|(name, price)| (name, Some(price)))
                .collect(),
        }
    }

    /// Loads the price list from disk
    pub fn load(path: &Path) -> Result<Self, PriceListError> {
        let content = fs::read_to_string(path).map_err(|source| PriceListError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::parse(&content))
    }

    /// Parses price list text
    ///
    /// The first field is the name and the second the price; further fields
    /// are ignored. Fields may be double-quoted. Blank lines are skipped, and
    /// rows without a usable integer price (such as a header) are skipped
    /// with a warning.
    pub fn parse(content: &str) -> Self {
        let mut rows = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let mut fields = split_fields(line).into_iter();
            let (Some(name), Some(price)) = (fields.next(), fields.next()) else {
                warn!("Skipping price list row {}: no price column", idx + 1);
                continue;
            };

            match parse_price(&price) {
                Some(price) => rows.push((name, price)),
                None => warn!("Skipping price list row {}: invalid price {:?}", idx + 1, price),
            }
        }

        Self { rows }
    }

    /// Looks up the price of an item
    ///
    /// Names are matched exactly (case-sensitive). The first matching row
    /// wins; `None` means the item is not priced.
    pub fn price_of(&self, item: &str) -> Option<u64> {
        self.rows
            .iter()
            .find(|(name, _)| name == item)
            .and_then(|(_, price)| *price)
    }

    /// Number of rows in the table
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Parses a price column
///
/// `Some(None)` is a negative price, `None` is not an integer at all.
fn parse_price(field: &str) -> Option<Option<u64>> {
    let field = field.trim();
    if let Ok(price) = field.parse::<u64>() {
        return Some(Some(price));
    }
    match field.parse::<i128>() {
        Ok(price) if price < 0 => Some(None),
        _ => None,
    }
}

/// Splits a row on commas outside double quotes
///
/// Quotes are removed and `""` inside a quoted field becomes `"`.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);

    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_lookup_known_item() {
        let table = PriceTable::new(vec![("Shiny Sword".to_string(), 5_000_000)]);
        assert_eq!(table.price_of("Shiny Sword"), Some(5_000_000));
    }

    #[test]
    fn test_lookup_unknown_item() {
        let table = PriceTable::new(vec![("Shiny Sword".to_string(), 5_000_000)]);
        assert_eq!(table.price_of("Nonexistent"), None);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let table = PriceTable::new(vec![("Warp".to_string(), 10)]);
        assert_eq!(table.price_of("warp"), None);
        assert_eq!(table.price_of("Warp "), None);
    }

    #[test]
    fn test_first_matching_row_wins() {
        let table = PriceTable::parse("Warp,10\nNirvana,20\nWarp,30\n");
        assert_eq!(table.price_of("Warp"), Some(10));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_parse_skips_blank_lines_and_trims_price() {
        let table = PriceTable::parse("Warp, 10\r\n\n  \nNirvana,20 \n");
        assert_eq!(table.price_of("Warp"), Some(10));
        assert_eq!(table.price_of("Nirvana"), Some(20));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_parse_quoted_names() {
        let table = PriceTable::parse("\"Hero, the Brave\",42\n\"Quoted \"\"Name\"\"\",7\n");
        assert_eq!(table.price_of("Hero, the Brave"), Some(42));
        assert_eq!(table.price_of("Quoted \"Name\""), Some(7));
    }

    #[test]
    fn test_header_row_is_skipped() {
        let table = PriceTable::parse("name,price\nWarp,100\n");
        assert_eq!(table.price_of("Warp"), Some(100));
        assert_eq!(table.price_of("name"), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_trailing_columns_are_ignored() {
        let table = PriceTable::parse("Warp,100,note\nNirvana,200,,\n");
        assert_eq!(table.price_of("Warp"), Some(100));
        assert_eq!(table.price_of("Nirvana"), Some(200));
    }

    #[test]
    fn test_negative_price_is_not_priced() {
        let table = PriceTable::parse("Broken,-1\nWarp,100\n");
        assert_eq!(table.price_of("Broken"), None);
        assert_eq!(table.price_of("Warp"), Some(100));
    }

    #[test]
    fn test_negative_price_shadows_later_rows() {
        let table = PriceTable::parse("Warp,-1\nWarp,100\n");
        assert_eq!(table.price_of("Warp"), None);
    }

    #[test]
    fn test_rows_without_usable_price_are_skipped() {
        let table = PriceTable::parse("Nirvana\nWarp,ten\nGrandmother,1200000\n");
        assert_eq!(table.price_of("Nirvana"), None);
        assert_eq!(table.price_of("Warp"), None);
        assert_eq!(table.price_of("Grandmother"), Some(1_200_000));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = dir.path().join("mythic_prices.csv");
        fs::write(&path, "Grandmother,1200000\nWarp,800000\n").expect("write prices");

        let table = PriceTable::load(&path).expect("Should load price list");
        assert_eq!(table.price_of("Grandmother"), Some(1_200_000));
        assert!(!table.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let err = PriceTable::load(&dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, PriceListError::Io { .. }));
        assert!(err.to_string().contains("missing.csv"));
    }
}
