//! Shared CSV schema for file and spreadsheet portfolio sources.
//!
//! ```text
//! symbol,cost,shares,currency
//! 2330.TW,600,2000,
//! NVDA,120,50,USD
//! ```
//!
//! Header names are case-insensitive. `ticker`, `cost_basis` / `cost basis`
//! and `quantity` are accepted as aliases. The `currency` column is optional;
//! blank means "infer from the symbol suffix".

use serde::Deserialize;

use crate::errors::CoreError;
use crate::models::position::{Currency, Position};

/// ISO codes a `currency` cell may use besides `local` / `foreign`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyCodes {
    pub reporting: String,
    pub foreign: String,
}

impl Default for CurrencyCodes {
    fn default() -> Self {
        Self {
            reporting: "TWD".to_string(),
            foreign: "USD".to_string(),
        }
    }
}

/// Column name and the headers accepted for it.
const REQUIRED_COLUMNS: [(&str, &[&str]); 3] = [
    ("symbol", &["symbol", "ticker"]),
    ("cost", &["cost", "cost_basis", "cost basis"]),
    ("shares", &["shares", "quantity"]),
];

#[derive(Debug, Deserialize)]
struct PositionRecord {
    #[serde(alias = "ticker")]
    symbol: String,
    #[serde(alias = "cost_basis", alias = "cost basis")]
    cost: f64,
    #[serde(alias = "quantity")]
    shares: f64,
    #[serde(default)]
    currency: Option<String>,
}

/// Parse positions from CSV text.
///
/// Fails on the first malformed data row, naming it by 1-based index.
/// Fully blank lines are skipped.
pub fn parse_positions<R: std::io::Read>(
    reader: R,
    codes: &CurrencyCodes,
) -> Result<Vec<Position>, CoreError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: csv::StringRecord = rdr
        .headers()?
        .iter()
        .map(|h| h.to_lowercase())
        .collect();
    check_columns(&headers)?;
    rdr.set_headers(headers);

    let mut positions = Vec::new();
    for (idx, result) in rdr.deserialize::<PositionRecord>().enumerate() {
        let row = idx + 1;
        let record = result.map_err(|e| {
            CoreError::Configuration(format!("Malformed portfolio row {row}: {e}"))
        })?;

        if record.symbol.is_empty() {
            return Err(CoreError::Configuration(format!(
                "Malformed portfolio row {row}: symbol is empty"
            )));
        }

        let currency = match record.currency.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(Currency::parse(raw, &codes.reporting, &codes.foreign).ok_or_else(
                || {
                    CoreError::Configuration(format!(
                        "Malformed portfolio row {row}: unknown currency '{raw}' (expected local, foreign, {} or {})",
                        codes.reporting, codes.foreign
                    ))
                },
            )?),
        };

        let mut position = Position::new(record.symbol, record.cost, record.shares);
        position.currency = currency;
        position.validate().map_err(|e| match e {
            CoreError::Configuration(msg) => {
                CoreError::Configuration(format!("Portfolio row {row}: {msg}"))
            }
            other => other,
        })?;
        positions.push(position);
    }

    Ok(positions)
}

/// Reject a header row that lacks a required column, e.g. an HTML login page
/// served in place of the CSV export.
fn check_columns(headers: &csv::StringRecord) -> Result<(), CoreError> {
    for (column, accepted) in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| accepted.contains(&h)) {
            return Err(CoreError::Configuration(format!(
                "Portfolio has no '{column}' column (found: {})",
                headers.iter().collect::<Vec<_>>().join(", ")
            )));
        }
    }
    Ok(())
}
