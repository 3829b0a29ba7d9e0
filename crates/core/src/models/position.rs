use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Which currency a listing is denominated in, relative to the report.
///
/// `Local` listings are already in the reporting currency; `Foreign` listings
/// are converted with the configured exchange rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    Local,
    Foreign,
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Currency::Local => write!(f, "Local"),
            Currency::Foreign => write!(f, "Foreign"),
        }
    }
}

impl Currency {
    /// Parse a currency marker as written in a portfolio sheet.
    ///
    /// Accepts `local` / `foreign` (any case) or one of the two configured
    /// ISO codes. Returns `None` for anything else.
    pub fn parse(raw: &str, reporting_code: &str, foreign_code: &str) -> Option<Self> {
        let value = raw.trim();
        if value.eq_ignore_ascii_case("local") || value.eq_ignore_ascii_case(reporting_code) {
            Some(Currency::Local)
        } else if value.eq_ignore_ascii_case("foreign") || value.eq_ignore_ascii_case(foreign_code) {
            Some(Currency::Foreign)
        } else {
            None
        }
    }
}

/// One holding: a ticker, what was paid per share, and how many shares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Ticker symbol, uppercased (e.g., "NVDA", "2330.TW")
    pub symbol: String,

    /// Per-share cost in the listing's own currency
    pub cost_basis: f64,

    /// Quantity held; may be fractional
    pub shares: f64,

    /// Explicit currency. When `None`, the symbol's market suffix decides.
    #[serde(default)]
    pub currency: Option<Currency>,
}

impl Position {
    pub fn new(symbol: impl Into<String>, cost_basis: f64, shares: f64) -> Self {
        Self {
            symbol: symbol.into().trim().to_uppercase(),
            cost_basis,
            shares,
            currency: None,
        }
    }

    /// Same as [`Position::new`] but pins the currency instead of inferring it.
    pub fn with_currency(
        symbol: impl Into<String>,
        cost_basis: f64,
        shares: f64,
        currency: Currency,
    ) -> Self {
        Self {
            currency: Some(currency),
            ..Self::new(symbol, cost_basis, shares)
        }
    }

    /// Copy with the symbol trimmed and uppercased, as [`Position::new`] does.
    ///
    /// Positions built from serde or a struct literal skip `new`.
    pub fn normalized(&self) -> Self {
        Self {
            symbol: self.symbol.trim().to_uppercase(),
            ..self.clone()
        }
    }

    /// Reject positions that would make the valuation meaningless.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.symbol.trim().is_empty() {
            return Err(CoreError::Configuration(
                "Position symbol must not be empty".into(),
            ));
        }
        if !self.shares.is_finite() || self.shares < 0.0 {
            return Err(CoreError::Configuration(format!(
                "Position {} has invalid share count {} (must be finite and non-negative)",
                self.symbol, self.shares
            )));
        }
        if !self.cost_basis.is_finite() || self.cost_basis < 0.0 {
            return Err(CoreError::Configuration(format!(
                "Position {} has invalid cost basis {} (must be finite and non-negative)",
                self.symbol, self.cost_basis
            )));
        }
        Ok(())
    }
}
