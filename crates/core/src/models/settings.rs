use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Range strings the quote sources understand for the historical-close fallback.
pub const HISTORY_PERIODS: &[&str] = &[
    "1d", "5d", "1mo", "3mo", "6mo", "1y", "2y", "5y", "10y", "ytd", "max",
];

/// What to do when neither the latest price nor the historical close is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Drop the position from the table, list it in the report's failures, keep going.
    SkipAndReport,
    /// Stop the whole pass on the first missing quote.
    AbortPass,
}

impl std::str::FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "skip" | "skip_and_report" => Ok(FailurePolicy::SkipAndReport),
            "abort" | "abort_pass" => Ok(FailurePolicy::AbortPass),
            other => Err(format!("unknown failure policy '{other}' (expected skip or abort)")),
        }
    }
}

/// Valuation settings injected by whoever runs the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// The currency in which all totals are expressed (e.g., "TWD").
    pub reporting_currency: String,

    /// The currency of every non-local listing (e.g., "USD").
    pub foreign_currency: String,

    /// Reporting-currency units per one foreign-currency unit.
    pub fx_rate: f64,

    /// Symbol suffixes marking a listing as local (e.g., ".TW").
    pub local_suffixes: Vec<String>,

    /// Range requested for the historical-close fallback. One of [`HISTORY_PERIODS`].
    pub history_period: String,

    pub failure_policy: FailurePolicy,

    /// Quote requests allowed in flight at once. `1` means strictly sequential.
    pub max_concurrency: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reporting_currency: "TWD".to_string(),
            foreign_currency: "USD".to_string(),
            fx_rate: 32.5,
            local_suffixes: vec![".TW".to_string(), ".TWO".to_string()],
            history_period: "5d".to_string(),
            failure_policy: FailurePolicy::SkipAndReport,
            max_concurrency: 1,
        }
    }
}

impl Settings {
    /// Check every field; the first problem found is returned as a configuration error.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_currency_code(&self.reporting_currency)?;
        validate_currency_code(&self.foreign_currency)?;

        if !self.fx_rate.is_finite() || self.fx_rate <= 0.0 {
            return Err(CoreError::Configuration(format!(
                "Invalid fx rate {}: must be a finite number greater than zero",
                self.fx_rate
            )));
        }

        for suffix in &self.local_suffixes {
            if suffix.len() < 2 || !suffix.starts_with('.') {
                return Err(CoreError::Configuration(format!(
                    "Invalid local market suffix '{suffix}': expected a dot followed by a market code (e.g., .TW)"
                )));
            }
        }

        if !HISTORY_PERIODS.contains(&self.history_period.as_str()) {
            return Err(CoreError::Configuration(format!(
                "Invalid history period '{}': expected one of {}",
                self.history_period,
                HISTORY_PERIODS.join(", ")
            )));
        }

        if self.max_concurrency == 0 {
            return Err(CoreError::Configuration(
                "max_concurrency must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

fn validate_currency_code(code: &str) -> Result<(), CoreError> {
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(CoreError::Configuration(format!(
            "Invalid currency code '{code}': must be exactly 3 ASCII letters (e.g., USD, EUR, TWD)"
        )));
    }
    Ok(())
}
