use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the entire portfolio-dashboard-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Configuration ───────────────────────────────────────────────
    /// Empty or malformed portfolio source, or invalid settings.
    /// Raised before any price is fetched.
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ── Quotes ──────────────────────────────────────────────────────
    #[error("Quote unavailable for {symbol}: latest price failed ({primary}); historical close failed ({fallback})")]
    QuoteUnavailable {
        symbol: String,
        primary: QuoteError,
        fallback: QuoteError,
    },

    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    // ── Parsing / File I/O ──────────────────────────────────────────
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("File I/O error: {0}")]
    FileIO(String),
}

/// Why a single quote request failed.
///
/// Quote sources return this instead of a catch-all error so the caller can
/// tell a flaky connection from a symbol the market does not know.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum QuoteError {
    #[error("network failure at {source_name}: {message}")]
    Network {
        source_name: String,
        message: String,
    },

    #[error("{symbol} response is missing {field}")]
    MissingField { symbol: String, field: String },

    #[error("{symbol} is not a known or listed symbol")]
    InvalidSymbol { symbol: String },
}

/// Discriminant of [`QuoteError`], handy for logging and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuoteErrorKind {
    Network,
    MissingField,
    InvalidSymbol,
}

impl QuoteError {
    pub fn kind(&self) -> QuoteErrorKind {
        match self {
            QuoteError::Network { .. } => QuoteErrorKind::Network,
            QuoteError::MissingField { .. } => QuoteErrorKind::MissingField,
            QuoteError::InvalidSymbol { .. } => QuoteErrorKind::InvalidSymbol,
        }
    }
}

impl std::fmt::Display for QuoteErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuoteErrorKind::Network => write!(f, "network"),
            QuoteErrorKind::MissingField => write!(f, "missing field"),
            QuoteErrorKind::InvalidSymbol => write!(f, "invalid symbol"),
        }
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<csv::Error> for CoreError {
    fn from(e: csv::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Spreadsheet export links carry access tokens in the query string.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
