use serde::{Deserialize, Serialize};

/// Which request produced a price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuoteOrigin {
    /// The fast-path latest price
    Latest,
    /// The most recent daily close, used when the latest price failed
    HistoricalClose,
}

impl std::fmt::Display for QuoteOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuoteOrigin::Latest => write!(f, "latest"),
            QuoteOrigin::HistoricalClose => write!(f, "historical close"),
        }
    }
}

/// A price fetched for one evaluation pass. Never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,

    /// Price in the listing's native currency
    pub price: f64,

    pub origin: QuoteOrigin,

    /// Name of the quote source that answered
    pub source: String,
}
