use async_trait::async_trait;

use crate::errors::QuoteError;

/// Anything that can price a ticker symbol.
///
/// Each market data API implements this trait. The quote service only sees
/// the trait, so a source can be swapped without touching the valuation code.
/// Prices are returned in the listing's native currency.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Human-readable name of this source (for logs/errors).
    fn name(&self) -> &str;

    /// Fast path: the latest traded price.
    async fn latest_price(&self, symbol: &str) -> Result<f64, QuoteError>;

    /// Fallback: the most recent daily close within `period` (e.g., "5d").
    async fn historical_close(&self, symbol: &str, period: &str) -> Result<f64, QuoteError>;
}
