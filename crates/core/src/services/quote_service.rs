use tracing::{debug, warn};

use crate::errors::{CoreError, QuoteError};
use crate::models::quote::{Quote, QuoteOrigin};
use crate::providers::traits::QuoteSource;

/// Fetches one price per symbol: latest first, historical close as fallback.
///
/// There is exactly one fallback hop and no retries. Prices are validated to
/// be finite and non-negative; anything else is treated as a missing field.
pub struct QuoteService {
    source: Box<dyn QuoteSource>,
    history_period: String,
}

impl QuoteService {
    pub fn new(source: Box<dyn QuoteSource>, history_period: impl Into<String>) -> Self {
        Self {
            source,
            history_period: history_period.into(),
        }
    }

    /// Name of the underlying quote source.
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub fn history_period(&self) -> &str {
        &self.history_period
    }

    /// Price `symbol`, falling back to the historical close if the latest price fails.
    ///
    /// Returns `CoreError::QuoteUnavailable` carrying both failures when
    /// neither request produced a usable price.
    pub async fn fetch_quote(&self, symbol: &str) -> Result<Quote, CoreError> {
        let primary = match self.latest(symbol).await {
            Ok(price) => {
                return Ok(self.quote(symbol, price, QuoteOrigin::Latest));
            }
            Err(e) => e,
        };

        warn!(
            symbol,
            kind = %primary.kind(),
            error = %primary,
            "latest price unavailable, falling back to historical close"
        );

        match self.historical(symbol).await {
            Ok(price) => Ok(self.quote(symbol, price, QuoteOrigin::HistoricalClose)),
            Err(fallback) => Err(CoreError::QuoteUnavailable {
                symbol: symbol.to_string(),
                primary,
                fallback,
            }),
        }
    }

    async fn latest(&self, symbol: &str) -> Result<f64, QuoteError> {
        debug!(symbol, source = self.source.name(), "requesting latest price");
        let price = self.source.latest_price(symbol).await?;
        Self::check_price(symbol, price, "latest price")
    }

    async fn historical(&self, symbol: &str) -> Result<f64, QuoteError> {
        debug!(
            symbol,
            source = self.source.name(),
            period = %self.history_period,
            "requesting historical close"
        );
        let price = self
            .source
            .historical_close(symbol, &self.history_period)
            .await?;
        Self::check_price(symbol, price, "closing price")
    }

    fn check_price(symbol: &str, price: f64, field: &str) -> Result<f64, QuoteError> {
        if !price.is_finite() || price < 0.0 {
            return Err(QuoteError::MissingField {
                symbol: symbol.to_string(),
                field: format!("{field} (got {price})"),
            });
        }
        Ok(price)
    }

    fn quote(&self, symbol: &str, price: f64, origin: QuoteOrigin) -> Quote {
        Quote {
            symbol: symbol.to_string(),
            price,
            origin,
            source: self.source.name().to_string(),
        }
    }
}
