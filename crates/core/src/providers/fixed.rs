use async_trait::async_trait;
use std::collections::HashMap;

use crate::errors::QuoteError;
use super::traits::QuoteSource;

/// Quote source backed by a fixed symbol → price table.
///
/// Used for offline runs and for pinning prices that no API carries.
/// The historical close answers from the same table.
#[derive(Debug, Clone, Default)]
pub struct FixedQuoteSource {
    prices: HashMap<String, f64>,
}

impl FixedQuoteSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_prices<I, S>(prices: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            prices: prices
                .into_iter()
                .map(|(symbol, price)| (symbol.into().trim().to_uppercase(), price))
                .collect(),
        }
    }

    pub fn insert(&mut self, symbol: &str, price: f64) {
        self.prices.insert(symbol.trim().to_uppercase(), price);
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    fn lookup(&self, symbol: &str) -> Result<f64, QuoteError> {
        self.prices
            .get(&symbol.to_uppercase())
            .copied()
            .ok_or_else(|| QuoteError::InvalidSymbol {
                symbol: symbol.to_string(),
            })
    }
}

#[async_trait]
impl QuoteSource for FixedQuoteSource {
    fn name(&self) -> &str {
        "Fixed prices"
    }

    async fn latest_price(&self, symbol: &str) -> Result<f64, QuoteError> {
        self.lookup(symbol)
    }

    async fn historical_close(&self, symbol: &str, _period: &str) -> Result<f64, QuoteError> {
        self.lookup(symbol)
    }
}
