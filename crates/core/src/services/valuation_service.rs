use chrono::Utc;
use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::errors::CoreError;
use crate::models::position::{Currency, Position};
use crate::models::progress::Progress;
use crate::models::quote::Quote;
use crate::models::settings::{FailurePolicy, Settings};
use crate::models::valuation::{
    return_pct, RowFailure, ValuationReport, ValuationRow, ValuationSummary,
};
use crate::services::market_classifier::MarketClassifier;
use crate::services::quote_service::QuoteService;

/// Turns positions into valuation rows and portfolio totals.
///
/// Each position is priced through the `QuoteService`, converted into the
/// reporting currency, and compared against its cost. Totals are a reduction
/// over the finished rows, so the order in which quotes arrive never matters.
pub struct ValuationService;

impl ValuationService {
    pub fn new() -> Self {
        Self
    }

    /// Run one evaluation pass.
    ///
    /// - Settings and every position are validated before any quote is requested.
    ///   Symbols are trimmed and uppercased first.
    /// - A row whose value or cost overflows `f64` fails the pass with
    ///   `CoreError::Configuration`.
    /// - `on_progress` is called once per position, in input order.
    /// - With `max_concurrency > 1` quotes are fetched concurrently; rows still
    ///   come back in input order.
    /// - A position with no price is skipped and reported, or aborts the pass,
    ///   depending on `settings.failure_policy`.
    pub async fn evaluate<F>(
        &self,
        quotes: &QuoteService,
        positions: &[Position],
        settings: &Settings,
        mut on_progress: F,
    ) -> Result<ValuationReport, CoreError>
    where
        F: FnMut(&Progress),
    {
        settings.validate()?;
        let positions: Vec<Position> = positions.iter().map(Position::normalized).collect();
        for position in &positions {
            position.validate()?;
        }
        let positions = positions.as_slice();

        let classifier = MarketClassifier::new(&settings.local_suffixes);
        let total = positions.len();
        let mut rows = Vec::with_capacity(total);
        let mut failures = Vec::new();

        let mut fetches = stream::iter(positions)
            .map(move |position| async move {
                (position, quotes.fetch_quote(&position.symbol).await)
            })
            .buffered(settings.max_concurrency);

        let mut completed = 0;
        while let Some((position, result)) = fetches.next().await {
            completed += 1;

            let succeeded = match result {
                Ok(quote) => {
                    let currency = classifier.resolve(position);
                    let row = value_position(position, currency, &quote, settings.fx_rate);
                    if !row.is_finite() {
                        return Err(CoreError::Configuration(format!(
                            "Position {} cannot be valued: price {} x {} shares overflows the reporting currency",
                            position.symbol, quote.price, position.shares
                        )));
                    }
                    rows.push(row);
                    true
                }
                Err(CoreError::QuoteUnavailable {
                    symbol,
                    primary,
                    fallback,
                }) => match settings.failure_policy {
                    FailurePolicy::AbortPass => {
                        return Err(CoreError::QuoteUnavailable {
                            symbol,
                            primary,
                            fallback,
                        });
                    }
                    FailurePolicy::SkipAndReport => {
                        warn!(
                            symbol = %symbol,
                            primary = %primary,
                            fallback = %fallback,
                            "no price available, skipping position"
                        );
                        failures.push(RowFailure {
                            symbol,
                            primary,
                            fallback,
                        });
                        false
                    }
                },
                Err(other) => return Err(other),
            };

            on_progress(&Progress {
                completed,
                total,
                symbol: position.symbol.clone(),
                succeeded,
            });
        }

        let summary = ValuationSummary::from_rows(&rows);
        if !summary.is_finite() {
            return Err(CoreError::Configuration(
                "Portfolio totals overflow the reporting currency".into(),
            ));
        }

        info!(
            positions = total,
            valued = rows.len(),
            skipped = failures.len(),
            total_value = summary.total_value,
            "evaluation pass finished"
        );

        Ok(ValuationReport {
            generated_at: Utc::now(),
            reporting_currency: settings.reporting_currency.clone(),
            fx_rate: settings.fx_rate,
            rows,
            summary,
            failures,
        })
    }
}

impl Default for ValuationService {
    fn default() -> Self {
        Self::new()
    }
}

/// Value one position at `quote.price`. Pure arithmetic, no I/O.
///
/// Foreign listings are multiplied by `fx_rate`; local listings are not.
/// Return is 0 when the cost is 0.
pub fn value_position(
    position: &Position,
    currency: Currency,
    quote: &Quote,
    fx_rate: f64,
) -> ValuationRow {
    let factor = match currency {
        Currency::Local => 1.0,
        Currency::Foreign => fx_rate,
    };

    let market_value = quote.price * position.shares * factor;
    let cost = position.cost_basis * position.shares * factor;
    let profit = market_value - cost;

    ValuationRow {
        symbol: position.symbol.clone(),
        current_price: quote.price,
        cost_basis: position.cost_basis,
        shares: position.shares,
        currency,
        market_value,
        cost,
        profit,
        return_pct: return_pct(profit, cost),
        price_origin: quote.origin,
    }
}
