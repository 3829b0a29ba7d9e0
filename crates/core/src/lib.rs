pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod sources;

use models::{
    position::Position, progress::Progress, settings::Settings, valuation::ValuationReport,
};
use providers::{traits::QuoteSource, yahoo_finance::YahooFinanceProvider};
use services::{
    market_classifier::MarketClassifier, quote_service::QuoteService,
    report_service::ReportService, valuation_service::ValuationService,
};
use sources::traits::PortfolioSource;
use tracing::info;

use errors::CoreError;

/// Main entry point for the Portfolio Dashboard core library.
/// Holds the settings and all services needed to value a portfolio.
#[must_use]
pub struct PortfolioDashboard {
    settings: Settings,
    quote_service: QuoteService,
    valuation_service: ValuationService,
    report_service: ReportService,
}

impl std::fmt::Debug for PortfolioDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioDashboard")
            .field("settings", &self.settings)
            .field("quote_source", &self.quote_service.source_name())
            .finish()
    }
}

impl PortfolioDashboard {
    /// Build a dashboard on top of any quote source. Settings are validated here.
    pub fn new(settings: Settings, source: Box<dyn QuoteSource>) -> Result<Self, CoreError> {
        settings.validate()?;
        Ok(Self::build(settings, source))
    }

    /// Build a dashboard that prices through Yahoo Finance.
    pub fn with_yahoo(settings: Settings) -> Result<Self, CoreError> {
        let yahoo = YahooFinanceProvider::new()?;
        Self::new(settings, Box::new(yahoo))
    }

    // ── Evaluation ──────────────────────────────────────────────────

    /// Value a list of positions. An empty list yields an empty report with zero totals.
    pub async fn evaluate(&self, positions: &[Position]) -> Result<ValuationReport, CoreError> {
        self.evaluate_with_progress(positions, |_| {}).await
    }

    /// Value a list of positions, reporting each finished position to `on_progress`.
    pub async fn evaluate_with_progress<F>(
        &self,
        positions: &[Position],
        on_progress: F,
    ) -> Result<ValuationReport, CoreError>
    where
        F: FnMut(&Progress),
    {
        self.valuation_service
            .evaluate(&self.quote_service, positions, &self.settings, on_progress)
            .await
    }

    /// Read the portfolio from `source` and value it.
    ///
    /// A source that returns no positions is a configuration error: there is
    /// nothing to show, and the user most likely pointed at the wrong sheet.
    pub async fn refresh<F>(
        &self,
        source: &dyn PortfolioSource,
        on_progress: F,
    ) -> Result<ValuationReport, CoreError>
    where
        F: FnMut(&Progress),
    {
        let positions = source.read_positions().await?;
        if positions.is_empty() {
            return Err(CoreError::Configuration(format!(
                "{} returned no positions",
                source.name()
            )));
        }

        info!(
            source = source.name(),
            positions = positions.len(),
            quote_source = self.quote_service.source_name(),
            "refreshing portfolio valuation"
        );

        self.evaluate_with_progress(&positions, on_progress).await
    }

    // ── Accessors ───────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Name of the quote source prices come from.
    #[must_use]
    pub fn quote_source_name(&self) -> &str {
        self.quote_service.source_name()
    }

    /// Ordering, chart and formatting helpers for the configured currencies.
    #[must_use]
    pub fn report_service(&self) -> &ReportService {
        &self.report_service
    }

    /// The suffix classifier the dashboard applies to positions without an explicit currency.
    #[must_use]
    pub fn classifier(&self) -> MarketClassifier {
        MarketClassifier::new(&self.settings.local_suffixes)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(settings: Settings, source: Box<dyn QuoteSource>) -> Self {
        let quote_service = QuoteService::new(source, settings.history_period.clone());
        let report_service = ReportService::new(
            settings.reporting_currency.clone(),
            settings.foreign_currency.clone(),
        );

        Self {
            settings,
            quote_service,
            valuation_service: ValuationService::new(),
            report_service,
        }
    }
}
