use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::errors::CoreError;
use crate::models::position::Position;
use super::csv_format::{parse_positions, CurrencyCodes};
use super::traits::PortfolioSource;

/// Live-reads a spreadsheet through its CSV export link.
///
/// Works with any sheet service that can publish a tab as CSV over HTTP(S),
/// e.g. a Google Sheets `.../export?format=csv` URL. The sheet is fetched on
/// every read; nothing is cached.
pub struct SpreadsheetSource {
    client: Client,
    url: String,
    codes: CurrencyCodes,
}

impl SpreadsheetSource {
    pub fn new(url: impl Into<String>) -> Result<Self, CoreError> {
        let url = url.into();
        let scheme_ok = url.starts_with("https://") || url.starts_with("http://");
        if !scheme_ok {
            return Err(CoreError::Configuration(format!(
                "Spreadsheet URL must start with http:// or https://, got '{url}'"
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Ok(Self {
            client,
            url,
            codes: CurrencyCodes::default(),
        })
    }

    /// Accept these ISO codes in the `currency` column.
    pub fn with_currency_codes(mut self, codes: CurrencyCodes) -> Self {
        self.codes = codes;
        self
    }
}

#[async_trait]
impl PortfolioSource for SpreadsheetSource {
    fn name(&self) -> &str {
        "Spreadsheet"
    }

    async fn read_positions(&self) -> Result<Vec<Position>, CoreError> {
        debug!("fetching portfolio spreadsheet export");

        let resp = self.client.get(&self.url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Api {
                provider: "Spreadsheet".into(),
                message: format!("Export request failed with HTTP {status}"),
            });
        }

        let body = resp.bytes().await?;
        parse_positions(body.as_ref(), &self.codes)
    }
}
