use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::CoreError;
use crate::models::position::Position;
use super::csv_format::{parse_positions, CurrencyCodes};
use super::traits::PortfolioSource;

/// Reads positions from a CSV file on disk. See [`super::csv_format`] for the schema.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
    codes: CurrencyCodes,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            codes: CurrencyCodes::default(),
        }
    }

    /// Accept these ISO codes in the `currency` column.
    pub fn with_currency_codes(mut self, codes: CurrencyCodes) -> Self {
        self.codes = codes;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PortfolioSource for CsvFileSource {
    fn name(&self) -> &str {
        "CSV file"
    }

    async fn read_positions(&self) -> Result<Vec<Position>, CoreError> {
        debug!(path = %self.path.display(), "reading portfolio file");
        let file = std::fs::File::open(&self.path).map_err(|e| {
            CoreError::FileIO(format!("{}: {e}", self.path.display()))
        })?;
        parse_positions(file, &self.codes)
    }
}
