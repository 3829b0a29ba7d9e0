use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::position::Position;

/// Where the list of holdings comes from.
///
/// A static list, a CSV file, or a live spreadsheet all look the same to the
/// dashboard. Connectivity and schema problems surface as
/// `CoreError::Configuration` (or the underlying I/O / network error).
#[async_trait]
pub trait PortfolioSource: Send + Sync {
    /// Human-readable name of this source (for logs/errors).
    fn name(&self) -> &str;

    /// Read every position. An empty list is returned as-is; the caller decides.
    async fn read_positions(&self) -> Result<Vec<Position>, CoreError>;
}
