use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::position::Position;
use super::traits::PortfolioSource;

/// A portfolio held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticPortfolioSource {
    positions: Vec<Position>,
}

impl StaticPortfolioSource {
    pub fn new(positions: Vec<Position>) -> Self {
        Self { positions }
    }

    /// Demo portfolio: two Taiwan listings and two US listings.
    pub fn sample() -> Self {
        Self::new(vec![
            Position::new("2330.TW", 600.0, 2000.0),
            Position::new("NVDA", 120.0, 50.0),
            Position::new("TSLA", 250.0, 30.0),
            Position::new("0050.TW", 130.0, 1000.0),
        ])
    }
}

#[async_trait]
impl PortfolioSource for StaticPortfolioSource {
    fn name(&self) -> &str {
        "Static list"
    }

    async fn read_positions(&self) -> Result<Vec<Position>, CoreError> {
        Ok(self.positions.clone())
    }
}
