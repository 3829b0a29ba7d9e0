pub mod chart;
pub mod position;
pub mod progress;
pub mod quote;
pub mod settings;
pub mod valuation;
