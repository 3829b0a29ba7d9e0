pub mod traits;

// Quote source implementations
pub mod fixed;
pub mod yahoo_finance;
