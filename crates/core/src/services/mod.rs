pub mod market_classifier;
pub mod quote_service;
pub mod report_service;
pub mod valuation_service;
