use crate::models::position::{Currency, Position};

/// Decides whether a listing is local or foreign from its exchange suffix.
///
/// A symbol is `Local` when it ends with one of the configured suffixes
/// (compared case-insensitively), otherwise `Foreign`. Every symbol maps to
/// exactly one of the two.
#[derive(Debug, Clone)]
pub struct MarketClassifier {
    local_suffixes: Vec<String>,
}

impl MarketClassifier {
    pub fn new<I, S>(local_suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            local_suffixes: local_suffixes
                .into_iter()
                .map(|s| s.as_ref().trim().to_uppercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// Classify a bare symbol by suffix.
    pub fn classify(&self, symbol: &str) -> Currency {
        let upper = symbol.trim().to_uppercase();
        if self.local_suffixes.iter().any(|suffix| upper.ends_with(suffix.as_str())) {
            Currency::Local
        } else {
            Currency::Foreign
        }
    }

    /// The position's explicit currency if it has one, else the suffix rule.
    pub fn resolve(&self, position: &Position) -> Currency {
        position
            .currency
            .unwrap_or_else(|| self.classify(&position.symbol))
    }
}
