use serde::{Deserialize, Serialize};

/// A security as returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub ticker: String,
    pub name: String,
}

impl Stock {
    pub fn new(ticker: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            name: name.into(),
        }
    }

    /// `TICKER - Name`, the row format used in suggestion lists.
    pub fn label(&self) -> String {
        format!("{} - {}", self.ticker, self.name)
    }
}

impl Default for Stock {
    fn default() -> Self {
        Stock::new("AAPL", "Apple Inc.")
    }
}
