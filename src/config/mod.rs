use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::Stock;

pub mod loader;
pub mod validator;

pub use loader::{load_config, load_config_from_str};

pub const DEFAULT_BASE_URL: &str =
    "https://basicstockviewerbackend-ezf9eka8bzaqdyah.northeurope-01.azurewebsites.net";

/// Runtime settings for the viewer. Every field has a built-in default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub base_url: String,
    pub debounce_ms: u64,
    pub min_query_chars: usize,
    pub request_timeout_secs: Option<u64>,
    pub default_stock: Stock,
    pub discard_stale_responses: bool,
}

impl ViewerConfig {
    pub fn builtin() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            debounce_ms: 300,
            min_query_chars: 3,
            request_timeout_secs: None,
            default_stock: Stock::default(),
            discard_stale_responses: true,
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Whether `query` is long enough to be sent to the search endpoint.
    pub fn is_searchable(&self, query: &str) -> bool {
        query.chars().count() >= self.min_query_chars
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_defaults() {
        let config = ViewerConfig::builtin();
        assert_eq!(config.debounce(), Duration::from_millis(300));
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.default_stock.ticker, "AAPL");
        assert!(config.discard_stale_responses);
    }

    #[test]
    fn searchable_only_above_two_chars() {
        let config = ViewerConfig::builtin();
        assert!(!config.is_searchable(""));
        assert!(!config.is_searchable("AA"));
        assert!(config.is_searchable("AAP"));
        assert!(!config.is_searchable("éé"));
        assert!(!config.is_searchable("😀a"));
    }
}
