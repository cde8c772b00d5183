use std::fs;
use std::path::Path;

use log::info;

use crate::error::{Context, Result};

use super::{validator, ViewerConfig};

/// Load the viewer configuration from `path`, or the built-in defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<ViewerConfig> {
    let Some(path) = path else {
        info!("using built-in viewer configuration");
        let config = ViewerConfig::builtin();
        validator::validate_config(&config)?;
        return Ok(config);
    };

    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read viewer config at {}", path.display()))?;
    let config = load_config_from_str(&json)
        .with_context(|| format!("failed to load viewer config at {}", path.display()))?;
    info!("loaded viewer configuration from {}", path.display());
    Ok(config)
}

/// Parse and validate a JSON document; absent fields keep their defaults.
pub fn load_config_from_str(json: &str) -> Result<ViewerConfig> {
    let config: ViewerConfig =
        serde_json::from_str(json).context("failed to parse viewer config JSON")?;
    validator::validate_config(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Stock;

    #[test]
    fn partial_documents_keep_defaults() {
        let config = load_config_from_str(r#"{"debounce_ms": 150}"#).expect("config loads");
        assert_eq!(config.debounce_ms, 150);
        assert_eq!(config.min_query_chars, 3);
        assert_eq!(config.default_stock, Stock::default());
    }

    #[test]
    fn reads_every_field() {
        let json = r#"{
            "base_url": "http://localhost:8080",
            "debounce_ms": 500,
            "min_query_chars": 2,
            "request_timeout_secs": 15,
            "default_stock": {"ticker": "MSFT", "name": "Microsoft Corp"},
            "discard_stale_responses": false
        }"#;
        let config = load_config_from_str(json).expect("config loads");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.request_timeout_secs, Some(15));
        assert_eq!(config.default_stock.ticker, "MSFT");
        assert!(!config.discard_stale_responses);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = load_config_from_str("{").expect_err("should fail");
        assert!(err.to_string().contains("parse"), "unexpected error: {err}");
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_config(Some(Path::new("does/not/exist.json"))).expect_err("should fail");
        assert!(err.to_string().contains("does/not/exist.json"));
    }

    #[test]
    fn no_path_uses_builtin() {
        assert_eq!(load_config(None).unwrap(), ViewerConfig::builtin());
    }
}
