use reqwest::Url;

use crate::error::{AppError, Result};

use super::ViewerConfig;

/// Validate a configuration, aggregating every issue into one error.
pub fn validate_config(config: &ViewerConfig) -> Result<()> {
    let mut issues = Vec::new();

    validate_base_url(&config.base_url, &mut issues);
    validate_timing(config, &mut issues);

    if config.min_query_chars == 0 {
        issues.push("min_query_chars must be at least 1".to_string());
    }
    if config.default_stock.ticker.trim().is_empty() {
        issues.push("default_stock.ticker must not be empty".to_string());
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(AppError::Config(issues.join("\n  - ")))
    }
}

fn validate_base_url(base_url: &str, issues: &mut Vec<String>) {
    match Url::parse(base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => issues.push(format!(
            "base_url must use http or https, found `{}`",
            url.scheme()
        )),
        Err(err) => issues.push(format!("base_url `{base_url}` is not a valid URL: {err}")),
    }
}

fn validate_timing(config: &ViewerConfig, issues: &mut Vec<String>) {
    if config.debounce_ms == 0 {
        issues.push("debounce_ms must be greater than zero".to_string());
    }
    if config.request_timeout_secs == Some(0) {
        issues.push("request_timeout_secs must be greater than zero when set".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_config_is_valid() {
        validate_config(&ViewerConfig::builtin()).expect("builtin config should be valid");
    }

    #[test]
    fn rejects_non_http_base_url() {
        let mut config = ViewerConfig::builtin();
        config.base_url = "ftp://example.com".to_string();

        let err = validate_config(&config).expect_err("validation should fail");
        assert!(
            err.to_string().contains("http or https"),
            "unexpected error message: {err}"
        );
    }

    #[test]
    fn aggregates_all_issues() {
        let mut config = ViewerConfig::builtin();
        config.base_url = "not a url".to_string();
        config.debounce_ms = 0;
        config.request_timeout_secs = Some(0);
        config.default_stock.ticker = "  ".to_string();

        let msg = validate_config(&config)
            .expect_err("validation should fail")
            .to_string();
        assert!(msg.contains("not a valid URL"), "unexpected error message: {msg}");
        assert!(msg.contains("debounce_ms"), "unexpected error message: {msg}");
        assert!(msg.contains("request_timeout_secs"), "unexpected error message: {msg}");
        assert!(msg.contains("default_stock.ticker"), "unexpected error message: {msg}");
    }
}
