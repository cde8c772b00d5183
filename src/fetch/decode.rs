use serde_json::Value;

use crate::domain::{Stock, StockSeries};
use crate::error::{AppError, Context, Result};

/// Decode a search response. Empty, `null` or otherwise falsy bodies mean "no matches".
pub fn decode_suggestions(body: &str) -> Result<Vec<Stock>> {
    let Some(root) = parse_body(body)? else {
        return Ok(Vec::new());
    };

    match root {
        Value::Array(_) => {
            let stocks: Vec<Stock> =
                serde_json::from_value(root).context("search rows must be {ticker, name}")?;
            Ok(stocks)
        }
        value if is_falsy(&value) => Ok(Vec::new()),
        other => Err(AppError::payload(format!(
            "search response must be an array, found {}",
            kind_of(&other)
        ))),
    }
}

/// Decode a history response keyed by date. A `null` body yields `None`.
pub fn decode_history(body: &str) -> Result<Option<StockSeries>> {
    let Some(root) = parse_body(body)? else {
        return Ok(None);
    };

    match root {
        Value::Null => Ok(None),
        Value::Object(_) => {
            let series: StockSeries = serde_json::from_value(root)
                .context("history rows must carry a `4. close` field")?;
            Ok(Some(series))
        }
        other => Err(AppError::payload(format!(
            "history response must be an object keyed by date, found {}",
            kind_of(&other)
        ))),
    }
}

fn parse_body(body: &str) -> Result<Option<Value>> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let value = serde_json::from_str(trimmed).context("response body is not valid JSON")?;
    Ok(Some(value))
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;

    #[test]
    fn decodes_suggestions_in_server_order() {
        let body = r#"[
            {"ticker": "AAPL", "name": "Apple Inc."},
            {"ticker": "AAPB", "name": "GraniteShares 2x Long AAPL"}
        ]"#;
        let stocks = decode_suggestions(body).unwrap();
        let tickers: Vec<&str> = stocks.iter().map(|s| s.ticker.as_str()).collect();
        assert_eq!(tickers, ["AAPL", "AAPB"]);
    }

    #[test]
    fn absent_suggestions_are_empty() {
        for body in ["", "  ", "null", "false", "0", "\"\"", "[]"] {
            assert!(decode_suggestions(body).unwrap().is_empty(), "body {body:?}");
        }
    }

    #[test]
    fn wrong_suggestion_shape_is_malformed() {
        let err = decode_suggestions(r#"{"ticker": "AAPL"}"#).unwrap_err();
        assert_eq!(err.kind(), FailureKind::MalformedPayload);

        let err = decode_suggestions(r#"[{"symbol": "AAPL"}]"#).unwrap_err();
        assert_eq!(err.kind(), FailureKind::MalformedPayload);

        let err = decode_suggestions("<html>").unwrap_err();
        assert_eq!(err.kind(), FailureKind::MalformedPayload);
    }

    #[test]
    fn decodes_history_object() {
        let body = r#"{
            "2024-03-15": {"4. close": "172.62"},
            "2024-03-14": {"4. close": "173.00"}
        }"#;
        let series = decode_history(body).unwrap().expect("series present");
        assert_eq!(series.len(), 2);
        assert_eq!(series.keys().next().map(String::as_str), Some("2024-03-14"));
    }

    #[test]
    fn empty_history_object_is_kept() {
        let series = decode_history("{}").unwrap().expect("series present");
        assert!(series.is_empty());
    }

    #[test]
    fn null_history_is_none() {
        assert_eq!(decode_history("null").unwrap(), None);
        assert_eq!(decode_history("").unwrap(), None);
    }

    #[test]
    fn history_error_notes_are_malformed() {
        let err = decode_history(r#"{"Error Message": "Invalid API call."}"#).unwrap_err();
        assert_eq!(err.kind(), FailureKind::MalformedPayload);

        let err = decode_history("[1, 2]").unwrap_err();
        assert_eq!(err.kind(), FailureKind::MalformedPayload);
    }
}
