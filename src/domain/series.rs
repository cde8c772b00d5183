use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One trading day as delivered by the history endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    #[serde(rename = "1. open", default, deserialize_with = "opt_number_string")]
    pub open: Option<String>,
    #[serde(rename = "2. high", default, deserialize_with = "opt_number_string")]
    pub high: Option<String>,
    #[serde(rename = "3. low", default, deserialize_with = "opt_number_string")]
    pub low: Option<String>,
    #[serde(rename = "4. close", deserialize_with = "number_string")]
    pub close: String,
    #[serde(rename = "5. volume", default, deserialize_with = "opt_number_string")]
    pub volume: Option<String>,
}

impl PriceRecord {
    pub fn with_close(close: impl Into<String>) -> Self {
        Self {
            open: None,
            high: None,
            low: None,
            close: close.into(),
            volume: None,
        }
    }

    pub fn close_value(&self) -> Option<f64> {
        self.close
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
    }
}

/// Daily records keyed by `YYYY-MM-DD`; iteration is in ascending date order.
pub type StockSeries = BTreeMap<String, PriceRecord>;

fn number_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a numeric string, found {other}"
        ))),
    }
}

fn opt_number_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(serde::de::Error::custom(format!(
            "expected a numeric string, found {other}"
        ))),
    }
}
