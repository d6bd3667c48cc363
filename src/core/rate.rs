//! Rate types shared by the store, the fetcher and the view

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Display;

/// A currency code paired with its exchange value. `value` is `None` when unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rate {
    pub code: String,
    pub value: Option<f64>,
}

impl Rate {
    pub fn new(code: impl Into<String>, value: impl Into<Option<f64>>) -> Self {
        Self {
            code: code.into(),
            value: value.into(),
        }
    }
}

impl Display for Rate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.value {
            Some(value) => write!(f, "{}={}", self.code, value),
            None => write!(f, "{}=N/A", self.code),
        }
    }
}

/// Full set of rates returned by one fetch, kept verbatim.
///
/// Values stay as raw JSON so the cached copy matches what the API sent. The
/// map keeps response order, which is also display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiRateSnapshot {
    pub rates: Map<String, Value>,
}

impl ApiRateSnapshot {
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Converts the snapshot into rates, in snapshot order.
    pub fn to_rates(&self) -> Vec<Rate> {
        self.rates
            .iter()
            .map(|(code, value)| Rate::new(code.clone(), coerce_value(value)))
            .collect()
    }
}

impl<const N: usize> From<[(&str, f64); N]> for ApiRateSnapshot {
    fn from(entries: [(&str, f64); N]) -> Self {
        let rates = entries
            .into_iter()
            .map(|(code, value)| (code.to_string(), Value::from(value)))
            .collect();
        Self { rates }
    }
}

/// Numbers pass through, numeric strings are parsed and booleans become 1/0.
/// Anything else has no usable value.
///
/// Unlike JavaScript's `Number()`, `null`, `""` and single-element arrays do
/// not coerce to a number; they show as N/A instead of 0 or the element.
fn coerce_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
