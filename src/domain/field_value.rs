use crate::domain::Number;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A single value of a device snapshot.
///
/// The vendor reports most fields as scalars. Nested documents (schedules, alerts, ...) are
/// kept as they were received so the archived dump contains the complete response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Boolean(bool),
    Number(Number),
    Text(String),
    Structured(serde_json::Value),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Numeric reading of the value. Text is accepted when it parses as a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(number) => number.as_f64(),
            FieldValue::Text(text) => text.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    pub fn as_code(&self) -> Option<i64> {
        match self {
            FieldValue::Number(number) => number.as_code(),
            _ => None,
        }
    }
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Null => write!(f, "null"),
            FieldValue::Boolean(value) => write!(f, "{}", value),
            FieldValue::Number(number) => write!(f, "{}", number),
            FieldValue::Text(text) => write!(f, "{}", text),
            FieldValue::Structured(value) => write!(f, "{}", value),
        }
    }
}
