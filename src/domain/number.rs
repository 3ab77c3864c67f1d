use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A JSON number as reported by the vendor API, keeping the kind it was sent as.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    PositiveInt(u64),
    NegativeInt(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Number::PositiveInt(n) => Some(*n as f64),
            Number::NegativeInt(n) => Some(*n as f64),
            Number::Float(n) => Some(*n),
        }
    }

    /// Returns the value as a status code when it is a whole number, e.g. `3` or `3.0`.
    pub fn as_code(&self) -> Option<i64> {
        match self {
            Number::PositiveInt(n) => i64::try_from(*n).ok(),
            Number::NegativeInt(n) => Some(*n),
            Number::Float(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64 => Some(*n as i64),
            Number::Float(_) => None,
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::PositiveInt(a), Number::PositiveInt(b)) => a == b,
            (Number::NegativeInt(a), Number::NegativeInt(b)) => a == b,
            (Number::Float(a), Number::Float(b)) => a == b,
            (Number::Float(a), Number::PositiveInt(b)) => *a == *b as f64,
            (Number::Float(a), Number::NegativeInt(b)) => *a == *b as f64,
            (Number::PositiveInt(a), Number::Float(b)) => *a as f64 == *b,
            (Number::NegativeInt(a), Number::Float(b)) => *a as f64 == *b,
            _ => false,
        }
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::PositiveInt(n) => write!(f, "{}", n),
            Number::NegativeInt(n) => write!(f, "{}", n),
            // Whole floats keep a trailing `.0` so `22.0` does not read as an integer reading
            Number::Float(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e16 => write!(f, "{:.1}", n),
            Number::Float(n) => write!(f, "{}", n),
        }
    }
}
