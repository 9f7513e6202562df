//! The marshaled value representation crossing the runtime boundary
//!
//! Values travel between the runtimes as JSON, so this enum covers exactly
//! the scalar shapes the peer's `json` module can produce for the functions
//! the bridge exposes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Value {
    /// Widen a numeric value to f64; `None` for non-numeric values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let cases = [
            (Value::Null, "null"),
            (Value::Bool(true), "true"),
            (Value::Int(200), "200"),
            (Value::Float(-7.0), "-7.0"),
            (Value::Str("hi".to_string()), "\"hi\""),
        ];
        for (value, json) in cases {
            let encoded = serde_json::to_string(&value);
            assert!(encoded.as_ref().is_ok_and(|s| s == json), "encode {:?}", value);
            let decoded: Result<Value, _> = serde_json::from_str(json);
            assert!(decoded.is_ok_and(|v| v == value), "decode {}", json);
        }
    }

    #[test]
    fn test_as_f64_widens_ints() {
        assert_eq!(Value::Int(100).as_f64(), Some(100.0));
        assert_eq!(Value::Float(-3.5).as_f64(), Some(-3.5));
        assert_eq!(Value::Str("100".to_string()).as_f64(), None);
        assert_eq!(Value::Null.as_f64(), None);
    }

    #[test]
    fn test_from_impls() {
        assert_eq!(Value::from(3), Value::Int(3));
        assert_eq!(Value::from(2.5), Value::Float(2.5));
        assert_eq!(Value::from("x"), Value::Str("x".to_string()));
        assert!(Value::Null.is_null());
    }
}
