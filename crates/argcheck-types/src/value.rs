//! Value: the dynamic value carried by argument maps.
//!
//! Arguments arrive from host code as loosely typed key/value data. `Value`
//! mirrors JSON with one addition: `Undefined`, the absent-value sentinel.
//! A key can be present in an [`ArgMap`](crate::ArgMap) while holding
//! `Undefined`, and that is not the same thing as holding `Null`.

use std::collections::BTreeMap;
use std::fmt;

/// A dynamic argument value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No value at all. Distinct from `Null`.
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// True for the `Undefined` sentinel only.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short type name for messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Loose truthiness, used where a flag was given as a non-boolean.
    ///
    /// `Undefined`, `Null`, `false`, `0`, `0.0`, NaN and `""` are falsy.
    /// Arrays and objects are truthy even when empty.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0 && !f.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }

    /// Convert to JSON.
    ///
    /// Returns `None` for `Undefined`. Nested `Undefined` entries are
    /// dropped from objects and become `null` inside arrays.
    pub fn to_json(&self) -> Option<serde_json::Value> {
        let json = match self {
            Value::Undefined => return None,
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(|v| v.to_json().unwrap_or(serde_json::Value::Null))
                    .collect(),
            ),
            Value::Object(fields) => serde_json::Value::Object(
                fields
                    .iter()
                    .filter_map(|(k, v)| v.to_json().map(|j| (k.clone(), j)))
                    .collect(),
            ),
        };
        Some(json)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => Value::Int(i),
                // Floats, and integers above i64::MAX (rounded to nearest f64).
                (None, Some(f)) => Value::Float(f),
                (None, None) => Value::Null,
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(fields) => Value::Object(
                fields.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::String(s) => write!(f, "{}", s),
            other => match other.to_json() {
                Some(json) => write!(f, "{}", json),
                None => write!(f, "undefined"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn undefined_is_not_null() {
        assert!(Value::Undefined.is_undefined());
        assert!(!Value::Null.is_undefined());
        assert_ne!(Value::Undefined, Value::Null);
    }

    #[test]
    fn from_json_keeps_structure() {
        let value = Value::from(json!({"a": [1, 2.5, "x"], "b": null}));
        let Value::Object(fields) = value else {
            panic!("expected object");
        };
        assert_eq!(
            fields.get("a"),
            Some(&Value::Array(vec![
                Value::Int(1),
                Value::Float(2.5),
                Value::String("x".into())
            ]))
        );
        assert_eq!(fields.get("b"), Some(&Value::Null));
    }

    #[test]
    fn integers_past_i64_become_floats() {
        assert_eq!(Value::from(json!(i64::MAX)), Value::Int(i64::MAX));
        assert_eq!(Value::from(json!(u64::MAX)), Value::Float(u64::MAX as f64));
    }

    #[test]
    fn to_json_drops_nested_undefined() {
        let mut fields = BTreeMap::new();
        fields.insert("keep".to_string(), Value::Int(1));
        fields.insert("gone".to_string(), Value::Undefined);
        let obj = Value::Object(fields);
        assert_eq!(obj.to_json(), Some(json!({"keep": 1})));

        let arr = Value::Array(vec![Value::Undefined, Value::Bool(true)]);
        assert_eq!(arr.to_json(), Some(json!([null, true])));

        assert_eq!(Value::Undefined.to_json(), None);
    }

    #[test]
    fn truthiness() {
        assert!(!Value::Undefined.is_truthy());
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Int(0).is_truthy());
        assert!(!Value::String(String::new()).is_truthy());
        assert!(Value::String("x".into()).is_truthy());
        assert!(Value::Array(vec![]).is_truthy());
    }

    #[test]
    fn display() {
        assert_eq!(Value::from("plain").to_string(), "plain");
        assert_eq!(Value::Int(42).to_string(), "42");
        assert_eq!(Value::Undefined.to_string(), "undefined");
        assert_eq!(Value::from(vec![1, 2]).to_string(), "[1,2]");
    }
}
