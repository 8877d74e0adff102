//! ArgMap: named arguments with a first-class notion of presence.
//!
//! The same type serves as the caller's input object and as the values map
//! handed back on success. Two lookups exist on purpose:
//!
//! - [`ArgMap::contains`] asks whether the *key* exists,
//! - [`ArgMap::get_or_undefined`] yields the value, or `Undefined` when the
//!   key is missing.
//!
//! A key holding `Value::Undefined` is present. Required-style checks care
//! about that difference.

use std::collections::BTreeMap;

use crate::value::Value;
use crate::ShapeError;

static UNDEFINED: Value = Value::Undefined;

/// Named argument values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgMap {
    entries: BTreeMap<String, Value>,
}

/// Input object supplied by the caller.
pub type Args = ArgMap;

/// Normalized output delivered on success.
pub type Values = ArgMap;

impl ArgMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a value, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(name.into(), value.into())
    }

    /// Remove a key entirely.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.entries.remove(name)
    }

    /// Whether the key is present, whatever its value.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Get a value if the key is present.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Get a value, treating a missing key as `Undefined`.
    pub fn get_or_undefined(&self, name: &str) -> &Value {
        self.entries.get(name).unwrap_or(&UNDEFINED)
    }

    /// Argument names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build from a JSON object.
    ///
    /// Anything other than an object is a shape error.
    pub fn from_json(json: &serde_json::Value) -> Result<Self, ShapeError> {
        let object = json
            .as_object()
            .ok_or_else(|| ShapeError::not_an_object("args", json))?;
        Ok(object
            .iter()
            .map(|(k, v)| (k.clone(), Value::from(v.clone())))
            .collect())
    }

    /// Convert to a JSON object. `Undefined` entries are dropped.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.entries
                .iter()
                .filter_map(|(k, v)| v.to_json().map(|j| (k.clone(), j)))
                .collect(),
        )
    }

    pub fn into_inner(self) -> BTreeMap<String, Value> {
        self.entries
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ArgMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for ArgMap {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// JSON type name for shape errors.
pub(crate) fn json_type_name(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
