//! Attribute storage backing the model façade.
//!
//! Attributes are an ordered JSON object. Keys are normalized on the way in
//! so that `:name` and `name` address the same attribute.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Map;
use thiserror::Error;

/// A single attribute value.
pub type Value = serde_json::Value;

/// Failure raised by the dynamic attribute façade.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
    #[error("undefined method `{method}` for an instance of {class}")]
    NoMethod { class: String, method: String },

    #[error("{class} attributes must be a JSON object, got {kind}")]
    NotAnObject { class: String, kind: &'static str },
}

/// Ordered attribute map with normalized keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes {
    map: Map<String, Value>,
}

impl Attributes {
    /// Create an empty attribute map.
    pub fn new() -> Self {
        Attributes { map: Map::new() }
    }

    /// Build attributes from a decoded JSON object.
    pub fn from_map(map: Map<String, Value>) -> Self {
        map.into_iter().collect()
    }

    /// Normalize an attribute key to its canonical form.
    pub fn normalize_key(key: &str) -> &str {
        key.trim().trim_start_matches(':')
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.map.get(Self::normalize_key(key))
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.map.get_mut(Self::normalize_key(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(Self::normalize_key(key))
    }

    /// Insert or replace an attribute, returning the previous value.
    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<Value>) -> Option<Value> {
        let key = Self::normalize_key(key.as_ref()).to_string();
        self.map.insert(key, value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.map.shift_remove(Self::normalize_key(key))
    }

    /// Merge another attribute map into this one (other takes precedence).
    pub fn merge(&mut self, other: Attributes) {
        for (key, value) in other.map {
            self.map.insert(key, value);
        }
    }

    /// Keep only the named attributes, in this map's order.
    pub fn select<S: AsRef<str>>(&self, keys: &[S]) -> Attributes {
        self.map
            .iter()
            .filter(|(k, _)| keys.iter().any(|s| Self::normalize_key(s.as_ref()) == k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.map
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.map
    }

    /// Render the attributes as query parameters.
    ///
    /// Null values are skipped; nested values are sent as their JSON text.
    pub fn to_query(&self) -> Vec<(String, String)> {
        self.map
            .iter()
            .filter_map(|(k, v)| to_param(v).map(|p| (k.clone(), p)))
            .collect()
    }

    /// Check a JSON value and turn it into attributes.
    pub fn try_from_value(class: &str, value: Value) -> Result<Self, AttributeError> {
        match value {
            Value::Object(map) => Ok(Attributes::from_map(map)),
            other => Err(AttributeError::NotAnObject {
                class: class.to_string(),
                kind: kind_of(&other),
            }),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: AsRef<str>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for (key, value) in iter {
            attributes.insert(key, value);
        }
        attributes
    }
}

impl From<Map<String, Value>> for Attributes {
    fn from(map: Map<String, Value>) -> Self {
        Attributes::from_map(map)
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Object(self.map.clone()))
    }
}

/// Ruby-style truthiness: everything except `null` and `false` is true.
pub fn truthy(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Bool(false))
}

/// Render a value as a path segment or query parameter.
///
/// Strings are used verbatim (no JSON quoting). Returns `None` for null.
pub fn to_param(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Short name of a JSON value's kind, for error messages.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keys_are_normalized() {
        let attrs: Attributes = [(":name", json!("Finn")), ("type", json!("human"))]
            .into_iter()
            .collect();

        assert_eq!(attrs.get("name"), Some(&json!("Finn")));
        assert_eq!(attrs.get(":name"), Some(&json!("Finn")));
        assert!(attrs.contains(":type"));
        assert_eq!(attrs.keys().collect::<Vec<_>>(), vec!["name", "type"]);
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let attrs = Attributes::try_from_value(
            "Adventure",
            json!({"zeta": 1, "alpha": 2, "mid": 3}),
        )
        .unwrap();
        assert_eq!(attrs.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_rejects_non_objects() {
        let err = Attributes::try_from_value("Member", json!([1, 2])).unwrap_err();
        assert_eq!(
            err,
            AttributeError::NotAnObject {
                class: "Member".to_string(),
                kind: "array"
            }
        );
    }

    #[test]
    fn test_select_keeps_order() {
        let attrs: Attributes = [("id", json!(1)), ("name", json!("x")), ("type", json!("y"))]
            .into_iter()
            .collect();
        let picked = attrs.select(&["type", "id"]);
        assert_eq!(picked.keys().collect::<Vec<_>>(), vec!["id", "type"]);
    }

    #[test]
    fn test_to_query_skips_nulls() {
        let attrs: Attributes = [("type", json!("MATHEMATICAL")), ("gone", Value::Null), ("n", json!(2))]
            .into_iter()
            .collect();
        assert_eq!(
            attrs.to_query(),
            vec![
                ("type".to_string(), "MATHEMATICAL".to_string()),
                ("n".to_string(), "2".to_string())
            ]
        );
    }

    #[test]
    fn test_truthy() {
        assert!(truthy(&json!("x")));
        assert!(truthy(&json!(0)));
        assert!(!truthy(&json!(false)));
        assert!(!truthy(&Value::Null));
    }
}
