//! Typed path parameters.
//!
//! # Parameter Types
//! - `str`: any run of non-slash characters, yields a string
//! - `int`: a run of ASCII digits `0-9`, yields an `i64`. Other Unicode
//!   digits do not match, so the path falls through to later routes.
//! - `path`: any run of characters including `/` (non-greedy), yields a string
//!
//! The set is closed. Unknown type names in a pattern are treated as `str`.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Declared type of a path parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    Str,
    Int,
    Path,
}

impl ParamType {
    /// Look up a type by the name used inside `<type:name>` markers.
    pub fn from_name(name: &str) -> Self {
        match name {
            "int" => ParamType::Int,
            "path" => ParamType::Path,
            _ => ParamType::Str,
        }
    }

    /// Name as written in patterns.
    pub fn name(&self) -> &'static str {
        match self {
            ParamType::Str => "str",
            ParamType::Int => "int",
            ParamType::Path => "path",
        }
    }

    /// Regex fragment a capture of this type must match.
    pub fn pattern(&self) -> &'static str {
        match self {
            ParamType::Str => r"[^/]+",
            ParamType::Int => r"[0-9]+",
            ParamType::Path => r".+?",
        }
    }

    /// Convert a raw capture into a typed value.
    ///
    /// Returns `None` when the capture does not convert (e.g. digits that
    /// overflow `i64`); callers treat that as a non-match.
    pub fn convert(&self, raw: &str) -> Option<ParamValue> {
        match self {
            ParamType::Int => raw.parse::<i64>().ok().map(ParamValue::Int),
            ParamType::Str | ParamType::Path => Some(ParamValue::Str(raw.to_string())),
        }
    }
}

/// A converted parameter value.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Str(String),
    Int(i64),
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            ParamValue::Int(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(i) => Some(*i),
            ParamValue::Str(_) => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Int(i) => write!(f, "{}", i),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(value.into())
    }
}

/// Parameters extracted from a path, in pattern order.
///
/// Also used as the input of reverse lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert a value, replacing any previous value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Shorthand for an `int` parameter.
    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(ParamValue::as_int)
    }

    /// Shorthand for a `str` or `path` parameter.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ParamValue::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Params {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_type_falls_back_to_str() {
        assert_eq!(ParamType::from_name("int"), ParamType::Int);
        assert_eq!(ParamType::from_name("path"), ParamType::Path);
        assert_eq!(ParamType::from_name("uuid"), ParamType::Str);
    }

    #[test]
    fn test_convert() {
        assert_eq!(ParamType::Int.convert("123"), Some(ParamValue::Int(123)));
        assert_eq!(ParamType::Int.convert("99999999999999999999"), None);
        assert_eq!(
            ParamType::Path.convert("docs/readme.txt"),
            Some(ParamValue::Str("docs/readme.txt".into()))
        );
    }

    #[test]
    fn test_params_accessors() {
        let params = Params::new().with("user_id", 42).with("slug", "hello");
        assert_eq!(params.get_int("user_id"), Some(42));
        assert_eq!(params.get_str("slug"), Some("hello"));
        assert_eq!(params.get_str("user_id"), None);
        assert!(!params.contains("missing"));

        let names: Vec<&str> = params.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["user_id", "slug"]);
    }

    #[test]
    fn test_insert_replaces() {
        let mut params = Params::new();
        params.insert("id", 1);
        params.insert("id", 2);
        assert_eq!(params.len(), 1);
        assert_eq!(params.get_int("id"), Some(2));
    }

    #[test]
    fn test_serializes_as_map() {
        let params: Params = [("id", ParamValue::Int(7)), ("name", "ada".into())]
            .into_iter()
            .collect();
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json, serde_json::json!({"id": 7, "name": "ada"}));
    }
}
