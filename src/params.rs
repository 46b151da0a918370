//! Request parameters
//!
//! A flat string-keyed map filled from the query string (GET) or from the
//! request body (everything else). URL-encoded input yields string values,
//! JSON bodies keep their parsed values.

use serde::Serialize;
use serde_json::{Map, Value};

/// Key under which a JSON body whose root is not an object is exposed
pub const JSON_ROOT_KEY: &str = "_root";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Params(Map<String, Value>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `a=1&b=two` style input; repeated keys keep the last value
    pub fn from_urlencoded(raw: &str) -> Result<Self, serde_urlencoded::de::Error> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(raw)?;
        Ok(pairs
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect())
    }

    /// Decode a JSON document
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        Ok(match serde_json::from_str(text)? {
            Value::Object(map) => Self(map),
            other => std::iter::once((JSON_ROOT_KEY.to_string(), other)).collect(),
        })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String value for `key`, if present and a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl FromIterator<(String, Value)> for Params {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_urlencoded() {
        let params = Params::from_urlencoded("name=J%C3%BCrgen&city=new+york&empty=").unwrap();
        assert_eq!(params.get_str("name"), Some("Jürgen"));
        assert_eq!(params.get_str("city"), Some("new york"));
        assert_eq!(params.get_str("empty"), Some(""));
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_urlencoded_repeated_key_last_wins() {
        let params = Params::from_urlencoded("a=1&a=2").unwrap();
        assert_eq!(params.get_str("a"), Some("2"));
    }

    #[test]
    fn test_urlencoded_empty_input() {
        assert!(Params::from_urlencoded("").unwrap().is_empty());
    }

    #[test]
    fn test_json_object() {
        let params = Params::from_json(r#"{"a":1,"b":{"c":[true]}}"#).unwrap();
        assert_eq!(params.get("a"), Some(&json!(1)));
        assert_eq!(params.get("b"), Some(&json!({"c": [true]})));
    }

    #[test]
    fn test_json_non_object_root() {
        let params = Params::from_json("[1,2]").unwrap();
        assert_eq!(params.get(JSON_ROOT_KEY), Some(&json!([1, 2])));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_json_malformed() {
        assert!(Params::from_json("{\"a\":").is_err());
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let params = Params::from_json(r#"{"a":1}"#).unwrap();
        assert_eq!(serde_json::to_string(&params).unwrap(), r#"{"a":1}"#);
    }
}
