//! Metadata is a sorted key-value store attached to text units
//!
//! Loaders record where a unit came from (`source`, `source_hash`); downstream consumers are free
//! to add their own keys.
use std::collections::BTreeMap;

use serde::Deserializer;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    inner: BTreeMap<String, serde_json::Value>,
}

impl Metadata {
    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<serde_json::Value>,
    {
        self.inner.insert(key.into(), value.into());
    }

    pub fn get(&self, key: impl AsRef<str>) -> Option<&serde_json::Value> {
        self.inner.get(key.as_ref())
    }
}

impl<'de> serde::Deserialize<'de> for Metadata {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        BTreeMap::deserialize(deserializer).map(|inner| Metadata { inner })
    }
}

impl serde::Serialize for Metadata {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.inner.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_and_get() {
        let mut metadata = Metadata::default();
        metadata.insert("source", "https://example.com");

        assert_eq!(
            metadata.get("source").unwrap().as_str(),
            Some("https://example.com")
        );
        assert!(metadata.get("missing").is_none());
    }

    #[test]
    fn test_insert_overwrites() {
        let mut metadata = Metadata::default();
        metadata.insert("source_hash", json!("abc"));
        metadata.insert("source_hash", json!("def"));

        assert_eq!(metadata.get("source_hash"), Some(&json!("def")));
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let mut metadata = Metadata::default();
        metadata.insert("source_hash", "abc");
        metadata.insert("source", "https://example.com");
        let value = serde_json::to_value(&metadata).unwrap();

        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"{"source":"https://example.com","source_hash":"abc"}"#
        );

        let back: Metadata = serde_json::from_value(value).unwrap();
        assert_eq!(back, metadata);
    }
}
