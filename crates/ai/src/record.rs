//! Field records exchanged between the form draft and the lookup service.

use core::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

/// A single field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    List(Vec<String>),
    /// Any other JSON shape a draft may carry (flags, nested objects, mixed
    /// arrays). Kept as-is so the draft round-trips; never produced by lookups.
    Other(JsonValue),
}

impl FieldValue {
    /// Empty string and empty list are empty; numbers and other values never are.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Number(_) | FieldValue::Other(_) => false,
            FieldValue::List(items) => items.is_empty(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(value: Vec<&str>) -> Self {
        FieldValue::List(value.into_iter().map(str::to_string).collect())
    }
}

/// Field name to value mapping that remembers insertion order.
///
/// The engine never knows the full schema; a record holds whatever keys it was
/// given. Equality ignores order.
#[derive(Debug, Clone, Default)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

/// The user's in-progress record.
pub type DraftRecord = Record;

/// A record proposed by the lookup service.
pub type CandidateRecord = Record;

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; replaces an existing value in place.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(key.into(), value.into());
        self
    }

    pub(crate) fn set(&mut self, key: String, value: FieldValue) {
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Absent, empty string or empty list.
    pub fn is_field_empty(&self, key: &str) -> bool {
        self.get(key).is_none_or(FieldValue::is_empty)
    }

    /// Fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> + '_ {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.set(k.into(), v.into());
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Deserializes a JSON object in document order. `null` values are skipped
/// (treated as absent).
impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = Record;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object of field values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Record, A::Error> {
                let mut record = Record::new();
                while let Some((key, value)) = access.next_entry::<String, Option<FieldValue>>()? {
                    if let Some(value) = value {
                        record.set(key, value);
                    }
                }
                Ok(record)
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emptiness_is_explicit_per_type() {
        assert!(FieldValue::from("").is_empty());
        assert!(!FieldValue::from(" ").is_empty());
        assert!(FieldValue::List(Vec::new()).is_empty());
        assert!(!FieldValue::from(vec!["cedar"]).is_empty());
        assert!(!FieldValue::Number(0.0).is_empty());
    }

    #[test]
    fn absent_field_is_empty() {
        let record = Record::new().with("name", "Foo").with("brand", "");
        assert!(!record.is_field_empty("name"));
        assert!(record.is_field_empty("brand"));
        assert!(record.is_field_empty("country"));
    }

    #[test]
    fn with_replaces_in_place() {
        let record = Record::new().with("a", "1").with("b", "2").with("a", "3");
        let keys: Vec<_> = record.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(record.get("a"), Some(&FieldValue::from("3")));
    }

    #[test]
    fn equality_ignores_order() {
        let a = Record::new().with("x", "1").with("y", 2.0);
        let b = Record::new().with("y", 2.0).with("x", "1");
        assert_eq!(a, b);
        assert_ne!(a, Record::new().with("x", "1"));
    }

    #[test]
    fn deserializes_in_document_order_and_skips_nulls() {
        let record: Record = serde_json::from_str(
            r#"{"wrapper":"Maduro","brand":"Padron","notes":null,"ring_gauge":52,"flavor_notes":["cocoa","coffee"]}"#,
        )
        .unwrap();
        let keys: Vec<_> = record.keys().collect();
        assert_eq!(keys, vec!["wrapper", "brand", "ring_gauge", "flavor_notes"]);
        assert_eq!(record.get("ring_gauge"), Some(&FieldValue::Number(52.0)));
        assert_eq!(
            record.get("flavor_notes"),
            Some(&FieldValue::from(vec!["cocoa", "coffee"]))
        );
    }

    #[test]
    fn serializes_in_insertion_order() {
        let record = Record::new().with("z", "last?").with("a", "first?");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"z":"last?","a":"first?"}"#);
    }

    #[test]
    fn unexpected_shapes_do_not_fail_the_draft() {
        let record: Record = serde_json::from_str(
            r#"{"name":"Foo","brand":"","favorite":true,"meta":{"source":"scan"},"flavor_notes":["cedar",3]}"#,
        )
        .unwrap();

        assert_eq!(record.len(), 5);
        assert_eq!(record.get("favorite"), Some(&FieldValue::Other(JsonValue::Bool(true))));
        assert!(!record.is_field_empty("meta"));
        assert!(matches!(record.get("flavor_notes"), Some(FieldValue::Other(_))));
        assert!(record.is_field_empty("brand"));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["favorite"], true);
        assert_eq!(json["meta"]["source"], "scan");
    }
}
