//! Lookup output schema and boundary validation of candidate records.
//!
//! Candidate records come from an external service as arbitrary JSON. Only
//! fields the schema knows, with the type the schema expects, make it into the
//! [`CandidateRecord`]; everything else is dropped here and never merged.

use core::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value as JsonValue, json};

use crate::record::{CandidateRecord, FieldValue};
use crate::result::AiError;

/// Expected primitive/array type of a schema field.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number,
    TextList,
}

impl FieldKind {
    fn json_schema(self) -> JsonValue {
        match self {
            FieldKind::Text => json!({ "type": "string" }),
            FieldKind::Number => json!({ "type": "number" }),
            FieldKind::TextList => json!({ "type": "array", "items": { "type": "string" } }),
        }
    }

    /// Convert a JSON value of this kind; `None` when mistyped.
    fn coerce(self, value: &JsonValue) -> Option<FieldValue> {
        match (self, value) {
            (FieldKind::Text, JsonValue::String(s)) => Some(FieldValue::Text(s.clone())),
            (FieldKind::Number, JsonValue::Number(n)) => {
                n.as_f64().filter(|v| v.is_finite()).map(FieldValue::Number)
            }
            (FieldKind::TextList, JsonValue::Array(items)) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .map(FieldValue::List),
            _ => None,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FieldKind::Text => "string",
            FieldKind::Number => "number",
            FieldKind::TextList => "array of strings",
        })
    }
}

/// Flat, ordered mapping of field name to expected type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    fields: Vec<(String, FieldKind)>,
}

/// Why a candidate field was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    UnknownField,
    Mistyped { expected: FieldKind },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedField {
    pub name: String,
    pub reason: RejectReason,
}

/// Result of validating a lookup response against a [`FieldSchema`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedCandidate {
    pub record: CandidateRecord,
    pub rejected: Vec<RejectedField>,
}

impl FieldSchema {
    pub fn new<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, FieldKind)>,
        K: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(|(k, kind)| (k.into(), kind)).collect(),
        }
    }

    /// Fields requested from the lookup service for a cigar.
    pub fn cigar() -> Self {
        use FieldKind::*;
        Self::new([
            ("brand", Text),
            ("name", Text),
            ("country", Text),
            ("wrapper", Text),
            ("binder", Text),
            ("filler", Text),
            ("strength", Text),
            ("size", Text),
            ("length", Number),
            ("ring_gauge", Number),
            ("flavor_notes", TextList),
            ("description", Text),
        ])
    }

    pub fn kind_of(&self, name: &str) -> Option<FieldKind> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, kind)| *kind)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// JSON Schema object handed to the lookup service as its output format.
    pub fn to_json_schema(&self) -> JsonValue {
        let properties: Map<String, JsonValue> = self
            .fields
            .iter()
            .map(|(name, kind)| (name.clone(), kind.json_schema()))
            .collect();
        json!({
            "type": "object",
            "properties": properties,
            "additionalProperties": false,
        })
    }

    /// Parse a raw lookup response and keep the conforming fields, in the
    /// order the response lists them.
    pub fn validate(&self, raw: &str) -> Result<ValidatedCandidate, AiError> {
        let RawObject(entries) = serde_json::from_str(raw.trim()).map_err(|e| {
            if e.is_data() {
                AiError::NotAnObject(e.to_string())
            } else {
                AiError::InvalidResponse(e.to_string())
            }
        })?;
        Ok(self.validate_entries(entries))
    }

    /// Same as [`FieldSchema::validate`] for an already-parsed value. Field order
    /// follows the value's map order.
    pub fn validate_value(&self, value: &JsonValue) -> Result<ValidatedCandidate, AiError> {
        let object = value
            .as_object()
            .ok_or_else(|| AiError::NotAnObject(describe(value).to_string()))?;
        let entries = object.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        Ok(self.validate_entries(entries))
    }

    fn validate_entries(&self, entries: Vec<(String, JsonValue)>) -> ValidatedCandidate {
        let mut record = CandidateRecord::new();
        let mut rejected = Vec::new();

        for (name, value) in entries {
            if value.is_null() {
                continue;
            }
            let reason = match self.kind_of(&name) {
                None => RejectReason::UnknownField,
                Some(kind) => match kind.coerce(&value) {
                    Some(field) => {
                        record.set(name, field);
                        continue;
                    }
                    None => RejectReason::Mistyped { expected: kind },
                },
            };
            tracing::warn!(field = %name, ?reason, "dropping candidate field");
            rejected.push(RejectedField { name, reason });
        }

        ValidatedCandidate { record, rejected }
    }
}

fn describe(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

/// Top-level JSON object parsed in document order.
struct RawObject(Vec<(String, JsonValue)>);

impl<'de> Deserialize<'de> for RawObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RawVisitor;

        impl<'de> Visitor<'de> for RawVisitor {
            type Value = RawObject;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<RawObject, A::Error> {
                let mut entries: Vec<(String, JsonValue)> = Vec::new();
                while let Some(key) = access.next_key::<String>()? {
                    let value = access.next_value::<JsonValue>()?;
                    match entries.iter_mut().find(|(k, _)| *k == key) {
                        Some((_, slot)) => *slot = value,
                        None => entries.push((key, value)),
                    }
                }
                Ok(RawObject(entries))
            }
        }

        deserializer.deserialize_any(RawVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_conforming_fields_in_response_order() {
        let validated = FieldSchema::cigar()
            .validate(r#"{"wrapper":"Maduro","brand":"Padrón","ring_gauge":52,"flavor_notes":["cocoa"]}"#)
            .unwrap();
        let keys: Vec<_> = validated.record.keys().collect();
        assert_eq!(keys, vec!["wrapper", "brand", "ring_gauge", "flavor_notes"]);
        assert!(validated.rejected.is_empty());
    }

    #[test]
    fn drops_unknown_and_mistyped_fields() {
        let validated = FieldSchema::cigar()
            .validate(
                r#"{"brand":"Oliva","price":12.5,"ring_gauge":"52","flavor_notes":["pepper",3],"country":null}"#,
            )
            .unwrap();
        let keys: Vec<_> = validated.record.keys().collect();
        assert_eq!(keys, vec!["brand"]);
        assert_eq!(
            validated.rejected,
            vec![
                RejectedField {
                    name: "price".to_string(),
                    reason: RejectReason::UnknownField,
                },
                RejectedField {
                    name: "ring_gauge".to_string(),
                    reason: RejectReason::Mistyped {
                        expected: FieldKind::Number
                    },
                },
                RejectedField {
                    name: "flavor_notes".to_string(),
                    reason: RejectReason::Mistyped {
                        expected: FieldKind::TextList
                    },
                },
            ]
        );
    }

    #[test]
    fn non_object_payloads_are_failures() {
        for raw in [r#"["brand"]"#, r#""Padron""#, "42", "null", "true"] {
            match FieldSchema::cigar().validate(raw) {
                Err(AiError::NotAnObject(_)) => {}
                other => panic!("expected NotAnObject for {raw}, got {other:?}"),
            }
        }
    }

    #[test]
    fn syntax_errors_are_invalid_responses() {
        match FieldSchema::cigar().validate("{\"brand\": ") {
            Err(AiError::InvalidResponse(_)) => {}
            other => panic!("expected InvalidResponse, got {other:?}"),
        }
    }

    #[test]
    fn validate_value_rejects_non_objects() {
        let err = FieldSchema::cigar().validate_value(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, AiError::NotAnObject(ref what) if what == "an array"));

        let ok = FieldSchema::cigar()
            .validate_value(&json!({ "strength": "Full" }))
            .unwrap();
        assert_eq!(ok.record.get("strength"), Some(&FieldValue::from("Full")));
    }

    #[test]
    fn json_schema_lists_every_field() {
        let schema = FieldSchema::cigar().to_json_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["ring_gauge"]["type"], "number");
        assert_eq!(schema["properties"]["flavor_notes"]["items"]["type"], "string");
        assert_eq!(
            schema["properties"].as_object().map(Map::len),
            Some(FieldSchema::cigar().field_names().count())
        );
    }
}
