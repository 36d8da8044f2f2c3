//! Helpers for the client wire format.
//!
//! The mobile client serializes booleans as 0/1 integers and sometimes as
//! real booleans, and numeric identifiers occasionally arrive as strings.
//! These adapters normalize both on the way in and keep the 0/1 convention
//! on the way out.

use serde_json::Value;

/// Serde adapter for boolean fields that cross the wire as 0/1.
///
/// Accepts `true`/`false`, any integer (non-zero is true) and `null`
/// (false) on input; always emits 0/1 on output.
pub mod flag {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Null(()),
    }

    pub fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(i64::from(*value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Flag::deserialize(deserializer)? {
            Flag::Bool(value) => value,
            Flag::Int(value) => value != 0,
            Flag::Null(()) => false,
        })
    }
}

/// Reads a JSON value as a numeric identifier, tolerating string digits.
pub fn value_as_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Looks up an identifier field under any of the given names, preferring
/// earlier names over later ones.
pub fn field_id(record: &Value, names: &[&str]) -> Option<i64> {
    let object = record.as_object()?;
    names
        .iter()
        .find_map(|name| object.get(*name).and_then(value_as_id))
}
