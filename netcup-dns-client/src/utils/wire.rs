//! 宽松的线格式反序列化工具
//!
//! The XML encoding carries every scalar as text, while a JSON stub (or a
//! differently configured service) sends native numbers and booleans. These
//! helpers accept both so that record types decode identically from either.
//!
//! Every helper first buffers the input into a [`serde_json::Value`], so they
//! only work with self-describing formats.

use std::fmt::Display;
use std::str::FromStr;

use serde::de::{DeserializeOwned, Error};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Optional number: `null`, `""` → `None`; numbers and numeric strings → `Some`.
fn parse_opt<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .to_string()
            .parse()
            .map(Some)
            .map_err(|e| Error::custom(format!("invalid number '{n}': {e}"))),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| Error::custom(format!("invalid number '{s}': {e}"))),
        other => Err(Error::custom(format!("expected a number, got {other}"))),
    }
}

pub fn opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    parse_opt(deserializer)
}

pub fn opt_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    parse_opt(deserializer)
}

pub fn opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    parse_opt(deserializer)
}

pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    parse_opt(deserializer)
}

/// Required status code style number; absent or empty decodes as `0`.
pub fn u32_or_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_u32(deserializer)?.unwrap_or_default())
}

/// Boolean flag in any of the spellings the service documents.
///
/// Accepts native booleans, `true`/`false` in any case, `1`/`0`, `yes`/`no`.
pub fn opt_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(b)),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Ok(Some(false)),
            Some(1) => Ok(Some(true)),
            _ => Err(Error::custom(format!("invalid boolean '{n}'"))),
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "true" | "1" | "yes" => Ok(Some(true)),
            "false" | "0" | "no" => Ok(Some(false)),
            _ => Err(Error::custom(format!("invalid boolean '{s}'"))),
        },
        other => Err(Error::custom(format!("expected a boolean, got {other}"))),
    }
}

/// Like [`opt_bool`], absent decodes as `false`.
pub fn bool_or_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_bool(deserializer)?.unwrap_or(false))
}

/// Text field; numbers and booleans are rendered, `null` becomes `""`.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_string(deserializer)?.unwrap_or_default())
}

/// Optional text field; `null` and `""` decode as `None`.
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(Error::custom(format!("expected a string, got {other}"))),
    }
}

/// Nested object that the XML form sends as an empty element when unset.
pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        other => T::deserialize(other).map(Some).map_err(Error::custom),
    }
}

/// List field that may arrive as a single object, a list, or nothing.
///
/// A one-element SOAP array decodes into a plain object when the encoder
/// did not mark it as an array.
pub fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::String(s) if s.trim().is_empty() => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .map(|item| T::deserialize(item).map_err(Error::custom))
            .collect(),
        // 单个元素
        other => T::deserialize(other)
            .map(|item| vec![item])
            .map_err(Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        #[serde(default, deserialize_with = "opt_u32")]
        n: Option<u32>,
        #[serde(default, deserialize_with = "bool_or_false")]
        flag: bool,
        #[serde(default, deserialize_with = "string")]
        id: String,
        #[serde(default, deserialize_with = "opt_f64")]
        price: Option<f64>,
    }

    #[test]
    fn numbers_from_text_and_native() {
        let a: Sample = serde_json::from_value(json!({"n": "42"})).unwrap();
        let b: Sample = serde_json::from_value(json!({"n": 42})).unwrap();
        assert_eq!(a.n, Some(42));
        assert_eq!(a, b);
    }

    #[test]
    fn empty_number_is_none() {
        let s: Sample = serde_json::from_value(json!({"n": ""})).unwrap();
        assert_eq!(s.n, None);
    }

    #[test]
    fn invalid_number_rejected() {
        let r: Result<Sample, _> = serde_json::from_value(json!({"n": "abc"}));
        assert!(r.is_err());
    }

    #[test]
    fn boolean_spellings() {
        for (raw, expected) in [
            (json!(true), true),
            (json!("TRUE"), true),
            (json!("true"), true),
            (json!("1"), true),
            (json!(1), true),
            (json!("FALSE"), false),
            (json!("0"), false),
            (json!(""), false),
            (json!(null), false),
        ] {
            let s: Sample = serde_json::from_value(json!({ "flag": raw.clone() })).unwrap();
            assert_eq!(s.flag, expected, "raw value {raw}");
        }
    }

    #[test]
    fn string_from_number() {
        let s: Sample = serde_json::from_value(json!({"id": 12345})).unwrap();
        assert_eq!(s.id, "12345");
        let s: Sample = serde_json::from_value(json!({"id": null})).unwrap();
        assert_eq!(s.id, "");
    }

    #[test]
    fn float_from_text() {
        let s: Sample = serde_json::from_value(json!({"price": "7.5"})).unwrap();
        assert_eq!(s.price, Some(7.5));
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        name: String,
    }

    #[derive(Debug, Deserialize)]
    struct List {
        #[serde(default, deserialize_with = "one_or_many")]
        items: Vec<Item>,
        #[serde(default, deserialize_with = "empty_as_none")]
        extra: Option<Item>,
    }

    #[test]
    fn one_or_many_accepts_single_object() {
        let l: List = serde_json::from_value(json!({"items": {"name": "a"}})).unwrap();
        assert_eq!(l.items, vec![Item { name: "a".into() }]);
    }

    #[test]
    fn one_or_many_accepts_list_and_empty() {
        let l: List =
            serde_json::from_value(json!({"items": [{"name": "a"}, {"name": "b"}]})).unwrap();
        assert_eq!(l.items.len(), 2);
        let l: List = serde_json::from_value(json!({"items": ""})).unwrap();
        assert!(l.items.is_empty());
    }

    #[test]
    fn empty_element_is_none() {
        let l: List = serde_json::from_value(json!({"extra": ""})).unwrap();
        assert!(l.extra.is_none());
        let l: List = serde_json::from_value(json!({"extra": {"name": "x"}})).unwrap();
        assert_eq!(l.extra, Some(Item { name: "x".into() }));
    }
}
