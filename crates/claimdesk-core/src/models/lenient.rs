//! Forgiving `deserialize_with` helpers for server-owned payloads.
//!
//! The analysis pipeline produces loosely typed JSON (numbers as strings, objects where
//! text is expected, `null` sections). These helpers keep the typed model usable.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Any scalar becomes text; objects and arrays become their JSON form; `null` is `None`.
pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_text(Value::deserialize(deserializer)?))
}

/// Like [`string`], but `null` becomes the empty string.
pub fn required_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(string(deserializer)?.unwrap_or_default())
}

/// Numbers, and strings holding a number.
pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Booleans, `"true"`/`"false"` strings and non-zero numbers.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        _ => false,
    })
}

/// A list of display strings. A lone value becomes a one-element list.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => Vec::new(),
        Value::Array(items) => items.into_iter().filter_map(value_to_text).collect(),
        other => value_to_text(other).into_iter().collect(),
    })
}

/// Sections and lists that are `null` or have the wrong shape fall back to `T::default()`.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Fields {
        #[serde(deserialize_with = "string")]
        text: Option<String>,
        #[serde(deserialize_with = "number")]
        score: Option<f64>,
        #[serde(deserialize_with = "flag")]
        warning: bool,
        #[serde(deserialize_with = "string_list")]
        items: Vec<String>,
        #[serde(deserialize_with = "or_default")]
        section: Section,
    }

    #[derive(Debug, Default, PartialEq, Deserialize)]
    #[serde(default)]
    struct Section {
        name: Option<String>,
    }

    fn parse(value: Value) -> Fields {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn scalars_become_text() {
        assert_eq!(parse(json!({"text": 42})).text.as_deref(), Some("42"));
        assert_eq!(parse(json!({"text": "x"})).text.as_deref(), Some("x"));
        assert_eq!(parse(json!({"text": null})).text, None);
        assert_eq!(
            parse(json!({"text": {"a": 1}})).text.as_deref(),
            Some("{\"a\":1}")
        );
    }

    #[test]
    fn numeric_strings_are_numbers() {
        assert_eq!(parse(json!({"score": "7"})).score, Some(7.0));
        assert_eq!(parse(json!({"score": 3.5})).score, Some(3.5));
        assert_eq!(parse(json!({"score": "high"})).score, None);
    }

    #[test]
    fn flags_accept_strings() {
        assert!(parse(json!({"warning": true})).warning);
        assert!(parse(json!({"warning": "TRUE"})).warning);
        assert!(!parse(json!({"warning": "false"})).warning);
        assert!(!parse(json!({})).warning);
    }

    #[test]
    fn lists_accept_single_values() {
        assert_eq!(parse(json!({"items": "one"})).items, vec!["one"]);
        assert_eq!(parse(json!({"items": ["a", 2]})).items, vec!["a", "2"]);
        assert!(parse(json!({"items": null})).items.is_empty());
    }

    #[test]
    fn misshapen_sections_fall_back_to_default() {
        assert_eq!(parse(json!({"section": "n/a"})).section, Section::default());
        assert_eq!(parse(json!({"section": [1, 2]})).section, Section::default());
        assert_eq!(parse(json!({"section": null})).section, Section::default());
        assert_eq!(
            parse(json!({"section": {"name": "roof"}})).section.name.as_deref(),
            Some("roof")
        );
    }
}
