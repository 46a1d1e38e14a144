//! Serde helpers for query-string and form input.
//!
//! Browsers send empty strings for blank fields; these helpers treat them as
//! absent instead of failing to parse.

use serde::{Deserialize, Deserializer};

/// Deserializes an optional string into an optional i64.
pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s.trim().parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Deserializes an optional string, mapping blank values to `None`.
pub fn deserialize_optional_trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Query {
        #[serde(default, deserialize_with = "deserialize_optional_i64")]
        n: Option<i64>,
        #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
        s: Option<String>,
    }

    #[test]
    fn test_blank_values_are_none() {
        let q: Query = serde_json::from_str(r#"{"n":" ","s":"   "}"#).unwrap();
        assert_eq!(q.n, None);
        assert_eq!(q.s, None);
    }

    #[test]
    fn test_values_are_trimmed() {
        let q: Query = serde_json::from_str(r#"{"n":" 7 ","s":" ux "}"#).unwrap();
        assert_eq!(q.n, Some(7));
        assert_eq!(q.s.as_deref(), Some("ux"));
    }

    #[test]
    fn test_missing_fields() {
        let q: Query = serde_json::from_str("{}").unwrap();
        assert_eq!(q.n, None);
        assert_eq!(q.s, None);
    }

    #[test]
    fn test_non_numeric_is_error() {
        assert!(serde_json::from_str::<Query>(r#"{"n":"ten"}"#).is_err());
    }
}
