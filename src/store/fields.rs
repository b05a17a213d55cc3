//! Lenient field decoders for loosely shaped documents.
//!
//! Each decoder accepts any JSON value and falls back to a default when the
//! value has the wrong type, so one bad field never discards a document.

use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Decode any value as `T`, or `T::default()` if it does not fit.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;

    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Decode a string. Numbers and booleans are converted to text, anything else
/// becomes an empty string.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;

    Ok(value_to_string(value))
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::String(text) => text.trim().to_owned(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => String::new(),
    }
}

/// Decode a non-negative monetary amount.
///
/// Numeric strings are parsed. Missing, negative or non-numeric values become
/// zero.
pub fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;

    let amount = match value {
        Value::Number(number) => number.as_f64().unwrap_or_default(),
        Value::String(text) => text.trim().parse().unwrap_or_default(),
        _ => 0.0,
    };

    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Ok(0.0)
    }
}

/// Decode a non-negative whole number, truncating fractions.
pub fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = lenient_amount(deserializer)?;

    Ok(amount.min(u32::MAX as f64) as u32)
}

/// Decode a list of strings.
///
/// A single string is split on commas. Blank entries and repeats are dropped
/// while keeping the first-seen order.
pub fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;

    let items = match value {
        Value::Array(values) => values.into_iter().map(value_to_string).collect(),
        Value::String(text) => split_list(&text),
        _ => Vec::new(),
    };

    Ok(dedup(items))
}

/// Split comma separated text into trimmed, non-empty, unique entries.
pub fn split_list(text: &str) -> Vec<String> {
    dedup(text.split(',').map(|item| item.trim().to_owned()).collect())
}

fn dedup(items: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(items.len());

    for item in items {
        if !item.is_empty() && !unique.contains(&item) {
            unique.push(item);
        }
    }

    unique
}

/// Decode a timestamp.
///
/// Accepts RFC 3339 strings, Unix timestamps in seconds, and exported
/// timestamp objects of the form `{"seconds": .., "nanoseconds": ..}`.
/// Anything else decodes as `None`.
pub fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;

    Ok(parse_timestamp(&value))
}

fn parse_timestamp(value: &Value) -> Option<OffsetDateTime> {
    match value {
        Value::String(text) => OffsetDateTime::parse(text.trim(), &Rfc3339).ok(),
        Value::Number(number) => number
            .as_i64()
            .and_then(|seconds| OffsetDateTime::from_unix_timestamp(seconds).ok()),
        Value::Object(object) => {
            let seconds = object
                .get("seconds")
                .or_else(|| object.get("_seconds"))
                .and_then(Value::as_i64)?;
            let nanoseconds = object
                .get("nanoseconds")
                .or_else(|| object.get("_nanoseconds"))
                .and_then(Value::as_i64)
                .unwrap_or_default();

            OffsetDateTime::from_unix_timestamp_nanos(
                seconds as i128 * 1_000_000_000 + nanoseconds as i128,
            )
            .ok()
        }
        _ => None,
    }
}

/// Serialize timestamps as UTC RFC 3339 strings with whole seconds, e.g.
/// `2025-06-01T09:30:00Z`, so that stored values sort chronologically.
pub mod timestamp {
    use serde::{Serializer, ser::Error};
    use time::{
        OffsetDateTime, UtcOffset, format_description::BorrowedFormatItem,
        macros::format_description,
    };

    const FORMAT: &[BorrowedFormatItem<'static>] =
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");

    /// Format `timestamp` in UTC.
    pub fn format(timestamp: OffsetDateTime) -> Result<String, time::error::Format> {
        timestamp.to_offset(UtcOffset::UTC).format(FORMAT)
    }

    pub fn serialize<S>(timestamp: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let text = format(*timestamp).map_err(S::Error::custom)?;
        serializer.serialize_str(&text)
    }

    pub mod option {
        use serde::Serializer;
        use time::OffsetDateTime;

        pub fn serialize<S>(
            timestamp: &Option<OffsetDateTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match timestamp {
                Some(timestamp) => super::serialize(timestamp, serializer),
                None => serializer.serialize_none(),
            }
        }
    }
}
