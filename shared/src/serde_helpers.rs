//! Serde helpers for timestamps
//!
//! Timestamps are stored as Unix millis. The cashier screen reads them as
//! ISO-8601 strings (`2024-01-02T03:04:05.678Z`).

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::{self, Deserialize, Deserializer};
use serde::Serializer;

fn format_millis(millis: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn parse_millis<E: de::Error>(value: &str) -> Result<i64, E> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.timestamp_millis())
        .map_err(|e| E::custom(format!("invalid timestamp {value}: {e}")))
}

/// Unix millis <-> RFC 3339 string
pub mod rfc3339_millis {
    use super::*;

    pub fn serialize<S>(millis: &i64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match format_millis(*millis) {
            Some(s) => serializer.serialize_str(&s),
            None => Err(serde::ser::Error::custom(format!(
                "timestamp out of range: {millis}"
            ))),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_millis(&s)
    }
}

/// Optional Unix millis <-> RFC 3339 string or null
pub mod rfc3339_millis_opt {
    use super::*;

    pub fn serialize<S>(millis: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match millis {
            Some(m) => rfc3339_millis::serialize(m, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|s| parse_millis(&s))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Stamp {
        #[serde(with = "super::rfc3339_millis")]
        at: i64,
        #[serde(default, with = "super::rfc3339_millis_opt")]
        until: Option<i64>,
    }

    #[test]
    fn test_millis_as_iso_string() {
        let stamp = Stamp {
            at: 1_704_164_645_678,
            until: None,
        };
        let json = serde_json::to_value(&stamp).unwrap();
        assert_eq!(json["at"], "2024-01-02T03:04:05.678Z");
        assert!(json["until"].is_null());

        let back: Stamp = serde_json::from_value(json).unwrap();
        assert_eq!(back, stamp);
    }

    #[test]
    fn test_offset_input_is_normalised() {
        let stamp: Stamp =
            serde_json::from_str(r#"{"at":"2024-01-01T22:04:05.678-05:00","until":null}"#).unwrap();
        assert_eq!(stamp.at, 1_704_164_645_678);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(serde_json::from_str::<Stamp>(r#"{"at":"yesterday"}"#).is_err());
    }
}
