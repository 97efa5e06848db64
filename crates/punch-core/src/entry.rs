//! A single contiguous segment of tracked work.

use std::collections::BTreeSet;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// One segment of work.
///
/// An entry without `end` is open: it is the thing currently being worked on.
/// Resuming after an interrupt never reopens an entry; it creates a new one
/// with the same name, so one activity may span several entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Activity name, optionally prefixed with a `type:`.
    pub name: String,
    #[serde(with = "timestamp")]
    pub start: DateTime<Utc>,
    #[serde(
        default,
        with = "timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl Entry {
    /// Creates an open entry.
    pub fn new(name: impl Into<String>, start: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            start,
            end: None,
            tags: BTreeSet::new(),
            notes: Vec::new(),
        }
    }

    pub const fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// End time, or `now` while the entry is still open.
    pub fn effective_end(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.end.unwrap_or(now)
    }

    /// Time spent on this entry as of `now`.
    pub fn duration(&self, now: DateTime<Utc>) -> TimeDelta {
        self.effective_end(now) - self.start
    }
}

/// Fixed textual timestamp format: microsecond precision with an explicit `Z`.
///
/// Reading is lenient and accepts any RFC 3339 timestamp, converting it to UTC.
pub mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

    /// Formats a timestamp the way it is persisted.
    pub fn format(at: &DateTime<Utc>) -> String {
        at.format(FORMAT).to_string()
    }

    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(at))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|at| at.with_timezone(&Utc))
            .map_err(|e| serde::de::Error::custom(format_args!("invalid timestamp {raw:?}: {e}")))
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        #[allow(clippy::ref_option)] // serde `with` modules receive `&Option<T>`
        pub fn serialize<S: Serializer>(
            at: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match at {
                Some(at) => super::serialize(at, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            let raw: Option<String> = Option::deserialize(deserializer)?;
            raw.map(|raw| {
                DateTime::parse_from_rfc3339(&raw)
                    .map(|at| at.with_timezone(&Utc))
                    .map_err(|e| {
                        serde::de::Error::custom(format_args!("invalid timestamp {raw:?}: {e}"))
                    })
            })
            .transpose()
        }
    }
}
