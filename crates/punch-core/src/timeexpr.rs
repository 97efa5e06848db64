//! Relative time expressions.
//!
//! The same grammar stamps events (`start --at "10 mins ago"`) and picks the
//! cutoff for reports (`log last week`):
//!
//! - empty or `now`
//! - `today`: midnight UTC of the current date
//! - `<N|a> <unit>[ ago]`, with `an` also allowed for hours and `last` for weeks
//! - an RFC 3339 timestamp such as `2026-01-15T10:30:00Z`

use std::sync::LazyLock;

use chrono::{DateTime, NaiveTime, TimeDelta, Utc};
use regex::Regex;
use thiserror::Error;

/// Pre-compiled pattern for `<quantity>[ ]<unit>[ ago]` on whitespace-normalized input.
static RELATIVE_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+|an|a|last) ?([a-z]+)(?: ago)?$").unwrap());

/// No rule matched the phrase.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("could not understand time {phrase:?}; try 'now', 'today', '10 mins ago', 'an hour ago' or 'last week'")]
pub struct UnparsableTime {
    pub phrase: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
}

impl Unit {
    fn from_word(word: &str) -> Option<Self> {
        match word {
            "seconds" | "secs" | "second" | "sec" => Some(Self::Second),
            "minutes" | "mins" | "minute" | "min" => Some(Self::Minute),
            "hours" | "hrs" | "hour" | "hr" => Some(Self::Hour),
            "days" | "day" => Some(Self::Day),
            "weeks" | "week" => Some(Self::Week),
            _ => None,
        }
    }

    const fn seconds(self) -> i64 {
        match self {
            Self::Second => 1,
            Self::Minute => 60,
            Self::Hour => 60 * 60,
            Self::Day => 24 * 60 * 60,
            Self::Week => 7 * 24 * 60 * 60,
        }
    }

    /// Whether a word quantity may precede this unit.
    fn accepts(self, quantity: &str) -> bool {
        match quantity {
            "a" => true,
            "an" => self == Self::Hour,
            "last" => self == Self::Week,
            _ => false,
        }
    }
}

/// Parses `phrase` relative to `now`.
pub fn parse_time(phrase: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, UnparsableTime> {
    let normalized = phrase.split_whitespace().collect::<Vec<_>>().join(" ");
    let unparsable = || UnparsableTime {
        phrase: phrase.to_string(),
    };

    match normalized.as_str() {
        "" | "now" => return Ok(now),
        "today" => return Ok(now.date_naive().and_time(NaiveTime::MIN).and_utc()),
        _ => {}
    }

    if let Some(caps) = RELATIVE_TIME_RE.captures(&normalized) {
        let unit = Unit::from_word(&caps[2]).ok_or_else(unparsable)?;
        let quantity = &caps[1];
        let count: i64 = if quantity.bytes().all(|b| b.is_ascii_digit()) {
            quantity.parse().map_err(|_| unparsable())?
        } else if unit.accepts(quantity) {
            1
        } else {
            return Err(unparsable());
        };

        let offset = count
            .checked_mul(unit.seconds())
            .and_then(TimeDelta::try_seconds)
            .ok_or_else(unparsable)?;
        return now.checked_sub_signed(offset).ok_or_else(unparsable);
    }

    DateTime::parse_from_rfc3339(&normalized)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|_| unparsable())
}

/// Resolves an optional report period to a cutoff; `None` means all time.
pub fn parse_period(
    phrase: Option<&str>,
    now: DateTime<Utc>,
) -> Result<Option<DateTime<Utc>>, UnparsableTime> {
    phrase.map(|p| parse_time(p, now)).transpose()
}
