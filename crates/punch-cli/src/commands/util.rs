//! Shared utilities for CLI commands.

use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use punch_core::Paint;
use punch_core::report::{split_type, type_color};
use punch_core::timeexpr::parse_time;

/// Joins multi-word arguments with single spaces.
pub fn join_words(words: &[String]) -> String {
    words.join(" ")
}

/// Rejects values that are blank after trimming.
pub fn non_empty(value: String, what: &str) -> Result<String> {
    if value.trim().is_empty() {
        bail!("{what} cannot be empty");
    }
    Ok(value)
}

/// Resolves an optional `--at` expression; absent means `now`.
pub fn resolve_at(at: Option<&str>, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    Ok(parse_time(at.unwrap_or_default(), now)?)
}

/// Colors an entry name by its type prefix.
pub fn label(paint: &dyn Paint, name: &str) -> String {
    paint.paint(type_color(split_type(name).0), name)
}
