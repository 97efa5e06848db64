//! Human-readable durations.
//!
//! Two independent renderings with their own threshold tables:
//! [`seconds_to_time_message`] for report totals and [`timegap`] for the
//! coarse "how long have I been at this" shown by `status`.

use chrono::TimeDelta;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

fn term(value: i64, unit: &str) -> String {
    if value > 1 {
        format!("{value} {unit}s")
    } else {
        format!("{value} {unit}")
    }
}

/// Renders a span as days, hours, minutes and seconds.
///
/// Larger units are consumed greedily and only when the remaining span is
/// strictly greater than one unit, so exactly 60 seconds stays "60 seconds".
/// The seconds term is always present. Negative spans render as zero.
pub fn seconds_to_time_message(seconds: i64) -> String {
    let mut remaining = seconds.max(0);
    let mut message = String::new();

    if remaining > DAY {
        let days = remaining / DAY;
        remaining -= days * DAY;
        message.push_str(&term(days, "day"));
        message.push_str(", ");
    }
    if remaining > HOUR {
        let hours = remaining / HOUR;
        remaining -= hours * HOUR;
        message.push_str(&term(hours, "hour"));
        message.push_str(", ");
    }
    if remaining > MINUTE {
        let minutes = remaining / MINUTE;
        remaining -= minutes * MINUTE;
        message.push_str(&term(minutes, "minute"));
        message.push_str(" & ");
    }
    message.push_str(&term(remaining, "second"));
    message
}

/// Renders elapsed time in coarse buckets of whole minutes.
pub fn timegap(elapsed: TimeDelta) -> String {
    let minutes = elapsed.num_minutes().max(0);
    match minutes {
        0 => "less than a minute".to_string(),
        1 => "a minute".to_string(),
        2..44 => format!("{minutes} minutes"),
        44..89 => "about an hour".to_string(),
        89..1439 => format!("about {} hours", minutes / 60),
        1439..2519 => "about a day".to_string(),
        2519..43199 => format!("about {} days", minutes / 1440),
        43199..86399 => "about a month".to_string(),
        86399..525_599 => format!("about {} months", minutes / 43200),
        _ => "more than a year".to_string(),
    }
}
