//! Aggregated time report over the work log and the interrupt stack.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};

use crate::humanize::seconds_to_time_message;
use crate::paint::{Color, Paint};
use crate::state::WorkState;
use crate::timeexpr::{UnparsableTime, parse_period};

const WORKING_MARKER: &str = " < working";

/// Total time for every entry sharing one name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    /// Full entry name, type prefix included.
    pub label: String,
    pub duration: TimeDelta,
    /// Some contributing entry is still open.
    pub active: bool,
}

impl ReportRow {
    /// The type prefix, empty when the label has no colon.
    pub fn kind(&self) -> &str {
        split_type(&self.label).0
    }

    /// The label after the first colon.
    pub fn name(&self) -> &str {
        split_type(&self.label).1
    }

    pub fn seconds(&self) -> i64 {
        self.duration.num_seconds()
    }

    pub fn color(&self) -> Color {
        type_color(self.kind())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Entries that ended before this instant were left out.
    pub cutoff: Option<DateTime<Utc>>,
    /// Longest first; equal durations are ordered by label.
    pub rows: Vec<ReportRow>,
}

/// Splits `label` at its first colon into `(type, name)`.
pub fn split_type(label: &str) -> (&str, &str) {
    label.split_once(':').unwrap_or(("", label))
}

/// Palette for well-known entry types, matched case-insensitively.
pub fn type_color(kind: &str) -> Color {
    match kind.to_lowercase().as_str() {
        "dc" => Color::Blue,
        "int" => Color::Red,
        "brk" => Color::Green,
        "dv" => Color::Yellow,
        "aw" => Color::Cyan,
        _ => Color::Grey,
    }
}

/// Aggregates every entry that was still running at or after the `period` cutoff.
///
/// Open entries count up to `now`. Entries are not clipped to the cutoff: an
/// entry that straddles it contributes its whole duration.
pub fn build_report(
    state: &WorkState,
    period: Option<&str>,
    now: DateTime<Utc>,
) -> Result<Report, UnparsableTime> {
    let cutoff = parse_period(period, now)?;

    let mut groups: BTreeMap<&str, (TimeDelta, bool)> = BTreeMap::new();
    for entry in state.entries() {
        if cutoff.is_some_and(|cutoff| entry.effective_end(now) < cutoff) {
            continue;
        }
        let group = groups
            .entry(entry.name.as_str())
            .or_insert((TimeDelta::zero(), false));
        group.0 += entry.duration(now);
        group.1 |= entry.is_open();
    }

    let mut rows: Vec<ReportRow> = groups
        .into_iter()
        .map(|(label, (duration, active))| ReportRow {
            label: label.to_string(),
            duration,
            active,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.duration
            .cmp(&a.duration)
            .then_with(|| a.label.cmp(&b.label))
    });

    tracing::debug!(rows = rows.len(), ?cutoff, "built report");
    Ok(Report { cutoff, rows })
}

impl Report {
    pub fn total(&self) -> TimeDelta {
        self.rows.iter().map(|row| row.duration).sum()
    }

    /// Renders aligned rows followed by a total line.
    pub fn render(&self, paint: &dyn Paint) -> String {
        if self.rows.is_empty() {
            return "No entries recorded.\n".to_string();
        }

        let type_width = self
            .rows
            .iter()
            .map(|row| row.kind().chars().count())
            .max()
            .unwrap_or(0);
        let name_width = self
            .rows
            .iter()
            .map(|row| row.name().chars().count())
            .max()
            .unwrap_or(0);

        let mut output = String::new();
        for row in &self.rows {
            let name = paint.paint(row.color(), &format!("{:<name_width$}", row.name()));
            output.push_str(&format!(
                "{:>type_width$}:{name} - {}",
                row.kind(),
                seconds_to_time_message(row.seconds())
            ));
            if row.active {
                output.push_str(&paint.paint(Color::Green, WORKING_MARKER));
            }
            output.push('\n');
        }
        output.push_str(&format!(
            "{:>type_width$} {:<name_width$} - {}\n",
            "",
            "total",
            seconds_to_time_message(self.total().num_seconds())
        ));
        output
    }
}
