//! Log command for summarizing tracked time.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use punch_core::humanize::seconds_to_time_message;
use punch_core::{Paint, Report, build_report, timestamp};
use punch_store::Store;
use serde::Serialize;

use super::util::join_words;

#[derive(Debug, Args)]
pub struct LogArgs {
    /// How far back to look, e.g. "today", "2 days ago" or "last week".
    /// Defaults to all time.
    pub period: Vec<String>,
    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

impl LogArgs {
    pub fn period(&self) -> Option<String> {
        (!self.period.is_empty()).then(|| join_words(&self.period))
    }
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    since: Option<String>,
    rows: Vec<JsonRow<'a>>,
    total_seconds: i64,
    total: String,
}

#[derive(Debug, Serialize)]
struct JsonRow<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    name: &'a str,
    seconds: i64,
    duration: String,
    active: bool,
}

impl<'a> JsonReport<'a> {
    fn new(report: &'a Report) -> Self {
        let total_seconds = report.total().num_seconds();
        Self {
            since: report.cutoff.as_ref().map(timestamp::format),
            rows: report
                .rows
                .iter()
                .map(|row| JsonRow {
                    kind: row.kind().trim(),
                    name: row.name().trim(),
                    seconds: row.seconds(),
                    duration: seconds_to_time_message(row.seconds()),
                    active: row.active,
                })
                .collect(),
            total_seconds,
            total: seconds_to_time_message(total_seconds),
        }
    }
}

pub fn run<W: Write, S: Store>(
    writer: &mut W,
    store: &mut S,
    args: &LogArgs,
    paint: &dyn Paint,
    now: DateTime<Utc>,
) -> Result<()> {
    let state = store.load()?;
    let report = build_report(&state, args.period().as_deref(), now)?;

    if args.json {
        serde_json::to_writer_pretty(&mut *writer, &JsonReport::new(&report))?;
        writeln!(writer)?;
    } else {
        write!(writer, "{}", report.render(paint))?;
    }
    Ok(())
}
