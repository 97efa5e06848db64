//! Status command for showing the open entry.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use punch_core::Paint;
use punch_store::Store;

use super::util::label;

pub fn run<W: Write, S: Store>(
    writer: &mut W,
    store: &mut S,
    paint: &dyn Paint,
    now: DateTime<Utc>,
) -> Result<()> {
    let state = store.load()?;
    let status = state.status(now)?;

    writeln!(
        writer,
        "Working on {} for {}.",
        label(paint, &status.name),
        status.elapsed
    )?;
    writeln!(
        writer,
        "Started at {}.",
        status.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    match status.depth {
        0 => {}
        1 => writeln!(writer, "1 interrupted entry waiting.")?,
        depth => writeln!(writer, "{depth} interrupted entries waiting.")?,
    }
    if !status.tags.is_empty() {
        writeln!(writer, "Tags: {}", status.tags.join(", "))?;
    }
    for note in &status.notes {
        writeln!(writer, "- {note}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{TimeDelta, TimeZone};
    use insta::assert_snapshot;
    use punch_core::{Plain, SessionError, WorkState};
    use punch_store::MemoryStore;

    fn t(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap() + TimeDelta::minutes(minutes)
    }

    #[test]
    fn status_command_describes_the_open_entry() {
        let mut state = WorkState::new();
        state.start("code", t(0)).unwrap();
        state.interrupt("brk: coffee", t(30)).unwrap();
        state.tag(["away", "short"]).unwrap();
        state.note("kettle is slow").unwrap();
        let mut store = MemoryStore::new();
        store.dump(&state).unwrap();

        let mut output = Vec::new();
        run(&mut output, &mut store, &Plain, t(36)).unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
Working on brk: coffee for 6 minutes.
Started at 2026-03-02 09:30:00 UTC.
1 interrupted entry waiting.
Tags: away, short
- kettle is slow
");
        assert_eq!(store.dumps(), 1);
    }

    #[test]
    fn fresh_entry_is_less_than_a_minute_old() {
        let mut state = WorkState::new();
        state.start("code", t(0)).unwrap();
        let mut store = MemoryStore::new();
        store.dump(&state).unwrap();

        let mut output = Vec::new();
        run(&mut output, &mut store, &Plain, t(0) + TimeDelta::seconds(20)).unwrap();
        assert!(
            String::from_utf8(output)
                .unwrap()
                .starts_with("Working on code for less than a minute.\n")
        );
    }

    #[test]
    fn status_while_idle_is_an_error() {
        let err = run(&mut Vec::new(), &mut MemoryStore::new(), &Plain, t(0)).unwrap_err();
        assert_eq!(
            err.downcast_ref::<SessionError>(),
            Some(&SessionError::NotWorking)
        );
    }
}
