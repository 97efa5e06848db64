//! Session commands: start, stop, interrupt, tag and note.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use punch_core::humanize::seconds_to_time_message;
use punch_core::{Paint, StopOutcome};
use punch_store::Store;

use super::util::{join_words, label, non_empty, resolve_at};

#[derive(Debug, Args)]
pub struct StartArgs {
    /// What you are working on, e.g. `dc: standup`.
    #[arg(required = true)]
    pub name: Vec<String>,
    /// When it started, e.g. "10 mins ago". Defaults to now.
    #[arg(long)]
    pub at: Option<String>,
}

impl StartArgs {
    pub fn name(&self) -> String {
        join_words(&self.name)
    }
}

#[derive(Debug, Args)]
pub struct StopArgs {
    /// When it ended. Defaults to now.
    #[arg(long)]
    pub at: Option<String>,
    /// Leave interrupted work on the stack instead of resuming it.
    #[arg(long)]
    pub no_resume: bool,
}

#[derive(Debug, Args)]
pub struct InterruptArgs {
    /// What interrupted you; untyped names get an `int: ` prefix.
    #[arg(required = true)]
    pub name: Vec<String>,
    /// When the interruption began. Defaults to now.
    #[arg(long)]
    pub at: Option<String>,
}

impl InterruptArgs {
    pub fn name(&self) -> String {
        join_words(&self.name)
    }
}

#[derive(Debug, Args)]
pub struct TagArgs {
    /// Tags to add to the current entry.
    #[arg(required = true)]
    pub tags: Vec<String>,
}

#[derive(Debug, Args)]
pub struct NoteArgs {
    /// Note text.
    #[arg(required = true)]
    pub text: Vec<String>,
}

impl NoteArgs {
    pub fn text(&self) -> String {
        join_words(&self.text)
    }
}

pub fn start<W: Write, S: Store>(
    writer: &mut W,
    store: &mut S,
    args: &StartArgs,
    paint: &dyn Paint,
    now: DateTime<Utc>,
) -> Result<()> {
    let name = non_empty(args.name(), "name")?;
    let at = resolve_at(args.at.as_deref(), now)?;

    let mut state = store.load()?;
    let started = state.start(name, at)?.name.clone();
    store.dump(&state)?;

    writeln!(writer, "Started {}.", label(paint, &started))?;
    Ok(())
}

pub fn stop<W: Write, S: Store>(
    writer: &mut W,
    store: &mut S,
    args: &StopArgs,
    paint: &dyn Paint,
    now: DateTime<Utc>,
) -> Result<()> {
    let at = resolve_at(args.at.as_deref(), now)?;

    let mut state = store.load()?;
    let outcome = state.stop(at, !args.no_resume)?;
    store.dump(&state)?;

    let (StopOutcome::Stopped { stopped } | StopOutcome::Resumed { stopped, .. }) = &outcome;
    write!(
        writer,
        "Stopped {} after {}.",
        label(paint, &stopped.name),
        seconds_to_time_message(stopped.duration(at).num_seconds())
    )?;
    match outcome {
        StopOutcome::Stopped { .. } => writeln!(writer)?,
        StopOutcome::Resumed { resumed, depth: 0, .. } => writeln!(
            writer,
            " Resumed {}, back at top level.",
            label(paint, &resumed)
        )?,
        StopOutcome::Resumed { resumed, depth, .. } => writeln!(
            writer,
            " Resumed {}, {} still open.",
            label(paint, &resumed),
            interrupts(depth)
        )?,
    }
    Ok(())
}

pub fn interrupt<W: Write, S: Store>(
    writer: &mut W,
    store: &mut S,
    args: &InterruptArgs,
    paint: &dyn Paint,
    now: DateTime<Utc>,
) -> Result<()> {
    let name = non_empty(args.name(), "name")?;
    let at = resolve_at(args.at.as_deref(), now)?;

    let mut state = store.load()?;
    let outcome = state.interrupt(&name, at)?;
    store.dump(&state)?;

    writeln!(
        writer,
        "Interrupted {} for {} ({} deep).",
        label(paint, &outcome.suspended.name),
        label(paint, &outcome.started),
        outcome.depth
    )?;
    Ok(())
}

pub fn tag<W: Write, S: Store>(
    writer: &mut W,
    store: &mut S,
    args: &TagArgs,
    paint: &dyn Paint,
) -> Result<()> {
    let tags: Vec<&str> = args
        .tags
        .iter()
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .collect();
    if tags.is_empty() {
        anyhow::bail!("tag cannot be empty");
    }

    let mut state = store.load()?;
    let entry = state.tag(tags)?;
    let name = entry.name.clone();
    let all: Vec<&str> = entry.tags.iter().map(String::as_str).collect();
    let all = all.join(", ");
    store.dump(&state)?;

    writeln!(writer, "Tagged {} with {all}.", label(paint, &name))?;
    Ok(())
}

pub fn note<W: Write, S: Store>(
    writer: &mut W,
    store: &mut S,
    args: &NoteArgs,
    paint: &dyn Paint,
) -> Result<()> {
    let text = non_empty(args.text(), "note")?;

    let mut state = store.load()?;
    let name = state.note(text)?.name.clone();
    store.dump(&state)?;

    writeln!(writer, "Noted on {}.", label(paint, &name))?;
    Ok(())
}

fn interrupts(depth: usize) -> String {
    if depth == 1 {
        "1 interrupt".to_string()
    } else {
        format!("{depth} interrupts")
    }
}
