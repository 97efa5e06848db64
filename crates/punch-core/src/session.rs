//! Session transitions over a [`WorkState`].
//!
//! States are Idle (nothing open), Working (one open entry) and Interrupted
//! (Working with suspended entries on the interrupt stack). Every operation
//! validates before it mutates, so a failed call leaves the state untouched.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::entry::Entry;
use crate::humanize::timegap;
use crate::state::WorkState;

/// Label prepended to interrupt names that carry no type prefix of their own.
pub const INTERRUPT_PREFIX: &str = "int: ";

/// Invalid session transitions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// `start` while an entry is open.
    #[error("already working on {name}; stop it first")]
    AlreadyWorking { name: String },

    /// An operation that needs an open entry was called while idle.
    #[error("not working on anything")]
    NotWorking,

    /// The requested end time precedes the open entry's start.
    #[error("{name} started at {start}, it cannot end at {end}")]
    EndBeforeStart {
        name: String,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

/// What `stop` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopOutcome {
    /// The open entry was closed and nothing replaced it.
    Stopped { stopped: Entry },
    /// The open entry was closed and the top of the interrupt stack resumed.
    Resumed {
        stopped: Entry,
        resumed: String,
        depth: usize,
    },
}

/// What `interrupt` did.
///
/// The suspended entry is closed in the work log and a copy of it is pushed
/// onto the interrupt stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterruptOutcome {
    /// The entry that was suspended, now closed.
    pub suspended: Entry,
    /// Name of the newly opened entry.
    pub started: String,
    pub depth: usize,
}

/// Snapshot of the open entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub name: String,
    pub started_at: DateTime<Utc>,
    /// Coarse elapsed time, see [`timegap`].
    pub elapsed: String,
    pub depth: usize,
    pub tags: Vec<String>,
    pub notes: Vec<String>,
}

/// Whether `name` already starts with a short type prefix such as `brk:`.
///
/// Only the first six characters are inspected: one to five ASCII
/// alphanumerics followed by a colon.
pub fn has_type_prefix(name: &str) -> bool {
    let head: Vec<char> = name.chars().take(6).collect();
    head.iter()
        .position(|&c| c == ':')
        .is_some_and(|colon| colon > 0 && head[..colon].iter().all(char::is_ascii_alphanumeric))
}

/// Display name for an interrupt: `name` itself if typed, else `int: name`.
pub fn interrupt_label(name: &str) -> Cow<'_, str> {
    if has_type_prefix(name) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("{INTERRUPT_PREFIX}{name}"))
    }
}

impl WorkState {
    /// Opens a new entry.
    pub fn start(
        &mut self,
        name: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Result<&Entry, SessionError> {
        if let Some(current) = &self.current {
            return Err(SessionError::AlreadyWorking {
                name: current.name.clone(),
            });
        }
        Ok(self.open(name.into(), at))
    }

    /// Closes the open entry, resuming the most recent interruption when `resume` is set.
    pub fn stop(&mut self, at: DateTime<Utc>, resume: bool) -> Result<StopOutcome, SessionError> {
        let stopped = self.close(at)?;
        self.history.push(stopped.clone());
        if !resume {
            return Ok(StopOutcome::Stopped { stopped });
        }
        match self.interrupt_stack.pop() {
            Some(suspended) => {
                // the stacked copy is already in the log; only its name carries over
                let resumed = self.open(suspended.name, at).name.clone();
                tracing::info!(%resumed, depth = self.depth(), "resumed interrupted entry");
                Ok(StopOutcome::Resumed {
                    stopped,
                    resumed,
                    depth: self.depth(),
                })
            }
            None => Ok(StopOutcome::Stopped { stopped }),
        }
    }

    /// Suspends the open entry and starts working on `name` instead.
    pub fn interrupt(
        &mut self,
        name: &str,
        at: DateTime<Utc>,
    ) -> Result<InterruptOutcome, SessionError> {
        let suspended = self.close(at)?;
        self.history.push(suspended.clone());
        self.interrupt_stack.push(suspended.clone());
        let started = self.open(interrupt_label(name).into_owned(), at).name.clone();
        tracing::info!(%started, depth = self.depth(), "interrupted");
        Ok(InterruptOutcome {
            suspended,
            started,
            depth: self.depth(),
        })
    }

    /// Adds tags to the open entry; tags already present are ignored.
    pub fn tag<I, S>(&mut self, tags: I) -> Result<&Entry, SessionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let current = self.current.as_mut().ok_or(SessionError::NotWorking)?;
        current.tags.extend(tags.into_iter().map(Into::into));
        Ok(current)
    }

    /// Appends a note to the open entry.
    pub fn note(&mut self, text: impl Into<String>) -> Result<&Entry, SessionError> {
        let current = self.current.as_mut().ok_or(SessionError::NotWorking)?;
        current.notes.push(text.into());
        Ok(current)
    }

    pub fn status(&self, now: DateTime<Utc>) -> Result<Status, SessionError> {
        let current = self.current.as_ref().ok_or(SessionError::NotWorking)?;
        Ok(Status {
            name: current.name.clone(),
            started_at: current.start,
            elapsed: timegap(now - current.start),
            depth: self.depth(),
            tags: current.tags.iter().cloned().collect(),
            notes: current.notes.clone(),
        })
    }

    fn open(&mut self, name: String, at: DateTime<Utc>) -> &Entry {
        tracing::info!(%name, %at, "opened entry");
        self.current.insert(Entry::new(name, at))
    }

    /// Takes the open entry out of the state and closes it at `at`.
    fn close(&mut self, at: DateTime<Utc>) -> Result<Entry, SessionError> {
        let current = self.current.as_ref().ok_or(SessionError::NotWorking)?;
        if at < current.start {
            return Err(SessionError::EndBeforeStart {
                name: current.name.clone(),
                start: current.start,
                end: at,
            });
        }
        let mut closed = self.current.take().ok_or(SessionError::NotWorking)?;
        closed.end = Some(at);
        tracing::info!(name = %closed.name, %at, "closed entry");
        Ok(closed)
    }
}
