//! The whole tracked state: closed history, the open entry, and the interrupt stack.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entry::Entry;

/// Invariant violations found while turning persisted data into a [`WorkState`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    /// Only the last work entry may be open.
    #[error("work entry #{index} ({name}) has no end but is not the last entry")]
    OpenEntryNotLast { index: usize, name: String },

    /// Interrupted entries are closed before they are pushed.
    #[error("interrupted entry #{index} ({name}) has no end")]
    OpenInterrupted { index: usize, name: String },

    /// An entry cannot end before it starts.
    #[error("entry {name} ends before it starts")]
    EndBeforeStart { name: String },
}

/// Failure to decode serialized state.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The text is not well-formed.
    #[error("malformed state: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The text parsed but breaks a state invariant.
    #[error("inconsistent state: {0}")]
    Inconsistent(#[from] StateError),
}

/// Persisted shape of the state.
///
/// `work` is the full log, whose last element may be open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredState {
    #[serde(default)]
    pub work: Vec<Entry>,
    #[serde(default)]
    pub interrupt_stack: Vec<Entry>,
}

/// In-memory state with the open entry held apart from the closed history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkState {
    pub(crate) history: Vec<Entry>,
    pub(crate) current: Option<Entry>,
    pub(crate) interrupt_stack: Vec<Entry>,
}

impl WorkState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Closed work entries, oldest first.
    pub fn history(&self) -> &[Entry] {
        &self.history
    }

    /// The open entry, if anything is being worked on.
    pub const fn current(&self) -> Option<&Entry> {
        self.current.as_ref()
    }

    /// Suspended entries, bottom of the stack first.
    pub fn interrupt_stack(&self) -> &[Entry] {
        &self.interrupt_stack
    }

    pub const fn is_working(&self) -> bool {
        self.current.is_some()
    }

    /// Number of unresolved interruptions.
    pub fn depth(&self) -> usize {
        self.interrupt_stack.len()
    }

    /// The work log in order, including the open entry.
    pub fn work(&self) -> impl Iterator<Item = &Entry> {
        self.history.iter().chain(self.current.iter())
    }

    /// Every distinct entry: the work log, then stack entries missing from it.
    ///
    /// A suspended segment is normally both logged and stacked; it is yielded once.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.work().chain(
            self.interrupt_stack
                .iter()
                .filter(|entry| !self.is_logged(entry)),
        )
    }

    fn is_logged(&self, entry: &Entry) -> bool {
        self.history.iter().any(|logged| {
            logged.name == entry.name && logged.start == entry.start && logged.end == entry.end
        })
    }

    pub fn to_stored(&self) -> StoredState {
        StoredState {
            work: self.work().cloned().collect(),
            interrupt_stack: self.interrupt_stack.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.to_stored())
    }

    pub fn from_json(text: &str) -> Result<Self, DecodeError> {
        let stored: StoredState = serde_json::from_str(text)?;
        Ok(Self::try_from(stored)?)
    }
}

impl TryFrom<StoredState> for WorkState {
    type Error = StateError;

    fn try_from(stored: StoredState) -> Result<Self, Self::Error> {
        let StoredState {
            mut work,
            interrupt_stack,
        } = stored;

        for entry in work.iter().chain(&interrupt_stack) {
            if entry.end.is_some_and(|end| end < entry.start) {
                return Err(StateError::EndBeforeStart {
                    name: entry.name.clone(),
                });
            }
        }

        let current = if work.last().is_some_and(Entry::is_open) {
            work.pop()
        } else {
            None
        };
        if let Some((index, entry)) = work.iter().enumerate().find(|(_, e)| e.is_open()) {
            return Err(StateError::OpenEntryNotLast {
                index,
                name: entry.name.clone(),
            });
        }
        if let Some((index, entry)) = interrupt_stack.iter().enumerate().find(|(_, e)| e.is_open()) {
            return Err(StateError::OpenInterrupted {
                index,
                name: entry.name.clone(),
            });
        }

        Ok(Self {
            history: work,
            current,
            interrupt_stack,
        })
    }
}
