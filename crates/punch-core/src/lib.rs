//! Core domain logic for the punch time tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - Entries and the work state (closed history, open entry, interrupt stack)
//! - Session transitions: start, stop, interrupt, tag, note, status
//! - Relative time expressions such as "2 hours ago" or "last week"
//! - Report aggregation and duration humanization
//!
//! Nothing here touches the filesystem or spawns processes; storage lives in
//! `punch-store` and the editor process in `punch-cli`.

pub mod edit;
mod entry;
pub mod humanize;
pub mod paint;
pub mod report;
pub mod session;
mod state;
pub mod timeexpr;

pub use edit::{EditError, Editor, edit_state};
pub use entry::{Entry, timestamp};
pub use paint::{Color, Paint, Plain};
pub use report::{Report, ReportRow, build_report};
pub use session::{InterruptOutcome, SessionError, Status, StopOutcome};
pub use state::{DecodeError, StateError, StoredState, WorkState};
pub use timeexpr::{UnparsableTime, parse_period, parse_time};
