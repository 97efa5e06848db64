//! Bulk editing of the whole state as text.
//!
//! The state is handed to an [`Editor`] as pretty JSON and whatever comes back
//! must decode into a valid [`WorkState`]. How the text gets edited (usually an
//! external program) is the editor's business.

use thiserror::Error;

use crate::state::{DecodeError, WorkState};

/// Editing failures. None of them change the persisted state.
#[derive(Debug, Error)]
pub enum EditError {
    /// Neither the configuration nor the environment names an editor.
    #[error("no editor configured; set `editor` in config.toml, $VISUAL or $EDITOR")]
    MissingEditor,

    /// The edited text does not decode into a valid state.
    #[error("edited data is invalid, nothing was saved: {0}")]
    InvalidEditedData(#[source] DecodeError),

    /// The editor program could not be started.
    #[error("failed to launch editor `{program}`")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The editor program reported failure; `code` is absent when it was killed by a signal.
    #[error("editor `{program}` {}", describe_exit(.code))]
    Exited { program: String, code: Option<i32> },

    /// Serializing the state or handling the scratch file failed.
    #[error("failed to prepare text for editing: {0}")]
    Io(#[from] std::io::Error),
}

#[allow(clippy::ref_option)] // thiserror passes fields by reference
fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with code {code}"),
        None => "was terminated without an exit code".to_string(),
    }
}

/// Something that lets the user rewrite a piece of text.
pub trait Editor {
    fn edit(&self, text: &str) -> Result<String, EditError>;
}

/// Runs `state` through `editor`.
///
/// Returns `None` when the text came back unchanged.
pub fn edit_state(state: &WorkState, editor: &dyn Editor) -> Result<Option<WorkState>, EditError> {
    let original = state.to_json().map_err(std::io::Error::from)?;
    let edited = editor.edit(&original)?;
    if edited.trim() == original.trim() {
        return Ok(None);
    }

    let updated = WorkState::from_json(&edited).map_err(EditError::InvalidEditedData)?;
    tracing::info!(
        work = updated.work().count(),
        interrupted = updated.depth(),
        "accepted edited state"
    );
    Ok(Some(updated))
}
