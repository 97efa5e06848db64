//! External editor process for `punch edit`.

use std::env;
use std::fs;
use std::io::Write;
use std::process::Command;

use punch_core::{EditError, Editor};

/// Edits text by running a user-configured program on a scratch file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalEditor {
    program: String,
}

impl ExternalEditor {
    /// Picks the editor from config, then `$VISUAL`, then `$EDITOR`.
    pub fn resolve(configured: Option<&str>) -> Result<Self, EditError> {
        Self::resolve_from(
            configured,
            env::var("VISUAL").ok(),
            env::var("EDITOR").ok(),
        )
    }

    fn resolve_from(
        configured: Option<&str>,
        visual: Option<String>,
        editor: Option<String>,
    ) -> Result<Self, EditError> {
        configured
            .map(str::to_string)
            .into_iter()
            .chain(visual)
            .chain(editor)
            .find(|program| !program.trim().is_empty())
            .map(|program| Self { program })
            .ok_or(EditError::MissingEditor)
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Editor for ExternalEditor {
    /// Writes `text` to a temp file, runs the editor on it and reads it back.
    ///
    /// The program string is split on whitespace, so `code --wait` works.
    fn edit(&self, text: &str) -> Result<String, EditError> {
        let mut file = tempfile::Builder::new()
            .prefix("punch-")
            .suffix(".json")
            .tempfile()?;
        file.write_all(text.as_bytes())?;
        file.flush()?;

        let mut words = self.program.split_whitespace();
        let command = words.next().ok_or(EditError::MissingEditor)?;
        tracing::debug!(program = %self.program, path = %file.path().display(), "launching editor");
        let status = Command::new(command)
            .args(words)
            .arg(file.path())
            .status()
            .map_err(|source| EditError::Launch {
                program: self.program.clone(),
                source,
            })?;
        if !status.success() {
            return Err(EditError::Exited {
                program: self.program.clone(),
                code: status.code(),
            });
        }

        Ok(fs::read_to_string(file.path())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_wins_over_environment() {
        let editor = ExternalEditor::resolve_from(
            Some("nano"),
            Some("code --wait".to_string()),
            Some("vi".to_string()),
        )
        .unwrap();
        assert_eq!(editor.program(), "nano");
    }

    #[test]
    fn visual_wins_over_editor() {
        let editor =
            ExternalEditor::resolve_from(None, Some("code --wait".to_string()), Some("vi".to_string()))
                .unwrap();
        assert_eq!(editor.program(), "code --wait");
    }

    #[test]
    fn blank_values_are_skipped() {
        let editor =
            ExternalEditor::resolve_from(Some("  "), Some(String::new()), Some("vi".to_string()))
                .unwrap();
        assert_eq!(editor.program(), "vi");
    }

    #[test]
    fn nothing_configured_is_missing_editor() {
        assert!(matches!(
            ExternalEditor::resolve_from(None, None, None),
            Err(EditError::MissingEditor)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn untouched_file_comes_back_as_is() {
        let editor = ExternalEditor::resolve_from(Some("true"), None, None).unwrap();
        assert_eq!(editor.edit("{\"work\": []}").unwrap(), "{\"work\": []}");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn editor_arguments_are_passed_before_the_path() {
        let editor = ExternalEditor::resolve_from(Some("sed -i s/code/review/"), None, None).unwrap();
        assert_eq!(editor.edit("code: write").unwrap(), "review: write");
    }

    #[cfg(unix)]
    #[test]
    fn failing_editor_is_reported() {
        let editor = ExternalEditor::resolve_from(Some("false"), None, None).unwrap();
        assert!(matches!(
            editor.edit("x"),
            Err(EditError::Exited { code: Some(1), .. })
        ));
    }

    #[test]
    fn missing_program_fails_to_launch() {
        let editor =
            ExternalEditor::resolve_from(Some("/nonexistent/punch-editor"), None, None).unwrap();
        assert!(matches!(editor.edit("x"), Err(EditError::Launch { .. })));
    }
}
