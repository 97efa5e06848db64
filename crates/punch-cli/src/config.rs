//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the state file.
    pub state_path: PathBuf,
    /// Editor command for `punch edit`; falls back to `$VISUAL`, then `$EDITOR`.
    pub editor: Option<String>,
    /// Whether to color terminal output.
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            state_path: data_dir.join("state.json"),
            editor: None,
            color: true,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (PUNCH_*)
        figment = figment.merge(Env::prefixed("PUNCH_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for punch.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("punch"))
}

/// Returns the platform-specific data directory for punch.
///
/// On Linux: `~/.local/share/punch`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("punch"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_data_path_ends_with_punch() {
        let path = dirs_data_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "punch");
    }

    #[test]
    fn test_default_config_uses_data_dir_for_state() {
        let config = Config::default();
        let data_dir = dirs_data_path().unwrap();
        assert_eq!(config.state_path, data_dir.join("state.json"));
        assert!(config.editor.is_none());
        assert!(config.color);
    }

    #[test]
    fn test_explicit_config_file_overrides_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let config_path = temp.path().join("punch.toml");
        std::fs::write(
            &config_path,
            "state_path = \"/tmp/punch-test/state.json\"\neditor = \"nano -w\"\ncolor = false\n",
        )
        .unwrap();

        let config = Config::load_from(Some(&config_path)).unwrap();
        assert_eq!(config.state_path, PathBuf::from("/tmp/punch-test/state.json"));
        assert_eq!(config.editor.as_deref(), Some("nano -w"));
        assert!(!config.color);
    }
}
