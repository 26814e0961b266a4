//! User settings persistence
//!
//! Stores preferences in `~/.config/inkchord/config.yaml`. A missing file
//! means defaults; a file that exists but cannot be read or parsed is a
//! startup error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::target::INKSCAPE_SVG_TARGET;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no config directory available")]
    NoConfigDir,

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// External editor command; the file to edit is appended to `args`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorSettings {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            program: "kitty".to_string(),
            args: [
                "--name",
                "latex-terminal-ink",
                "--",
                "nvim",
                "--cmd",
                "let g:isInkscape='yes'",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

/// Settings that persist across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Font family for unrendered math text
    #[serde(default = "default_font")]
    pub font: String,

    #[serde(default = "default_font_size")]
    pub font_size: u32,

    #[serde(default)]
    pub editor: EditorSettings,

    /// Clipboard format advertised for SVG payloads
    #[serde(default = "default_clipboard_target")]
    pub clipboard_target: String,
}

fn default_font() -> String {
    "Iosevka".to_string()
}

fn default_font_size() -> u32 {
    14
}

fn default_clipboard_target() -> String {
    INKSCAPE_SVG_TARGET.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font: default_font(),
            font_size: default_font_size(),
            editor: EditorSettings::default(),
            clipboard_target: default_clipboard_target(),
        }
    }
}

impl Settings {
    /// Load from the default config location
    pub fn load() -> Result<Self, ConfigError> {
        match crate::config_paths::config_file() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::debug!("No config directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from `path`, or return defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let settings = serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!("Loaded config from {}", path.display());
        Ok(settings)
    }

    /// Save to the default config location, returning the path written
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = crate::config_paths::config_file().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save to `path`, creating its parent directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content).map_err(write_err)?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.font, "Iosevka");
        assert_eq!(settings.font_size, 14);
        assert_eq!(settings.editor.program, "kitty");
        assert_eq!(settings.clipboard_target, "image/x-inkscape-svg");
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let settings: Settings = serde_yaml::from_str("font_size: 18\n").unwrap();
        assert_eq!(settings.font_size, 18);
        assert_eq!(settings.font, "Iosevka");
        assert_eq!(settings.editor, EditorSettings::default());
    }

    #[test]
    fn test_editor_without_args() {
        let yaml = "editor:\n  program: gvim\n";
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.editor.program, "gvim");
        assert!(settings.editor.args.is_empty());
    }
}
