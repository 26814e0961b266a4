//! Command-line argument parsing
//!
//! Supports:
//! - Intercepting events for one target window
//! - Dry runs that log instead of touching the display
//! - One-shot commands: print a style payload, list bindings, write the default config

use clap::Parser;
use std::path::PathBuf;

use crate::chord::PressedSet;
use crate::keymap::CanonicalKey;

/// Chord-driven keyboard shortcuts for Inkscape
#[derive(Parser, Debug)]
#[command(
    name = "inkchord",
    version,
    about = "Chord-driven keyboard shortcuts for Inkscape"
)]
pub struct CliArgs {
    /// X window id of the Inkscape window to drive
    #[arg(short = 'w', long, value_name = "ID")]
    pub window: Option<String>,

    /// Read raw events from this file instead of stdin
    #[arg(short = 'i', long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Log every synthesized action instead of sending it
    #[arg(long)]
    pub dry_run: bool,

    /// Print the clipboard payload for a chord (one key per character) and exit
    #[arg(long, value_name = "KEYS")]
    pub style: Option<String>,

    /// Print the active single-key bindings and exit
    #[arg(long)]
    pub list_bindings: bool,

    /// Write the default config.yaml if none exists and exit
    #[arg(long)]
    pub init_config: bool,

    /// Debug-level console logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// What the process should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupMode {
    /// Intercept events for a window (`None` only for dry runs)
    Intercept {
        window: Option<String>,
        dry_run: bool,
    },
    /// Print the style payload for these keys
    PrintStyle(Vec<CanonicalKey>),
    ListBindings,
    InitConfig,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub mode: StartupMode,
    /// Event feed file; stdin when absent
    pub input: Option<PathBuf>,
    pub verbose: bool,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        let one_shots =
            self.style.is_some() as u8 + self.list_bindings as u8 + self.init_config as u8;
        if one_shots > 1 {
            return Err(
                "--style, --list-bindings and --init-config cannot be combined".to_string(),
            );
        }

        let mode = if let Some(keys) = self.style {
            if keys.is_empty() {
                return Err("--style needs at least one key".to_string());
            }
            StartupMode::PrintStyle(keys.chars().map(CanonicalKey::char).collect())
        } else if self.list_bindings {
            StartupMode::ListBindings
        } else if self.init_config {
            StartupMode::InitConfig
        } else {
            if self.window.is_none() && !self.dry_run {
                return Err("--window is required unless --dry-run is given".to_string());
            }
            StartupMode::Intercept {
                window: self.window,
                dry_run: self.dry_run,
            }
        };

        Ok(StartupConfig {
            mode,
            input: self.input,
            verbose: self.verbose,
        })
    }
}

impl StartupConfig {
    /// Keys of a `--style` request as a chord
    pub fn style_keys(&self) -> Option<PressedSet> {
        match &self.mode {
            StartupMode::PrintStyle(keys) => Some(keys.iter().cloned().collect()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> CliArgs {
        CliArgs {
            window: None,
            input: None,
            dry_run: false,
            style: None,
            list_bindings: false,
            init_config: false,
            verbose: false,
        }
    }

    #[test]
    fn test_window_required() {
        assert!(args().into_config().is_err());
    }

    #[test]
    fn test_window_given() {
        let config = CliArgs {
            window: Some("0x3a00007".to_string()),
            ..args()
        }
        .into_config()
        .unwrap();

        assert_eq!(
            config.mode,
            StartupMode::Intercept {
                window: Some("0x3a00007".to_string()),
                dry_run: false
            }
        );
    }

    #[test]
    fn test_dry_run_without_window() {
        let config = CliArgs {
            dry_run: true,
            input: Some(PathBuf::from("events.jsonl")),
            ..args()
        }
        .into_config()
        .unwrap();

        assert!(matches!(
            config.mode,
            StartupMode::Intercept { window: None, dry_run: true }
        ));
        assert_eq!(config.input, Some(PathBuf::from("events.jsonl")));
    }

    #[test]
    fn test_style_splits_chars() {
        let config = CliArgs {
            style: Some("y1q".to_string()),
            ..args()
        }
        .into_config()
        .unwrap();

        let keys = config.style_keys().unwrap();
        assert_eq!(keys.len(), 3);
        assert!(keys.has_char('y') && keys.has_char('1') && keys.has_char('q'));
    }

    #[test]
    fn test_empty_style_rejected() {
        let result = CliArgs {
            style: Some(String::new()),
            ..args()
        }
        .into_config();
        assert!(result.is_err());
    }

    #[test]
    fn test_one_shots_conflict() {
        let result = CliArgs {
            list_bindings: true,
            init_config: true,
            ..args()
        }
        .into_config();
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_from_argv() {
        let parsed = CliArgs::try_parse_from(["inkchord", "--dry-run", "-v"]).unwrap();
        assert!(parsed.dry_run);
        assert!(parsed.verbose);
    }
}
