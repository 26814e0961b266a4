//! Centralized configuration paths for inkchord
//!
//! All config files live under:
//! - Unix/macOS: `~/.config/inkchord/`
//! - Windows: `%APPDATA%\inkchord\`
//!
//! This module is the single source of truth for config paths.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "inkchord";

/// Base config directory for inkchord
///
/// Unix/macOS:
///   - If XDG_CONFIG_HOME is set: `$XDG_CONFIG_HOME/inkchord`
///   - Else: `~/.config/inkchord`
///
/// Windows:
///   - `%APPDATA%\inkchord`
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// `~/.config/inkchord/config.yaml`
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// `~/.config/inkchord/keymap.yaml`
pub fn keymap_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("keymap.yaml"))
}

/// `~/.config/inkchord/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// `~/.config/inkchord/modes/`, one subdirectory per mode kind
pub fn modes_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("modes"))
}

/// `~/.config/inkchord/latex/`, pre-rendered math documents
pub fn latex_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("latex"))
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

fn ensure_subdir(name: &str) -> Result<PathBuf, String> {
    let dir = ensure_config_dir()?.join(name);
    ensure_dir(&dir)?;
    Ok(dir)
}

/// Ensure the base config dir exists, returning it
pub fn ensure_config_dir() -> Result<PathBuf, String> {
    let dir = config_dir().ok_or_else(|| "No config directory available".to_string())?;
    ensure_dir(&dir)?;
    Ok(dir)
}

/// Ensure logs dir exists, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    ensure_subdir("logs")
}

pub fn ensure_modes_dir() -> Result<PathBuf, String> {
    ensure_subdir("modes")
}

pub fn ensure_latex_dir() -> Result<PathBuf, String> {
    ensure_subdir("latex")
}

/// Ensure full config structure (config dir + modes + latex)
pub fn ensure_all_config_dirs() {
    match ensure_modes_dir().and_then(|_| ensure_latex_dir()) {
        Ok(latex) => {
            tracing::info!("Config directories ready (latex dir: {})", latex.display());
        }
        Err(e) => {
            tracing::warn!("Failed to ensure config directories: {}", e);
        }
    }
}
