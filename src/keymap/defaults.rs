//! Default single-key bindings
//!
//! Loaded from the keymap.yaml embedded at compile time, falling back to the
//! hardcoded table below, then overlaid with the user's keymap.yaml.

use std::path::Path;

use super::action::Action;
use super::binding::Keybinding;
use super::config::{load_keymap_file, parse_keymap_yaml};

/// Default keymap YAML embedded at compile time
const DEFAULT_KEYMAP_YAML: &str = include_str!("../../keymap.yaml");

/// The embedded default keymap as text
pub fn get_default_keymap_yaml() -> &'static str {
    DEFAULT_KEYMAP_YAML
}

/// Load and merge keymaps: defaults + user overrides
///
/// Loading order (each layer overrides the previous):
/// 1. Embedded default keymap (compiled into binary)
/// 2. User config at `<config_dir>/keymap.yaml`
///
/// A broken user file is logged and ignored so the defaults always load.
pub fn load_default_keymap(user_path: Option<&Path>) -> Vec<Keybinding> {
    let mut bindings = match parse_keymap_yaml(DEFAULT_KEYMAP_YAML) {
        Ok(b) => {
            tracing::info!("Loaded embedded default keymap ({} bindings)", b.len());
            b
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse embedded keymap: {}, using hardcoded defaults",
                e
            );
            default_bindings()
        }
    };

    if let Some(user_path) = user_path.filter(|p| p.exists()) {
        match load_keymap_file(user_path) {
            Ok(user_bindings) => {
                tracing::info!(
                    "Merging user keymap from {} ({} bindings)",
                    user_path.display(),
                    user_bindings.len()
                );
                bindings = merge_bindings(bindings, user_bindings);
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to load user keymap from {}: {}",
                    user_path.display(),
                    e
                );
            }
        }
    }

    bindings
}

/// Merge user bindings into base bindings
///
/// - Same key → user binding replaces the base one
/// - `Unbound` → removes the base binding for that key
/// - Otherwise → user binding is added
pub fn merge_bindings(base: Vec<Keybinding>, user: Vec<Keybinding>) -> Vec<Keybinding> {
    let mut result = base;

    for user_binding in user {
        if user_binding.action == Action::Unbound {
            result.retain(|b| !b.matches(&user_binding.key));
            continue;
        }

        match result.iter().position(|b| b.matches(&user_binding.key)) {
            Some(idx) => result[idx] = user_binding,
            None => result.push(user_binding),
        }
    }

    result
}

/// Hardcoded single-key table
pub fn default_bindings() -> Vec<Keybinding> {
    vec![
        Keybinding::new("q", Action::Confirm),
        Keybinding::new("w", Action::Save),
        Keybinding::new("a", Action::ObjectMode),
        Keybinding::new("Shift+a", Action::SaveObjectMode),
        Keybinding::new("s", Action::StyleMode),
        Keybinding::new("Shift+s", Action::SaveStyleMode),
        Keybinding::new("d", Action::Pencil),
        Keybinding::new("f", Action::Bezier),
        Keybinding::new("t", Action::MathInput),
        Keybinding::new("Shift+t", Action::MathInputPrerendered),
        Keybinding::new("v", Action::Snap),
        Keybinding::new("z", Action::Undo),
        Keybinding::new("x", Action::Delete),
        Keybinding::new("c", Action::Redo),
        Keybinding::new("`", Action::DisabledMode),
    ]
}
