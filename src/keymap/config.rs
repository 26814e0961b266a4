//! YAML configuration parsing for the action table
//!
//! Parses keymap.yaml files into Keybinding structs.

use std::path::Path;

use serde::Deserialize;

use super::action::Action;
use super::binding::Keybinding;
use super::types::{CanonicalKey, ModifierMask};

/// Root structure of a keymap YAML file
#[derive(Debug, Deserialize)]
pub struct KeymapConfig {
    pub bindings: Vec<BindingConfig>,
}

/// A single binding entry from YAML
#[derive(Debug, Deserialize)]
pub struct BindingConfig {
    pub key: String,
    pub action: String,
}

/// Errors that can occur when loading keymaps
#[derive(Debug, Clone, thiserror::Error)]
pub enum KeymapError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    #[error("Invalid action: {0}")]
    InvalidAction(String),
}

/// Load keybindings from a YAML file
pub fn load_keymap_file(path: &Path) -> Result<Vec<Keybinding>, KeymapError> {
    let content = std::fs::read_to_string(path).map_err(|e| KeymapError::Io(e.to_string()))?;

    parse_keymap_yaml(&content)
}

/// Parse keybindings from YAML string
pub fn parse_keymap_yaml(yaml: &str) -> Result<Vec<Keybinding>, KeymapError> {
    let config: KeymapConfig =
        serde_yaml::from_str(yaml).map_err(|e| KeymapError::Parse(e.to_string()))?;

    config
        .bindings
        .into_iter()
        .map(|entry| {
            let key = parse_key_string(&entry.key)?;
            let action = entry
                .action
                .parse::<Action>()
                .map_err(|_| KeymapError::InvalidAction(entry.action.clone()))?;
            Ok(Keybinding::new(key, action))
        })
        .collect()
}

/// Parse a key string like "shift+a" into a CanonicalKey
///
/// Modifier names are case-insensitive and may come in any order; the
/// result always uses the canonical `Shift+Control+` prefix order. The key
/// itself must be one character, or `?` for keys without a symbol.
pub fn parse_key_string(key_str: &str) -> Result<CanonicalKey, KeymapError> {
    // "+" alone, or a trailing "++", binds the plus key itself
    let (mods_part, key_part) = match key_str.strip_suffix("++") {
        Some(prefix) => (Some(prefix), "+"),
        None if key_str == "+" => (None, "+"),
        None => match key_str.rsplit_once('+') {
            Some((mods, key)) => (Some(mods), key),
            None => (None, key_str),
        },
    };

    let mut shift = false;
    let mut control = false;
    for part in mods_part.into_iter().flat_map(|m| m.split('+')) {
        match part.to_lowercase().as_str() {
            "shift" => shift = true,
            "ctrl" | "control" => control = true,
            _ => {
                return Err(KeymapError::InvalidKey(format!(
                    "Unknown modifier '{}' in {}",
                    part, key_str
                )))
            }
        }
    }

    let mut chars = key_part.chars();
    let ch = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => {
            return Err(KeymapError::InvalidKey(format!(
                "Key must be a single character: {}",
                key_str
            )))
        }
    };

    let mut mods = ModifierMask::NONE;
    if shift {
        mods = mods | ModifierMask::SHIFT;
    }
    if control {
        mods = mods | ModifierMask::CONTROL;
    }

    Ok(CanonicalKey::from_parts((ch != '?').then_some(ch), mods))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_key() {
        assert_eq!(parse_key_string("a").unwrap().as_str(), "a");
        assert_eq!(parse_key_string("`").unwrap().as_str(), "`");
    }

    #[test]
    fn test_parse_key_with_modifier() {
        assert_eq!(parse_key_string("shift+a").unwrap().as_str(), "Shift+a");
        assert_eq!(parse_key_string("Shift+t").unwrap().as_str(), "Shift+t");
    }

    #[test]
    fn test_parse_modifier_order_normalized() {
        assert_eq!(
            parse_key_string("ctrl+shift+x").unwrap().as_str(),
            "Shift+Control+x"
        );
    }

    #[test]
    fn test_parse_plus_key() {
        assert_eq!(parse_key_string("+").unwrap().as_str(), "+");
        assert_eq!(parse_key_string("shift++").unwrap().as_str(), "Shift++");
    }

    #[test]
    fn test_parse_unknown_sentinel() {
        assert!(parse_key_string("?").unwrap().is_unknown());
    }

    #[test]
    fn test_parse_invalid_key() {
        assert!(matches!(
            parse_key_string("enter"),
            Err(KeymapError::InvalidKey(_))
        ));
        assert!(matches!(
            parse_key_string("hyper+a"),
            Err(KeymapError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
bindings:
  - key: "q"
    action: Confirm
  - key: "shift+s"
    action: SaveStyleMode
"#;

        let bindings = parse_keymap_yaml(yaml).unwrap();
        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings[0].action, Action::Confirm);
        assert_eq!(bindings[1].key.as_str(), "Shift+s");
    }

    #[test]
    fn test_parse_yaml_invalid_action() {
        let yaml = "bindings:\n  - key: q\n    action: Launch\n";
        assert!(matches!(
            parse_keymap_yaml(yaml),
            Err(KeymapError::InvalidAction(a)) if a == "Launch"
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_keymap_file(Path::new("/nonexistent/keymap.yaml"));
        assert!(matches!(result, Err(KeymapError::Io(_))));
    }
}
