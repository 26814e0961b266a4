//! Keybinding struct representing a mapping from a canonical key to an action

use super::action::Action;
use super::types::CanonicalKey;

/// A single-key binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybinding {
    pub key: CanonicalKey,
    pub action: Action,
}

impl Keybinding {
    pub fn new(key: impl Into<CanonicalKey>, action: Action) -> Self {
        Self {
            key: key.into(),
            action,
        }
    }

    /// Check if this binding fires for the given key
    pub fn matches(&self, key: &CanonicalKey) -> bool {
        self.key == *key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_matches_exact_key() {
        let binding = Keybinding::new("Shift+a", Action::SaveObjectMode);

        assert!(binding.matches(&CanonicalKey::from("Shift+a")));
        assert!(!binding.matches(&CanonicalKey::from("a")));
    }
}
