//! Chord classification: style chord, single-key action, or unrecognized

use super::accumulator::PressedSet;
use crate::keymap::{Action, ActionTable};

/// What a completed cycle means in normal mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Two or more keys: always a style chord, never declined
    StyleChord,
    /// Exactly one key with an entry in the action table
    Single(Action),
    /// One unbound key, or no keys at all
    Unrecognized,
}

impl Classification {
    /// Whether the cycle is claimed (no replay)
    pub fn is_handled(self) -> bool {
        !matches!(self, Classification::Unrecognized)
    }
}

/// Classify a chord snapshot
pub fn classify(pressed: &PressedSet, table: &ActionTable) -> Classification {
    if pressed.len() > 1 {
        return Classification::StyleChord;
    }

    match pressed.single().and_then(|key| table.lookup(key)) {
        Some(action) => Classification::Single(action),
        None => Classification::Unrecognized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::default_bindings;

    fn table() -> ActionTable {
        ActionTable::with_bindings(default_bindings())
    }

    #[test]
    fn test_multi_key_is_style_chord() {
        let pressed = PressedSet::from_iter(["q", "1"]);
        assert_eq!(classify(&pressed, &table()), Classification::StyleChord);
    }

    #[test]
    fn test_unbound_multi_key_still_style_chord() {
        let pressed = PressedSet::from_iter(["k", "Control+?"]);
        assert_eq!(classify(&pressed, &table()), Classification::StyleChord);
    }

    #[test]
    fn test_single_bound_key() {
        let pressed = PressedSet::from_iter(["q"]);
        assert_eq!(
            classify(&pressed, &table()),
            Classification::Single(Action::Confirm)
        );

        let pressed = PressedSet::from_iter(["Shift+t"]);
        assert_eq!(
            classify(&pressed, &table()),
            Classification::Single(Action::MathInputPrerendered)
        );
    }

    #[test]
    fn test_single_unbound_key() {
        let pressed = PressedSet::from_iter(["k"]);
        let class = classify(&pressed, &table());
        assert_eq!(class, Classification::Unrecognized);
        assert!(!class.is_handled());
    }

    #[test]
    fn test_empty_chord() {
        assert_eq!(
            classify(&PressedSet::new(), &table()),
            Classification::Unrecognized
        );
    }
}
