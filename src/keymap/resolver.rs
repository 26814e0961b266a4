//! Key-identity resolver: raw keycode + modifier mask → CanonicalKey

use super::layout::KeyboardLayout;
use super::types::{CanonicalKey, ModifierMask};

/// Maps hardware keycodes to canonical key names
///
/// Total by construction: keys without a printable symbol collapse to `?`.
#[derive(Debug, Clone)]
pub struct Resolver {
    layout: KeyboardLayout,
}

impl Resolver {
    pub fn new(layout: KeyboardLayout) -> Self {
        Self { layout }
    }

    /// Resolve a keycode under the given modifier state
    pub fn canonical_key(&self, keycode: u8, mods: ModifierMask) -> CanonicalKey {
        let ch = self.layout.keysym(keycode).to_char();
        CanonicalKey::from_parts(ch, mods)
    }

    /// Resolve only keys that produce a printable symbol
    ///
    /// Modifiers and function keys yield `None`; they never join a chord.
    /// That includes Return, Escape, Tab, BackSpace and Delete, which xlib's
    /// `keysym_to_string` would map to control characters, so `q` held with
    /// Return is the single key `q` rather than a two-key chord.
    pub fn resolve(&self, keycode: u8, mods: ModifierMask) -> Option<CanonicalKey> {
        let ch = self.layout.keysym(keycode).to_char()?;
        Some(CanonicalKey::from_parts(Some(ch), mods))
    }

    /// Whether the keycode carries the Escape keysym
    pub fn is_escape(&self, keycode: u8) -> bool {
        self.layout.keysym(keycode).is_escape()
    }

    pub fn layout(&self) -> &KeyboardLayout {
        &self.layout
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(KeyboardLayout::us())
    }
}
