//! Core types for key identity: ModifierMask, CanonicalKey, SyntheticKey

use std::fmt;

use serde::{Deserialize, Serialize};

/// X11 modifier state bits as delivered with every key event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModifierMask(u16);

impl ModifierMask {
    pub const NONE: ModifierMask = ModifierMask(0);
    pub const SHIFT: ModifierMask = ModifierMask(1 << 0);
    pub const LOCK: ModifierMask = ModifierMask(1 << 1);
    pub const CONTROL: ModifierMask = ModifierMask(1 << 2);
    pub const MOD1: ModifierMask = ModifierMask(1 << 3); // Alt
    pub const MOD4: ModifierMask = ModifierMask(1 << 6); // Super

    /// Wrap a raw state value
    pub const fn from_bits(bits: u16) -> Self {
        ModifierMask(bits)
    }

    /// Raw state value
    pub const fn bits(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & Self::SHIFT.0 != 0
    }

    #[inline]
    pub const fn control(self) -> bool {
        self.0 & Self::CONTROL.0 != 0
    }

    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & Self::MOD1.0 != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn union(self, other: ModifierMask) -> ModifierMask {
        ModifierMask(self.0 | other.0)
    }

    #[inline]
    pub const fn contains(self, other: ModifierMask) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl std::ops::BitOr for ModifierMask {
    type Output = ModifierMask;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

/// Normalized symbolic name of a physical key plus the modifiers held with it
///
/// Rendered as `Shift+` then `Control+` prefixes followed by the printable
/// character, or `?` when the key has no printable symbol.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    /// Sentinel identity for keys without a printable symbol
    pub const UNKNOWN: &'static str = "?";

    /// Build the canonical identity from an optional character and a modifier mask
    pub fn from_parts(ch: Option<char>, mods: ModifierMask) -> Self {
        let mut name = String::new();
        if mods.shift() {
            name.push_str("Shift+");
        }
        if mods.control() {
            name.push_str("Control+");
        }
        match ch {
            Some(c) => name.push(c),
            None => name.push_str(Self::UNKNOWN),
        }
        CanonicalKey(name)
    }

    /// The bare, unmodified key for a character
    pub fn char(c: char) -> Self {
        CanonicalKey(c.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if this is the `?` sentinel with no modifiers
    pub fn is_unknown(&self) -> bool {
        self.0 == Self::UNKNOWN
    }
}

impl From<&str> for CanonicalKey {
    fn from(s: &str) -> Self {
        CanonicalKey(s.to_string())
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A key press synthesized into the target window
///
/// `name` is an X keysym name ("Return", "percent", "z").
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SyntheticKey {
    pub name: &'static str,
    pub mods: ModifierMask,
}

impl SyntheticKey {
    pub const fn new(name: &'static str, mods: ModifierMask) -> Self {
        Self { name, mods }
    }

    pub const fn key(name: &'static str) -> Self {
        Self {
            name,
            mods: ModifierMask::NONE,
        }
    }
}

impl fmt::Display for SyntheticKey {
    /// xdotool combo syntax, e.g. `ctrl+shift+v`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mods.control() {
            f.write_str("ctrl+")?;
        }
        if self.mods.shift() {
            f.write_str("shift+")?;
        }
        if self.mods.alt() {
            f.write_str("alt+")?;
        }
        f.write_str(self.name)
    }
}
