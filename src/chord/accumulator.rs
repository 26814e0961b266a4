//! Chord accumulator: pressed keys and the raw events of the current cycle

use std::collections::HashSet;

use super::event::{EventKind, RawEvent};
use crate::keymap::{CanonicalKey, Resolver};

/// Keys currently held down in this cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PressedSet(HashSet<CanonicalKey>);

impl PressedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: CanonicalKey) -> bool {
        self.0.insert(key)
    }

    pub fn contains(&self, key: &CanonicalKey) -> bool {
        self.0.contains(key)
    }

    /// Membership test for a bare, unmodified character key
    pub fn has_char(&self, c: char) -> bool {
        self.0.contains(&CanonicalKey::char(c))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CanonicalKey> {
        self.0.iter()
    }

    /// The only key, if exactly one is held
    pub fn single(&self) -> Option<&CanonicalKey> {
        if self.0.len() == 1 {
            self.0.iter().next()
        } else {
            None
        }
    }

    /// Keys in sorted order, for logs
    pub fn sorted(&self) -> Vec<&CanonicalKey> {
        let mut keys: Vec<_> = self.0.iter().collect();
        keys.sort();
        keys
    }
}

impl FromIterator<CanonicalKey> for PressedSet {
    fn from_iter<I: IntoIterator<Item = CanonicalKey>>(iter: I) -> Self {
        PressedSet(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for PressedSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        PressedSet(iter.into_iter().map(CanonicalKey::from).collect())
    }
}

/// A completed chord cycle, handed out by value so the accumulator is
/// already empty while the cycle is being classified
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cycle {
    pub pressed: PressedSet,
    pub events: Vec<RawEvent>,
}

/// Tracks pressed keys and buffered events between idle points
#[derive(Debug, Default)]
pub struct ChordAccumulator {
    pressed: PressedSet,
    events: Vec<RawEvent>,
}

impl ChordAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one raw event
    ///
    /// Every event is buffered. A press of a key with a printable symbol
    /// joins the chord; presses of modifiers and other symbol-less keys are
    /// only buffered. Any release, whichever key it is for, completes the
    /// cycle: both buffers are moved out together and returned.
    pub fn on_event(&mut self, event: RawEvent, resolver: &Resolver) -> Option<Cycle> {
        self.events.push(event);

        match event.kind {
            EventKind::Press => {
                if let Some(key) = resolver.resolve(event.keycode, event.state) {
                    tracing::trace!(key = %key, "chord press");
                    self.pressed.insert(key);
                }
                None
            }
            EventKind::Release => Some(self.take_cycle()),
            EventKind::Other => {
                tracing::trace!(keycode = event.keycode, "buffered non-key event");
                None
            }
        }
    }

    fn take_cycle(&mut self) -> Cycle {
        Cycle {
            pressed: std::mem::take(&mut self.pressed),
            events: std::mem::take(&mut self.events),
        }
    }

    pub fn pressed(&self) -> &PressedSet {
        &self.pressed
    }

    pub fn events(&self) -> &[RawEvent] {
        &self.events
    }

    /// Both buffers empty
    pub fn is_idle(&self) -> bool {
        self.pressed.is_empty() && self.events.is_empty()
    }
}
