//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::path::Path;

use inkchord::chord::RawEvent;
use inkchord::keymap::{default_bindings, ActionTable, ModifierMask, Resolver};
use inkchord::mode::ModeStore;
use inkchord::target::{Backends, RecordingTarget};
use inkchord::{Interceptor, Outcome};

// US layout X11 keycodes
pub const ESCAPE: u8 = 9;
pub const ONE: u8 = 10;
pub const Q: u8 = 24;
pub const W: u8 = 25;
pub const T: u8 = 28;
pub const Y: u8 = 29;
pub const RETURN: u8 = 36;
pub const CONTROL_L: u8 = 37;
pub const A: u8 = 38;
pub const S: u8 = 39;
pub const D: u8 = 40;
pub const F: u8 = 41;
pub const K: u8 = 45;
pub const GRAVE: u8 = 49;
pub const SHIFT_L: u8 = 50;
pub const Z: u8 = 52;
pub const X: u8 = 53;
pub const C: u8 = 54;
pub const V: u8 = 55;

/// Interceptor over the US layout and default bindings, with every
/// collaborator recorded and all files kept under `dir`
pub fn test_interceptor(dir: &Path) -> (Interceptor, RecordingTarget) {
    let recorder = RecordingTarget::new();
    let interceptor = Interceptor::new(
        Resolver::default(),
        ActionTable::with_bindings(default_bindings()),
        Backends::recording(&recorder),
    )
    .with_store(ModeStore::new(dir.join("modes")))
    .with_latex_dir(dir.join("latex"));
    (interceptor, recorder)
}

pub fn press(keycode: u8) -> RawEvent {
    RawEvent::press(keycode, ModifierMask::NONE)
}

pub fn release(keycode: u8) -> RawEvent {
    RawEvent::release(keycode, ModifierMask::NONE)
}

/// Press and release one key; returns the outcome of the release
pub fn tap(interceptor: &mut Interceptor, keycode: u8) -> Option<Outcome> {
    assert_eq!(interceptor.handle_event(press(keycode)), None);
    interceptor.handle_event(release(keycode))
}

/// Shift down, key down, key up (which ends the cycle), shift up
///
/// The trailing Shift release lands in its own, empty, cycle and is replayed.
pub fn shift_tap(interceptor: &mut Interceptor, keycode: u8) -> Option<Outcome> {
    interceptor.handle_event(press(SHIFT_L));
    interceptor.handle_event(RawEvent::press(keycode, ModifierMask::SHIFT));
    let outcome = interceptor.handle_event(RawEvent::release(keycode, ModifierMask::SHIFT));
    interceptor.handle_event(RawEvent::release(SHIFT_L, ModifierMask::SHIFT));
    outcome
}

/// Press every key in order, then release the first
pub fn chord(interceptor: &mut Interceptor, keycodes: &[u8]) -> Option<Outcome> {
    for &code in keycodes {
        assert_eq!(interceptor.handle_event(press(code)), None);
    }
    interceptor.handle_event(release(keycodes[0]))
}
