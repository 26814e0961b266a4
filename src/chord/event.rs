//! Raw key events as captured from the windowing system

use serde::{Deserialize, Serialize};

use crate::keymap::ModifierMask;

/// What kind of input event was captured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Press,
    Release,
    /// Anything else the capture facility delivered (logged, never classified)
    Other,
}

/// One captured event. Immutable once captured.
///
/// Serialized as a JSON line: `{"kind":"press","keycode":24,"state":0,"time":7}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawEvent {
    pub kind: EventKind,
    /// X11 hardware keycode
    pub keycode: u8,
    /// Modifier state at event time
    #[serde(default)]
    pub state: ModifierMask,
    /// Arrival ordinal or server timestamp
    #[serde(default)]
    pub time: u64,
}

impl RawEvent {
    pub fn press(keycode: u8, state: ModifierMask) -> Self {
        Self {
            kind: EventKind::Press,
            keycode,
            state,
            time: 0,
        }
    }

    pub fn release(keycode: u8, state: ModifierMask) -> Self {
        Self {
            kind: EventKind::Release,
            keycode,
            state,
            time: 0,
        }
    }

    pub fn at(mut self, time: u64) -> Self {
        self.time = time;
        self
    }

    /// Parse one JSON line
    pub fn from_json_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_line() {
        let event =
            RawEvent::from_json_line(r#"{"kind":"press","keycode":24,"state":1,"time":7}"#)
                .unwrap();

        assert_eq!(event.kind, EventKind::Press);
        assert_eq!(event.keycode, 24);
        assert!(event.state.shift());
        assert_eq!(event.time, 7);
    }

    #[test]
    fn test_parse_json_line_defaults() {
        let event = RawEvent::from_json_line(r#"{"kind":"release","keycode":9}"#).unwrap();

        assert_eq!(event, RawEvent::release(9, ModifierMask::NONE));
    }

    #[test]
    fn test_parse_rejects_unknown_kind() {
        assert!(RawEvent::from_json_line(r#"{"kind":"motion","keycode":9}"#).is_err());
    }
}
