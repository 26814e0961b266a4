//! Replay engine: re-send buffered events when no handler claimed them

use super::event::RawEvent;
use crate::target::{TargetError, TargetWindow};

/// Re-send every event in original order, then flush
///
/// Events are never reordered or skipped: a failure on one event is kept
/// and reported after the rest have been sent and flushed.
pub fn replay(events: &[RawEvent], target: &mut dyn TargetWindow) -> Result<(), TargetError> {
    tracing::debug!(count = events.len(), "replaying events");

    let mut first_error = None;
    for event in events {
        if let Err(e) = target.send_event(event, true) {
            tracing::warn!(keycode = event.keycode, "failed to re-send event: {}", e);
            first_error.get_or_insert(e);
        }
    }

    let flushed = target.flush();
    match first_error {
        Some(e) => Err(e),
        None => flushed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::ModifierMask;
    use crate::target::{Call, RecordingTarget};

    #[test]
    fn test_replay_preserves_order_and_flushes() {
        let recorder = RecordingTarget::new();
        let events = vec![
            RawEvent::press(24, ModifierMask::NONE).at(1),
            RawEvent::press(38, ModifierMask::NONE).at(2),
            RawEvent::release(24, ModifierMask::NONE).at(3),
        ];

        replay(&events, &mut recorder.clone()).unwrap();

        let mut expected: Vec<Call> = events.iter().map(|e| Call::SendEvent(*e)).collect();
        expected.push(Call::Flush);
        assert_eq!(recorder.calls(), expected);
    }

    #[test]
    fn test_replay_empty_log_still_flushes() {
        let recorder = RecordingTarget::new();
        replay(&[], &mut recorder.clone()).unwrap();
        assert_eq!(recorder.calls(), vec![Call::Flush]);
    }

    #[test]
    fn test_replay_failure_reported() {
        let recorder = RecordingTarget::new();
        recorder.set_failing(true);

        let result = replay(
            &[RawEvent::press(24, ModifierMask::NONE)],
            &mut recorder.clone(),
        );
        assert!(result.is_err());
    }
}
