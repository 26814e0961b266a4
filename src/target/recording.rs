//! In-memory adapter that records every collaborator call
//!
//! Used by `--dry-run` (each call is also logged) and by tests, which keep
//! a clone to inspect what the interceptor did.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::{Clipboard, EditorLauncher, TargetError, TargetWindow};
use crate::chord::RawEvent;
use crate::keymap::SyntheticKey;

/// One recorded collaborator call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Press(SyntheticKey),
    SendEvent(RawEvent),
    Flush,
    Copy { payload: String, target: String },
    Read { target: String },
    OpenEditor(PathBuf),
}

#[derive(Debug, Default)]
struct Inner {
    calls: Vec<Call>,
    clipboard: String,
    editor_output: Option<String>,
    failing: bool,
    log_calls: bool,
}

/// Shared-handle recorder; clones see the same log
#[derive(Debug, Clone, Default)]
pub struct RecordingTarget {
    inner: Rc<RefCell<Inner>>,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorder that also logs each call at info level
    pub fn dry_run() -> Self {
        let recorder = Self::default();
        recorder.inner.borrow_mut().log_calls = true;
        recorder
    }

    /// Snapshot of all calls so far
    pub fn calls(&self) -> Vec<Call> {
        self.inner.borrow().calls.clone()
    }

    /// Drain the call log
    pub fn take_calls(&self) -> Vec<Call> {
        std::mem::take(&mut self.inner.borrow_mut().calls)
    }

    /// Make every subsequent call fail (after being recorded)
    pub fn set_failing(&self, failing: bool) {
        self.inner.borrow_mut().failing = failing;
    }

    /// Preload the clipboard, as if the target had copied something
    pub fn set_clipboard(&self, text: &str) {
        self.inner.borrow_mut().clipboard = text.to_string();
    }

    pub fn clipboard(&self) -> String {
        self.inner.borrow().clipboard.clone()
    }

    /// Text "typed" into the file whenever the editor is opened
    pub fn set_editor_output(&self, text: &str) {
        self.inner.borrow_mut().editor_output = Some(text.to_string());
    }

    fn record(&self, call: Call) -> Result<(), TargetError> {
        let mut inner = self.inner.borrow_mut();
        if inner.log_calls {
            tracing::info!("dry-run: {:?}", call);
        }
        inner.calls.push(call);
        if inner.failing {
            return Err(TargetError::Io(std::io::Error::other(
                "recording target set to fail",
            )));
        }
        Ok(())
    }
}

impl TargetWindow for RecordingTarget {
    fn press(&mut self, key: SyntheticKey) -> Result<(), TargetError> {
        self.record(Call::Press(key))
    }

    fn send_event(&mut self, event: &RawEvent, _propagate: bool) -> Result<(), TargetError> {
        self.record(Call::SendEvent(*event))
    }

    fn flush(&mut self) -> Result<(), TargetError> {
        self.record(Call::Flush)
    }
}

impl Clipboard for RecordingTarget {
    fn copy(&mut self, payload: &str, target: &str) -> Result<(), TargetError> {
        self.record(Call::Copy {
            payload: payload.to_string(),
            target: target.to_string(),
        })?;
        self.inner.borrow_mut().clipboard = payload.to_string();
        Ok(())
    }

    fn read(&mut self, target: &str) -> Result<String, TargetError> {
        self.record(Call::Read {
            target: target.to_string(),
        })?;
        Ok(self.clipboard())
    }
}

impl EditorLauncher for RecordingTarget {
    fn open_editor(&mut self, path: &Path) -> Result<(), TargetError> {
        self.record(Call::OpenEditor(path.to_path_buf()))?;
        let output = self.inner.borrow().editor_output.clone();
        if let Some(text) = output {
            std::fs::write(path, text)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::ModifierMask;

    #[test]
    fn test_clones_share_log() {
        let recorder = RecordingTarget::new();
        let mut handle = recorder.clone();

        handle.press(SyntheticKey::key("Return")).unwrap();
        assert_eq!(
            recorder.calls(),
            vec![Call::Press(SyntheticKey::key("Return"))]
        );
    }

    #[test]
    fn test_copy_then_read() {
        let mut recorder = RecordingTarget::new();
        recorder.copy("<svg/>", "image/x-inkscape-svg").unwrap();

        assert_eq!(recorder.read("image/x-inkscape-svg").unwrap(), "<svg/>");
    }

    #[test]
    fn test_failing_still_records() {
        let mut recorder = RecordingTarget::new();
        recorder.set_failing(true);

        let event = RawEvent::press(24, ModifierMask::NONE);
        assert!(recorder.send_event(&event, true).is_err());
        assert_eq!(recorder.take_calls(), vec![Call::SendEvent(event)]);
        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn test_editor_output_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("math.tex");
        let mut recorder = RecordingTarget::new();
        recorder.set_editor_output("x^2");

        recorder.open_editor(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "x^2");
    }
}
