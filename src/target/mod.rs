//! Collaborator adapters: the target window, the clipboard, the external editor
//!
//! The interceptor only talks to the outside world through the three traits
//! below. Concrete adapters shell out to the usual X11 command-line tools;
//! `RecordingTarget` keeps everything in memory for dry runs and tests.

mod clipboard;
mod editor;
mod recording;
mod xdotool;

use std::path::Path;
use std::process::ExitStatus;

pub use clipboard::{ArboardClipboard, XclipClipboard};
pub use editor::CommandEditor;
pub use recording::{Call, RecordingTarget};
pub use xdotool::XdotoolTarget;

use crate::chord::RawEvent;
use crate::keymap::SyntheticKey;

/// Clipboard format Inkscape reads pasted SVG from
pub const INKSCAPE_SVG_TARGET: &str = "image/x-inkscape-svg";

/// Errors returned by collaborator adapters
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    /// The helper program could not be started
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The helper program ran but reported failure
    #[error("{program} exited with {status}")]
    Exit { program: String, status: ExitStatus },

    /// No keysym is known for a keycode, so it cannot be re-sent
    #[error("keycode {0} has no keysym in the active layout")]
    Unmapped(u8),

    /// The adapter cannot deliver this kind of event
    #[error("unsupported: {0}")]
    Unsupported(String),

    #[error("clipboard: {0}")]
    Clipboard(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Synthesizes input into the target application's window
pub trait TargetWindow {
    /// Press and release one key combination
    fn press(&mut self, key: SyntheticKey) -> Result<(), TargetError>;

    /// Re-send a captured raw event; delivery may be deferred until `flush`
    fn send_event(&mut self, event: &RawEvent, propagate: bool) -> Result<(), TargetError>;

    /// Deliver everything sent so far, in order
    fn flush(&mut self) -> Result<(), TargetError>;
}

/// System clipboard access
pub trait Clipboard {
    /// Place `payload` on the clipboard, advertised under the `target` format
    fn copy(&mut self, payload: &str, target: &str) -> Result<(), TargetError>;

    /// Current clipboard contents, requested in the `target` format
    fn read(&mut self, target: &str) -> Result<String, TargetError>;
}

/// Launches the external text editor
pub trait EditorLauncher {
    /// Open `path` and block until the editor exits
    fn open_editor(&mut self, path: &Path) -> Result<(), TargetError>;
}

/// The three adapters the interceptor drives
pub struct Backends {
    pub target: Box<dyn TargetWindow>,
    pub clipboard: Box<dyn Clipboard>,
    pub editor: Box<dyn EditorLauncher>,
}

impl Backends {
    /// Route every collaborator through one recording adapter
    pub fn recording(recorder: &RecordingTarget) -> Self {
        Self {
            target: Box::new(recorder.clone()),
            clipboard: Box::new(recorder.clone()),
            editor: Box::new(recorder.clone()),
        }
    }
}
