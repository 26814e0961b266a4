//! Clipboard adapters
//!
//! `XclipClipboard` can advertise the payload under a specific format, which
//! Inkscape needs to treat pasted text as SVG. `ArboardClipboard` only
//! offers plain text and is the fallback when xclip is unavailable.

use std::io::Write;
use std::process::{Command, Stdio};

use super::{Clipboard, TargetError};

pub struct XclipClipboard {
    program: String,
}

impl XclipClipboard {
    pub fn new() -> Self {
        Self {
            program: "xclip".to_string(),
        }
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Whether the xclip binary can be started at all
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
    }

    fn copy_args(target: &str) -> [&str; 5] {
        ["-selection", "clipboard", "-target", target, "-i"]
    }

    fn read_args(target: &str) -> [&str; 5] {
        ["-selection", "clipboard", "-target", target, "-o"]
    }

    fn spawn_error(&self, source: std::io::Error) -> TargetError {
        TargetError::Spawn {
            program: self.program.clone(),
            source,
        }
    }
}

impl Default for XclipClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard for XclipClipboard {
    fn copy(&mut self, payload: &str, target: &str) -> Result<(), TargetError> {
        let mut child = Command::new(&self.program)
            .args(Self::copy_args(target))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(payload.as_bytes())?;
        }

        let status = child.wait()?;
        if !status.success() {
            return Err(TargetError::Exit {
                program: self.program.clone(),
                status,
            });
        }

        tracing::debug!(target, bytes = payload.len(), "copied to clipboard");
        Ok(())
    }

    fn read(&mut self, target: &str) -> Result<String, TargetError> {
        let output = Command::new(&self.program)
            .args(Self::read_args(target))
            .stderr(Stdio::null())
            .output()
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            return Err(TargetError::Exit {
                program: self.program.clone(),
                status: output.status,
            });
        }
        tracing::debug!(target, bytes = output.stdout.len(), "read clipboard");
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Plain-text clipboard through arboard
#[derive(Default)]
pub struct ArboardClipboard;

impl Clipboard for ArboardClipboard {
    fn copy(&mut self, payload: &str, target: &str) -> Result<(), TargetError> {
        tracing::debug!(target, "arboard clipboard ignores the target format");
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| TargetError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(payload)
            .map_err(|e| TargetError::Clipboard(e.to_string()))
    }

    fn read(&mut self, target: &str) -> Result<String, TargetError> {
        tracing::debug!(target, "arboard clipboard ignores the target format");
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| TargetError::Clipboard(e.to_string()))?;
        clipboard
            .get_text()
            .map_err(|e| TargetError::Clipboard(e.to_string()))
    }
}
