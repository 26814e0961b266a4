//! Target window adapter driven by `xdotool`
//!
//! Synthetic presses run one `xdotool key` each. Replayed events are queued
//! as chained `keydown`/`keyup` commands and delivered by a single xdotool
//! invocation on `flush`, which keeps them in order.

use std::process::Command;

use super::{TargetError, TargetWindow};
use crate::chord::{EventKind, RawEvent};
use crate::keymap::{KeyboardLayout, Keysym, SyntheticKey};

pub struct XdotoolTarget {
    program: String,
    window: String,
    layout: KeyboardLayout,
    pending: Vec<String>,
}

impl XdotoolTarget {
    pub fn new(window: impl Into<String>, layout: KeyboardLayout) -> Self {
        Self {
            program: "xdotool".to_string(),
            window: window.into(),
            layout,
            pending: Vec::new(),
        }
    }

    /// Use a different xdotool binary
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Queued arguments not yet flushed
    pub fn pending_args(&self) -> &[String] {
        &self.pending
    }

    fn run(&self, args: &[String]) -> Result<(), TargetError> {
        let status = Command::new(&self.program)
            .args(args)
            .status()
            .map_err(|source| TargetError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(TargetError::Exit {
                program: self.program.clone(),
                status,
            });
        }
        Ok(())
    }

    fn keysym_arg(keysym: Keysym) -> String {
        keysym.name().unwrap_or_else(|| keysym.to_string())
    }
}

impl TargetWindow for XdotoolTarget {
    fn press(&mut self, key: SyntheticKey) -> Result<(), TargetError> {
        tracing::debug!(key = %key, window = %self.window, "xdotool key");
        self.run(&[
            "key".to_string(),
            "--window".to_string(),
            self.window.clone(),
            key.to_string(),
        ])
    }

    /// `propagate` is implied: xdotool always delivers to the window's clients
    fn send_event(&mut self, event: &RawEvent, _propagate: bool) -> Result<(), TargetError> {
        let command = match event.kind {
            EventKind::Press => "keydown",
            EventKind::Release => "keyup",
            EventKind::Other => {
                return Err(TargetError::Unsupported(format!(
                    "cannot re-send non-key event (keycode {})",
                    event.keycode
                )))
            }
        };

        let keysym = self.layout.keysym(event.keycode);
        if keysym == Keysym::NO_SYMBOL {
            return Err(TargetError::Unmapped(event.keycode));
        }

        self.pending.extend([
            command.to_string(),
            "--window".to_string(),
            self.window.clone(),
            Self::keysym_arg(keysym),
        ]);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), TargetError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let args = std::mem::take(&mut self.pending);
        self.run(&args)
    }
}
