//! External editor launcher

use std::path::Path;
use std::process::Command;

use super::{EditorLauncher, TargetError};
use crate::config::EditorSettings;

/// Runs `<program> <args...> <file>` and waits for it to exit
pub struct CommandEditor {
    program: String,
    args: Vec<String>,
}

impl CommandEditor {
    pub fn new(settings: &EditorSettings) -> Self {
        Self {
            program: settings.program.clone(),
            args: settings.args.clone(),
        }
    }
}

impl EditorLauncher for CommandEditor {
    fn open_editor(&mut self, path: &Path) -> Result<(), TargetError> {
        tracing::info!("Opening {} in {}", path.display(), self.program);

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
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
}
