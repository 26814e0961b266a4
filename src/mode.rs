//! Editing modes and the persisted snippet store
//!
//! Snippets live under `<config_dir>/modes/<slot>/<key>.svg`, one file per
//! canonical key, holding whatever the target application put on the
//! clipboard when the snippet was saved.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::keymap::{CanonicalKey, ModifierMask, SyntheticKey};

/// The interceptor's current mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Chord classification (single-key actions and style chords)
    #[default]
    Normal,
    /// Single keys paste saved objects
    Object,
    /// Single keys paste saved styles
    StylePaint,
    /// Everything passes straight through until Escape is released
    Disabled,
}

impl Mode {
    /// Snippet slot consulted by this mode, if any
    pub fn slot(self) -> Option<ModeSlot> {
        match self {
            Mode::Object => Some(ModeSlot::Object),
            Mode::StylePaint => Some(ModeSlot::Style),
            Mode::Normal | Mode::Disabled => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Normal => "normal",
            Mode::Object => "object",
            Mode::StylePaint => "style",
            Mode::Disabled => "disabled",
        })
    }
}

/// Which snippet collection a save or paste refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeSlot {
    Object,
    Style,
}

impl ModeSlot {
    pub fn dir_name(self) -> &'static str {
        match self {
            ModeSlot::Object => "object",
            ModeSlot::Style => "style",
        }
    }

    /// Paste shortcut in the target: plain paste for objects, paste-style for styles
    pub fn paste_key(self) -> SyntheticKey {
        match self {
            ModeSlot::Object => SyntheticKey::new("v", ModifierMask::CONTROL),
            ModeSlot::Style => {
                SyntheticKey::new("v", ModifierMask::CONTROL | ModifierMask::SHIFT)
            }
        }
    }
}

/// Directory-backed snippet store
#[derive(Debug, Clone)]
pub struct ModeStore {
    root: PathBuf,
}

impl ModeStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File that holds the snippet for a key
    pub fn path_for(&self, slot: ModeSlot, key: &CanonicalKey) -> PathBuf {
        self.root
            .join(slot.dir_name())
            .join(format!("{}.svg", file_stem(key)))
    }

    /// Store a snippet, replacing any previous one for the key
    pub fn save(
        &self,
        slot: ModeSlot,
        key: &CanonicalKey,
        content: &str,
    ) -> std::io::Result<PathBuf> {
        let path = self.path_for(slot, key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        tracing::info!("Saved {} snippet for '{}' to {}", slot.dir_name(), key, path.display());
        Ok(path)
    }

    /// Load a snippet; a missing file is `Ok(None)`
    pub fn load(&self, slot: ModeSlot, key: &CanonicalKey) -> std::io::Result<Option<String>> {
        match fs::read_to_string(self.path_for(slot, key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// File stems of every saved snippet in a slot, sorted
    pub fn list(&self, slot: ModeSlot) -> Vec<String> {
        let Ok(entries) = fs::read_dir(self.root.join(slot.dir_name())) else {
            return Vec::new();
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "svg"))
            .filter_map(|path| path.file_stem()?.to_str().map(str::to_string))
            .collect();
        names.sort();
        names
    }
}

/// Turn a canonical key into a safe file stem
///
/// Alphanumerics and `+` pass through; anything else becomes `_xx` hex.
fn file_stem(key: &CanonicalKey) -> String {
    let mut stem = String::new();
    for c in key.as_str().chars() {
        if c.is_ascii_alphanumeric() || c == '+' {
            stem.push(c);
        } else {
            stem.push_str(&format!("_{:x}", c as u32));
        }
    }
    stem
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem_sanitizes() {
        assert_eq!(file_stem(&"Shift+a".into()), "Shift+a");
        assert_eq!(file_stem(&"/".into()), "_2f");
        assert_eq!(file_stem(&"?".into()), "_3f");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModeStore::new(dir.path());
        let key = CanonicalKey::from("1");

        assert_eq!(store.load(ModeSlot::Object, &key).unwrap(), None);

        store.save(ModeSlot::Object, &key, "<svg/>").unwrap();
        assert_eq!(
            store.load(ModeSlot::Object, &key).unwrap().as_deref(),
            Some("<svg/>")
        );
        // Slots are independent
        assert_eq!(store.load(ModeSlot::Style, &key).unwrap(), None);
    }

    #[test]
    fn test_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModeStore::new(dir.path());
        assert!(store.list(ModeSlot::Style).is_empty());

        store.save(ModeSlot::Style, &"b".into(), "x").unwrap();
        store.save(ModeSlot::Style, &"a".into(), "y").unwrap();
        assert_eq!(store.list(ModeSlot::Style), vec!["a", "b"]);
    }

    #[test]
    fn test_mode_slots() {
        assert_eq!(Mode::Object.slot(), Some(ModeSlot::Object));
        assert_eq!(Mode::StylePaint.slot(), Some(ModeSlot::Style));
        assert_eq!(Mode::Normal.slot(), None);
        assert_eq!(ModeSlot::Style.paste_key().to_string(), "ctrl+shift+v");
    }
}
