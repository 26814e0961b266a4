//! Key identity and the single-key action table
//!
//! This module turns raw hardware key events into canonical key names and
//! maps single canonical keys to actions:
//! - Resolves keycodes through the active keyboard layout (group 0 only)
//! - Prefixes Shift / Control in a fixed order
//! - Loads the single-key table from the embedded keymap.yaml plus user overrides
//!
//! # Architecture
//!
//! ```text
//! keycode + state → Resolver → CanonicalKey
//!                 → ActionTable::lookup() → Action → Vec<Effect>
//! ```
//!
//! # Loading the table
//!
//! ```ignore
//! // Hardcoded defaults
//! let table = ActionTable::with_bindings(default_bindings());
//!
//! // Embedded keymap.yaml merged with the user's file
//! let table = ActionTable::with_bindings(load_default_keymap(Some(&path)));
//! ```

mod action;
mod binding;
mod config;
mod defaults;
#[allow(clippy::module_inception)]
mod keymap;
mod layout;
mod resolver;
mod types;

pub use action::{Action, Effect};
pub use binding::Keybinding;
pub use config::{load_keymap_file, parse_key_string, parse_keymap_yaml, KeymapError};
pub use defaults::{default_bindings, get_default_keymap_yaml, load_default_keymap, merge_bindings};
pub use keymap::ActionTable;
pub use layout::{KeyboardLayout, Keysym};
pub use resolver::Resolver;
pub use types::{CanonicalKey, ModifierMask, SyntheticKey};
