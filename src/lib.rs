//! inkchord - chord-driven keyboard shortcuts for Inkscape
//!
//! Raw key events destined for an Inkscape window are buffered until a key
//! is released. The set of keys held at that point decides what happens:
//! a single bound key runs an editor command, several keys paste a computed
//! style, and anything unrecognized is replayed so Inkscape sees the
//! original input.

pub mod chord;
pub mod cli;
pub mod config;
pub mod config_paths;
pub mod interceptor;
pub mod keymap;
pub mod math;
pub mod mode;
pub mod source;
pub mod style;
pub mod target;
pub mod tracing;

// Re-export commonly used types
pub use config::Settings;
pub use interceptor::{Interceptor, Outcome};
pub use mode::Mode;
