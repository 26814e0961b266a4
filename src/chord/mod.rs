//! Chord capture, classification and replay
//!
//! ```text
//! RawEvent → ChordAccumulator (until any release) → Cycle
//!          → classify() → StyleChord | Single(Action) | Unrecognized → replay()
//! ```

mod accumulator;
mod classifier;
mod event;
mod replay;

pub use accumulator::{ChordAccumulator, Cycle, PressedSet};
pub use classifier::{classify, Classification};
pub use event::{EventKind, RawEvent};
pub use replay::replay;
