//! Style synthesizer: a multi-key chord becomes an Inkscape style
//!
//! [`synthesize`] is pure. [`clipboard_payload`] serializes the result into
//! the SVG snippet Inkscape accepts for "paste style" (ctrl+shift+v).

mod descriptor;
mod payload;
mod rules;

pub use descriptor::{StyleDescriptor, StyleValue};
pub use payload::{clipboard_payload, MarkerDefinition};
pub use rules::{
    synthesize, SynthesizedStyle, BASE_WIDTH, DEFAULT_STROKE, PT, THICK_WIDTH, VERY_THICK_WIDTH,
};
