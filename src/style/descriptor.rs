//! Fixed-schema style record and its serialization

use std::fmt;

/// One style attribute value, rendered the way Inkscape reads it
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Text(text) => f.write_str(text),
            // Shortest round-trip form: 1.0 → "1", 0.12 → "0.12"
            StyleValue::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Style attributes a chord can set
///
/// `stroke_opacity` is always present; everything else only when some rule
/// touched it.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleDescriptor {
    pub fill: Option<String>,
    pub fill_opacity: Option<f64>,
    pub stroke: Option<String>,
    pub stroke_opacity: f64,
    pub stroke_width: Option<f64>,
    pub stroke_dasharray: Option<String>,
    pub marker_start: Option<String>,
    pub marker_end: Option<String>,
}

impl Default for StyleDescriptor {
    fn default() -> Self {
        Self {
            fill: None,
            fill_opacity: None,
            stroke: None,
            stroke_opacity: 1.0,
            stroke_width: None,
            stroke_dasharray: None,
            marker_start: None,
            marker_end: None,
        }
    }
}

impl StyleDescriptor {
    /// Set attributes as `(name, value)`, sorted by name
    pub fn attributes(&self) -> Vec<(&'static str, StyleValue)> {
        let text = |v: &Option<String>| v.clone().map(StyleValue::Text);
        let number = |v: Option<f64>| v.map(StyleValue::Number);

        let mut attrs: Vec<(&'static str, StyleValue)> = [
            ("fill", text(&self.fill)),
            ("fill-opacity", number(self.fill_opacity)),
            ("marker-end", text(&self.marker_end)),
            ("marker-start", text(&self.marker_start)),
            ("stroke", text(&self.stroke)),
            ("stroke-dasharray", text(&self.stroke_dasharray)),
            ("stroke-opacity", number(Some(self.stroke_opacity))),
            ("stroke-width", number(self.stroke_width)),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect();

        attrs.sort_by(|a, b| a.0.cmp(b.0));
        attrs
    }

    /// Look up a single attribute by its CSS name
    pub fn get(&self, name: &str) -> Option<StyleValue> {
        self.attributes()
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    /// `key: value` pairs joined by `;`, keys in lexicographic order
    pub fn to_style_string(&self) -> String {
        self.attributes()
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect::<Vec<_>>()
            .join(";")
    }

    /// Whether either end carries an arrow marker
    pub fn has_marker(&self) -> bool {
        let is_set = |m: &Option<String>| m.as_deref().is_some_and(|v| v != "none");
        is_set(&self.marker_start) || is_set(&self.marker_end)
    }
}
