//! SVG clipboard payload for pasting a style into Inkscape

use super::rules::SynthesizedStyle;

const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#;

/// Arrowhead marker referenced by `marker-start`/`marker-end`
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerDefinition {
    /// Stroke width the arrow is drawn for
    pub width: f64,
    pub color: String,
    pub opacity: f64,
}

impl MarkerDefinition {
    pub fn new(width: f64, color: &str, opacity: f64) -> Self {
        Self {
            width,
            color: color.to_string(),
            opacity,
        }
    }

    pub fn id(&self) -> String {
        format!("marker-arrow-{}-{}-{}", self.width, self.color, self.opacity)
    }

    /// `url(#id)` form used inside a style attribute
    pub fn url(&self) -> String {
        format!("url(#{})", self.id())
    }

    /// Scale applied to the arrow path so its visual size stays roughly
    /// constant across stroke widths
    pub fn scale(&self) -> f64 {
        (2.40 * self.width + 3.87) / (4.5 * self.width)
    }

    pub fn to_svg(&self) -> String {
        format!(
            r#"<defs id="marker-defs">
    <marker
        id="{id}"
        orient="auto-start-reverse"
        refY="0" refX="0"
        markerHeight="1.690" markerWidth="0.911"
    >
        <g transform="scale({scale})">
            <path
                d="M 1.99252,0 -1.19551,1.59401 0,0 -1.19551,-1.59401"
                style="fill:{color};fill-opacity:{opacity};fill-rule:nonzero;stroke:none;"
            />
        </g>
    </marker>
</defs>
"#,
            id = self.id(),
            scale = self.scale(),
            color = self.color,
            opacity = self.opacity,
        )
    }
}

/// Full clipboard document: optional marker definitions followed by an
/// `inkscape:clipboard` element carrying the style string
pub fn clipboard_payload(style: &SynthesizedStyle) -> String {
    let mut svg = format!("{}\n<svg>\n", XML_HEADER);
    if let Some(marker) = &style.marker {
        svg.push_str(&marker.to_svg());
    }
    svg.push_str(&format!(
        r#"<inkscape:clipboard style="{}" /></svg>"#,
        style.descriptor.to_style_string()
    ));
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{synthesize, BASE_WIDTH, THICK_WIDTH};

    #[test]
    fn test_marker_scale() {
        let marker = MarkerDefinition::new(BASE_WIDTH, "#000000", 1.0);
        assert!((marker.scale() - 2.153529264004019).abs() < 1e-12);

        let thick = MarkerDefinition::new(THICK_WIDTH, "#000000", 1.0);
        assert!(thick.scale() < marker.scale());
    }

    #[test]
    fn test_payload_without_marker() {
        let style = synthesize(&["y", "1"].into_iter().collect());
        let payload = clipboard_payload(&style);

        assert!(payload.starts_with("<?xml"));
        assert!(!payload.contains("<defs"));
        assert!(payload.ends_with(
            r#"<inkscape:clipboard style="fill: #BBEEFF;fill-opacity: 1;marker-end: none;marker-start: none;stroke: #000000;stroke-dasharray: none;stroke-opacity: 1;stroke-width: 0.5308" /></svg>"#
        ));
    }

    #[test]
    fn test_payload_with_marker() {
        let style = synthesize(&["x", "q"].into_iter().collect());
        let payload = clipboard_payload(&style);

        assert!(payload.contains(r#"id="marker-arrow-0.5308-#3DC6F3-1""#));
        assert!(payload.contains("fill:#3DC6F3;fill-opacity:1;"));
        assert!(payload.find("<defs").unwrap() < payload.find("<inkscape:clipboard").unwrap());
    }
}
