//! Chord → style rules
//!
//! Rule groups run in a fixed order and later groups overwrite earlier ones:
//! clean (`y`), fills (`1`–`6`), stroke colour (`q w e r t`), width
//! (`a s d`), dashes (`f g h`), arrows (`z x c v`).

use super::descriptor::StyleDescriptor;
use super::payload::MarkerDefinition;
use crate::chord::PressedSet;

/// Pixels per TikZ point
pub const PT: f64 = 1.327;
pub const BASE_WIDTH: f64 = 0.4 * PT;
pub const THICK_WIDTH: f64 = 0.8 * PT;
pub const VERY_THICK_WIDTH: f64 = 1.2 * PT;

/// Stroke colour used when no rule set one
pub const DEFAULT_STROKE: &str = "#000000";

/// Result of evaluating a chord
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedStyle {
    pub descriptor: StyleDescriptor,
    /// Present when either end of the path carries an arrow
    pub marker: Option<MarkerDefinition>,
}

fn none() -> Option<String> {
    Some("none".to_string())
}

fn fill(style: &mut StyleDescriptor, color: &str, opacity: f64) {
    style.fill = Some(color.to_string());
    style.fill_opacity = Some(opacity);
}

/// Build the style for a set of held keys
pub fn synthesize(keys: &PressedSet) -> SynthesizedStyle {
    let has = |c: char| keys.has_char(c);
    let mut style = StyleDescriptor::default();
    let mut width = BASE_WIDTH;

    if has('y') {
        style.fill = none();
        style.stroke = Some(DEFAULT_STROKE.to_string());
        style.stroke_width = Some(width);
        style.marker_end = none();
        style.marker_start = none();
        style.stroke_dasharray = none();
    }

    if has('1') {
        fill(&mut style, "#BBEEFF", 1.0);
    }
    if has('2') {
        fill(&mut style, "#FF80DF", 1.0);
    }
    if has('3') {
        fill(&mut style, "#000000", 1.0);
    }
    if has('4') {
        fill(&mut style, "#FFFFFF", 1.0);
        style.stroke = Some("#000000".to_string());
    }
    if has('5') {
        fill(&mut style, "#000000", 0.12);
    }
    if has('6') {
        fill(&mut style, "none", 1.0);
    }

    for (key, color) in [
        ('q', "#3DC6F3"),
        ('w', "#F034A3"),
        ('e', "#000000"),
        ('r', "#FFFFFF"),
    ] {
        if has(key) {
            style.stroke = Some(color.to_string());
        }
    }
    if has('t') {
        style.stroke = Some("#000000".to_string());
        style.stroke_opacity = 0.12;
    }

    if has('a') {
        width = THICK_WIDTH;
        style.stroke_width = Some(width);
    }
    if has('s') {
        width = VERY_THICK_WIDTH;
        style.stroke_width = Some(width);
    }
    if has('d') {
        style.stroke_width = Some(width);
    }

    if has('f') {
        style.stroke_dasharray = Some(format!("{},{}", width, 2.0 * PT));
    }
    if has('g') {
        style.stroke_dasharray = Some(format!("{},{}", 3.0 * PT, 3.0 * PT));
    }
    if has('h') {
        style.stroke_dasharray = none();
    }

    let arrow = MarkerDefinition::new(
        width,
        style.stroke.as_deref().unwrap_or(DEFAULT_STROKE),
        style.stroke_opacity,
    );
    let arrow_ref = Some(arrow.url());

    if has('z') {
        style.marker_start = arrow_ref.clone();
        style.marker_end = none();
    }
    if has('x') {
        style.marker_start = arrow_ref.clone();
        style.marker_end = arrow_ref.clone();
    }
    if has('c') {
        style.marker_start = none();
        style.marker_end = arrow_ref;
    }
    if has('v') {
        style.marker_start = none();
        style.marker_end = none();
    }

    let marker = style.has_marker().then_some(arrow);
    SynthesizedStyle {
        descriptor: style,
        marker,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::CanonicalKey;
    use crate::style::StyleValue;

    fn keys(chars: &str) -> PressedSet {
        chars.chars().map(CanonicalKey::char).collect()
    }

    #[test]
    fn test_clean_fill_stroke_thick() {
        let result = synthesize(&keys("y1qa"));
        let style = &result.descriptor;

        assert_eq!(style.fill.as_deref(), Some("#BBEEFF"));
        assert_eq!(style.fill_opacity, Some(1.0));
        assert_eq!(style.stroke.as_deref(), Some("#3DC6F3"));
        assert_eq!(style.stroke_width, Some(THICK_WIDTH));
        assert_eq!(style.marker_end.as_deref(), Some("none"));
        assert_eq!(style.marker_start.as_deref(), Some("none"));
        assert_eq!(style.stroke_dasharray.as_deref(), Some("none"));
        assert_eq!(style.stroke_opacity, 1.0);
        assert!(result.marker.is_none());
    }

    #[test]
    fn test_start_arrow_defaults() {
        let result = synthesize(&keys("z"));
        let style = &result.descriptor;

        assert_eq!(
            style.marker_start.as_deref(),
            Some("url(#marker-arrow-0.5308-#000000-1)")
        );
        assert_eq!(style.marker_end.as_deref(), Some("none"));
        assert_eq!(style.stroke, None);
        assert_eq!(style.stroke_width, None);

        let marker = result.marker.expect("arrow requested");
        assert_eq!(marker.width, BASE_WIDTH);
        assert_eq!(marker.color, "#000000");
    }

    #[test]
    fn test_later_groups_override_clean() {
        let style = synthesize(&keys("yc")).descriptor;
        assert_eq!(style.marker_start.as_deref(), Some("none"));
        assert_eq!(
            style.marker_end.as_deref(),
            Some("url(#marker-arrow-0.5308-#000000-1)")
        );
    }

    #[test]
    fn test_arrow_uses_final_width_and_color() {
        let result = synthesize(&keys("wsx"));
        let marker = result.marker.expect("arrow requested");

        assert_eq!(marker.width, VERY_THICK_WIDTH);
        assert_eq!(marker.color, "#F034A3");
        assert_eq!(
            result.descriptor.marker_start,
            result.descriptor.marker_end
        );
    }

    #[test]
    fn test_translucent_stroke_in_marker_id() {
        let result = synthesize(&keys("tc"));
        assert_eq!(
            result.descriptor.marker_end.as_deref(),
            Some("url(#marker-arrow-0.5308-#000000-0.12)")
        );
    }

    #[test]
    fn test_dashes() {
        assert_eq!(
            synthesize(&keys("af")).descriptor.stroke_dasharray.as_deref(),
            Some("1.0616,2.654")
        );
        assert_eq!(
            synthesize(&keys("gq")).descriptor.stroke_dasharray.as_deref(),
            Some("3.981,3.981")
        );
        assert_eq!(
            synthesize(&keys("gh")).descriptor.stroke_dasharray.as_deref(),
            Some("none")
        );
    }

    #[test]
    fn test_width_d_keeps_base() {
        let style = synthesize(&keys("dq")).descriptor;
        assert_eq!(style.get("stroke-width"), Some(StyleValue::Number(BASE_WIDTH)));
    }

    #[test]
    fn test_both_arrows_cancelled() {
        let result = synthesize(&keys("xv"));
        assert!(result.marker.is_none());
        assert_eq!(result.descriptor.marker_start.as_deref(), Some("none"));
    }

    #[test]
    fn test_modified_keys_do_not_match_rules() {
        let set: PressedSet = ["Shift+q", "Control+a"].into_iter().collect();
        assert_eq!(synthesize(&set).descriptor, StyleDescriptor::default());
    }
}
