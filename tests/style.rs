//! Style synthesizer tests through the public API

use inkchord::chord::PressedSet;
use inkchord::keymap::CanonicalKey;
use inkchord::style::{
    clipboard_payload, synthesize, StyleValue, BASE_WIDTH, THICK_WIDTH, VERY_THICK_WIDTH,
};

fn keys(chars: &str) -> PressedSet {
    chars.chars().map(CanonicalKey::char).collect()
}

#[test]
fn test_width_constants() {
    assert_eq!(BASE_WIDTH.to_string(), "0.5308");
    assert_eq!(THICK_WIDTH.to_string(), "1.0616");
    assert_eq!(VERY_THICK_WIDTH.to_string(), "1.5923999999999998");
}

#[test]
fn test_clean_baseline_example() {
    let style = synthesize(&keys("y1qa")).descriptor;

    assert_eq!(style.get("fill"), Some(StyleValue::Text("#BBEEFF".into())));
    assert_eq!(style.get("fill-opacity"), Some(StyleValue::Number(1.0)));
    assert_eq!(style.get("stroke"), Some(StyleValue::Text("#3DC6F3".into())));
    assert_eq!(style.get("stroke-width"), Some(StyleValue::Number(THICK_WIDTH)));
    assert_eq!(style.get("marker-end"), Some(StyleValue::Text("none".into())));
    assert_eq!(style.get("marker-start"), Some(StyleValue::Text("none".into())));
    assert_eq!(
        style.get("stroke-dasharray"),
        Some(StyleValue::Text("none".into()))
    );
    assert_eq!(style.get("stroke-opacity"), Some(StyleValue::Number(1.0)));
}

#[test]
fn test_lone_start_arrow_example() {
    let result = synthesize(&keys("z"));

    assert_eq!(
        result.descriptor.to_style_string(),
        "marker-end: none;marker-start: url(#marker-arrow-0.5308-#000000-1);stroke-opacity: 1"
    );
    let marker = result.marker.unwrap();
    assert_eq!(marker.id(), "marker-arrow-0.5308-#000000-1");
}

#[test]
fn test_payload_is_deterministic() {
    let chords = ["y1qa", "zws", "5tgx", "4rdfc", "123456qwerty"];
    for chord in chords {
        let first = clipboard_payload(&synthesize(&keys(chord)));
        let second = clipboard_payload(&synthesize(&keys(chord)));
        assert_eq!(first, second, "chord {}", chord);

        let reversed: String = chord.chars().rev().collect();
        assert_eq!(first, clipboard_payload(&synthesize(&keys(&reversed))));
    }
}

#[test]
fn test_style_string_always_sorted() {
    for chord in ["y", "6hv", "tqe", "34sgz", "yaxc"] {
        let style = synthesize(&keys(chord)).descriptor;
        let names: Vec<&str> = style.attributes().into_iter().map(|(n, _)| n).collect();

        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted, "chord {}", chord);

        let serialized = style.to_style_string();
        let serialized_names: Vec<&str> = serialized
            .split(';')
            .filter_map(|pair| pair.split(": ").next())
            .collect();
        assert_eq!(serialized_names, names);
    }
}

#[test]
fn test_unrelated_keys_leave_defaults() {
    let result = synthesize(&keys("jklm"));
    assert_eq!(result.descriptor.to_style_string(), "stroke-opacity: 1");
    assert!(result.marker.is_none());
}

#[test]
fn test_marker_definition_in_payload() {
    let payload = clipboard_payload(&synthesize(&keys("ex")));

    assert!(payload.contains(r#"<defs id="marker-defs">"#));
    assert!(payload.contains(r#"orient="auto-start-reverse""#));
    assert!(payload.contains(r#"markerHeight="1.690" markerWidth="0.911""#));
    assert!(payload.contains("scale(2.153529264004019)"));
}
