use super::*;

#[test]
fn parses_common_hex_forms() {
    assert_eq!(parse_hex("#ff5252"), Some([255, 82, 82, 255]));
    assert_eq!(parse_hex("#fff"), Some([255, 255, 255, 255]));
    assert_eq!(parse_hex("  #00000080 "), Some([0, 0, 0, 128]));
}

#[test]
fn rejects_malformed_colours() {
    assert_eq!(parse_hex("ff5252"), None);
    assert_eq!(parse_hex("#ff52"), None);
    assert_eq!(parse_hex("#gggggg"), None);
    assert_eq!(parse_hex("#ééé"), None);
}

#[test]
fn fallback_and_opacity() {
    assert_eq!(color_or(Some("nope"), [1, 2, 3, 4]), [1, 2, 3, 4]);
    assert_eq!(color_or(None, [1, 2, 3, 4]), [1, 2, 3, 4]);
    assert_eq!(with_opacity([10, 20, 30, 255], 0.2), [10, 20, 30, 51]);
    assert_eq!(with_opacity([10, 20, 30, 255], f64::NAN), [10, 20, 30, 255]);
}
