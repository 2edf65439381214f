/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` into straight-alpha RGBA8.
pub fn parse_hex(s: &str) -> Option<[u8; 4]> {
    let hex = s.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let nib = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    match hex.len() {
        3 => Some([nib(0)?, nib(1)?, nib(2)?, 255]),
        6 => Some([byte(0)?, byte(2)?, byte(4)?, 255]),
        8 => Some([byte(0)?, byte(2)?, byte(4)?, byte(6)?]),
        _ => None,
    }
}

/// Parse an optional colour, falling back to `default` when absent or malformed.
pub fn color_or(s: Option<&str>, default: [u8; 4]) -> [u8; 4] {
    s.and_then(parse_hex).unwrap_or(default)
}

/// Scale the alpha channel by `opacity` in `[0, 1]`.
pub fn with_opacity(c: [u8; 4], opacity: f64) -> [u8; 4] {
    let o = if opacity.is_finite() { opacity.clamp(0.0, 1.0) } else { 1.0 };
    [c[0], c[1], c[2], (f64::from(c[3]) * o).round() as u8]
}

#[cfg(test)]
#[path = "../../tests/unit/render/color.rs"]
mod tests;
