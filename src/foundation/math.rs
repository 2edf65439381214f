/// Clamp a percent coordinate into `[0, 100]`; non-finite input lands on the centre line.
pub(crate) fn clamp_pct(v: f64) -> f64 {
    if v.is_finite() { v.clamp(0.0, 100.0) } else { 50.0 }
}

pub(crate) fn lerp(a: f64, b: f64, f: f64) -> f64 {
    a + (b - a) * f
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

/// Reverse premultiplication of one RGBA8 pixel in place.
pub(crate) fn unpremultiply_rgba8(px: &mut [u8]) {
    let a = u32::from(px[3]);
    if a == 0 {
        px[0] = 0;
        px[1] = 0;
        px[2] = 0;
        return;
    }
    if a == 255 {
        return;
    }
    for c in &mut px[..3] {
        *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
