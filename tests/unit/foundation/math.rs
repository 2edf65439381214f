use super::*;

#[test]
fn clamp_pct_bounds_and_nan() {
    assert_eq!(clamp_pct(-1.0), 0.0);
    assert_eq!(clamp_pct(101.0), 100.0);
    assert_eq!(clamp_pct(42.5), 42.5);
    assert_eq!(clamp_pct(f64::NAN), 50.0);
}

#[test]
fn mul_div255_rounds() {
    assert_eq!(mul_div255_u16(255, 255), 255);
    assert_eq!(mul_div255_u16(128, 255), 128);
    assert_eq!(mul_div255_u16(0, 200), 0);
}

#[test]
fn unpremultiply_restores_straight_alpha() {
    let mut px = [64u8, 32, 0, 128];
    unpremultiply_rgba8(&mut px);
    assert_eq!(px, [128, 64, 0, 128]);

    let mut px = [9u8, 9, 9, 0];
    unpremultiply_rgba8(&mut px);
    assert_eq!(px, [0, 0, 0, 0]);
}
