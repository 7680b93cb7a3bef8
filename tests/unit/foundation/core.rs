use super::*;

#[test]
fn premultiply_scales_color_by_alpha() {
    let c = Rgba8Premul::from_straight_rgba(255, 128, 0, 128);
    assert_eq!(c.a, 128);
    assert_eq!(c.r, 128);
    assert_eq!(c.g, 64);
    assert_eq!(c.b, 0);
}

#[test]
fn premultiply_opaque_is_identity() {
    let c = Rgba8Premul::from_straight_rgba(12, 34, 56, 255);
    assert_eq!(c.to_array(), [12, 34, 56, 255]);
}

#[test]
fn parse_size_accepts_wxh() {
    assert_eq!(parse_size("640x360"), Some(Size::new(640.0, 360.0)));
    assert_eq!(parse_size(" 32X32 "), Some(Size::new(32.0, 32.0)));
    assert_eq!(parse_size("0x10"), None);
    assert_eq!(parse_size("wide"), None);
}
