use super::*;

#[test]
fn fnv1a64_known_vector() {
    let mut h = Fnv1a64::new_default();
    h.write_bytes(b"a");
    assert_eq!(h.finish(), 0xaf63_dc4c_8601_ec8c);
}

#[test]
fn fnv1a64_str_boundaries_matter() {
    let mut a = Fnv1a64::new_default();
    a.write_str("ab");
    a.write_str("c");
    let mut b = Fnv1a64::new_default();
    b.write_str("a");
    b.write_str("bc");
    assert_ne!(a.finish(), b.finish());
}

#[test]
fn mul_div255_rounds() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(255, 0), 0);
    assert_eq!(mul_div255_u8(128, 255), 128);
    assert_eq!(mul_div255_u8(255, 128), 128);
}

#[test]
fn finite_clamp_replaces_nan() {
    assert_eq!(finite_clamp(f64::NAN, 0.0, 100.0, 50.0), 50.0);
    assert_eq!(finite_clamp(f64::INFINITY, 0.0, 100.0, 50.0), 50.0);
    assert_eq!(finite_clamp(150.0, 0.0, 100.0, 50.0), 100.0);
    assert_eq!(finite_clamp(-3.0, 0.0, 100.0, 50.0), 0.0);
}
