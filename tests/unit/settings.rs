use super::*;

#[test]
fn defaults_match_documented_values() {
    let s = BackgroundSettings::default();
    assert_eq!(s.intensity, 65.0);
    assert_eq!(s.speed, 50.0);
    assert_eq!(s.density, 55.0);
    assert_eq!(s.blur, 0.0);
}

#[test]
fn missing_and_null_fields_fall_back_individually() {
    let s: BackgroundSettings =
        serde_json::from_str(r#"{"intensity": 10, "speed": null}"#).unwrap();
    let s = s.sanitized();
    assert_eq!(s.intensity, 10.0);
    assert_eq!(s.speed, 50.0);
    assert_eq!(s.density, 55.0);
    assert_eq!(s.blur, 0.0);
}

#[test]
fn sanitized_clamps_out_of_range() {
    let s = BackgroundSettings {
        intensity: 140.0,
        speed: -5.0,
        density: f64::NAN,
        blur: 45.0,
    }
    .sanitized();
    assert_eq!(s.intensity, 100.0);
    assert_eq!(s.speed, 0.0);
    assert_eq!(s.density, 55.0);
    assert_eq!(s.blur, BLUR_MAX);
}

#[test]
fn duration_range_is_inverse_linear() {
    let r = DurationRange::new(20.0, 5.0);
    assert_eq!(r.at(0.0), 20.0);
    assert_eq!(r.at(1.0), 5.0);
    assert_eq!(r.at(0.5), 12.5);
    assert_eq!(r.at(2.0), 5.0);
    assert!(r.contains(5.0) && r.contains(20.0) && !r.contains(21.0));
}

#[test]
fn counts_round_and_floor() {
    let s = BackgroundSettings {
        density: 55.0,
        ..BackgroundSettings::DEFAULT
    };
    // 0.55 * 40 = 22
    assert_eq!(s.count_round(20, 40), 42);
    // 0.55 * 3 = 1.65
    assert_eq!(s.count_round(3, 3), 5);
    assert_eq!(s.count_floor(3, 3), 4);
}

#[test]
fn only_speed_and_density_feed_generators() {
    let a = BackgroundSettings::DEFAULT;
    let b = BackgroundSettings {
        intensity: 10.0,
        blur: 8.0,
        ..a
    };
    assert!(!a.generator_inputs_differ(&b));
    let c = BackgroundSettings { density: 90.0, ..a };
    assert!(a.generator_inputs_differ(&c));
}
