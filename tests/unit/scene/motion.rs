use super::*;

#[test]
fn ease_endpoints_are_stable() {
    for ease in [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::InOutSine,
    ] {
        assert!(ease.apply(0.0).abs() < 1e-12);
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-12);
        let (a, b, c) = (ease.apply(0.25), ease.apply(0.5), ease.apply(0.75));
        assert!(a < b && b < c, "{ease:?}");
    }
}

#[test]
fn alternate_motion_ping_pongs() {
    let m = Motion::pulse(0.0, 1.0, 2.0).ease(Ease::Linear);
    assert_eq!(m.progress(0.0), Some(0.0));
    assert_eq!(m.progress(1.0), Some(0.5));
    assert_eq!(m.progress(3.0), Some(0.5));
    // second cycle runs backwards: 2.5s is 1/4 into it
    assert_eq!(m.progress(2.5), Some(0.75));
}

#[test]
fn normal_motion_restarts_each_cycle() {
    let m = Motion::spin(Point::ZERO, 4.0);
    assert_eq!(m.progress(1.0), Some(0.25));
    assert_eq!(m.progress(5.0), Some(0.25));
}

#[test]
fn negative_delay_starts_mid_cycle() {
    let m = Motion::scroll(Vec2::new(10.0, 0.0), 4.0).delay(-1.0);
    assert_eq!(m.progress(0.0), Some(0.25));
}

#[test]
fn positive_delay_holds_start_state() {
    let m = Motion::pulse(0.2, 1.0, 2.0).delay(3.0);
    assert_eq!(m.progress(1.0), None);
    assert_eq!(m.sample(1.0), MotionSample::Opacity(0.2));
    assert_eq!(m.progress(3.0), Some(0.0));
}

#[test]
fn scale_pivots_around_origin() {
    let m = Motion::breathe(1.0, 2.0, Point::new(10.0, 10.0), 1.0).ease(Ease::Linear);
    let MotionSample::Transform(a) = m.sample(1.0) else {
        panic!("scale samples a transform");
    };
    // the pivot stays put
    let p = a * Point::new(10.0, 10.0);
    assert!((p.x - 10.0).abs() < 1e-9 && (p.y - 10.0).abs() < 1e-9);
    let q = a * Point::new(11.0, 10.0);
    assert!((q.x - 12.0).abs() < 1e-9);
}
