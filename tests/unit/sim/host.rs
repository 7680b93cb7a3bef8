use super::*;

#[test]
fn rejects_unusable_environment() {
    let size = Size::new(100.0, 100.0);
    assert!(matches!(
        ManualHost::new(size, f64::NAN),
        Err(BackdropError::Environment(_))
    ));
    assert!(ManualHost::new(size, 0.0).is_err());
    assert!(ManualHost::new(Size::new(0.0, 10.0), 1.0).is_err());
    assert!(ManualHost::new(Size::new(f64::INFINITY, 10.0), 1.0).is_err());
    assert!(ManualHost::new(size, 1.0).is_ok());
}

#[test]
fn frames_fire_once() {
    let host = ManualHost::new(Size::new(10.0, 10.0), 1.0).unwrap();
    let a = host.request_frame();
    let b = host.request_frame();
    assert_eq!(host.pending_frames(), 2);
    assert!(host.take_frame(a));
    assert!(!host.take_frame(a));
    host.cancel_frame(b);
    assert!(!host.take_frame(b));
    assert_eq!(host.pending_frames(), 0);
    assert_eq!(host.frames_fired(), 1);
}

#[test]
fn resize_notifies_active_observers_only() {
    let host = ManualHost::new(Size::new(10.0, 10.0), 1.0).unwrap();
    let a = host.observe_resize();
    let b = host.observe_resize();
    host.disconnect(b);
    assert_eq!(host.active_observers(), 1);

    host.set_viewport(Size::new(20.0, 10.0)).unwrap();
    assert_eq!(host.take_resize(a), Some(Size::new(20.0, 10.0)));
    assert_eq!(host.take_resize(a), None);
    assert_eq!(host.take_resize(b), None);

    // Same size is not a change.
    host.set_viewport(Size::new(20.0, 10.0)).unwrap();
    assert_eq!(host.take_resize(a), None);
    assert!(host.set_viewport(Size::new(-1.0, 10.0)).is_err());
}
