use super::*;
use crate::sim::host::ManualHost;

fn host() -> Rc<ManualHost> {
    Rc::new(ManualHost::new(Size::new(64.0, 48.0), 1.0).unwrap())
}

#[test]
fn lifecycle_idle_running_cancelled() {
    let host = host();
    let mut lp = FrameLoop::new(host.clone());
    assert_eq!(lp.state(), LoopState::Idle);
    assert!(!lp.take_frame());

    lp.observe();
    lp.start();
    assert_eq!(lp.state(), LoopState::Running);
    assert_eq!(host.pending_frames(), 1);

    assert!(lp.take_frame());
    assert_eq!(host.pending_frames(), 0);
    lp.schedule_next();
    lp.schedule_next();
    assert_eq!(host.pending_frames(), 1);

    lp.cancel();
    assert_eq!(lp.state(), LoopState::Cancelled);
    assert_eq!(host.pending_frames(), 0);
    assert_eq!(host.active_observers(), 0);

    lp.start();
    lp.observe();
    assert_eq!(host.pending_frames(), 0);
    assert_eq!(host.active_observers(), 0);
}

#[test]
fn drop_releases_host_resources() {
    let host = host();
    {
        let mut lp = FrameLoop::new(host.clone());
        lp.observe();
        lp.start();
        assert_eq!(host.active_observers(), 1);
    }
    assert_eq!(host.pending_frames(), 0);
    assert_eq!(host.active_observers(), 0);
}

#[test]
fn resize_is_delivered_through_the_observation() {
    let host = host();
    let mut lp = FrameLoop::new(host.clone());
    assert_eq!(lp.take_resize(), None);
    lp.observe();
    host.set_viewport(Size::new(100.0, 50.0)).unwrap();
    assert_eq!(lp.take_resize(), Some(Size::new(100.0, 50.0)));
}
