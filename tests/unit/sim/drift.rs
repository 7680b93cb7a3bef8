use super::*;
use crate::sim::host::ManualHost;
use crate::sim::particle::CONNECTION_DISTANCE;
use crate::sim::surface::RecordingSurface;
use crate::theme::Color;

fn spec(density: f64, speed: f64) -> ParticleFieldSpec {
    ParticleFieldSpec::new(
        density,
        speed,
        [
            Color::rgb8(14, 165, 233),
            Color::rgb8(99, 102, 241),
            Color::rgb8(148, 163, 184),
        ],
    )
}

fn host(reduced: bool) -> Rc<ManualHost> {
    Rc::new(
        ManualHost::new(Size::new(320.0, 240.0), 3.0)
            .unwrap()
            .with_reduced_motion(reduced),
    )
}

fn mount(h: &Rc<ManualHost>, spec: ParticleFieldSpec) -> ParticleDrift<RecordingSurface> {
    ParticleDrift::mount(spec, h.clone(), RecordingSurface::new())
}

#[test]
fn mount_draws_and_schedules() {
    let h = host(false);
    let drift = mount(&h, spec(0.0, 50.0));
    assert_eq!(drift.particles().len(), 20);
    assert_eq!(drift.state(), LoopState::Running);
    assert_eq!(drift.backing().dpr, 2.0);
    assert_eq!((drift.backing().width, drift.backing().height), (640, 480));
    assert_eq!(drift.surface().frames_presented(), 1);
    assert_eq!(h.pending_frames(), 1);
    assert_eq!(h.active_observers(), 1);
}

#[test]
fn frames_advance_positions() {
    let h = host(false);
    let mut drift = mount(&h, spec(50.0, 100.0));
    let before: Vec<_> = drift.particles().iter().map(|p| p.pos).collect();
    for _ in 0..5 {
        assert!(drift.poll());
    }
    let after: Vec<_> = drift.particles().iter().map(|p| p.pos).collect();
    assert_ne!(before, after);
    assert_eq!(drift.frames(), 5);
    assert_eq!(drift.surface().frames_presented(), 6);
    assert_eq!(h.pending_frames(), 1);
}

#[test]
fn reduced_motion_freezes_after_one_draw() {
    let h = host(true);
    let mut drift = mount(&h, spec(100.0, 100.0));
    let before = drift.particles().to_vec();
    for _ in 0..5 {
        assert!(!drift.poll());
    }
    assert_eq!(drift.particles(), &before[..]);
    assert_eq!(drift.surface().frames_presented(), 1);
    assert_eq!(h.pending_frames(), 0);
    assert_eq!(drift.state(), LoopState::Idle);

    let frame = drift.surface().last_frame();
    assert!(frame.iter().any(|op| matches!(op, DrawOp::Link { .. })));
    let dots = frame.iter().filter(|op| matches!(op, DrawOp::Dot { .. })).count();
    assert_eq!(dots, 60);
}

#[test]
fn links_are_drawn_before_any_dot() {
    let h = host(false);
    let mut drift = mount(&h, spec(100.0, 50.0));
    drift.poll();
    let frame = drift.surface().last_frame();
    assert_eq!(frame[0], DrawOp::Clear);
    let last_link = frame
        .iter()
        .rposition(|op| matches!(op, DrawOp::Link { .. }))
        .expect("dense field has links");
    let first_dot = frame
        .iter()
        .position(|op| matches!(op, DrawOp::Glow { .. } | DrawOp::Dot { .. }))
        .expect("dots");
    assert!(last_link < first_dot);
    for op in frame {
        if let DrawOp::Link { from, to, alpha, .. } = *op {
            assert!(from.distance(to) < CONNECTION_DISTANCE);
            assert!(alpha > 0.0 && alpha <= 0.2);
        }
    }
}

#[test]
fn resize_keeps_population() {
    let h = host(false);
    let mut drift = mount(&h, spec(30.0, 0.0));
    let seeded = drift.particles().len();
    drift.poll();
    let positions: Vec<_> = drift.particles().iter().map(|p| p.pos).collect();

    h.set_viewport(Size::new(500.0, 100.0)).unwrap();
    drift.on_resize(Size::new(500.0, 100.0));
    assert_eq!(drift.particles().len(), seeded);
    let kept: Vec<_> = drift.particles().iter().map(|p| p.pos).collect();
    assert_eq!(positions, kept);
    assert_eq!(drift.backing().css, Size::new(500.0, 100.0));
    assert_eq!(drift.surface().resize_count(), 2);
}

#[test]
fn poll_services_resize() {
    let h = host(true);
    let mut drift = mount(&h, spec(30.0, 0.0));
    h.set_viewport(Size::new(100.0, 80.0)).unwrap();
    assert!(!drift.poll());
    assert_eq!(drift.backing().css, Size::new(100.0, 80.0));
    // The frozen frame is repainted at the new size.
    assert_eq!(drift.surface().frames_presented(), 2);
}

#[test]
fn density_or_speed_reseeds_but_colors_do_not() {
    let h = host(false);
    let first = spec(0.0, 50.0);
    let mut drift = mount(&h, first);
    drift.poll();

    let recolored = ParticleFieldSpec {
        colors: [Color::BLACK; 3],
        ..first
    };
    assert!(!drift.apply_spec(recolored));
    assert_ne!(drift.particles()[0].color, Color::BLACK);
    assert_eq!(drift.frames(), 1);

    assert!(drift.apply_spec(spec(100.0, 50.0)));
    assert_eq!(drift.particles().len(), 60);
    assert_eq!(drift.state(), LoopState::Running);
    assert_eq!(h.pending_frames(), 1);
    assert_eq!(h.active_observers(), 1);
}

#[test]
fn density_change_reseeds_even_with_the_same_count() {
    let h = host(false);
    let mut drift = mount(&h, spec(55.0, 50.0));
    for _ in 0..10 {
        assert!(drift.poll());
    }
    let moved = drift.particles().to_vec();

    let next = spec(56.0, 50.0);
    assert_eq!(next.count, drift.particles().len());
    assert!(drift.apply_spec(next));
    assert_ne!(drift.particles(), &moved[..]);
    assert_eq!(drift.spec().density, 56.0);
    assert_eq!(h.pending_frames(), 1);
}

#[test]
fn teardown_leaves_nothing_scheduled() {
    let h = host(false);
    let mut drift = mount(&h, spec(50.0, 50.0));
    drift.poll();
    drift.unmount();
    assert_eq!(h.pending_frames(), 0);
    assert_eq!(h.active_observers(), 0);

    let drift = mount(&h, spec(50.0, 50.0));
    drop(drift);
    assert_eq!(h.pending_frames(), 0);
    assert_eq!(h.active_observers(), 0);
}
