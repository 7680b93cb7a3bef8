use super::*;

fn spec(count: usize, speed_factor: f64) -> ParticleFieldSpec {
    ParticleFieldSpec {
        density: 50.0,
        speed: 50.0,
        count,
        speed_factor,
        colors: [
            Color::rgb8(255, 0, 0),
            Color::rgb8(0, 255, 0),
            Color::rgb8(0, 0, 255),
        ],
        seed: 7,
    }
}

#[test]
fn seeding_is_deterministic_and_in_bounds() {
    let bounds = Size::new(300.0, 200.0);
    let a = seed_particles(&spec(40, 0.45), bounds);
    let b = seed_particles(&spec(40, 0.45), bounds);
    assert_eq!(a, b);
    assert_eq!(a.len(), 40);
    for p in &a {
        assert!((0.0..300.0).contains(&p.pos.x));
        assert!((0.0..200.0).contains(&p.pos.y));
        assert!(p.vel.x.abs() <= 0.45 / 2.0 && p.vel.y.abs() <= 0.45 / 2.0);
        assert!((1.0..3.0).contains(&p.radius));
        assert!((0.25..0.70).contains(&p.opacity));
        assert!(spec(1, 0.0).colors.contains(&p.color));
    }
}

#[test]
fn wrap_crosses_to_opposite_edge_with_margin() {
    assert_eq!(wrap(-10.5, 100.0), 110.0);
    assert_eq!(wrap(110.5, 100.0), -10.0);
    assert_eq!(wrap(-10.0, 100.0), -10.0);
    assert_eq!(wrap(50.0, 100.0), 50.0);
}

#[test]
fn advance_never_leaves_the_margin_band() {
    let bounds = Size::new(50.0, 50.0);
    let mut particles = seed_particles(&spec(20, 0.75), bounds);
    let mut time = 0.0;
    for _ in 0..2_000 {
        time += TIME_STEP;
        for p in &mut particles {
            p.advance(time, bounds);
            assert!(p.pos.x >= -WRAP_MARGIN && p.pos.x <= bounds.width + WRAP_MARGIN);
            assert!(p.pos.y >= -WRAP_MARGIN && p.pos.y <= bounds.height + WRAP_MARGIN);
        }
    }
}

#[test]
fn link_opacity_falls_off_linearly() {
    assert_eq!(link_opacity(0.0), Some(LINK_OPACITY));
    assert!((link_opacity(70.0).unwrap() - 0.1).abs() < 1e-12);
    assert_eq!(link_opacity(CONNECTION_DISTANCE), None);
    assert_eq!(link_opacity(500.0), None);
}
