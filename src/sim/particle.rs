use std::f64::consts::TAU;

use kurbo::{Point, Size, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::generators::ParticleFieldSpec;
use crate::theme::Color;

/// Pairs closer than this many CSS pixels are linked.
pub const CONNECTION_DISTANCE: f64 = 140.0;
/// Link opacity at zero distance.
pub const LINK_OPACITY: f64 = 0.2;
/// Link line width in CSS pixels.
pub const LINK_WIDTH: f64 = 0.6;
/// Distance past an edge at which a particle wraps to the opposite side.
pub const WRAP_MARGIN: f64 = 10.0;
/// Peak per-frame wobble displacement.
pub const WOBBLE: f64 = 0.15;
/// Simulation clock advance per frame.
pub const TIME_STEP: f64 = 0.005;
/// Glow halo radius as a multiple of the core radius.
pub const GLOW_SCALE: f64 = 4.0;
/// Glow alpha as a fraction of the core opacity.
pub const GLOW_ALPHA: f64 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Position in CSS pixels.
    pub pos: Point,
    /// Velocity in CSS pixels per frame.
    pub vel: Vec2,
    pub radius: f64,
    pub color: Color,
    pub opacity: f64,
    /// Phase offset of the sine wobble.
    pub phase: f64,
}

impl Particle {
    /// One frame of drift plus wobble, then wrap.
    pub fn advance(&mut self, time: f64, bounds: Size) {
        let wobble = Vec2::new(
            (time * 2.0 + self.phase).sin() * WOBBLE,
            (time * 1.5 + self.phase).cos() * WOBBLE,
        );
        self.pos += self.vel + wobble;
        self.pos.x = wrap(self.pos.x, bounds.width);
        self.pos.y = wrap(self.pos.y, bounds.height);
    }
}

/// Wrap `v` across `[-WRAP_MARGIN, extent + WRAP_MARGIN]`.
pub fn wrap(v: f64, extent: f64) -> f64 {
    if v < -WRAP_MARGIN {
        extent + WRAP_MARGIN
    } else if v > extent + WRAP_MARGIN {
        -WRAP_MARGIN
    } else {
        v
    }
}

/// Opacity of the link between two particles `dist` apart, or `None` when they are too far.
pub fn link_opacity(dist: f64) -> Option<f64> {
    (dist < CONNECTION_DISTANCE).then(|| (1.0 - dist / CONNECTION_DISTANCE) * LINK_OPACITY)
}

/// Fresh population for `spec` scattered over `bounds`.
pub fn seed_particles(spec: &ParticleFieldSpec, bounds: Size) -> Vec<Particle> {
    let mut rng = StdRng::seed_from_u64(spec.seed);
    (0..spec.count)
        .map(|_| {
            let pos = Point::new(
                rng.gen_range(0.0..1.0) * bounds.width,
                rng.gen_range(0.0..1.0) * bounds.height,
            );
            let vel = Vec2::new(
                (rng.gen_range(0.0..1.0) - 0.5) * spec.speed_factor,
                (rng.gen_range(0.0..1.0) - 0.5) * spec.speed_factor,
            );
            let color = spec.colors[rng.gen_range(0..spec.colors.len())];
            Particle {
                pos,
                vel,
                radius: 1.0 + rng.gen_range(0.0..2.0),
                color,
                opacity: 0.25 + rng.gen_range(0.0..0.45),
                phase: rng.gen_range(0.0..TAU),
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/sim/particle.rs"]
mod tests;
