use crate::foundation::math::Fnv1a64;
use crate::generators::{Generator, RenderCtx, VisualOutput};
use crate::registry::PresetId;
use crate::theme::Color;

pub const MIN_PARTICLES: usize = 20;
pub const MAX_PARTICLES: usize = 60;

/// Setup-time constants of the particle simulation.
///
/// Everything here is sampled once when the simulation mounts; a change in `density` or
/// `speed` reseeds the population, even when the derived count stays the same.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleFieldSpec {
    /// Sanitized density knob the population was derived from.
    pub density: f64,
    /// Sanitized speed knob the velocities were derived from.
    pub speed: f64,
    pub count: usize,
    pub speed_factor: f64,
    /// Theme colors particles pick from: primary, border, muted.
    pub colors: [Color; 3],
    pub seed: u64,
}

impl ParticleFieldSpec {
    pub fn new(density: f64, speed: f64, colors: [Color; 3]) -> Self {
        let count = particle_count(density);
        let speed_factor = speed_factor(speed);
        let mut h = Fnv1a64::new_default();
        h.write_str(PresetId::ParticleDrift.as_str());
        h.write_u64(density.to_bits());
        h.write_u64(speed.to_bits());

        Self {
            density,
            speed,
            count,
            speed_factor,
            colors,
            seed: h.finish(),
        }
    }

    /// Whether moving from `self` to `next` requires regenerating the population.
    pub fn needs_reseed(&self, next: &Self) -> bool {
        self.density != next.density || self.speed != next.speed
    }
}

/// `20 + round(density / 100 * 40)`.
pub fn particle_count(density: f64) -> usize {
    let d = density.clamp(0.0, 100.0) / 100.0;
    MIN_PARTICLES + (d * (MAX_PARTICLES - MIN_PARTICLES) as f64).round() as usize
}

/// `0.15 + speed / 100 * 0.6` pixels per frame.
pub fn speed_factor(speed: f64) -> f64 {
    0.15 + speed.clamp(0.0, 100.0) / 100.0 * 0.6
}

pub struct ParticleDriftGenerator;

impl Generator for ParticleDriftGenerator {
    fn preset(&self) -> PresetId {
        PresetId::ParticleDrift
    }

    fn render(&self, ctx: &mut RenderCtx<'_>) -> VisualOutput {
        let p = ctx.palette;
        VisualOutput::Canvas(ParticleFieldSpec::new(
            ctx.settings.density,
            ctx.settings.speed,
            [p.primary, p.border, p.muted],
        ))
    }
}
