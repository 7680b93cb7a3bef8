use std::rc::Rc;

use kurbo::Size;

use crate::generators::ParticleFieldSpec;
use crate::sim::frame_loop::{FrameLoop, LoopState};
use crate::sim::host::FrameHost;
use crate::sim::particle::{
    GLOW_ALPHA, GLOW_SCALE, LINK_WIDTH, Particle, TIME_STEP, link_opacity, seed_particles,
};
use crate::sim::surface::{Backing, DrawOp, PixmapSurface, Surface};

/// A mounted particle canvas.
///
/// Owns its population, its drawing surface and its redraw loop. Everything the host
/// scheduled for it is released when it is dropped.
#[derive(Debug)]
pub struct ParticleDrift<S: Surface = PixmapSurface> {
    spec: ParticleFieldSpec,
    particles: Vec<Particle>,
    surface: S,
    backing: Backing,
    frame_loop: FrameLoop,
    reduced_motion: bool,
    time: f64,
    frames: u64,
}

impl<S: Surface> ParticleDrift<S> {
    /// Measure the container, seed the population, draw the first frame and start the loop.
    ///
    /// With reduced motion the first frame is the only one; no redraw loop is scheduled,
    /// though resizes are still observed.
    pub fn mount(spec: ParticleFieldSpec, host: Rc<dyn FrameHost>, mut surface: S) -> Self {
        let backing = Backing::new(host.viewport(), host.device_pixel_ratio());
        surface.resize(backing);
        let reduced_motion = host.prefers_reduced_motion();

        let mut drift = Self {
            spec,
            particles: seed_particles(&spec, backing.css),
            surface,
            backing,
            frame_loop: FrameLoop::new(host),
            reduced_motion,
            time: 0.0,
            frames: 0,
        };
        drift.draw();
        drift.start_loop();
        tracing::debug!(
            count = spec.count,
            speed_factor = spec.speed_factor,
            reduced_motion,
            width = backing.width,
            height = backing.height,
            "particle canvas mounted"
        );
        drift
    }

    fn start_loop(&mut self) {
        self.frame_loop.observe();
        if !self.reduced_motion {
            self.frame_loop.start();
        }
    }

    /// Service whatever the host has due: a resize, then a frame. Returns whether a frame ran.
    pub fn poll(&mut self) -> bool {
        if let Some(size) = self.frame_loop.take_resize() {
            self.on_resize(size);
        }
        if self.frame_loop.take_frame() {
            self.on_frame();
            self.frame_loop.schedule_next();
            return true;
        }
        false
    }

    /// Advance one step and redraw. Positions stay frozen under reduced motion.
    pub fn on_frame(&mut self) {
        if !self.reduced_motion {
            self.time += TIME_STEP;
            let bounds = self.backing.css;
            for p in &mut self.particles {
                p.advance(self.time, bounds);
            }
        }
        self.frames += 1;
        self.draw();
    }

    /// Rebuild the backing store for a new container size. The population is kept as is.
    pub fn on_resize(&mut self, css: Size) {
        let dpr = self.frame_loop.host().device_pixel_ratio();
        self.backing = Backing::new(css, dpr);
        self.surface.resize(self.backing);
        if self.reduced_motion {
            // No loop will repaint, so repaint the frozen frame at the new size.
            self.draw();
        }
    }

    /// Adopt a new field spec, reseeding when the density or speed knob changed.
    ///
    /// Returns whether a reseed happened. A spec that differs only in colors is ignored:
    /// theme colors are sampled at setup and stay until the next reseed.
    pub fn apply_spec(&mut self, next: ParticleFieldSpec) -> bool {
        if !self.spec.needs_reseed(&next) {
            return false;
        }
        let host = self.frame_loop.host().clone();
        self.frame_loop.cancel();
        self.frame_loop = FrameLoop::new(host);
        self.spec = next;
        self.particles = seed_particles(&next, self.backing.css);
        self.time = 0.0;
        self.draw();
        self.start_loop();
        tracing::debug!(
            density = next.density,
            speed = next.speed,
            count = next.count,
            "particle canvas reseeded"
        );
        true
    }

    fn draw(&mut self) {
        let s = &mut self.surface;
        s.draw(&DrawOp::Clear);
        // Links first so no dot is covered by its own links.
        let ps = &self.particles;
        for (i, a) in ps.iter().enumerate() {
            for b in &ps[i + 1..] {
                if let Some(alpha) = link_opacity(a.pos.distance(b.pos)) {
                    s.draw(&DrawOp::Link {
                        from: a.pos,
                        to: b.pos,
                        width: LINK_WIDTH,
                        color: a.color,
                        alpha,
                    });
                }
            }
        }
        for p in ps {
            s.draw(&DrawOp::Glow {
                center: p.pos,
                radius: p.radius * GLOW_SCALE,
                color: p.color,
                alpha: p.opacity * GLOW_ALPHA,
            });
            s.draw(&DrawOp::Dot {
                center: p.pos,
                radius: p.radius,
                color: p.color,
                alpha: p.opacity,
            });
        }
        s.present();
    }

    pub fn spec(&self) -> &ParticleFieldSpec {
        &self.spec
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn backing(&self) -> Backing {
        self.backing
    }

    pub fn state(&self) -> LoopState {
        self.frame_loop.state()
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Frames run since mount.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Tear down explicitly. Dropping has the same effect.
    pub fn unmount(self) {
        drop(self);
    }
}

impl<S: Surface> Drop for ParticleDrift<S> {
    fn drop(&mut self) {
        if self.frame_loop.state() != LoopState::Cancelled {
            tracing::debug!(frames = self.frames, "particle canvas torn down");
        }
        self.frame_loop.cancel();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sim/drift.rs"]
mod tests;
