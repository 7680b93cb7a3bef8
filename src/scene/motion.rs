use kurbo::{Affine, Point, Vec2};

/// Easing curve applied within one animation cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InOutSine,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InOutSine => -((std::f64::consts::PI * t).cos() - 1.0) / 2.0,
        }
    }

    /// CSS `animation-timing-function` approximating this curve.
    pub fn css(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::InQuad => "cubic-bezier(0.55, 0.085, 0.68, 0.53)",
            Self::OutQuad => "cubic-bezier(0.25, 0.46, 0.45, 0.94)",
            Self::InOutQuad => "cubic-bezier(0.455, 0.03, 0.515, 0.955)",
            Self::InCubic => "cubic-bezier(0.55, 0.055, 0.675, 0.19)",
            Self::OutCubic => "cubic-bezier(0.215, 0.61, 0.355, 1)",
            Self::InOutCubic => "cubic-bezier(0.645, 0.045, 0.355, 1)",
            Self::InOutSine => "cubic-bezier(0.445, 0.05, 0.55, 0.95)",
        }
    }
}

/// Playback direction of successive cycles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Every cycle runs `from -> to`.
    Normal,
    /// Odd cycles run backwards, so the loop never jumps.
    Alternate,
}

/// What a motion animates, as a `from -> to` tween.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MotionKind {
    Translate { from: Vec2, to: Vec2 },
    Scale { from: f64, to: f64 },
    Rotate { from_deg: f64, to_deg: f64 },
    /// Opacity multiplier.
    Fade { from: f64, to: f64 },
    /// Stroke dash offset, for marching dashes.
    DashOffset { from: f64, to: f64 },
}

/// A declarative, infinitely looping animation attached to a scene node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Motion {
    pub kind: MotionKind,
    pub duration_s: f64,
    /// Negative delays start the loop mid-cycle; positive delays hold the base state.
    pub delay_s: f64,
    pub ease: Ease,
    pub direction: Direction,
    /// Pivot for `Scale` and `Rotate`, in scene units.
    pub origin: Point,
}

/// A motion's value at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MotionSample {
    Transform(Affine),
    Opacity(f64),
    DashOffset(f64),
}

impl Motion {
    pub fn new(kind: MotionKind, duration_s: f64) -> Self {
        Self {
            kind,
            duration_s,
            delay_s: 0.0,
            ease: Ease::InOutSine,
            direction: Direction::Alternate,
            origin: Point::ZERO,
        }
    }

    pub fn drift(offset: Vec2, duration_s: f64) -> Self {
        Self::new(
            MotionKind::Translate {
                from: Vec2::ZERO,
                to: offset,
            },
            duration_s,
        )
    }

    pub fn breathe(from: f64, to: f64, origin: Point, duration_s: f64) -> Self {
        Self::new(MotionKind::Scale { from, to }, duration_s).origin(origin)
    }

    pub fn pulse(from: f64, to: f64, duration_s: f64) -> Self {
        Self::new(MotionKind::Fade { from, to }, duration_s)
    }

    /// Full clockwise turn, linear and non-alternating.
    pub fn spin(origin: Point, duration_s: f64) -> Self {
        Self::new(
            MotionKind::Rotate {
                from_deg: 0.0,
                to_deg: 360.0,
            },
            duration_s,
        )
        .origin(origin)
        .ease(Ease::Linear)
        .direction(Direction::Normal)
    }

    /// Linear one-way translation that restarts each cycle.
    pub fn scroll(offset: Vec2, duration_s: f64) -> Self {
        Self::drift(offset, duration_s)
            .ease(Ease::Linear)
            .direction(Direction::Normal)
    }

    pub fn delay(mut self, delay_s: f64) -> Self {
        self.delay_s = delay_s;
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Eased progress `0..=1` at time `t_s`, or `None` before a positive delay has elapsed.
    pub fn progress(&self, t_s: f64) -> Option<f64> {
        let local = t_s - self.delay_s;
        if local < 0.0 && self.delay_s > 0.0 {
            return None;
        }
        let dur = self.duration_s.max(1e-6);
        let cycles = local / dur;
        let iteration = cycles.floor();
        let mut frac = cycles - iteration;
        if self.direction == Direction::Alternate && iteration.rem_euclid(2.0) >= 1.0 {
            frac = 1.0 - frac;
        }
        Some(self.ease.apply(frac))
    }

    /// Sample the motion at `t_s`. Before a positive delay elapses the `from` state is held.
    pub fn sample(&self, t_s: f64) -> MotionSample {
        let u = self.progress(t_s).unwrap_or(0.0);
        let lerp = |a: f64, b: f64| a + (b - a) * u;
        let about = |inner: Affine| {
            let to = self.origin.to_vec2();
            Affine::translate(to) * inner * Affine::translate(-to)
        };
        match self.kind {
            MotionKind::Translate { from, to } => {
                MotionSample::Transform(Affine::translate(from.lerp(to, u)))
            }
            MotionKind::Scale { from, to } => {
                MotionSample::Transform(about(Affine::scale(lerp(from, to))))
            }
            MotionKind::Rotate { from_deg, to_deg } => {
                MotionSample::Transform(about(Affine::rotate(lerp(from_deg, to_deg).to_radians())))
            }
            MotionKind::Fade { from, to } => MotionSample::Opacity(lerp(from, to).clamp(0.0, 1.0)),
            MotionKind::DashOffset { from, to } => MotionSample::DashOffset(lerp(from, to)),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/motion.rs"]
mod tests;
