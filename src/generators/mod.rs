//! The generator library: one pure rendering unit per preset.
//!
//! Generators read the sanitized settings and the resolved theme palette from a
//! [`RenderCtx`] and return a [`VisualOutput`]. None of them mutate their inputs, and any
//! randomness goes through the shared [`LayoutCache`] so repeated renders are stable.

use kurbo::{BezPath, Point, Size};

use crate::registry::PresetId;
use crate::scene::Scene;
use crate::settings::{BackgroundSettings, DurationRange};
use crate::theme::ThemePalette;

pub mod layered;
pub mod particle_drift;
pub mod patterns;
pub mod scatter;
pub mod scattered;
pub mod washes;

pub use particle_drift::ParticleFieldSpec;
pub use scatter::{LayoutCache, LayoutCacheStats, Scatter};

/// Inputs to one render pass.
pub struct RenderCtx<'a> {
    /// Always sanitized.
    pub settings: BackgroundSettings,
    pub palette: &'a ThemePalette,
    /// Container size in CSS pixels.
    pub viewport: Size,
    pub layouts: &'a mut LayoutCache,
}

impl<'a> RenderCtx<'a> {
    pub fn new(
        settings: BackgroundSettings,
        palette: &'a ThemePalette,
        viewport: Size,
        layouts: &'a mut LayoutCache,
    ) -> Self {
        Self {
            settings: settings.sanitized(),
            palette,
            viewport,
            layouts,
        }
    }

    /// Point at percentages of the viewport.
    pub fn pct(&self, x: f64, y: f64) -> Point {
        Point::new(self.viewport.width * x / 100.0, self.viewport.height * y / 100.0)
    }
}

/// What a generator produces.
#[derive(Clone, Debug, PartialEq)]
pub enum VisualOutput {
    /// Static or declaratively animated vector content.
    Vector(Scene),
    /// Parameters for the canvas particle simulation, which the renderer mounts.
    Canvas(ParticleFieldSpec),
}

impl VisualOutput {
    pub fn as_scene(&self) -> Option<&Scene> {
        match self {
            Self::Vector(scene) => Some(scene),
            Self::Canvas(_) => None,
        }
    }
}

/// A registered visual generator.
pub trait Generator: Sync {
    fn preset(&self) -> PresetId;

    fn render(&self, ctx: &mut RenderCtx<'_>) -> VisualOutput;

    /// Speed-to-duration mapping of the base cycle, for animated generators.
    fn duration_range(&self) -> Option<DurationRange> {
        None
    }
}

/// Parse path data from a generator's literal geometry table.
///
/// The tables are compiled in and covered by tests; malformed data degrades to an empty path.
pub(crate) fn svg_path(d: &str) -> BezPath {
    BezPath::from_svg(d).unwrap_or_default()
}
