use serde::{Deserialize, Deserializer, Serialize};

use crate::foundation::math::finite_clamp;

/// Upper bound of the `intensity`, `speed` and `density` knobs.
pub const KNOB_MAX: f64 = 100.0;
/// Upper bound of the `blur` knob, in CSS pixels.
pub const BLUR_MAX: f64 = 20.0;

/// The four numeric knobs every generator reads.
///
/// Knobs missing from a serialized document fall back to their defaults individually, and
/// `null` is treated as missing. Generators only ever see [`BackgroundSettings::sanitized`]
/// values, so out-of-range input is clamped rather than rejected.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundSettings {
    /// Opacity/brightness of the effect, `0..=100`.
    #[serde(deserialize_with = "lenient_knob")]
    pub intensity: f64,
    /// Animation rate, `0..=100`. Higher means shorter cycles.
    #[serde(deserialize_with = "lenient_knob")]
    pub speed: f64,
    /// Population, spacing or stroke weight, `0..=100`.
    #[serde(deserialize_with = "lenient_knob")]
    pub density: f64,
    /// Post-process blur radius in CSS pixels, `0..=20`.
    #[serde(deserialize_with = "lenient_knob")]
    pub blur: f64,
}

fn lenient_knob<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    // NaN is replaced by the knob default in `sanitized`.
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

impl BackgroundSettings {
    pub const DEFAULT: Self = Self {
        intensity: 65.0,
        speed: 50.0,
        density: 55.0,
        blur: 0.0,
    };

    /// Fixed preview settings used for every thumbnail.
    pub const THUMBNAIL: Self = Self {
        intensity: 50.0,
        speed: 20.0,
        density: 30.0,
        blur: 0.0,
    };

    /// Clamp every knob into its documented range, replacing non-finite values with defaults.
    pub fn sanitized(self) -> Self {
        let d = Self::DEFAULT;
        Self {
            intensity: finite_clamp(self.intensity, 0.0, KNOB_MAX, d.intensity),
            speed: finite_clamp(self.speed, 0.0, KNOB_MAX, d.speed),
            density: finite_clamp(self.density, 0.0, KNOB_MAX, d.density),
            blur: finite_clamp(self.blur, 0.0, BLUR_MAX, d.blur),
        }
    }

    pub fn intensity_unit(&self) -> f64 {
        self.intensity / KNOB_MAX
    }

    pub fn speed_unit(&self) -> f64 {
        self.speed / KNOB_MAX
    }

    pub fn density_unit(&self) -> f64 {
        self.density / KNOB_MAX
    }

    /// Cycle duration in seconds for `range` at the current speed.
    pub fn duration(&self, range: DurationRange) -> f64 {
        range.at(self.speed_unit())
    }

    /// Linear map of density onto `[lo, hi]`.
    pub fn by_density(&self, lo: f64, hi: f64) -> f64 {
        lo + self.density_unit() * (hi - lo)
    }

    /// `base + round(density * extra)`.
    pub fn count_round(&self, base: usize, extra: usize) -> usize {
        base + (self.density_unit() * extra as f64).round() as usize
    }

    /// `base + floor(density * extra)`.
    pub fn count_floor(&self, base: usize, extra: usize) -> usize {
        base + (self.density_unit() * extra as f64).floor() as usize
    }

    /// Whether a change from `self` to `other` alters anything a generator consumes.
    ///
    /// `intensity` and `blur` are applied by the renderer wrapper only.
    pub fn generator_inputs_differ(&self, other: &Self) -> bool {
        self.speed != other.speed || self.density != other.density
    }
}

impl Default for BackgroundSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Inverse-linear speed to duration mapping: `speed = 0` yields `slowest`, `speed = 100`
/// yields `fastest`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DurationRange {
    /// Seconds per cycle at `speed = 0`.
    pub slowest: f64,
    /// Seconds per cycle at `speed = 100`.
    pub fastest: f64,
}

impl DurationRange {
    pub const fn new(slowest: f64, fastest: f64) -> Self {
        Self { slowest, fastest }
    }

    pub fn at(self, speed_unit: f64) -> f64 {
        let s = speed_unit.clamp(0.0, 1.0);
        self.slowest - s * (self.slowest - self.fastest)
    }

    pub fn contains(self, seconds: f64) -> bool {
        let eps = 1e-9;
        seconds >= self.fastest - eps && seconds <= self.slowest + eps
    }
}

#[cfg(test)]
#[path = "../tests/unit/settings.rs"]
mod tests;
