use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::BackdropError;
use crate::generators::{Generator, layered, particle_drift, patterns, scattered, washes};

/// Whether a preset has motion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetKind {
    #[default]
    Static,
    Animated,
}

impl PresetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Animated => "animated",
        }
    }
}

macro_rules! presets {
    ($( $variant:ident => $id:literal, $name:literal, $kind:ident, $desc:literal; )+) => {
        /// Every preset this library ships, in display order.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum PresetId {
            $( $variant, )+
        }

        impl PresetId {
            pub const ALL: &'static [PresetId] = &[$( PresetId::$variant, )+];

            /// Stable identifier used in configurations.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( PresetId::$variant => $id, )+
                }
            }

            pub fn meta(self) -> &'static PresetMeta {
                match self {
                    $( PresetId::$variant => &PresetMeta {
                        id: PresetId::$variant,
                        name: $name,
                        kind: PresetKind::$kind,
                        description: $desc,
                    }, )+
                }
            }
        }

        impl FromStr for PresetId {
            type Err = BackdropError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $id => Ok(PresetId::$variant), )+
                    other => Err(BackdropError::config(format!("unknown preset id \"{other}\""))),
                }
            }
        }
    };
}

presets! {
    AuroraDrift => "aurora_drift", "Aurora Drift", Animated, "Slow-moving gradient ribbons";
    FloatingBlobs => "floating_blobs", "Floating Blobs", Animated,
        "Soft blurred orbs drifting gently";
    ParticleDrift => "particle_drift", "Particle Drift", Animated, "Gentle floating particles";
    FlowLines => "flow_lines", "Flow Lines", Animated, "Organic flowing line paths";
    Waves => "waves", "Waves", Animated, "Flowing wave animation";
    Shimmer => "shimmer", "Shimmer", Animated, "Shimmering light beams";
    Ripples => "ripples", "Ripples", Animated, "Expanding ripple rings";
    Constellation => "constellation", "Constellation", Animated, "Connected stars";
    AuroraWaves => "aurora_waves", "Aurora Waves", Animated, "Northern lights effect";
    Plasma => "plasma", "Plasma", Animated, "Lava lamp plasma blobs";
    MatrixRain => "matrix_rain", "Matrix Rain", Animated, "Falling light streams";
    PulseRings => "pulse_rings", "Pulse Rings", Animated, "Pulsing concentric rings";
    Fireflies => "fireflies", "Fireflies", Animated, "Floating glowing particles";
    Spiral => "spiral", "Spiral", Animated, "Rotating spiral arms";
    BokehLights => "bokeh_lights", "Bokeh Lights", Animated, "Large soft glowing circles";
    GradientWash => "gradient_wash", "Gradient Wash", Animated, "Full-screen rotating gradient";
    NeonGlow => "neon_glow", "Neon Glow", Animated, "Glowing geometric shapes";
    LightRays => "light_rays", "Light Rays", Animated, "Dramatic light beams from corner";
    ColorBands => "color_bands", "Color Bands", Animated, "Bold diagonal scrolling stripes";
    GridPulse => "grid_pulse", "Grid Pulse", Animated, "Pulsing grid wave pattern";
    SolidColor => "solid_color", "Solid Color", Static, "Flat solid color background";
    MeshGradient => "mesh_gradient", "Mesh Gradient", Static, "Layered radial gradients with noise";
    SpotlightVignette => "spotlight_vignette", "Spotlight", Static,
        "Centered spotlight with vignette edges";
    CutPaper => "cut_paper", "Cut Paper", Static, "Layered paper shapes with depth";
    TopoLines => "topo_lines", "Topo Lines", Static, "Topographic contour line pattern";
    GradientOrbs => "gradient_orbs", "Gradient Orbs", Static, "Large colorful gradient orbs";
    DotGrid => "dot_grid", "Dot Grid", Static, "Subtle dot grid pattern";
    RadialBurst => "radial_burst", "Radial Burst", Static, "Radial lines from center";
    HexagonPattern => "hexagon_pattern", "Hexagons", Static, "Hexagonal grid pattern";
    GeometricShapes => "geometric_shapes", "Geometric", Static, "Abstract geometric shapes";
    Nebula => "nebula", "Nebula", Static, "Space nebula effect";
}

impl PresetId {
    pub fn kind(self) -> PresetKind {
        self.meta().kind
    }
}

impl fmt::Display for PresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PresetId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PresetId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Immutable registry entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PresetMeta {
    pub id: PresetId,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: PresetKind,
    pub description: &'static str,
}

/// All preset metadata, in display order.
pub fn presets() -> impl Iterator<Item = &'static PresetMeta> {
    PresetId::ALL.iter().map(|id| id.meta())
}

/// Generator bound to `id` in the full registry.
pub fn generator(id: PresetId) -> &'static dyn Generator {
    match id {
        PresetId::AuroraDrift => &layered::AuroraDrift,
        PresetId::FloatingBlobs => &layered::FloatingBlobs,
        PresetId::ParticleDrift => &particle_drift::ParticleDriftGenerator,
        PresetId::FlowLines => &layered::FlowLines,
        PresetId::Waves => &layered::Waves,
        PresetId::Shimmer => &layered::Shimmer,
        PresetId::Ripples => &layered::Ripples,
        PresetId::Constellation => &scattered::Constellation,
        PresetId::AuroraWaves => &layered::AuroraWaves,
        PresetId::Plasma => &layered::Plasma,
        PresetId::MatrixRain => &scattered::MatrixRain,
        PresetId::PulseRings => &layered::PulseRings,
        PresetId::Fireflies => &scattered::Fireflies,
        PresetId::Spiral => &patterns::Spiral,
        PresetId::BokehLights => &scattered::BokehLights,
        PresetId::GradientWash => &layered::GradientWash,
        PresetId::NeonGlow => &scattered::NeonGlow,
        PresetId::LightRays => &scattered::LightRays,
        PresetId::ColorBands => &layered::ColorBands,
        PresetId::GridPulse => &layered::GridPulse,
        PresetId::SolidColor => &washes::SolidColor,
        PresetId::MeshGradient => &washes::MeshGradient,
        PresetId::SpotlightVignette => &washes::SpotlightVignette,
        PresetId::CutPaper => &washes::CutPaper,
        PresetId::TopoLines => &patterns::TopoLines,
        PresetId::GradientOrbs => &washes::GradientOrbs,
        PresetId::DotGrid => &patterns::DotGrid,
        PresetId::RadialBurst => &patterns::RadialBurst,
        PresetId::HexagonPattern => &patterns::HexagonPattern,
        PresetId::GeometricShapes => &patterns::GeometricShapes,
        PresetId::Nebula => &washes::Nebula,
    }
}

/// Thumbnail-safe subset: presets cheap enough to render many times at once.
///
/// Kept as its own table rather than a filter over the full registry.
pub fn thumbnail_generator(id: PresetId) -> Option<&'static dyn Generator> {
    let generator: &'static dyn Generator = match id {
        PresetId::AuroraDrift => &layered::AuroraDrift,
        PresetId::FloatingBlobs => &layered::FloatingBlobs,
        PresetId::ParticleDrift => &particle_drift::ParticleDriftGenerator,
        PresetId::FlowLines => &layered::FlowLines,
        PresetId::MeshGradient => &washes::MeshGradient,
        PresetId::SpotlightVignette => &washes::SpotlightVignette,
        PresetId::CutPaper => &washes::CutPaper,
        PresetId::TopoLines => &patterns::TopoLines,
        _ => return None,
    };
    Some(generator)
}

/// Resolve a configuration's preset id in the full registry. Unknown ids resolve to `None`.
pub fn resolve(preset_id: &str) -> Option<(PresetId, &'static dyn Generator)> {
    let id = preset_id.parse::<PresetId>().ok()?;
    Some((id, generator(id)))
}

/// Resolve a preset id in the thumbnail registry.
pub fn resolve_thumbnail(preset_id: &str) -> Option<(PresetId, &'static dyn Generator)> {
    let id = preset_id.parse::<PresetId>().ok()?;
    thumbnail_generator(id).map(|g| (id, g))
}
