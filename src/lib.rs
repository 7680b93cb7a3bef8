#![forbid(unsafe_code)]
//! Decorative backgrounds: a preset registry of procedural patterns, looping layered motion
//! and a connected-particle canvas simulation, mounted inside an opacity, blur and
//! color-scoped wrapper.

pub mod config;
pub mod foundation;
pub mod generators;
pub mod raster;
pub mod registry;
pub mod render;
pub mod scene;
pub mod settings;
pub mod sim;
pub mod theme;

pub use config::BackgroundConfig;
pub use foundation::core::{Affine, BezPath, Point, Rect, Rgba8Premul, Size, Vec2};
pub use foundation::error::{BackdropError, BackdropResult};
pub use generators::{Generator, LayoutCache, ParticleFieldSpec, RenderCtx, VisualOutput};
pub use raster::{FrameRGBA, rasterize};
pub use registry::{PresetId, PresetKind, PresetMeta, presets, resolve, resolve_thumbnail};
pub use render::{
    BackgroundRenderer, Mounted, MountedContent, Thumbnail, WrapperStyle, render_thumbnail,
};
pub use scene::{Scene, to_svg};
pub use settings::{BackgroundSettings, DurationRange};
pub use sim::{FrameHost, ManualHost, ParticleDrift};
pub use theme::{Color, ColorOverrides, ThemePalette};
