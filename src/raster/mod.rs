//! CPU rasterization of a mounted background layer.

use kurbo::Size;

use crate::foundation::error::BackdropResult;
use crate::render::{Mounted, MountedContent, WrapperStyle};

pub mod blur;
pub mod composite;
pub mod frame;
pub mod svg;

pub use frame::FrameRGBA;
pub use svg::{rasterize_scene, rasterize_svg};

/// Rasterize what the wrapper would show, as premultiplied RGBA8.
///
/// Vector content is frozen at `t_s` seconds and drawn at `viewport`. Canvas content is the
/// simulation's last presented frame at its backing resolution; `viewport` and `t_s` do not
/// apply to it. The wrapper blur and opacity are applied last.
#[tracing::instrument(skip(mounted), fields(preset = %mounted.preset))]
pub fn rasterize(mounted: &Mounted, viewport: Size, t_s: f64) -> BackdropResult<FrameRGBA> {
    let (frame, scale) = match &mounted.content {
        MountedContent::Vector(scene) => (rasterize_scene(scene, viewport, t_s)?, 1.0),
        MountedContent::Canvas(drift) => (drift.surface().frame(), drift.backing().dpr),
    };
    apply_wrapper(frame, &mounted.style, scale)
}

/// Apply the wrapper's blur, scaled from CSS to device pixels, then its opacity.
pub fn apply_wrapper(
    frame: FrameRGBA,
    style: &WrapperStyle,
    px_per_css: f64,
) -> BackdropResult<FrameRGBA> {
    let mut frame = if style.blur_px > 0.0 {
        blur::gaussian_blur(&frame, style.blur_px * px_per_css)?
    } else {
        frame
    };
    composite::apply_opacity_in_place(&mut frame.data, style.opacity);
    Ok(frame)
}
