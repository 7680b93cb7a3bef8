use kurbo::Size;

use crate::foundation::error::{BackdropError, BackdropResult};
use crate::raster::FrameRGBA;
use crate::scene::{Scene, to_svg};

/// Largest raster edge accepted, in pixels.
pub const MAX_DIM: u32 = 16_384;

/// Pixel dimensions for a CSS viewport, rounded up.
pub fn raster_size(viewport: Size) -> BackdropResult<(u32, u32)> {
    fn to_px(v: f64) -> BackdropResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(BackdropError::render(format!("invalid raster extent {v}")));
        }
        let px = v.ceil().max(1.0);
        if px > f64::from(MAX_DIM) {
            return Err(BackdropError::render(format!(
                "raster extent {px} exceeds {MAX_DIM}"
            )));
        }
        Ok(px as u32)
    }
    Ok((to_px(viewport.width)?, to_px(viewport.height)?))
}

/// Rasterize a scene frozen at `t_s` seconds into premultiplied RGBA8.
pub fn rasterize_scene(scene: &Scene, viewport: Size, t_s: f64) -> BackdropResult<FrameRGBA> {
    let (width, height) = raster_size(viewport)?;
    let svg = to_svg(&scene.at_time(t_s), Size::new(f64::from(width), f64::from(height)));
    rasterize_svg(&svg, width, height)
}

pub fn rasterize_svg(svg: &str, width: u32, height: u32) -> BackdropResult<FrameRGBA> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &opts)
        .map_err(|e| BackdropError::render(format!("parse generated svg: {e}")))?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| BackdropError::render("failed to allocate svg pixmap"))?;

    let sx = width as f32 / tree.size().width();
    let sy = height as f32 / tree.size().height();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    Ok(FrameRGBA {
        width,
        height,
        data: pixmap.data().to_vec(),
        premultiplied: true,
    })
}
