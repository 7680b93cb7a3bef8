//! Drawing targets for the particle canvas.

use kurbo::{Affine, BezPath, Circle, Point, Size, Vec2};

use crate::raster::FrameRGBA;
use crate::theme::Color;

/// Device-pixel-ratio ceiling; bounds the backing store on high-DPI displays.
pub const MAX_DPR: f64 = 2.0;

/// Canvas backing store geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Backing {
    /// Container size in CSS pixels.
    pub css: Size,
    /// Effective ratio, already capped at [`MAX_DPR`].
    pub dpr: f64,
    pub width: u32,
    pub height: u32,
}

impl Backing {
    pub fn new(css: Size, device_pixel_ratio: f64) -> Self {
        let dpr = device_pixel_ratio.min(MAX_DPR);
        let px = |v: f64| (v * dpr).floor().clamp(1.0, f64::from(u16::MAX)) as u32;
        Self {
            css,
            dpr,
            width: px(css.width),
            height: px(css.height),
        }
    }

    /// CSS pixels to backing pixels.
    pub fn transform(&self) -> Affine {
        Affine::scale(self.dpr)
    }
}

/// One canvas draw command, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawOp {
    Clear,
    Link {
        from: Point,
        to: Point,
        width: f64,
        color: Color,
        alpha: f64,
    },
    /// Radial falloff from `color` at the center to transparent at `radius`.
    Glow {
        center: Point,
        radius: f64,
        color: Color,
        alpha: f64,
    },
    Dot {
        center: Point,
        radius: f64,
        color: Color,
        alpha: f64,
    },
}

/// Something the simulation can paint into.
pub trait Surface {
    /// Recompute the backing store. Called on mount and on every container resize.
    fn resize(&mut self, backing: Backing);

    fn draw(&mut self, op: &DrawOp);

    /// End of frame.
    fn present(&mut self) {}
}

/// Keeps every draw command for inspection.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
    frame_start: usize,
    presented: usize,
    backing: Option<Backing>,
    resizes: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every command since creation.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Commands since the last [`DrawOp::Clear`].
    pub fn last_frame(&self) -> &[DrawOp] {
        &self.ops[self.frame_start..]
    }

    pub fn frames_presented(&self) -> usize {
        self.presented
    }

    pub fn backing(&self) -> Option<Backing> {
        self.backing
    }

    pub fn resize_count(&self) -> usize {
        self.resizes
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, backing: Backing) {
        self.backing = Some(backing);
        self.resizes += 1;
    }

    fn draw(&mut self, op: &DrawOp) {
        if matches!(op, DrawOp::Clear) {
            self.frame_start = self.ops.len();
        }
        self.ops.push(*op);
    }

    fn present(&mut self) {
        self.presented += 1;
    }
}

/// Rings used to approximate a radial glow.
const GLOW_RINGS: usize = 8;

/// CPU canvas backed by `vello_cpu`.
pub struct PixmapSurface {
    backing: Backing,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
}

impl std::fmt::Debug for PixmapSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixmapSurface")
            .field("backing", &self.backing)
            .finish_non_exhaustive()
    }
}

impl PixmapSurface {
    pub fn new() -> Self {
        let backing = Backing::new(Size::new(1.0, 1.0), 1.0);
        Self {
            backing,
            ctx: vello_cpu::RenderContext::new(1, 1),
            pixmap: vello_cpu::Pixmap::new(1, 1),
        }
    }

    pub fn backing(&self) -> Backing {
        self.backing
    }

    /// Snapshot of the last presented frame.
    pub fn frame(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.backing.width,
            height: self.backing.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    fn size_u16(&self) -> (u16, u16) {
        // `Backing::new` clamps into u16 range.
        (
            u16::try_from(self.backing.width).unwrap_or(u16::MAX),
            u16::try_from(self.backing.height).unwrap_or(u16::MAX),
        )
    }

    fn fill(&mut self, path: &BezPath, color: Color, alpha: f64) {
        let alpha = (color.a * alpha).clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let [r, g, b, _] = color.to_rgba8();
        let a = (alpha * 255.0).round() as u8;
        self.ctx.set_transform(affine_to_cpu(self.backing.transform()));
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }
}

impl Default for PixmapSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for PixmapSurface {
    fn resize(&mut self, backing: Backing) {
        self.backing = backing;
        let (w, h) = self.size_u16();
        self.ctx = vello_cpu::RenderContext::new(w, h);
        self.pixmap = vello_cpu::Pixmap::new(w, h);
    }

    fn draw(&mut self, op: &DrawOp) {
        match *op {
            DrawOp::Clear => {
                let (w, h) = self.size_u16();
                self.ctx = vello_cpu::RenderContext::new(w, h);
                self.pixmap.data_as_u8_slice_mut().fill(0);
            }
            DrawOp::Link {
                from,
                to,
                width,
                color,
                alpha,
            } => {
                self.fill(&line_quad(from, to, width), color, alpha);
            }
            DrawOp::Glow {
                center,
                radius,
                color,
                alpha,
            } => {
                // Stacked rings, outermost first; the center accumulates to roughly `alpha`.
                let step = alpha / GLOW_RINGS as f64;
                for k in 0..GLOW_RINGS {
                    let r = radius * (GLOW_RINGS - k) as f64 / GLOW_RINGS as f64;
                    self.fill(&circle_path(center, r), color, step);
                }
            }
            DrawOp::Dot {
                center,
                radius,
                color,
                alpha,
            } => {
                self.fill(&circle_path(center, radius), color, alpha);
            }
        }
    }

    fn present(&mut self) {
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
    }
}

fn circle_path(center: Point, radius: f64) -> BezPath {
    kurbo::Shape::to_path(&Circle::new(center, radius), 0.1)
}

/// A line of `width` as a filled quad.
fn line_quad(from: Point, to: Point, width: f64) -> BezPath {
    let d = to - from;
    let len = d.hypot();
    let n = if len > 0.0 {
        Vec2::new(-d.y, d.x) * (width / 2.0 / len)
    } else {
        Vec2::ZERO
    };
    let mut p = BezPath::new();
    p.move_to(from + n);
    p.line_to(to + n);
    p.line_to(to - n);
    p.line_to(from - n);
    p.close_path();
    p
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}
