//! Full-bleed gradient washes and soft static layers.

use kurbo::{Affine, Point, Rect, Vec2};

use crate::generators::{Generator, RenderCtx, VisualOutput};
use crate::registry::PresetId;
use crate::scene::{Gradient, Motion, Node, Scene, Shape, ViewBox, rounded_blob};
use crate::theme::Color;

/// Rectangle in viewport pixels from CSS-style percentages.
fn rect_pct(ctx: &RenderCtx<'_>, left: f64, top: f64, width: f64, height: f64) -> Rect {
    let origin = ctx.pct(left, top);
    let size = ctx.pct(width, height);
    Rect::new(origin.x, origin.y, origin.x + size.x, origin.y + size.y)
}

/// Distance from `center` to the farthest corner of the unit box.
fn farthest_corner(center: Point) -> f64 {
    let dx = center.x.max(1.0 - center.x);
    let dy = center.y.max(1.0 - center.y);
    dx.hypot(dy)
}

/// CSS `radial-gradient(ellipse at x% y%, color 0%, transparent stop%)` as a covering layer.
fn radial_wash(at: (f64, f64), color: Color, stop_pct: f64) -> Node {
    let center = Point::new(at.0 / 100.0, at.1 / 100.0);
    Node::new(Shape::Cover).fill(
        Gradient::radial(center, farthest_corner(center))
            .stop(0.0, color, 1.0)
            .stop(stop_pct / 100.0, color, 0.0),
    )
}

pub struct SolidColor;

impl Generator for SolidColor {
    fn preset(&self) -> PresetId {
        PresetId::SolidColor
    }

    fn render(&self, ctx: &mut RenderCtx<'_>) -> VisualOutput {
        VisualOutput::Vector(
            Scene::new(ViewBox::Viewport).with(Node::new(Shape::Cover).fill(ctx.palette.primary)),
        )
    }
}

pub struct MeshGradient;

impl MeshGradient {
    /// Period of the slow mesh shift, independent of speed.
    pub const SHIFT_SECONDS: f64 = 30.0;
}

impl Generator for MeshGradient {
    fn preset(&self) -> PresetId {
        PresetId::MeshGradient
    }

    fn render(&self, ctx: &mut RenderCtx<'_>) -> VisualOutput {
        let s = &ctx.settings;
        let noise_opacity = s.by_density(0.03, 0.08);
        let spread = s.by_density(50.0, 70.0);
        let p = ctx.palette;
        let center = ctx.pct(50.0, 50.0);
        let nudge = ctx.pct(1.0, -1.0).to_vec2();

        // CSS stacks the first background on top, so paint in reverse.
        let layers = vec![
            radial_wash((30.0, 60.0), p.primary, spread - 10.0),
            radial_wash((50.0, 80.0), p.muted, spread),
            radial_wash((80.0, 30.0), p.border, spread),
            radial_wash((20.0, 20.0), p.primary, spread),
        ];
        let half = Self::SHIFT_SECONDS / 2.0;
        let scene = Scene::new(ViewBox::Viewport)
            .with(
                Node::group(layers)
                    .opacity(0.3)
                    .motion(Motion::drift(nudge, half))
                    .motion(Motion::breathe(1.0, 1.01, center, half / 2.0)),
            )
            .with(
                Node::new(Shape::Noise {
                    base_frequency: 0.65,
                    octaves: 3,
                })
                .opacity(noise_opacity),
            );
        VisualOutput::Vector(scene)
    }
}

pub struct SpotlightVignette;

impl Generator for SpotlightVignette {
    fn preset(&self) -> PresetId {
        PresetId::SpotlightVignette
    }

    fn render(&self, ctx: &mut RenderCtx<'_>) -> VisualOutput {
        let spread = ctx.settings.by_density(50.0, 70.0) / 100.0;
        let p = ctx.palette;
        let light = Gradient::radial(Point::new(0.5, 0.4), spread)
            .stop(0.0, p.bg, 1.0)
            .stop(0.6, p.border, 1.0)
            .stop(1.0, p.text, 1.0);
        VisualOutput::Vector(
            Scene::new(ViewBox::Viewport).with(Node::new(Shape::Cover).fill(light).opacity(0.25)),
        )
    }
}

pub struct CutPaper;

struct PaperLayer {
    slot: usize,
    /// left, top, width, height in percent.
    frame: [f64; 4],
    horizontal: [f64; 4],
    vertical: [f64; 4],
    opacity: f64,
}

const PAPER_LAYERS: [PaperLayer; 4] = [
    PaperLayer {
        slot: 0,
        frame: [-5.0, 10.0, 60.0, 50.0],
        horizontal: [0.6, 0.4, 0.7, 0.3],
        vertical: [0.5, 0.6, 0.4, 0.5],
        opacity: 0.08,
    },
    PaperLayer {
        slot: 1,
        frame: [55.0, 30.0, 55.0, 45.0],
        horizontal: [0.4, 0.6, 0.3, 0.7],
        vertical: [0.6, 0.4, 0.5, 0.5],
        opacity: 0.12,
    },
    PaperLayer {
        slot: 2,
        frame: [10.0, 55.0, 50.0, 40.0],
        horizontal: [0.5, 0.5, 0.6, 0.4],
        vertical: [0.4, 0.7, 0.3, 0.6],
        opacity: 0.06,
    },
    PaperLayer {
        slot: 0,
        frame: [55.0, 45.0, 40.0, 35.0],
        horizontal: [0.7, 0.3, 0.5, 0.5],
        vertical: [0.5, 0.5, 0.6, 0.4],
        opacity: 0.1,
    },
];

impl Generator for CutPaper {
    fn preset(&self) -> PresetId {
        PresetId::CutPaper
    }

    fn render(&self, ctx: &mut RenderCtx<'_>) -> VisualOutput {
        let layers = ctx.settings.count_round(3, 1);
        let p = ctx.palette;
        let slots = [p.primary, p.border, p.muted];

        let mut scene = Scene::new(ViewBox::Viewport);
        for layer in PAPER_LAYERS.iter().take(layers) {
            let [left, top, w, h] = layer.frame;
            let outline = rounded_blob(
                rect_pct(ctx, left, top, w, h),
                layer.horizontal,
                layer.vertical,
            );
            let shadow = Node::path(outline.clone())
                .fill(Color::BLACK.with_alpha(0.08))
                .transform(Affine::translate(Vec2::new(0.0, 8.0)))
                .blur(16.0);
            let paper = Node::path(outline).fill(slots[layer.slot]);
            scene.push(Node::group(vec![shadow, paper]).opacity(layer.opacity));
        }
        VisualOutput::Vector(scene)
    }
}

pub struct GradientOrbs;

struct Orb {
    slot: usize,
    anchor: OrbAnchor,
    /// Fraction of the density-scaled orb diameter.
    size: f64,
    opacity: f64,
    blur: f64,
}

/// Two edge offsets in percent, vertical first.
enum OrbAnchor {
    TopLeft(f64, f64),
    TopRight(f64, f64),
    BottomLeft(f64, f64),
    BottomRight(f64, f64),
}

const ORBS: [Orb; 5] = [
    Orb {
        slot: 0,
        anchor: OrbAnchor::TopLeft(-10.0, -5.0),
        size: 1.0,
        opacity: 1.0,
        blur: 40.0,
    },
    Orb {
        slot: 1,
        anchor: OrbAnchor::TopRight(10.0, -5.0),
        size: 0.7,
        opacity: 0.8,
        blur: 35.0,
    },
    Orb {
        slot: 2,
        anchor: OrbAnchor::BottomLeft(-15.0, 30.0),
        size: 0.9,
        opacity: 0.7,
        blur: 50.0,
    },
    Orb {
        slot: 3,
        anchor: OrbAnchor::TopLeft(45.0, 10.0),
        size: 0.5,
        opacity: 0.6,
        blur: 30.0,
    },
    Orb {
        slot: 0,
        anchor: OrbAnchor::BottomRight(20.0, 15.0),
        size: 0.6,
        opacity: 0.5,
        blur: 45.0,
    },
];

impl Generator for GradientOrbs {
    fn preset(&self) -> PresetId {
        PresetId::GradientOrbs
    }

    fn render(&self, ctx: &mut RenderCtx<'_>) -> VisualOutput {
        let opacity = ctx.settings.by_density(0.2, 0.5);
        let size = ctx.settings.by_density(40.0, 75.0);
        let p = ctx.palette;
        let slots = [p.primary, p.secondary, p.border, p.muted];

        let mut scene = Scene::new(ViewBox::Viewport);
        for orb in &ORBS {
            let d = size * orb.size;
            // (top, left) in percent
            let (top, left) = match orb.anchor {
                OrbAnchor::TopLeft(t, l) => (t, l),
                OrbAnchor::TopRight(t, r) => (t, 100.0 - r - d),
                OrbAnchor::BottomLeft(b, l) => (100.0 - b - d, l),
                OrbAnchor::BottomRight(b, r) => (100.0 - b - d, 100.0 - r - d),
            };
            let frame = rect_pct(ctx, left, top, d, d);
            let color = slots[orb.slot];
            let glow = Gradient::glow(
                Point::new(0.5, 0.5),
                std::f64::consts::FRAC_1_SQRT_2,
                color,
                1.0,
                0.7,
            );
            scene.push(
                Node::new(Shape::Ellipse {
                    center: frame.center(),
                    radii: Vec2::new(frame.width() / 2.0, frame.height() / 2.0),
                })
                .fill(glow)
                .opacity(opacity * orb.opacity)
                .blur(orb.blur),
            );
        }
        VisualOutput::Vector(scene)
    }
}

pub struct Nebula;

impl Nebula {
    pub const STARS: usize = 100;
}

impl Generator for Nebula {
    fn preset(&self) -> PresetId {
        PresetId::Nebula
    }

    fn render(&self, ctx: &mut RenderCtx<'_>) -> VisualOutput {
        let cloud_opacity = ctx.settings.by_density(0.15, 0.40);
        let spread = ctx.settings.by_density(50.0, 80.0);
        let noise_opacity = ctx.settings.by_density(0.05, 0.15);
        let p = ctx.palette;

        let clouds: Vec<Node> = [
            ((10.0, 85.0), p.muted, spread - 20.0),
            ((80.0, 80.0), p.primary, spread - 15.0),
            ((40.0, 70.0), p.border, spread - 5.0),
            ((70.0, 40.0), p.secondary, spread - 10.0),
            ((20.0, 30.0), p.primary, spread),
        ]
        .into_iter()
        .map(|(at, color, stop)| {
            let center = Point::new(at.0 / 100.0, at.1 / 100.0);
            Node::rect(rect_pct(ctx, -20.0, -20.0, 140.0, 140.0)).fill(
                Gradient::radial(center, farthest_corner(center))
                    .stop(0.0, color, 1.0)
                    .stop(stop / 100.0, color, 0.0),
            )
        })
        .collect();

        let layout = ctx.layouts.scatter(PresetId::Nebula, Self::STARS);
        let stars: Vec<Node> = layout
            .iter()
            .map(|s| {
                Node::circle(ctx.pct(s.u[0] * 100.0, s.u[1] * 100.0), s.range(2, 0.5, 2.0))
                    .fill(Color::WHITE)
                    .opacity(s.range(3, 0.2, 0.8))
            })
            .collect();

        let scene = Scene::new(ViewBox::Viewport)
            .with(Node::group(clouds).opacity(cloud_opacity).blur(60.0))
            .with(Node::group(stars).opacity(cloud_opacity * 0.8).blur(1.0))
            .with(
                Node::new(Shape::Noise {
                    base_frequency: 0.8,
                    octaves: 4,
                })
                .opacity(noise_opacity * 0.5),
            );
        VisualOutput::Vector(scene)
    }
}
