//! Generators that place many elements from a memoized random layout.
//!
//! Layouts come from [`LayoutCache`](crate::generators::LayoutCache) keyed by population
//! only, so a speed change keeps every element in place and a density change that lands
//! on the same population does too.

use std::f64::consts::PI;

use kurbo::{Affine, Point, Rect, Vec2};

use crate::generators::{Generator, RenderCtx, VisualOutput};
use crate::registry::PresetId;
use crate::scene::{
    Direction, Ease, Gradient, GradientShape, GradientUnits, Motion, MotionKind, Node, Scene, Shape,
    Stroke, ViewBox, polygon,
};
use crate::settings::DurationRange;
use crate::theme::{Color, ThemePalette};

fn four_tones(p: &ThemePalette) -> [Color; 4] {
    [p.primary, p.secondary, p.border, p.muted]
}

pub struct BokehLights;

impl BokehLights {
    pub const DURATION: DurationRange = DurationRange::new(20.0, 6.0);
}

impl Generator for BokehLights {
    fn preset(&self) -> PresetId {
        PresetId::BokehLights
    }

    fn duration_range(&self) -> Option<DurationRange> {
        Some(Self::DURATION)
    }

    fn render(&self, ctx: &mut RenderCtx<'_>) -> VisualOutput {
        let base = ctx.settings.duration(Self::DURATION);
        let count = ctx.settings.count_round(8, 7);
        let tones = four_tones(ctx.palette);
        let layout = ctx.layouts.scatter(PresetId::BokehLights, count);

        let mut scene = Scene::new(ViewBox::Viewport);
        for (i, s) in layout.iter().enumerate() {
            let size = s.range(0, 150.0, 350.0);
            let corner = ctx.pct(s.u[1] * 100.0, s.u[2] * 100.0);
            let center = corner + Vec2::new(size / 2.0, size / 2.0);
            let duration = base + s.range(4, 0.0, 8.0);
            let delay = -s.range(3, 0.0, 20.0);
            // Four drift variants, one per tone.
            let heading = (i % 4) as f64 * PI / 2.0 + PI / 4.0;
            let wander = Vec2::new(heading.cos(), heading.sin()) * 40.0;

            scene.push(
                Node::circle(center, size / 2.0)
                    .fill(Gradient::glow(
                        Point::new(0.5, 0.5),
                        std::f64::consts::FRAC_1_SQRT_2,
                        tones[i % 4],
                        1.0,
                        0.7,
                    ))
                    .opacity(s.range(5, 0.6, 0.8))
                    .motion(Motion::drift(wander, duration).delay(delay))
                    .motion(Motion::breathe(1.0, 1.1, center, duration / 2.0).delay(delay)),
            );
        }
        VisualOutput::Vector(scene)
    }
}

pub struct NeonGlow;

/// Outline kinds cycled by index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NeonShape {
    Ring,
    Bar,
    Arc,
}

impl NeonShape {
    pub fn for_index(i: usize) -> Self {
        match i % 3 {
            0 => Self::Ring,
            1 => Self::Bar,
            _ => Self::Arc,
        }
    }
}

impl NeonGlow {
    pub const DURATION: DurationRange = DurationRange::new(18.0, 6.0);
}

impl Generator for NeonGlow {
    fn preset(&self) -> PresetId {
        PresetId::NeonGlow
    }

    fn duration_range(&self) -> Option<DurationRange> {
        Some(Self::DURATION)
    }

    fn render(&self, ctx: &mut RenderCtx<'_>) -> VisualOutput {
        let base = ctx.settings.duration(Self::DURATION);
        let count = ctx.settings.count_round(5, 5);
        let tones = four_tones(ctx.palette);
        let layout = ctx.layouts.scatter(PresetId::NeonGlow, count);

        let mut scene = Scene::new(ViewBox::Viewport);
        for (i, s) in layout.iter().enumerate() {
            let center = ctx.pct(s.range(0, 10.0, 90.0), s.range(1, 10.0, 90.0));
            let size = s.range(2, 60.0, 180.0);
            let color = tones[i % 4];
            let outline = match NeonShape::for_index(i) {
                NeonShape::Ring => Node::circle(center, size / 2.0).stroke(Stroke::new(color, 2.0)),
                NeonShape::Bar => {
                    Node::rect(Rect::from_center_size(center, (size * 1.5, 3.0))).fill(color)
                }
                NeonShape::Arc => {
                    let arc = kurbo::Arc {
                        center,
                        radii: Vec2::new(size / 2.0, size / 2.0),
                        start_angle: -PI / 2.0,
                        sweep_angle: PI / 2.0,
                        x_rotation: 0.0,
                    };
                    Node::path(kurbo::Shape::to_path(&arc, 0.1))
                        .stroke(Stroke::new(color, 2.0).round())
                }
            };
            let halo = outline.clone().opacity(0.8).blur(12.0);
            let duration = base + s.range(4, 0.0, 6.0);
            let delay = -s.range(3, 0.0, 15.0);
            let drift = match i % 3 {
                0 => Vec2::new(30.0, -20.0),
                1 => Vec2::new(-25.0, 25.0),
                _ => Vec2::new(20.0, 30.0),
            };

            scene.push(
                Node::group(vec![halo, outline])
                    .transform(Affine::rotate_about(s.range(5, 0.0, 2.0 * PI), center))
                    .opacity(0.7)
                    .motion(Motion::drift(drift, duration).delay(delay))
                    .motion(Motion::pulse(1.0, 0.5, duration / 3.0).delay(delay)),
            );
        }
        VisualOutput::Vector(scene)
    }
}

pub struct LightRays;

impl LightRays {
    pub const DURATION: DurationRange = DurationRange::new(25.0, 7.0);
}

impl Generator for LightRays {
    fn preset(&self) -> PresetId {
        PresetId::LightRays
    }

    fn duration_range(&self) -> Option<DurationRange> {
        Some(Self::DURATION)
    }

    fn render(&self, ctx: &mut RenderCtx<'_>) -> VisualOutput {
        let base = ctx.settings.duration(Self::DURATION);
        let count = ctx.settings.count_round(4, 4);
        let tones = four_tones(ctx.palette);
        let layout = ctx.layouts.scatter(PresetId::LightRays, count);
        let reach = ctx.pct(200.0, 200.0);

        let mut scene = Scene::new(ViewBox::Viewport);
        for (i, s) in layout.iter().enumerate() {
            // Beams fan out over about sixty degrees from the top-left corner.
            let start = i as f64 / count as f64 * 60.0 - 10.0;
            let width = s.range(0, 8.0, 23.0);
            let end = start + width;
            let tip = |deg: f64| {
                let (sin, cos) = deg.to_radians().sin_cos();
                (cos * reach.x, sin * reach.y)
            };
            let wedge = polygon(&[(0.0, 0.0), tip(start), tip(end)]);
            let mid = start + width / 2.0;
            let fill = Gradient::linear(mid)
                .stop(0.0, tones[i % 4], 1.0)
                .stop(0.8, tones[i % 4], 0.0);
            let duration = base + s.range(2, 0.0, 8.0);
            let delay = -s.range(1, 0.0, 15.0);

            scene.push(
                Node::path(wedge)
                    .fill(fill)
                    .opacity(s.range(3, 0.5, 0.8))
                    .blur(8.0)
                    .motion(
                        Motion::new(
                            MotionKind::Rotate {
                                from_deg: -3.0,
                                to_deg: 3.0,
                            },
                            duration,
                        )
                        .delay(delay),
                    )
                    .motion(Motion::pulse(1.0, 0.6, duration / 2.0).delay(delay)),
            );
        }
        VisualOutput::Vector(scene)
    }
}

pub struct Fireflies;

impl Fireflies {
    pub const DURATION: DurationRange = DurationRange::new(15.0, 5.0);
}

impl Generator for Fireflies {
    fn preset(&self) -> PresetId {
        PresetId::Fireflies
    }

    fn duration_range(&self) -> Option<DurationRange> {
        Some(Self::DURATION)
    }

    fn render(&self, ctx: &mut RenderCtx<'_>) -> VisualOutput {
        let base = ctx.settings.duration(Self::DURATION);
        let count = ctx.settings.count_floor(20, 40);
        let color = ctx.palette.primary;
        let layout = ctx.layouts.scatter(PresetId::Fireflies, count);

        let mut scene = Scene::new(ViewBox::Viewport);
        for s in layout.iter() {
            let center = ctx.pct(s.u[0] * 100.0, s.u[1] * 100.0);
            let size = s.range(2, 2.0, 6.0);
            let duration = base * s.range(3, 0.8, 1.2);
            let delay = s.range(4, 0.0, 5.0);
            let glow = s.range(5, 1.0, 3.0);
            let wander = Vec2::new(s.u[1] - 0.5, 0.5 - s.u[0]) * 80.0;

            let fly = Node::circle(center, size * 1.5)
                .fill(Gradient::glow(Point::new(0.5, 0.5), 0.5, color, 1.0, 1.0))
                .motion(Motion::pulse(0.2, 1.0, glow / 2.0));
            scene.push(Node::group(vec![fly]).motion(Motion::drift(wander, duration).delay(delay)));
        }
        VisualOutput::Vector(scene)
    }
}

pub struct MatrixRain;

impl MatrixRain {
    pub const DURATION: DurationRange = DurationRange::new(8.0, 2.0);
}

impl Generator for MatrixRain {
    fn preset(&self) -> PresetId {
        PresetId::MatrixRain
    }

    fn duration_range(&self) -> Option<DurationRange> {
        Some(Self::DURATION)
    }

    fn render(&self, ctx: &mut RenderCtx<'_>) -> VisualOutput {
        let base = ctx.settings.duration(Self::DURATION);
        let columns = ctx.settings.count_floor(15, 25);
        let color = ctx.palette.primary;
        let vp = ctx.viewport;
        let layout = ctx.layouts.scatter(PresetId::MatrixRain, columns);
        let trail = vp.height * 0.3;

        let mut scene = Scene::new(ViewBox::Viewport);
        for s in layout.iter() {
            let x = s.u[0] * vp.width;
            let rect = Rect::new(x - 1.0, -trail, x + 1.0, 0.0);
            let fill = Gradient::linear(90.0)
                .stop(0.0, color, 0.0)
                .stop(1.0, color, 1.0);
            scene.push(
                Node::rect(rect)
                    .fill(fill)
                    .opacity(0.5)
                    .motion(
                        Motion::scroll(
                            Vec2::new(0.0, vp.height + trail),
                            base * s.range(2, 0.8, 1.2),
                        )
                        .delay(s.range(1, 0.0, 5.0)),
                    ),
            );
        }
        VisualOutput::Vector(scene)
    }
}

pub struct Constellation;

impl Constellation {
    pub const DURATION: DurationRange = DurationRange::new(15.0, 5.0);
    /// Stars closer than this, in view-box units, are linked.
    pub const LINK_DISTANCE: f64 = 20.0;
}

/// Index pairs `(i, j)`, `i < j`, of points strictly closer than `max`.
pub fn links(points: &[Point], max: f64) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    for i in 0..points.len() {
        for j in i + 1..points.len() {
            if points[i].distance(points[j]) < max {
                out.push((i, j));
            }
        }
    }
    out
}

impl Generator for Constellation {
    fn preset(&self) -> PresetId {
        PresetId::Constellation
    }

    fn duration_range(&self) -> Option<DurationRange> {
        Some(Self::DURATION)
    }

    fn render(&self, ctx: &mut RenderCtx<'_>) -> VisualOutput {
        let duration = ctx.settings.duration(Self::DURATION);
        let count = ctx.settings.count_floor(30, 40);
        let p = ctx.palette;
        let layout = ctx.layouts.scatter(PresetId::Constellation, count);
        let stars: Vec<Point> = layout
            .iter()
            .map(|s| Point::new(s.u[0] * 100.0, s.u[1] * 100.0))
            .collect();

        let line_paint = Gradient {
            shape: GradientShape::Linear {
                start: Point::ZERO,
                end: Point::new(100.0, 0.0),
            },
            units: GradientUnits::UserSpace,
            stops: Vec::new(),
        }
        .stop(0.0, p.primary, 0.3)
        .stop(0.5, p.secondary, 0.2)
        .stop(1.0, p.primary, 0.3);

        let mut children = Vec::new();
        for (i, j) in links(&stars, Self::LINK_DISTANCE) {
            children.push(
                Node::new(Shape::Line {
                    from: stars[i],
                    to: stars[j],
                })
                .stroke(Stroke::new(line_paint.clone(), 0.1)),
            );
        }
        for (star, s) in stars.iter().zip(layout.iter()) {
            let twinkle = s.range(3, 2.0, 5.0);
            children.push(
                Node::circle(*star, s.range(2, 1.0, 4.0) / 20.0)
                    .fill(p.primary)
                    .motion(Motion::pulse(0.3, 0.8, twinkle / 2.0).ease(Ease::Linear)),
            );
        }

        let scene = Scene::new(ViewBox::fixed(100.0, 100.0)).with(
            Node::group(children).motion(
                Motion::drift(Vec2::new(1.5, -1.0), duration).direction(Direction::Alternate),
            ),
        );
        VisualOutput::Vector(scene)
    }
}
