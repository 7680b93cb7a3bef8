//! Looping layered motion: gradient ribbons, blobs, beams, rings and grids.
//!
//! Every generator here stacks a small fixed number of layers and attaches declarative
//! [`Motion`]s to them. Phase offsets are expressed as negative delays so the loop starts
//! mid-cycle instead of all layers moving in lockstep.

use kurbo::{Point, Rect, Vec2};

use crate::generators::{Generator, RenderCtx, VisualOutput, svg_path};
use crate::registry::PresetId;
use crate::scene::{
    Direction, Ease, Fit, Gradient, Motion, MotionKind, Node, PatternTile, Scene, Shape, Stroke,
    ViewBox, polygon,
};
use crate::settings::DurationRange;
use crate::theme::Color;

/// `-(i * duration / n)`: spreads `n` layers evenly over one cycle.
fn stagger(i: usize, n: usize, duration: f64) -> f64 {
    -(i as f64 * duration / n.max(1) as f64)
}

/// CSS `linear-gradient` angle (0 points up, clockwise) to the scene convention.
fn css_angle(deg: f64) -> f64 {
    deg - 90.0
}

pub struct AuroraDrift;

impl AuroraDrift {
    pub const DURATION: DurationRange = DurationRange::new(20.0, 5.0);
}

impl Generator for AuroraDrift {
    fn preset(&self) -> PresetId {
        PresetId::AuroraDrift
    }

    fn duration_range(&self) -> Option<DurationRange> {
        Some(Self::DURATION)
    }

    fn render(&self, ctx: &mut RenderCtx<'_>) -> VisualOutput {
        let duration = ctx.settings.duration(Self::DURATION);
        let ribbons = ctx.settings.count_round(3, 2);
        let p = ctx.palette;
        let vp = ctx.viewport;

        let mut scene = Scene::new(ViewBox::Viewport);
        for i in 0..ribbons {
            let k = i as f64;
            let top = ctx.pct(-25.0, 10.0 + k * 20.0);
            let bottom = ctx.pct(125.0, 10.0 + k * 20.0 + 40.0 - k * 5.0);
            let rect = Rect::from_points(top, bottom);
            let fill = Gradient::linear(css_angle(120.0 + k * 20.0))
                .stop(0.0, p.primary, 1.0)
                .stop(0.5, p.border, 1.0)
                .stop(1.0, p.bg, 1.0);

            scene.push(
                Node::new(Shape::Rect {
                    rect,
                    radius: rect.height() / 2.0,
                })
                .fill(fill)
                .opacity(0.5)
                .blur(40.0)
                .motion(
                    Motion::drift(Vec2::new(vp.width * 0.1, 0.0), duration)
                        .delay(stagger(i, ribbons, duration)),
                )
                .motion(
                    Motion::drift(Vec2::new(0.0, vp.height * 0.05), duration * 1.3 + k * 2.0)
                        .delay(-(k * 2.5)),
                )
                .motion(Motion::pulse(0.6, 1.0, duration * 0.8 + k).delay(-(k * 1.8))),
            );
        }
        VisualOutput::Vector(scene)
    }
}

pub struct FloatingBlobs;

struct Blob {
    slot: usize,
    size: f64,
    x: f64,
    y: f64,
}

const BLOBS: [Blob; 6] = [
    Blob { slot: 0, size: 300.0, x: 20.0, y: 20.0 },
    Blob { slot: 1, size: 250.0, x: 70.0, y: 60.0 },
    Blob { slot: 0, size: 200.0, x: 50.0, y: 30.0 },
    Blob { slot: 2, size: 280.0, x: 80.0, y: 15.0 },
    Blob { slot: 1, size: 220.0, x: 30.0, y: 70.0 },
    Blob { slot: 0, size: 180.0, x: 60.0, y: 80.0 },
];

/// Fixed per-blob jitter, in percent.
const BLOB_OFFSETS: [f64; 6] = [3.7, -2.1, 5.3, -4.8, 1.9, -3.2];

impl FloatingBlobs {
    pub const DURATION: DurationRange = DurationRange::new(25.0, 7.0);
}

impl Generator for FloatingBlobs {
    fn preset(&self) -> PresetId {
        PresetId::FloatingBlobs
    }

    fn duration_range(&self) -> Option<DurationRange> {
        Some(Self::DURATION)
    }

    fn render(&self, ctx: &mut RenderCtx<'_>) -> VisualOutput {
        let duration = ctx.settings.duration(Self::DURATION);
        let count = ctx.settings.count_round(3, 3);
        let p = ctx.palette;
        let slots = [p.primary, p.border, p.muted];

        let mut scene = Scene::new(ViewBox::Viewport);
        for (i, blob) in BLOBS.iter().take(count).enumerate() {
            let k = i as f64;
            let jitter = BLOB_OFFSETS[i % BLOB_OFFSETS.len()];
            let jitter_y = BLOB_OFFSETS[(i + 2) % BLOB_OFFSETS.len()];
            let corner = ctx.pct(blob.x + jitter, blob.y + jitter_y);
            let radius = blob.size / 2.0;
            let center = corner + Vec2::new(radius, radius);
            let wander = Vec2::new(
                BLOB_OFFSETS[(i + 1) % BLOB_OFFSETS.len()],
                BLOB_OFFSETS[(i + 3) % BLOB_OFFSETS.len()],
            ) * 10.0;

            scene.push(
                Node::circle(center, radius)
                    .fill(slots[blob.slot])
                    .opacity(0.35)
                    .blur(40.0)
                    .motion(
                        Motion::drift(wander, duration + k * 3.0)
                            .delay(stagger(i, count, duration)),
                    )
                    .motion(
                        Motion::breathe(1.0, 1.15, center, duration * 0.6 + k * 4.0)
                            .delay(-(k * 3.2)),
                    ),
            );
        }
        VisualOutput::Vector(scene)
    }
}

pub struct FlowLines;

const FLOW_PATHS: [&str; 5] = [
    "M0,180 C120,120 280,240 500,180 C720,120 880,240 1000,180",
    "M0,340 C180,280 320,400 500,340 C680,280 820,400 1000,340",
    "M0,500 C100,430 380,570 500,500 C620,430 900,570 1000,500",
    "M0,100 C200,40 350,160 500,100 C650,40 800,160 1000,100",
    "M0,660 C150,590 340,730 500,660 C660,590 850,730 1000,660",
];

/// Dash pattern of the main stroke; one scroll cycle moves ten periods.
const FLOW_DASH: [f64; 2] = [16.0, 10.0];

impl FlowLines {
    pub const DURATION: DurationRange = DurationRange::new(28.0, 10.0);
}

impl Generator for FlowLines {
    fn preset(&self) -> PresetId {
        PresetId::FlowLines
    }

    fn duration_range(&self) -> Option<DurationRange> {
        Some(Self::DURATION)
    }

    fn render(&self, ctx: &mut RenderCtx<'_>) -> VisualOutput {
        let base = ctx.settings.duration(Self::DURATION);
        let lines = ctx.settings.count_round(3, 2);
        let p = ctx.palette;
        let colors = [p.primary, p.border, p.muted, p.primary, p.border];
        let period: f64 = FLOW_DASH.iter().sum();

        let mut scene = Scene::new(ViewBox::fixed(1000.0, 800.0));
        for (i, d) in FLOW_PATHS.iter().take(lines).enumerate() {
            let k = i as f64;
            let path = svg_path(d);
            let glow = Node::path(path.clone())
                .stroke(Stroke::new(colors[i].with_alpha(0.08), 6.0).round());
            let dash = Motion::new(
                MotionKind::DashOffset {
                    from: 0.0,
                    to: -period * 10.0,
                },
                base * 1.5 + k * 3.0,
            )
            .ease(Ease::Linear)
            .direction(Direction::Normal);
            let main = Node::path(path)
                .stroke(Stroke::new(colors[i].with_alpha(0.35), 1.5).dashed(FLOW_DASH))
                .motion(dash);
            let sway = if i % 2 == 0 { 20.0 } else { -20.0 };

            scene.push(
                Node::group(vec![glow, main])
                    .motion(Motion::drift(Vec2::new(0.0, sway), base + k * 4.0)),
            );
        }
        VisualOutput::Vector(scene)
    }
}

pub struct Waves;

const WAVE_PATHS: [&str; 3] = [
    "M0,100 C300,150 600,50 900,100 C1050,125 1200,75 1200,75 L1200,300 L0,300 Z",
    "M0,150 C300,100 600,180 900,140 C1050,120 1200,160 1200,160 L1200,300 L0,300 Z",
    "M0,200 C300,180 600,220 900,200 C1050,190 1200,210 1200,210 L1200,300 L0,300 Z",
];

impl Waves {
    pub const DURATION: DurationRange = DurationRange::new(20.0, 5.0);
}

impl Generator for Waves {
    fn preset(&self) -> PresetId {
        PresetId::Waves
    }

    fn duration_range(&self) -> Option<DurationRange> {
        Some(Self::DURATION)
    }

    fn render(&self, ctx: &mut RenderCtx<'_>) -> VisualOutput {
        let duration = ctx.settings.duration(Self::DURATION);
        let op = ctx.settings.by_density(0.15, 0.40);
        let p = ctx.palette;

        let gradients = [
            Gradient::linear(0.0)
                .stop(0.0, p.primary, op)
                .stop(0.5, p.secondary, op * 0.7)
                .stop(1.0, p.primary, op),
            Gradient::linear(0.0)
                .stop(0.0, p.secondary, op * 0.6)
                .stop(1.0, p.border, op * 0.5),
            Gradient::linear(0.0)
                .stop(0.0, p.primary, op * 0.4)
                .stop(1.0, p.muted, op * 0.3),
        ];
        let factors = [1.0, 1.3, 1.7];

        let mut scene = Scene::new(ViewBox::fixed(1200.0, 300.0));
        for (i, (d, fill)) in WAVE_PATHS.iter().zip(gradients).enumerate() {
            // Bob downwards only; an upward shift would open a gap along the bottom edge.
            let bob = Vec2::new(0.0, 15.0 + 5.0 * i as f64);
            scene.push(
                Node::path(svg_path(d))
                    .fill(fill)
                    .motion(Motion::drift(bob, duration * factors[i])),
            );
        }
        VisualOutput::Vector(scene)
    }
}

pub struct Shimmer;

impl Shimmer {
    pub const DURATION: DurationRange = DurationRange::new(8.0, 3.0);
}

impl Generator for Shimmer {
    fn preset(&self) -> PresetId {
        PresetId::Shimmer
    }

    fn duration_range(&self) -> Option<DurationRange> {
        Some(Self::DURATION)
    }

    fn render(&self, ctx: &mut RenderCtx<'_>) -> VisualOutput {
        let duration = ctx.settings.duration(Self::DURATION);
        let op = ctx.settings.by_density(0.10, 0.30);
        let p = ctx.palette;
        let vp = ctx.viewport;
        let beams = [(p.primary, 1.0, 1.0), (p.secondary, 1.4, 0.8), (p.border, 1.8, 0.6)];

        let mut scene = Scene::new(ViewBox::Viewport);
        for (i, (color, slow, dim)) in beams.into_iter().enumerate() {
            let width = vp.width * (0.15 - 0.03 * i as f64);
            let rect = Rect::new(-width, -vp.height * 0.5, 0.0, vp.height * 1.5);
            let pivot = rect.center();
            let fill = Gradient::linear(0.0)
                .stop(0.0, color, 0.0)
                .stop(0.5, color, 1.0)
                .stop(1.0, color, 0.0);
            let beam = Node::rect(rect)
                .fill(fill)
                .transform(kurbo::Affine::rotate_about(20f64.to_radians(), pivot));
            scene.push(
                Node::group(vec![beam]).opacity(op * dim).motion(
                    Motion::scroll(Vec2::new(vp.width + 2.0 * width, 0.0), duration * slow)
                        .ease(Ease::InOutQuad)
                        .delay(-(i as f64) * duration / 3.0),
                ),
            );
        }
        VisualOutput::Vector(scene)
    }
}

pub struct Ripples;

impl Ripples {
    pub const DURATION: DurationRange = DurationRange::new(6.0, 2.0);
}

impl Generator for Ripples {
    fn preset(&self) -> PresetId {
        PresetId::Ripples
    }

    fn duration_range(&self) -> Option<DurationRange> {
        Some(Self::DURATION)
    }

    fn render(&self, ctx: &mut RenderCtx<'_>) -> VisualOutput {
        let duration = ctx.settings.duration(Self::DURATION);
        let count = ctx.settings.count_floor(3, 3);
        let op = ctx.settings.by_density(0.10, 0.25);
        let center = ctx.pct(50.0, 50.0);
        let radius = ctx.viewport.width.max(ctx.viewport.height) * 0.6;
        let color = ctx.palette.primary;

        let mut scene = Scene::new(ViewBox::Viewport);
        for i in 0..count {
            let delay = stagger(i, count, duration);
            scene.push(
                Node::circle(center, radius)
                    .stroke(Stroke::new(color, 2.0))
                    .opacity(op)
                    .motion(expand(center, 0.05, duration).delay(delay))
                    .motion(fade_out(1.0, duration).delay(delay)),
            );
        }
        VisualOutput::Vector(scene)
    }
}

/// One-way linear growth from `from` to full size.
fn expand(center: Point, from: f64, duration: f64) -> Motion {
    Motion::breathe(from, 1.0, center, duration)
        .ease(Ease::OutQuad)
        .direction(Direction::Normal)
}

fn fade_out(from: f64, duration: f64) -> Motion {
    Motion::pulse(from, 0.0, duration)
        .ease(Ease::Linear)
        .direction(Direction::Normal)
}

pub struct AuroraWaves;

impl AuroraWaves {
    pub const DURATION: DurationRange = DurationRange::new(12.0, 4.0);
}

impl Generator for AuroraWaves {
    fn preset(&self) -> PresetId {
        PresetId::AuroraWaves
    }

    fn duration_range(&self) -> Option<DurationRange> {
        Some(Self::DURATION)
    }

    fn render(&self, ctx: &mut RenderCtx<'_>) -> VisualOutput {
        let duration = ctx.settings.duration(Self::DURATION);
        let op = ctx.settings.by_density(0.15, 0.40);
        let p = ctx.palette;
        let vp = ctx.viewport;
        let waves = [(p.primary, 1.0, 1.0), (p.secondary, 1.3, 0.8), (p.border, 1.7, 0.6)];

        let mut scene = Scene::new(ViewBox::Viewport);
        for (i, (color, slow, dim)) in waves.into_iter().enumerate() {
            let top = 10.0 + 20.0 * i as f64;
            let rect = Rect::from_points(ctx.pct(-20.0, top), ctx.pct(120.0, top + 60.0));
            let fill = Gradient::linear(90.0)
                .stop(0.0, color, 0.0)
                .stop(0.5, color, 1.0)
                .stop(1.0, color, 0.0);
            let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
            scene.push(
                Node::rect(rect)
                    .fill(fill)
                    .opacity(op * dim)
                    .blur(30.0)
                    .motion(Motion::drift(
                        Vec2::new(sign * vp.width * 0.1, -vp.height * 0.05),
                        duration * slow,
                    ))
                    .motion(Motion::breathe(1.0, 1.1, rect.center(), duration * slow * 0.5)),
            );
        }
        VisualOutput::Vector(scene)
    }
}

pub struct Plasma;

impl Plasma {
    pub const DURATION: DurationRange = DurationRange::new(10.0, 4.0);
}

impl Generator for Plasma {
    fn preset(&self) -> PresetId {
        PresetId::Plasma
    }

    fn duration_range(&self) -> Option<DurationRange> {
        Some(Self::DURATION)
    }

    fn render(&self, ctx: &mut RenderCtx<'_>) -> VisualOutput {
        let duration = ctx.settings.duration(Self::DURATION);
        let op = ctx.settings.by_density(0.20, 0.50);
        let p = ctx.palette;
        let vp = ctx.viewport;
        let radius = vp.width.min(vp.height) * 0.35;
        // 50px on a full-size container, shrinking with the blobs on small previews.
        let softness = (radius * 0.2).min(50.0);
        let blobs = [
            (p.primary, (30.0, 30.0), (15.0, 10.0), 1.0, 1.0),
            (p.secondary, (70.0, 40.0), (-12.0, 15.0), 1.4, 0.9),
            (p.border, (40.0, 70.0), (10.0, -15.0), 1.8, 0.8),
            (p.muted, (65.0, 70.0), (-15.0, -10.0), 2.2, 0.7),
        ];

        let mut scene = Scene::new(ViewBox::Viewport);
        for (color, at, shift, slow, dim) in blobs {
            let center = ctx.pct(at.0, at.1);
            let offset = ctx.pct(shift.0, shift.1).to_vec2();
            scene.push(
                Node::circle(center, radius)
                    .fill(Gradient::glow(Point::new(0.5, 0.5), 0.5, color, 1.0, 1.0))
                    .opacity(op * dim)
                    .blur(softness)
                    .motion(Motion::drift(offset, duration * slow))
                    .motion(Motion::breathe(1.0, 1.3, center, duration * slow * 0.7)),
            );
        }
        VisualOutput::Vector(scene)
    }
}

pub struct PulseRings;

impl PulseRings {
    pub const DURATION: DurationRange = DurationRange::new(4.0, 2.0);
}

impl Generator for PulseRings {
    fn preset(&self) -> PresetId {
        PresetId::PulseRings
    }

    fn duration_range(&self) -> Option<DurationRange> {
        Some(Self::DURATION)
    }

    fn render(&self, ctx: &mut RenderCtx<'_>) -> VisualOutput {
        let duration = ctx.settings.duration(Self::DURATION);
        let count = ctx.settings.count_floor(4, 4);
        let center = ctx.pct(50.0, 50.0);
        let radius = ctx.viewport.width.min(ctx.viewport.height) * 0.45;
        let color = ctx.palette.border;

        let mut scene = Scene::new(ViewBox::Viewport);
        for i in 0..count {
            let delay = stagger(i, count, duration);
            scene.push(
                Node::circle(center, radius)
                    .stroke(Stroke::new(color, 1.5))
                    .motion(expand(center, 0.1, duration).delay(delay))
                    .motion(fade_out(0.5, duration).delay(delay)),
            );
        }
        VisualOutput::Vector(scene)
    }
}

pub struct GradientWash;

impl GradientWash {
    pub const DURATION: DurationRange = DurationRange::new(20.0, 6.0);
}

impl Generator for GradientWash {
    fn preset(&self) -> PresetId {
        PresetId::GradientWash
    }

    fn duration_range(&self) -> Option<DurationRange> {
        Some(Self::DURATION)
    }

    fn render(&self, ctx: &mut RenderCtx<'_>) -> VisualOutput {
        let duration = ctx.settings.duration(Self::DURATION);
        let p = ctx.palette;
        let center = ctx.pct(50.0, 50.0);
        // A square circumscribing the viewport's circumcircle covers it at every rotation.
        let half = ctx.viewport.width.hypot(ctx.viewport.height) / 2.0;
        let rect = Rect::from_center_size(center, (half * 2.0, half * 2.0));
        let fill = Gradient::linear(css_angle(45.0))
            .stop(0.0, p.primary, 1.0)
            .stop(0.35, p.secondary, 1.0)
            .stop(0.7, p.border, 1.0)
            .stop(1.0, p.primary, 1.0);

        VisualOutput::Vector(
            Scene::new(ViewBox::Viewport).with(
                Node::rect(rect)
                    .fill(fill)
                    .opacity(0.35)
                    .motion(Motion::spin(center, duration)),
            ),
        )
    }
}

pub struct ColorBands;

impl ColorBands {
    pub const DURATION: DurationRange = DurationRange::new(15.0, 5.0);

    /// Stripe width in pixels, `80` at zero density down to `40`.
    pub fn stripe_width(density_unit: f64) -> f64 {
        80.0 - density_unit.clamp(0.0, 1.0) * 40.0
    }
}

impl Generator for ColorBands {
    fn preset(&self) -> PresetId {
        PresetId::ColorBands
    }

    fn duration_range(&self) -> Option<DurationRange> {
        Some(Self::DURATION)
    }

    fn render(&self, ctx: &mut RenderCtx<'_>) -> VisualOutput {
        let duration = ctx.settings.duration(Self::DURATION);
        let stripe = Self::stripe_width(ctx.settings.density_unit());
        let p = ctx.palette;
        // Four stripes per period, measured along the diagonal.
        let tile = stripe * 4.0 * std::f64::consts::SQRT_2;
        let band = stripe * std::f64::consts::SQRT_2;

        // Bands are strips `a <= x + y <= b`, long enough to cross the whole tile.
        let strip = |a: f64, b: f64| {
            polygon(&[
                (a + tile, -tile),
                (b + tile, -tile),
                (b - 2.0 * tile, 2.0 * tile),
                (a - 2.0 * tile, 2.0 * tile),
            ])
        };
        let mut children = Vec::with_capacity(4);
        for k in 0..2 {
            let base = k as f64 * tile;
            children.push(Node::path(strip(base, base + band)).fill(p.primary));
            children
                .push(Node::path(strip(base + 2.0 * band, base + 3.0 * band)).fill(p.secondary));
        }
        let pattern = PatternTile {
            size: kurbo::Size::new(tile, tile),
            children,
        };
        let vp = ctx.viewport;
        let rect = Rect::new(-tile, 0.0, vp.width, vp.height);

        VisualOutput::Vector(
            Scene::new(ViewBox::Viewport).with(
                Node::rect(rect)
                    .fill(pattern)
                    .opacity(0.15)
                    .motion(Motion::scroll(Vec2::new(tile, 0.0), duration)),
            ),
        )
    }
}

pub struct GridPulse;

impl GridPulse {
    pub const DURATION: DurationRange = DurationRange::new(8.0, 3.0);

    /// Onset delay of the cell at `(col, row)`: proportional to its distance from the grid
    /// center, reaching `0.8 * duration` at the farthest point.
    pub fn cell_delay(col: usize, row: usize, cols: usize, rows: usize, duration: f64) -> f64 {
        let (cx, cy) = (cols as f64 / 2.0, rows as f64 / 2.0);
        let max = cx.hypot(cy);
        if max <= 0.0 {
            return 0.0;
        }
        let dist = (col as f64 - cx).hypot(row as f64 - cy);
        dist / max * duration * 0.8
    }
}

impl Generator for GridPulse {
    fn preset(&self) -> PresetId {
        PresetId::GridPulse
    }

    fn duration_range(&self) -> Option<DurationRange> {
        Some(Self::DURATION)
    }

    fn render(&self, ctx: &mut RenderCtx<'_>) -> VisualOutput {
        let duration = ctx.settings.duration(Self::DURATION);
        let cols = ctx.settings.count_round(8, 8);
        let rows = ctx.settings.count_round(6, 6);
        let color: Color = ctx.palette.primary;

        let mut scene = Scene::new(ViewBox::Fixed {
            width: cols as f64,
            height: rows as f64,
            fit: Fit::Stretch,
        });
        for r in 0..rows {
            for c in 0..cols {
                let rect = Rect::new(c as f64, r as f64, c as f64 + 0.9, r as f64 + 0.9);
                scene.push(
                    Node::new(Shape::Rect { rect, radius: 0.1 })
                        .fill(color)
                        .motion(
                            Motion::pulse(0.05, 0.35, duration)
                                .delay(Self::cell_delay(c, r, cols, rows, duration)),
                        ),
                );
            }
        }
        VisualOutput::Vector(scene)
    }
}
