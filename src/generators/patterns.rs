//! Static procedural SVG patterns, plus the rotating spiral that shares their construction.

use std::f64::consts::PI;

use kurbo::{Affine, BezPath, Point, Rect, Size};

use crate::generators::{Generator, RenderCtx, VisualOutput, svg_path};
use crate::registry::PresetId;
use crate::scene::{
    Fit, Gradient, GradientShape, GradientUnits, Motion, Node, PatternTile, Scene, Shape, Stroke,
    ViewBox, polygon,
};
use crate::settings::DurationRange;

pub struct TopoLines;

/// Contour paths in a 1000x800 view box: `(d, palette slot, width, opacity factor)`.
const TOPO_CONTOURS: [(&str, u8, f64, f64); 7] = [
    (
        "M100,200 C200,150 300,250 400,200 C500,150 600,250 700,200 C800,150 900,250 1000,200",
        0,
        1.0,
        1.0,
    ),
    (
        "M0,300 C100,270 250,330 350,300 C450,270 600,330 700,300 C800,270 900,330 1000,300",
        1,
        1.0,
        1.0,
    ),
    (
        "M50,400 C150,370 280,430 380,400 C480,370 580,430 750,400 C850,370 950,430 1000,400",
        2,
        1.0,
        1.0,
    ),
    (
        "M0,500 C120,460 220,540 350,500 C480,460 580,540 720,500 C860,460 950,540 1000,500",
        0,
        1.0,
        1.0,
    ),
    (
        "M80,600 C180,570 300,630 420,600 C540,570 640,630 780,600 C900,570 950,630 1000,600",
        1,
        1.0,
        1.0,
    ),
    (
        "M0,150 C100,120 200,180 350,150 C500,120 650,180 800,150 C900,120 950,180 1000,150",
        2,
        0.8,
        0.7,
    ),
    (
        "M0,700 C150,670 300,730 450,700 C600,670 750,730 900,700",
        0,
        0.8,
        0.7,
    ),
];

impl Generator for TopoLines {
    fn preset(&self) -> PresetId {
        PresetId::TopoLines
    }

    fn render(&self, ctx: &mut RenderCtx<'_>) -> VisualOutput {
        let opacity = ctx.settings.by_density(0.08, 0.20);
        let p = ctx.palette;
        let slots = [p.primary, p.border, p.muted];

        let mut scene = Scene::new(ViewBox::fixed(1000.0, 800.0));
        for (d, slot, width, factor) in TOPO_CONTOURS {
            let color = slots[usize::from(slot)];
            scene.push(
                Node::path(svg_path(d))
                    .stroke(Stroke::new(color.with_alpha(opacity * factor), width)),
            );
        }
        VisualOutput::Vector(scene)
    }
}

pub struct HexagonPattern;

/// Six vertices of a flat-topped hexagon inscribed in a `2r` square.
fn hex_points(r: f64) -> Vec<(f64, f64)> {
    (0..6)
        .map(|i| {
            let a = PI / 3.0 * f64::from(i);
            (r + r * a.cos(), r + r * a.sin())
        })
        .collect()
}

impl Generator for HexagonPattern {
    fn preset(&self) -> PresetId {
        PresetId::HexagonPattern
    }

    fn render(&self, ctx: &mut RenderCtx<'_>) -> VisualOutput {
        let s = &ctx.settings;
        let opacity = s.by_density(0.10, 0.25);
        let hex_size = s.by_density(60.0, 30.0);
        let stroke_width = s.by_density(0.5, 2.0);

        let hex_height = hex_size * 3f64.sqrt();
        let horizontal = hex_size * 1.5;
        let outline = polygon(&hex_points(hex_size / 2.0));

        let tile = PatternTile {
            size: Size::new(horizontal * 2.0, hex_height),
            children: vec![
                Node::path(outline.clone())
                    .stroke(Stroke::new(ctx.palette.primary, stroke_width))
                    .opacity(opacity),
                Node::path(outline)
                    .stroke(Stroke::new(ctx.palette.secondary, stroke_width))
                    .opacity(opacity * 0.7)
                    .transform(Affine::translate((horizontal, hex_height / 2.0))),
            ],
        };

        VisualOutput::Vector(Scene::new(ViewBox::Viewport).with(Node::new(Shape::Cover).fill(tile)))
    }
}

pub struct DotGrid;

/// Dot radius, tile spacing and dot opacity for a density.
pub fn dot_grid_metrics(density_unit: f64) -> (f64, f64, f64) {
    let d = density_unit.clamp(0.0, 1.0);
    (1.0 + d * 2.0, 40.0 - d * 20.0, 0.15 + d * 0.25)
}

impl Generator for DotGrid {
    fn preset(&self) -> PresetId {
        PresetId::DotGrid
    }

    fn render(&self, ctx: &mut RenderCtx<'_>) -> VisualOutput {
        let (radius, spacing, opacity) = dot_grid_metrics(ctx.settings.density_unit());
        let p = ctx.palette;

        let tile = PatternTile {
            size: Size::new(spacing, spacing),
            children: vec![
                Node::circle(Point::new(spacing / 2.0, spacing / 2.0), radius)
                    .fill(p.primary)
                    .opacity(opacity),
            ],
        };
        let fade = Gradient::radial(Point::new(0.5, 0.5), 0.5)
            .stop(0.0, p.primary, 1.0)
            .stop(1.0, p.secondary, 0.5);

        let scene = Scene::new(ViewBox::Viewport)
            .with(Node::new(Shape::Cover).fill(tile))
            .with(Node::new(Shape::Cover).fill(fade).opacity(0.1));
        VisualOutput::Vector(scene)
    }
}

pub struct RadialBurst;

impl Generator for RadialBurst {
    fn preset(&self) -> PresetId {
        PresetId::RadialBurst
    }

    fn render(&self, ctx: &mut RenderCtx<'_>) -> VisualOutput {
        let s = &ctx.settings;
        let opacity = s.by_density(0.08, 0.23);
        let lines = s.count_floor(20, 40);
        let width = s.by_density(0.5, 2.0);
        let p = ctx.palette;
        let center = Point::new(500.0, 500.0);

        // Horizontal lines have a degenerate bounding box, so the ramp spans the view box.
        let ramp = Gradient {
            shape: GradientShape::Linear {
                start: Point::new(0.0, 0.0),
                end: Point::new(1000.0, 0.0),
            },
            units: GradientUnits::UserSpace,
            stops: Vec::new(),
        }
        .stop(0.0, p.primary, opacity)
        .stop(0.5, p.secondary, opacity * 1.5)
        .stop(1.0, p.border, opacity * 0.5);

        let mut scene = Scene::new(ViewBox::Fixed {
            width: 1000.0,
            height: 1000.0,
            fit: Fit::Meet,
        });
        for i in 0..lines {
            let a = (360.0 / lines as f64 * i as f64).to_radians();
            let to = Point::new(center.x + a.cos() * 700.0, center.y + a.sin() * 700.0);
            scene.push(
                Node::new(Shape::Line { from: center, to })
                    .stroke(Stroke::new(ramp.clone(), width))
                    .opacity(opacity),
            );
        }
        scene.push(Node::circle(center, 100.0).fill(p.primary).opacity(opacity * 2.0));
        VisualOutput::Vector(scene)
    }
}

pub struct GeometricShapes;

impl Generator for GeometricShapes {
    fn preset(&self) -> PresetId {
        PresetId::GeometricShapes
    }

    fn render(&self, ctx: &mut RenderCtx<'_>) -> VisualOutput {
        let s = &ctx.settings;
        let op = s.by_density(0.08, 0.20);
        let scale = Affine::scale(s.by_density(0.8, 1.4));
        let p = ctx.palette;

        let scene = Scene::new(ViewBox::Fixed {
            width: 1000.0,
            height: 1000.0,
            fit: Fit::Meet,
        })
        .with(
            Node::path(polygon(&[(100.0, 50.0), (250.0, 250.0), (50.0, 250.0)]))
                .fill(p.primary)
                .opacity(op)
                .transform(scale),
        )
        .with(
            Node::circle(Point::new(850.0, 150.0), 80.0)
                .fill(p.secondary)
                .opacity(op * 0.8)
                .transform(scale),
        )
        .with(
            Node::rect(Rect::new(50.0, 400.0, 200.0, 550.0))
                .fill(p.border)
                .opacity(op * 0.7)
                .transform(
                    Affine::rotate_about(15f64.to_radians(), Point::new(125.0, 475.0)) * scale,
                ),
        )
        .with(
            Node::rect(Rect::new(750.0, 450.0, 870.0, 570.0))
                .fill(p.primary)
                .opacity(op * 0.6)
                .transform(
                    Affine::rotate_about(45f64.to_radians(), Point::new(810.0, 510.0)) * scale,
                ),
        )
        .with(
            Node::path(polygon(&[(450.0, 700.0), (600.0, 900.0), (300.0, 900.0)]))
                .fill(p.muted)
                .opacity(op * 0.5)
                .transform(scale),
        )
        .with(
            Node::path(polygon(&[
                (850.0, 750.0),
                (950.0, 800.0),
                (920.0, 920.0),
                (780.0, 920.0),
                (750.0, 800.0),
            ]))
            .fill(p.secondary)
            .opacity(op * 0.4)
            .transform(scale),
        )
        .with(Node::circle(Point::new(600.0, 200.0), 30.0).fill(p.border).opacity(op * 0.6))
        .with(Node::circle(Point::new(300.0, 650.0), 40.0).fill(p.primary).opacity(op * 0.5))
        .with(Node::circle(Point::new(200.0, 800.0), 25.0).fill(p.secondary).opacity(op * 0.7));
        VisualOutput::Vector(scene)
    }
}

pub struct Spiral;

impl Spiral {
    pub const DURATION: DurationRange = DurationRange::new(20.0, 5.0);
}

impl Generator for Spiral {
    fn preset(&self) -> PresetId {
        PresetId::Spiral
    }

    fn duration_range(&self) -> Option<DurationRange> {
        Some(Self::DURATION)
    }

    fn render(&self, ctx: &mut RenderCtx<'_>) -> VisualOutput {
        let s = &ctx.settings;
        let duration = s.duration(Self::DURATION);
        let arms = s.count_floor(3, 3);
        let p = ctx.palette;
        let center = Point::new(100.0, 100.0);

        let gradient = Gradient::radial(Point::new(0.5, 0.5), 0.5)
            .stop(0.0, p.primary, 0.3)
            .stop(0.5, p.secondary, 0.2)
            .stop(1.0, p.border, 0.1);

        let mut children = Vec::with_capacity(arms + 1);
        for i in 0..arms {
            let a = (360.0 / arms as f64 * i as f64).to_radians();
            let b = a + PI / 2.0;
            let mut arm = BezPath::new();
            arm.move_to(center);
            arm.quad_to(
                (100.0 + 80.0 * a.cos(), 100.0 + 80.0 * a.sin()),
                (100.0 + 150.0 * b.cos(), 100.0 + 150.0 * b.sin()),
            );
            children.push(
                Node::path(arm)
                    .stroke(Stroke::new(gradient.clone(), 20.0).round())
                    .opacity(0.5),
            );
        }
        children.push(Node::circle(center, 15.0).fill(p.primary).opacity(0.4));

        let scene = Scene::new(ViewBox::Fixed {
            width: 200.0,
            height: 200.0,
            fit: Fit::Slice,
        })
        .with(Node::group(children).motion(Motion::spin(center, duration)));
        VisualOutput::Vector(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::LayoutCache;
    use crate::settings::BackgroundSettings;
    use crate::theme::ThemePalette;

    fn render(g: &dyn Generator, density: f64) -> Scene {
        let palette = ThemePalette::default();
        let mut layouts = LayoutCache::new();
        let settings = BackgroundSettings {
            density,
            ..BackgroundSettings::DEFAULT
        };
        let mut ctx = RenderCtx::new(settings, &palette, Size::new(800.0, 600.0), &mut layouts);
        match g.render(&mut ctx) {
            VisualOutput::Vector(scene) => scene,
            VisualOutput::Canvas(_) => panic!("pattern generators are vector"),
        }
    }

    #[test]
    fn topo_contours_all_parse() {
        for (d, ..) in TOPO_CONTOURS {
            assert!(BezPath::from_svg(d).is_ok(), "{d}");
        }
        assert_eq!(render(&TopoLines, 50.0).nodes.len(), 7);
    }

    #[test]
    fn tilted_shapes_turn_about_their_own_centers() {
        let scene = render(&GeometricShapes, 0.0);
        for (node, center, deg) in [
            (&scene.nodes[2], Point::new(125.0, 475.0), 15f64),
            (&scene.nodes[3], Point::new(810.0, 510.0), 45f64),
        ] {
            let fixed = node.transform * Point::new(center.x / 0.8, center.y / 0.8);
            assert!((fixed - center).hypot() < 1e-9, "{fixed:?}");
            let [a, b, ..] = node.transform.as_coeffs();
            assert!((b.atan2(a).to_degrees() - deg).abs() < 1e-9);
        }
    }

    #[test]
    fn dot_grid_metrics_span_documented_bounds() {
        assert_eq!(dot_grid_metrics(0.0), (1.0, 40.0, 0.15));
        let (r, spacing, op) = dot_grid_metrics(1.0);
        assert_eq!((r, spacing), (3.0, 20.0));
        assert!((op - 0.4).abs() < 1e-12);
    }

    #[test]
    fn radial_burst_line_count_follows_density() {
        let count_lines = |scene: &Scene| {
            scene
                .nodes
                .iter()
                .filter(|n| matches!(n.shape, Shape::Line { .. }))
                .count()
        };
        assert_eq!(count_lines(&render(&RadialBurst, 0.0)), 20);
        assert_eq!(count_lines(&render(&RadialBurst, 100.0)), 60);
    }

    #[test]
    fn hexagon_tile_matches_size() {
        let scene = render(&HexagonPattern, 100.0);
        let Some(crate::scene::Paint::Pattern(tile)) = &scene.nodes[0].fill else {
            panic!("hexagons are a pattern fill");
        };
        assert!((tile.size.width - 90.0).abs() < 1e-9);
        assert!((tile.size.height - 30.0 * 3f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn spiral_arms_follow_density() {
        let scene = render(&Spiral, 100.0);
        assert_eq!(scene.nodes[0].children().len(), 6 + 1);
        assert!(scene.is_animated());
    }
}
