use std::fmt::Write as _;

use kurbo::{Affine, Rect, Size};

use crate::scene::model::{
    Gradient, GradientShape, GradientUnits, LineCap, Node, Paint, PatternTile, Scene, Shape,
    Stroke, ViewBox,
};
use crate::scene::motion::{Direction, Motion, MotionKind};

/// Serialize `scene` as a standalone SVG document sized to `viewport`.
///
/// Motions become CSS keyframe animations in an embedded `<style>`, one wrapping `<g>` per
/// motion. Definition ids are assigned in document order, so equal scenes serialize to equal
/// bytes.
pub fn to_svg(scene: &Scene, viewport: Size) -> String {
    to_svg_styled(scene, viewport, "")
}

/// [`to_svg`] with an inline `style` on the root element. An empty style is omitted.
pub fn to_svg_styled(scene: &Scene, viewport: Size, root_style: &str) -> String {
    let cover = match scene.view_box {
        ViewBox::Viewport => Rect::from_origin_size((0.0, 0.0), viewport),
        ViewBox::Fixed { width, height, .. } => Rect::new(0.0, 0.0, width, height),
    };
    let mut w = SvgWriter {
        defs: String::new(),
        style: String::new(),
        next_id: 0,
        cover,
    };

    let mut body = String::new();
    for node in &scene.nodes {
        w.node(&mut body, node);
    }

    let mut out = String::with_capacity(body.len() + w.defs.len() + w.style.len() + 256);
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{vw}" height="{vh}" viewBox="0 0 {vw} {vh}" preserveAspectRatio="none""#,
        vw = num(viewport.width),
        vh = num(viewport.height),
    );
    if !root_style.is_empty() {
        let _ = write!(out, r#" style="{}""#, escape_attr(root_style));
    }
    out.push('>');
    if !w.defs.is_empty() {
        let _ = write!(out, "<defs>{}</defs>", w.defs);
    }
    if !w.style.is_empty() {
        let _ = write!(out, "<style>{}</style>", w.style);
    }
    let root = scene.view_box.to_viewport(viewport);
    if root == Affine::IDENTITY {
        out.push_str(&body);
    } else {
        let _ = write!(out, r#"<g transform="{}">{body}</g>"#, matrix(root));
    }
    out.push_str("</svg>");
    out
}

struct SvgWriter {
    defs: String,
    style: String,
    next_id: usize,
    cover: Rect,
}

impl SvgWriter {
    /// Bounds of `node` in its own user space, stroke included.
    fn local_bounds(&self, node: &Node) -> Rect {
        let fill = match &node.shape {
            Shape::Rect { rect, .. } => *rect,
            Shape::Circle { center, radius } => {
                Rect::from_center_size(*center, (2.0 * radius, 2.0 * radius))
            }
            Shape::Ellipse { center, radii } => {
                Rect::from_center_size(*center, (2.0 * radii.x, 2.0 * radii.y))
            }
            Shape::Line { from, to } => Rect::from_points(*from, *to),
            Shape::Path(path) => kurbo::Shape::bounding_box(path),
            Shape::Group(children) => children
                .iter()
                .map(|child| child.transform.transform_rect_bbox(self.local_bounds(child)))
                .reduce(|a, b| a.union(b))
                .unwrap_or(Rect::ZERO),
            Shape::Cover | Shape::Noise { .. } => self.cover,
        };
        let half = node.stroke.as_ref().map_or(0.0, |s| s.width / 2.0);
        fill.inflate(half, half)
    }

    fn id(&mut self, prefix: &str) -> String {
        let id = format!("bd-{prefix}{}", self.next_id);
        self.next_id += 1;
        id
    }

    fn node(&mut self, out: &mut String, node: &Node) {
        for motion in &node.motions {
            let class = self.motion_class(motion);
            let _ = write!(out, r#"<g class="{class}">"#);
        }

        let mut attrs = String::new();
        if node.transform != Affine::IDENTITY {
            let _ = write!(attrs, r#" transform="{}""#, matrix(node.transform));
        }
        if node.opacity < 1.0 {
            let _ = write!(attrs, r#" opacity="{}""#, num(node.opacity));
        }
        if let Some(std_dev) = node.blur
            && !matches!(node.shape, Shape::Noise { .. })
        {
            let id = self.id("f");
            // The region must hold the whole 3-sigma falloff, whatever the shape's size.
            let region = self.local_bounds(node).inflate(3.0 * std_dev, 3.0 * std_dev);
            let _ = write!(
                self.defs,
                r#"<filter id="{id}" filterUnits="userSpaceOnUse" x="{}" y="{}" width="{}" height="{}"><feGaussianBlur stdDeviation="{}"/></filter>"#,
                num(region.x0),
                num(region.y0),
                num(region.width()),
                num(region.height()),
                num(std_dev)
            );
            let _ = write!(attrs, r#" filter="url(#{id})""#);
        }
        match &node.fill {
            Some(paint) => {
                let (value, alpha) = self.paint(paint);
                let _ = write!(attrs, r#" fill="{value}""#);
                if let Some(a) = alpha {
                    let _ = write!(attrs, r#" fill-opacity="{}""#, num(a));
                }
            }
            None if !matches!(node.shape, Shape::Group(_)) => attrs.push_str(r#" fill="none""#),
            None => {}
        }
        if let Some(stroke) = &node.stroke {
            self.stroke_attrs(&mut attrs, stroke);
        }

        match &node.shape {
            Shape::Rect { rect, radius } => {
                let _ = write!(
                    out,
                    r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                    num(rect.x0),
                    num(rect.y0),
                    num(rect.width()),
                    num(rect.height())
                );
                if *radius > 0.0 {
                    let _ = write!(out, r#" rx="{r}" ry="{r}""#, r = num(*radius));
                }
                let _ = write!(out, "{attrs}/>");
            }
            Shape::Circle { center, radius } => {
                let _ = write!(
                    out,
                    r#"<circle cx="{}" cy="{}" r="{}"{attrs}/>"#,
                    num(center.x),
                    num(center.y),
                    num(*radius)
                );
            }
            Shape::Ellipse { center, radii } => {
                let _ = write!(
                    out,
                    r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}"{attrs}/>"#,
                    num(center.x),
                    num(center.y),
                    num(radii.x),
                    num(radii.y)
                );
            }
            Shape::Line { from, to } => {
                let _ = write!(
                    out,
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{attrs}/>"#,
                    num(from.x),
                    num(from.y),
                    num(to.x),
                    num(to.y)
                );
            }
            Shape::Path(path) => {
                let _ = write!(out, r#"<path d="{}"{attrs}/>"#, path.to_svg());
            }
            Shape::Group(children) => {
                let _ = write!(out, "<g{attrs}>");
                for child in children {
                    self.node(out, child);
                }
                out.push_str("</g>");
            }
            Shape::Cover => {
                let c = self.cover;
                let _ = write!(
                    out,
                    r#"<rect x="{}" y="{}" width="{}" height="{}"{attrs}/>"#,
                    num(c.x0),
                    num(c.y0),
                    num(c.width()),
                    num(c.height())
                );
            }
            Shape::Noise {
                base_frequency,
                octaves,
            } => {
                let id = self.id("n");
                let _ = write!(
                    self.defs,
                    r#"<filter id="{id}" x="0" y="0" width="100%" height="100%"><feTurbulence type="fractalNoise" baseFrequency="{}" numOctaves="{octaves}" stitchTiles="stitch"/></filter>"#,
                    num(*base_frequency)
                );
                let c = self.cover;
                let _ = write!(
                    out,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" filter="url(#{id})"{attrs}/>"#,
                    num(c.x0),
                    num(c.y0),
                    num(c.width()),
                    num(c.height())
                );
            }
        }

        for _ in &node.motions {
            out.push_str("</g>");
        }
    }

    fn stroke_attrs(&mut self, attrs: &mut String, stroke: &Stroke) {
        let (value, alpha) = self.paint(&stroke.paint);
        let _ = write!(
            attrs,
            r#" stroke="{value}" stroke-width="{}""#,
            num(stroke.width)
        );
        if let Some(a) = alpha {
            let _ = write!(attrs, r#" stroke-opacity="{}""#, num(a));
        }
        if stroke.cap == LineCap::Round {
            attrs.push_str(r#" stroke-linecap="round""#);
        }
        if let Some(dash) = &stroke.dash {
            let list: Vec<String> = dash.iter().map(|d| num(*d)).collect();
            let _ = write!(attrs, r#" stroke-dasharray="{}""#, list.join(" "));
        }
        if stroke.dash_offset != 0.0 {
            let _ = write!(attrs, r#" stroke-dashoffset="{}""#, num(stroke.dash_offset));
        }
    }

    /// Attribute value for `paint`, plus a separate opacity for translucent solid colors.
    fn paint(&mut self, paint: &Paint) -> (String, Option<f64>) {
        match paint {
            Paint::Solid(c) => {
                let alpha = (c.a < 1.0).then_some(c.a.clamp(0.0, 1.0));
                (c.to_hex_rgb(), alpha)
            }
            Paint::Gradient(g) => (format!("url(#{})", self.gradient(g)), None),
            Paint::Pattern(p) => (format!("url(#{})", self.pattern(p)), None),
        }
    }

    fn gradient(&mut self, g: &Gradient) -> String {
        let id = self.id("g");
        let units = match g.units {
            GradientUnits::BoundingBox => "objectBoundingBox",
            GradientUnits::UserSpace => "userSpaceOnUse",
        };
        let mut def = String::new();
        let close = match g.shape {
            GradientShape::Linear { start, end } => {
                let _ = write!(
                    def,
                    r#"<linearGradient id="{id}" gradientUnits="{units}" x1="{}" y1="{}" x2="{}" y2="{}">"#,
                    num(start.x),
                    num(start.y),
                    num(end.x),
                    num(end.y)
                );
                "</linearGradient>"
            }
            GradientShape::Radial { center, radius } => {
                let _ = write!(
                    def,
                    r#"<radialGradient id="{id}" gradientUnits="{units}" cx="{}" cy="{}" r="{}">"#,
                    num(center.x),
                    num(center.y),
                    num(radius)
                );
                "</radialGradient>"
            }
        };
        for stop in &g.stops {
            let _ = write!(
                def,
                r#"<stop offset="{}" stop-color="{}" stop-opacity="{}"/>"#,
                num(stop.offset),
                stop.color.to_hex_rgb(),
                num(stop.opacity * stop.color.a.clamp(0.0, 1.0))
            );
        }
        def.push_str(close);
        self.defs.push_str(&def);
        id
    }

    fn pattern(&mut self, p: &PatternTile) -> String {
        let id = self.id("p");
        let mut body = String::new();
        for child in &p.children {
            self.node(&mut body, child);
        }
        let _ = write!(
            self.defs,
            r#"<pattern id="{id}" patternUnits="userSpaceOnUse" width="{}" height="{}">{body}</pattern>"#,
            num(p.size.width),
            num(p.size.height)
        );
        id
    }

    fn motion_class(&mut self, m: &Motion) -> String {
        let class = self.id("m");
        let (from, to) = match m.kind {
            MotionKind::Translate { from, to } => (
                format!("transform: translate({}px, {}px)", num(from.x), num(from.y)),
                format!("transform: translate({}px, {}px)", num(to.x), num(to.y)),
            ),
            MotionKind::Scale { from, to } => (
                format!("transform: scale({})", num(from)),
                format!("transform: scale({})", num(to)),
            ),
            MotionKind::Rotate { from_deg, to_deg } => (
                format!("transform: rotate({}deg)", num(from_deg)),
                format!("transform: rotate({}deg)", num(to_deg)),
            ),
            MotionKind::Fade { from, to } => (
                format!("opacity: {}", num(from)),
                format!("opacity: {}", num(to)),
            ),
            MotionKind::DashOffset { from, to } => (
                format!("stroke-dashoffset: {}", num(from)),
                format!("stroke-dashoffset: {}", num(to)),
            ),
        };
        let direction = match m.direction {
            Direction::Normal => "normal",
            Direction::Alternate => "alternate",
        };
        let _ = write!(
            self.style,
            "@keyframes {class}-k {{ from {{ {from}; }} to {{ {to}; }} }} \
             .{class} {{ transform-box: view-box; transform-origin: {}px {}px; \
             animation: {class}-k {}s {} {}s infinite {direction} backwards; }} ",
            num(m.origin.x),
            num(m.origin.y),
            num(m.duration_s),
            m.ease.css(),
            num(m.delay_s),
        );
        class
    }
}

fn matrix(a: Affine) -> String {
    let c = a.as_coeffs();
    format!(
        "matrix({} {} {} {} {} {})",
        num(c[0]),
        num(c[1]),
        num(c[2]),
        num(c[3]),
        num(c[4]),
        num(c[5])
    )
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;").replace('"', "&quot;").replace('<', "&lt;")
}

/// Compact decimal with at most three fractional digits.
fn num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_owned();
    }
    let r = (v * 1000.0).round() / 1000.0;
    if r == r.trunc() {
        format!("{}", r as i64)
    } else {
        format!("{r}")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/svg.rs"]
mod tests;
