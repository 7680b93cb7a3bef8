use kurbo::{Affine, BezPath, Point, Rect, Size, Vec2};

use crate::scene::motion::{Motion, MotionSample};
use crate::theme::Color;

/// How scene coordinates map onto the host container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewBox {
    /// Scene units are container pixels.
    Viewport,
    /// A fixed user coordinate system fitted to the container.
    Fixed { width: f64, height: f64, fit: Fit },
}

/// `preserveAspectRatio` policy for [`ViewBox::Fixed`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fit {
    /// Scale each axis independently (`none`).
    Stretch,
    /// Uniform scale, fully visible, centered (`xMidYMid meet`).
    Meet,
    /// Uniform scale, covering, centered (`xMidYMid slice`).
    Slice,
}

impl ViewBox {
    pub fn fixed(width: f64, height: f64) -> Self {
        Self::Fixed {
            width,
            height,
            fit: Fit::Stretch,
        }
    }

    /// Transform from scene units to container pixels.
    pub fn to_viewport(&self, viewport: Size) -> Affine {
        match *self {
            Self::Viewport => Affine::IDENTITY,
            Self::Fixed { width, height, fit } => {
                if width <= 0.0 || height <= 0.0 {
                    return Affine::IDENTITY;
                }
                let sx = viewport.width / width;
                let sy = viewport.height / height;
                let s = match fit {
                    Fit::Stretch => return Affine::scale_non_uniform(sx, sy),
                    Fit::Meet => sx.min(sy),
                    Fit::Slice => sx.max(sy),
                };
                let tx = (viewport.width - width * s) / 2.0;
                let ty = (viewport.height - height * s) / 2.0;
                Affine::translate((tx, ty)) * Affine::scale(s)
            }
        }
    }
}

/// Geometry of a node, in the node's local coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Rect { rect: Rect, radius: f64 },
    Circle { center: Point, radius: f64 },
    Ellipse { center: Point, radii: Vec2 },
    Line { from: Point, to: Point },
    Path(BezPath),
    Group(Vec<Node>),
    /// Covers the whole view box.
    Cover,
    /// Fractal noise covering the whole view box.
    Noise { base_frequency: f64, octaves: u32 },
}

/// Coordinate space for gradient geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GradientUnits {
    /// Fractions of the painted shape's bounding box.
    BoundingBox,
    /// Scene units.
    UserSpace,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GradientShape {
    Linear { start: Point, end: Point },
    Radial { center: Point, radius: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient, `0..=1`.
    pub offset: f64,
    pub color: Color,
    pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    pub shape: GradientShape,
    pub units: GradientUnits,
    pub stops: Vec<GradientStop>,
}

impl Gradient {
    /// Linear gradient at `angle_deg` (0 points right, 90 points down) across the bounding box.
    pub fn linear(angle_deg: f64) -> Self {
        let (s, c) = angle_deg.to_radians().sin_cos();
        let half = Vec2::new(c, s) * 0.5;
        let mid = Point::new(0.5, 0.5);
        Self {
            shape: GradientShape::Linear {
                start: mid - half,
                end: mid + half,
            },
            units: GradientUnits::BoundingBox,
            stops: Vec::new(),
        }
    }

    /// Radial gradient in bounding-box fractions.
    pub fn radial(center: Point, radius: f64) -> Self {
        Self {
            shape: GradientShape::Radial { center, radius },
            units: GradientUnits::BoundingBox,
            stops: Vec::new(),
        }
    }

    pub fn user_space(mut self) -> Self {
        self.units = GradientUnits::UserSpace;
        self
    }

    pub fn stop(mut self, offset: f64, color: Color, opacity: f64) -> Self {
        self.stops.push(GradientStop {
            offset: offset.clamp(0.0, 1.0),
            color,
            opacity: opacity.clamp(0.0, 1.0),
        });
        self
    }

    /// Solid `color` at the center fading to transparent at `edge`.
    pub fn glow(center: Point, radius: f64, color: Color, opacity: f64, edge: f64) -> Self {
        Self::radial(center, radius)
            .stop(0.0, color, opacity)
            .stop(edge, color, 0.0)
    }
}

/// A repeating tile, in scene units.
#[derive(Clone, Debug, PartialEq)]
pub struct PatternTile {
    pub size: Size,
    pub children: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Color),
    Gradient(Gradient),
    Pattern(PatternTile),
}

impl From<Color> for Paint {
    fn from(c: Color) -> Self {
        Self::Solid(c)
    }
}

impl From<Gradient> for Paint {
    fn from(g: Gradient) -> Self {
        Self::Gradient(g)
    }
}

impl From<PatternTile> for Paint {
    fn from(p: PatternTile) -> Self {
        Self::Pattern(p)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Round,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    pub paint: Paint,
    pub width: f64,
    pub cap: LineCap,
    pub dash: Option<Vec<f64>>,
    pub dash_offset: f64,
}

impl Stroke {
    pub fn new(paint: impl Into<Paint>, width: f64) -> Self {
        Self {
            paint: paint.into(),
            width,
            cap: LineCap::Butt,
            dash: None,
            dash_offset: 0.0,
        }
    }

    pub fn round(mut self) -> Self {
        self.cap = LineCap::Round;
        self
    }

    pub fn dashed(mut self, dash: impl Into<Vec<f64>>) -> Self {
        self.dash = Some(dash.into());
        self
    }
}

/// One drawable element.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub shape: Shape,
    pub fill: Option<Paint>,
    pub stroke: Option<Stroke>,
    pub opacity: f64,
    pub transform: Affine,
    /// Gaussian blur standard deviation in scene units.
    pub blur: Option<f64>,
    /// Applied outermost first.
    pub motions: Vec<Motion>,
}

impl Node {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            fill: None,
            stroke: None,
            opacity: 1.0,
            transform: Affine::IDENTITY,
            blur: None,
            motions: Vec::new(),
        }
    }

    pub fn group(children: Vec<Node>) -> Self {
        Self::new(Shape::Group(children))
    }

    pub fn rect(rect: Rect) -> Self {
        Self::new(Shape::Rect { rect, radius: 0.0 })
    }

    pub fn circle(center: Point, radius: f64) -> Self {
        Self::new(Shape::Circle { center, radius })
    }

    pub fn path(path: BezPath) -> Self {
        Self::new(Shape::Path(path))
    }

    pub fn fill(mut self, paint: impl Into<Paint>) -> Self {
        self.fill = Some(paint.into());
        self
    }

    pub fn stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn transform(mut self, transform: Affine) -> Self {
        self.transform = transform;
        self
    }

    pub fn blur(mut self, std_dev: f64) -> Self {
        self.blur = (std_dev > 0.0).then_some(std_dev);
        self
    }

    pub fn motion(mut self, motion: Motion) -> Self {
        self.motions.push(motion);
        self
    }

    pub fn children(&self) -> &[Node] {
        match &self.shape {
            Shape::Group(children) => children,
            _ => &[],
        }
    }

    /// Visit this node and every descendant, including pattern tile contents.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        f(self);
        for child in self.children() {
            child.walk(f);
        }
        if let Some(Paint::Pattern(tile)) = &self.fill {
            for child in &tile.children {
                child.walk(f);
            }
        }
    }

    fn at_time(&self, t_s: f64) -> Node {
        let mut transform = Affine::IDENTITY;
        let mut opacity = self.opacity;
        let mut dash_offset = None;
        for motion in &self.motions {
            match motion.sample(t_s) {
                MotionSample::Transform(a) => transform *= a,
                MotionSample::Opacity(o) => opacity *= o,
                MotionSample::DashOffset(d) => dash_offset = Some(d),
            }
        }

        let shape = match &self.shape {
            Shape::Group(children) => {
                Shape::Group(children.iter().map(|c| c.at_time(t_s)).collect())
            }
            other => other.clone(),
        };
        let mut stroke = self.stroke.clone();
        if let (Some(s), Some(d)) = (stroke.as_mut(), dash_offset) {
            s.dash_offset = d;
        }

        Node {
            shape,
            fill: self.fill.clone(),
            stroke,
            opacity: opacity.clamp(0.0, 1.0),
            transform: transform * self.transform,
            blur: self.blur,
            motions: Vec::new(),
        }
    }
}

/// Vector output of a generator.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub view_box: ViewBox,
    pub nodes: Vec<Node>,
}

impl Scene {
    pub fn new(view_box: ViewBox) -> Self {
        Self {
            view_box,
            nodes: Vec::new(),
        }
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn with(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    /// Freeze every motion at `t_s` seconds into static transforms and opacities.
    pub fn at_time(&self, t_s: f64) -> Scene {
        Scene {
            view_box: self.view_box,
            nodes: self.nodes.iter().map(|n| n.at_time(t_s)).collect(),
        }
    }

    pub fn walk<'a>(&'a self, mut f: impl FnMut(&'a Node)) {
        for node in &self.nodes {
            node.walk(&mut f);
        }
    }

    pub fn is_animated(&self) -> bool {
        let mut animated = false;
        self.walk(|n| animated |= !n.motions.is_empty());
        animated
    }
}

/// Closed polygon through `points`.
pub fn polygon(points: &[(f64, f64)]) -> BezPath {
    let mut path = BezPath::new();
    for (i, &p) in points.iter().enumerate() {
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    if !points.is_empty() {
        path.close_path();
    }
    path
}

/// Outline of `rect` with CSS-style elliptical corner radii.
///
/// `horizontal` and `vertical` are fractions of the width and height for the top-left,
/// top-right, bottom-right and bottom-left corners. Radii are scaled down uniformly when
/// adjacent corners would overlap.
pub fn rounded_blob(rect: Rect, horizontal: [f64; 4], vertical: [f64; 4]) -> BezPath {
    const KAPPA: f64 = 0.552_284_749_8;

    let (w, h) = (rect.width(), rect.height());
    let rx = horizontal.map(|f| f.max(0.0) * w);
    let ry = vertical.map(|f| f.max(0.0) * h);

    let ratio = |len: f64, a: f64, b: f64| if a + b > len { len / (a + b) } else { 1.0 };
    let scale = ratio(w, rx[0], rx[1])
        .min(ratio(w, rx[3], rx[2]))
        .min(ratio(h, ry[0], ry[3]))
        .min(ratio(h, ry[1], ry[2]));
    let rx = rx.map(|r| r * scale);
    let ry = ry.map(|r| r * scale);

    let (x0, y0, x1, y1) = (rect.x0, rect.y0, rect.x1, rect.y1);
    let mut p = BezPath::new();
    p.move_to((x0 + rx[0], y0));
    p.line_to((x1 - rx[1], y0));
    p.curve_to(
        (x1 - rx[1] * (1.0 - KAPPA), y0),
        (x1, y0 + ry[1] * (1.0 - KAPPA)),
        (x1, y0 + ry[1]),
    );
    p.line_to((x1, y1 - ry[2]));
    p.curve_to(
        (x1, y1 - ry[2] * (1.0 - KAPPA)),
        (x1 - rx[2] * (1.0 - KAPPA), y1),
        (x1 - rx[2], y1),
    );
    p.line_to((x0 + rx[3], y1));
    p.curve_to(
        (x0 + rx[3] * (1.0 - KAPPA), y1),
        (x0, y1 - ry[3] * (1.0 - KAPPA)),
        (x0, y1 - ry[3]),
    );
    p.line_to((x0, y0 + ry[0]));
    p.curve_to(
        (x0, y0 + ry[0] * (1.0 - KAPPA)),
        (x0 + rx[0] * (1.0 - KAPPA), y0),
        (x0 + rx[0], y0),
    );
    p.close_path();
    p
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::motion::{Ease, Motion};

    #[test]
    fn meet_and_slice_center_the_view_box() {
        let vp = Size::new(200.0, 100.0);
        let meet = ViewBox::Fixed {
            width: 100.0,
            height: 100.0,
            fit: Fit::Meet,
        };
        assert_eq!(meet.to_viewport(vp) * Point::new(0.0, 0.0), Point::new(50.0, 0.0));
        let slice = ViewBox::Fixed {
            width: 100.0,
            height: 100.0,
            fit: Fit::Slice,
        };
        assert_eq!(slice.to_viewport(vp) * Point::new(0.0, 0.0), Point::new(0.0, -50.0));
    }

    #[test]
    fn at_time_bakes_motions() {
        let node = Node::circle(Point::new(0.0, 0.0), 1.0)
            .opacity(0.8)
            .motion(Motion::drift(Vec2::new(10.0, 0.0), 2.0).ease(Ease::Linear))
            .motion(Motion::pulse(1.0, 0.5, 2.0).ease(Ease::Linear));
        let scene = Scene::new(ViewBox::Viewport).with(node);
        assert!(scene.is_animated());

        let frozen = scene.at_time(1.0);
        assert!(!frozen.is_animated());
        let n = &frozen.nodes[0];
        assert_eq!(n.transform * Point::ZERO, Point::new(5.0, 0.0));
        assert!((n.opacity - 0.8 * 0.75).abs() < 1e-12);
    }

    #[test]
    fn walk_reaches_groups_and_pattern_tiles() {
        let tile = PatternTile {
            size: Size::new(4.0, 4.0),
            children: vec![Node::circle(Point::new(2.0, 2.0), 1.0)],
        };
        let scene = Scene::new(ViewBox::Viewport).with(Node::group(vec![
            Node::new(Shape::Cover).fill(tile),
            Node::rect(Rect::new(0.0, 0.0, 1.0, 1.0)),
        ]));
        let mut count = 0;
        scene.walk(|_| count += 1);
        assert_eq!(count, 4);
    }

    #[test]
    fn rounded_blob_stays_inside_its_rect() {
        let rect = Rect::new(10.0, 20.0, 110.0, 70.0);
        let path = rounded_blob(rect, [0.6, 0.4, 0.7, 0.3], [0.5, 0.6, 0.4, 0.5]);
        let bbox = kurbo::Shape::bounding_box(&path);
        assert!(bbox.x0 >= rect.x0 - 1e-9 && bbox.x1 <= rect.x1 + 1e-9);
        assert!(bbox.y0 >= rect.y0 - 1e-9 && bbox.y1 <= rect.y1 + 1e-9);
    }

    #[test]
    fn linear_gradient_angle_spans_bbox() {
        let g = Gradient::linear(0.0);
        let GradientShape::Linear { start, end } = g.shape else {
            panic!("linear");
        };
        assert!((start.x - 0.0).abs() < 1e-12 && (end.x - 1.0).abs() < 1e-12);
    }
}
