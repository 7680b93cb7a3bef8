//! Vector output model shared by every non-canvas generator.

pub mod model;
pub mod motion;
pub mod svg;

pub use model::{
    Fit, Gradient, GradientShape, GradientStop, GradientUnits, LineCap, Node, Paint, PatternTile,
    Scene, Shape, Stroke, ViewBox, polygon, rounded_blob,
};
pub use motion::{Direction, Ease, Motion, MotionKind, MotionSample};
pub use svg::{to_svg, to_svg_styled};
