use super::*;
use crate::scene::model::{Gradient, Node, PatternTile, Scene, ViewBox};
use crate::scene::motion::Motion;
use crate::theme::Color;
use kurbo::{Point, Rect, Size, Vec2};

fn viewport() -> Size {
    Size::new(200.0, 100.0)
}

#[test]
fn num_is_compact() {
    assert_eq!(num(1.0), "1");
    assert_eq!(num(0.5), "0.5");
    assert_eq!(num(1.0 / 3.0), "0.333");
    assert_eq!(num(-0.0), "0");
    assert_eq!(num(f64::NAN), "0");
}

#[test]
fn static_scene_has_no_style_block() {
    let scene = Scene::new(ViewBox::Viewport)
        .with(Node::circle(Point::new(10.0, 10.0), 4.0).fill(Color::rgb8(255, 0, 0)));
    let svg = to_svg(&scene, viewport());
    assert!(svg.starts_with("<svg "));
    assert!(svg.ends_with("</svg>"));
    assert!(svg.contains(r##"<circle cx="10" cy="10" r="4" fill="#ff0000"/>"##));
    assert!(!svg.contains("<style>"));
}

#[test]
fn fixed_view_box_is_mapped_with_root_transform() {
    let scene =
        Scene::new(ViewBox::fixed(100.0, 100.0)).with(Node::rect(Rect::new(0.0, 0.0, 1.0, 1.0)));
    let svg = to_svg(&scene, viewport());
    assert!(svg.contains(r#"<g transform="matrix(2 0 0 1 0 0)">"#));
}

#[test]
fn motions_emit_keyframes_and_wrappers() {
    let node = Node::circle(Point::new(5.0, 5.0), 2.0)
        .fill(Color::WHITE)
        .motion(Motion::drift(Vec2::new(3.0, 0.0), 4.0).delay(-1.0))
        .motion(Motion::pulse(0.2, 1.0, 2.0));
    let svg = to_svg(&Scene::new(ViewBox::Viewport).with(node), viewport());
    assert!(svg.contains("<style>"));
    assert!(svg.contains("@keyframes bd-m0-k"));
    assert!(svg.contains("@keyframes bd-m1-k"));
    assert!(svg.contains("animation: bd-m0-k 4s"));
    assert!(svg.contains("-1s infinite alternate"));
    assert!(svg.contains(r#"<g class="bd-m0"><g class="bd-m1"><circle"#));
    assert!(svg.contains("/></g></g>"));
}

#[test]
fn gradients_and_patterns_land_in_defs() {
    let tile = PatternTile {
        size: Size::new(10.0, 10.0),
        children: vec![Node::circle(Point::new(5.0, 5.0), 1.0).fill(Color::BLACK)],
    };
    let scene = Scene::new(ViewBox::Viewport)
        .with(Node::new(crate::scene::model::Shape::Cover).fill(tile))
        .with(
            Node::new(crate::scene::model::Shape::Cover).fill(
                Gradient::radial(Point::new(0.5, 0.5), 0.5)
                    .stop(0.0, Color::WHITE, 0.4)
                    .stop(1.0, Color::WHITE, 0.0),
            ),
        );
    let svg = to_svg(&scene, viewport());
    assert!(svg.contains(
        r#"<pattern id="bd-p0" patternUnits="userSpaceOnUse" width="10" height="10">"#
    ));
    assert!(svg.contains(r#"fill="url(#bd-p0)""#));
    assert!(svg.contains(r#"<radialGradient id="bd-g1""#));
    assert!(svg.contains(r#"stop-opacity="0.4""#));
}

#[test]
fn serialization_is_deterministic() {
    let scene = Scene::new(ViewBox::Viewport).with(
        Node::rect(Rect::new(0.0, 0.0, 50.0, 50.0))
            .fill(Gradient::linear(45.0).stop(0.0, Color::BLACK, 1.0))
            .blur(4.0),
    );
    assert_eq!(to_svg(&scene, viewport()), to_svg(&scene, viewport()));
}

#[test]
fn output_parses_with_usvg() {
    let node = Node::new(crate::scene::model::Shape::Noise {
        base_frequency: 0.65,
        octaves: 3,
    })
    .opacity(0.05);
    let scene = Scene::new(ViewBox::Viewport)
        .with(node)
        .with(
            Node::circle(Point::new(50.0, 50.0), 10.0)
                .fill(Color::WHITE)
                .blur(2.0),
        );
    let svg = to_svg(&scene, viewport());
    assert!(usvg::Tree::from_str(&svg, &usvg::Options::default()).is_ok());
}

#[test]
fn root_style_is_inlined_and_escaped() {
    let scene = Scene::new(ViewBox::Viewport);
    let plain = to_svg(&scene, viewport());
    assert!(!plain.contains("style="));
    let styled = to_svg_styled(&scene, viewport(), r#"opacity:0.5;font-family:"x""#);
    assert!(styled.contains(r#" style="opacity:0.5;font-family:&quot;x&quot;">"#));
}

#[test]
fn blur_region_covers_three_sigma_in_user_space() {
    let scene = Scene::new(ViewBox::Viewport).with(
        Node::circle(Point::new(50.0, 50.0), 10.0)
            .fill(Color::WHITE)
            .blur(5.0),
    );
    let svg = to_svg(&scene, viewport());
    assert!(svg.contains(
        r#"filterUnits="userSpaceOnUse" x="25" y="25" width="50" height="50"><feGaussianBlur stdDeviation="5"/>"#
    ));
}
