use std::rc::Rc;

use backdrop::raster::{apply_wrapper, rasterize_scene};
use backdrop::scene::{Node, Shape, ViewBox};
use backdrop::{
    BackgroundConfig, BackgroundRenderer, BackgroundSettings, Color, FrameRGBA, ManualHost,
    PresetId, Rect, Scene, Size, WrapperStyle, rasterize,
};

fn settings(intensity: f64, blur: f64) -> BackgroundSettings {
    BackgroundSettings {
        intensity,
        blur,
        ..BackgroundSettings::DEFAULT
    }
}

fn solid(w: f64, h: f64) -> Scene {
    Scene::new(ViewBox::Viewport)
        .with(Node::new(Shape::Cover).fill(Color::rgb8(255, 0, 0)))
        .with(Node::rect(Rect::new(0.0, 0.0, w / 2.0, h)).fill(Color::rgb8(0, 0, 255)))
}

#[test]
fn scene_rasterizes_at_viewport_size() {
    let frame = rasterize_scene(&solid(40.0, 20.0), Size::new(40.0, 20.0), 0.0).unwrap();
    assert_eq!((frame.width, frame.height), (40, 20));
    assert!(frame.premultiplied);
    assert_eq!(frame.pixel(5, 10), Some([0, 0, 255, 255]));
    assert_eq!(frame.pixel(35, 10), Some([255, 0, 0, 255]));
}

#[test]
fn wrapper_opacity_scales_pixels() {
    let frame = rasterize_scene(&solid(8.0, 8.0), Size::new(8.0, 8.0), 0.0).unwrap();
    let half = apply_wrapper(frame.clone(), &WrapperStyle::new(settings(50.0, 0.0), None), 1.0)
        .unwrap();
    assert_eq!(half.pixel(6, 4), Some([128, 0, 0, 128]));

    let hidden =
        apply_wrapper(frame, &WrapperStyle::new(settings(0.0, 0.0), None), 1.0).unwrap();
    assert!(hidden.is_blank());
}

#[test]
fn wrapper_blur_softens_the_seam() {
    let frame = rasterize_scene(&solid(32.0, 8.0), Size::new(32.0, 8.0), 0.0).unwrap();
    let sharp = frame.pixel(15, 4).unwrap();
    let blurred = apply_wrapper(frame, &WrapperStyle::new(settings(100.0, 4.0), None), 1.0)
        .unwrap();
    let soft = blurred.pixel(15, 4).unwrap();
    assert_eq!(sharp, [0, 0, 255, 255]);
    assert!(soft[0] > 0 && soft[2] < 255, "{soft:?}");
    assert_eq!(soft[3], 255);
}

#[test]
fn every_vector_preset_rasterizes() {
    let host = Rc::new(ManualHost::new(Size::new(64.0, 48.0), 1.0).unwrap());
    let mut renderer = BackgroundRenderer::new(host);
    for &id in PresetId::ALL {
        let config = BackgroundConfig::for_preset(id).with_settings(settings(100.0, 0.0));
        let mounted = renderer.render(&config).unwrap();
        let frame = rasterize(mounted, Size::new(64.0, 48.0), 1.5)
            .unwrap_or_else(|e| panic!("{id}: {e}"));
        assert!(!frame.is_blank(), "{id} rendered nothing");
    }
}

#[test]
fn canvas_rasterizes_at_backing_resolution() {
    let host = Rc::new(ManualHost::new(Size::new(50.0, 40.0), 2.0).unwrap());
    let mut renderer = BackgroundRenderer::new(host);
    let config =
        BackgroundConfig::for_preset(PresetId::ParticleDrift).with_settings(settings(100.0, 0.0));
    renderer.render(&config);
    renderer.poll();
    let frame: FrameRGBA =
        rasterize(renderer.mounted().unwrap(), Size::new(50.0, 40.0), 0.0).unwrap();
    assert_eq!((frame.width, frame.height), (100, 80));
    assert!(!frame.is_blank());
}
