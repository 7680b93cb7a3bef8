use std::rc::Rc;

use backdrop::sim::LoopState;
use backdrop::{
    BackgroundConfig, BackgroundRenderer, BackgroundSettings, ManualHost, PresetId, Size,
    ThemePalette,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("backdrop=debug")
        .with_test_writer()
        .try_init();
}

fn host() -> Rc<ManualHost> {
    Rc::new(ManualHost::new(Size::new(320.0, 200.0), 2.0).unwrap())
}

fn config(id: &str, intensity: f64, density: f64, blur: f64) -> BackgroundConfig {
    BackgroundConfig {
        preset_id: id.to_owned(),
        settings: BackgroundSettings {
            intensity,
            density,
            blur,
            ..BackgroundSettings::DEFAULT
        },
        ..BackgroundConfig::default()
    }
}

#[test]
fn unknown_preset_renders_nothing() {
    init_tracing();
    let mut r = BackgroundRenderer::new(host());
    assert!(r.render(&config("does-not-exist", 65.0, 55.0, 0.0)).is_none());
    assert!(r.mounted().is_none());
}

#[test]
fn wrapper_opacity_and_blur() {
    let mut r = BackgroundRenderer::new(host());

    let m = r.render(&config("waves", 50.0, 55.0, 0.0)).unwrap();
    assert_eq!(m.style.opacity, 0.5);
    assert_eq!(m.style.filter(), None);
    let svg = m.to_svg(Size::new(320.0, 200.0)).unwrap();
    assert!(svg.contains("opacity:0.5;"));
    assert!(!svg.contains("filter:blur"));

    let m = r.render(&config("waves", 50.0, 55.0, 10.0)).unwrap();
    assert_eq!(m.style.filter().as_deref(), Some("blur(10px)"));
    assert!(m.to_svg(Size::new(320.0, 200.0)).unwrap().contains("filter:blur(10px);"));
}

#[test]
fn dot_grid_end_to_end() {
    let mut r = BackgroundRenderer::new(host());
    let full = r.render(&config("dot_grid", 100.0, 100.0, 0.0)).unwrap();
    assert_eq!(full.preset, PresetId::DotGrid);
    assert_eq!(full.style.opacity, 1.0);
    assert!(full.scene().is_some());

    let hidden = r.render(&config("dot_grid", 0.0, 100.0, 0.0)).unwrap();
    assert_eq!(hidden.style.opacity, 0.0);
    assert!(!hidden.scene().unwrap().nodes.is_empty());
}

#[test]
fn color1_scopes_overrides_for_every_generator() {
    let mut r = BackgroundRenderer::new(host());
    let themed = config("solid_color", 65.0, 55.0, 0.0).with_colors("#112233", "");
    let m = r.render(&themed).unwrap();
    let o = m.style.overrides.expect("overrides");
    assert_eq!(o.primary.to_hex(), "#112233");
    assert_eq!(o.secondary, o.primary);
    let svg = m.to_svg(Size::new(10.0, 10.0)).unwrap();
    assert!(svg.contains("--primary:#112233;"));
    assert!(svg.contains("#112233"));
}

#[test]
fn swapping_presets_tears_the_canvas_down_first() {
    init_tracing();
    let host = host();
    let mut r = BackgroundRenderer::new(host.clone());
    r.render(&BackgroundConfig::for_preset(PresetId::ParticleDrift));
    assert_eq!(host.pending_frames(), 1);
    assert_eq!(host.active_observers(), 1);
    for _ in 0..3 {
        assert!(r.poll());
    }

    let m = r.render(&BackgroundConfig::for_preset(PresetId::Nebula)).unwrap();
    assert!(m.canvas().is_none());
    assert_eq!(host.pending_frames(), 0);
    assert_eq!(host.active_observers(), 0);
    assert!(!r.poll());
}

#[test]
fn remounting_the_canvas_never_doubles_the_loop() {
    let host = host();
    let mut r = BackgroundRenderer::new(host.clone());
    for density in [0.0, 50.0, 100.0, 100.0, 20.0] {
        r.render(&config("particle_drift", 65.0, density, 0.0));
        r.poll();
        assert_eq!(host.pending_frames(), 1);
        assert_eq!(host.active_observers(), 1);
    }
    let drift = r.mounted().and_then(|m| m.canvas()).unwrap();
    assert_eq!(drift.state(), LoopState::Running);
    assert_eq!(drift.particles().len(), 28);
}

#[test]
fn palette_change_waits_for_the_next_reseed() {
    let host = host();
    let mut r = BackgroundRenderer::new(host).with_palette(ThemePalette::named("ocean").unwrap());
    let cfg = BackgroundConfig::for_preset(PresetId::ParticleDrift);
    r.render(&cfg);
    let ocean = r.mounted().and_then(|m| m.canvas()).unwrap().particles()[0].color;

    let sunset = ThemePalette::named("sunset").unwrap();
    r.set_palette(sunset);
    r.render(&cfg);
    let kept = r.mounted().and_then(|m| m.canvas()).unwrap().particles()[0].color;
    assert_eq!(kept, ocean);

    let faster = cfg.clone().with_settings(BackgroundSettings {
        speed: 90.0,
        ..cfg.settings
    });
    r.render(&faster);
    let reseeded = r.mounted().and_then(|m| m.canvas()).unwrap();
    let sunset_colors = [sunset.primary, sunset.border, sunset.muted];
    assert!(
        reseeded
            .particles()
            .iter()
            .all(|p| sunset_colors.contains(&p.color))
    );
}

#[test]
fn vector_content_follows_the_palette_immediately() {
    let mut r = BackgroundRenderer::new(host());
    let cfg = BackgroundConfig::for_preset(PresetId::SolidColor);
    let ocean = r.render(&cfg).unwrap().to_svg(Size::new(10.0, 10.0)).unwrap();
    r.set_palette(ThemePalette::named("forest").unwrap());
    let forest = r.render(&cfg).unwrap().to_svg(Size::new(10.0, 10.0)).unwrap();
    assert!(ocean.contains("#0ea5e9"));
    assert!(forest.contains("#16a34a"));
}

#[test]
fn reduced_motion_host_freezes_the_canvas() {
    let host = Rc::new(
        ManualHost::new(Size::new(320.0, 200.0), 1.0)
            .unwrap()
            .with_reduced_motion(true),
    );
    let mut r = BackgroundRenderer::new(host.clone());
    r.render(&BackgroundConfig::for_preset(PresetId::ParticleDrift));
    let before = r.mounted().and_then(|m| m.canvas()).unwrap().particles().to_vec();
    for _ in 0..5 {
        assert!(!r.poll());
    }
    let drift = r.mounted().and_then(|m| m.canvas()).unwrap();
    assert!(drift.reduced_motion());
    assert_eq!(drift.particles(), &before[..]);
    assert_eq!(host.pending_frames(), 0);

    r.unmount();
    assert_eq!(host.active_observers(), 0);
}
