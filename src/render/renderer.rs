use std::rc::Rc;

use kurbo::Size;

use crate::config::BackgroundConfig;
use crate::generators::{LayoutCache, RenderCtx, VisualOutput};
use crate::registry::{self, PresetId};
use crate::render::layer::WrapperStyle;
use crate::scene::{Scene, to_svg_styled};
use crate::sim::{FrameHost, ParticleDrift, PixmapSurface};
use crate::theme::ThemePalette;

/// What currently occupies the background container.
#[derive(Debug)]
pub enum MountedContent {
    Vector(Scene),
    Canvas(ParticleDrift<PixmapSurface>),
}

impl MountedContent {
    /// Turn generator output into live content. Canvas output mounts a simulation on `host`.
    pub fn mount(output: VisualOutput, host: Rc<dyn FrameHost>) -> Self {
        match output {
            VisualOutput::Vector(scene) => Self::Vector(scene),
            VisualOutput::Canvas(spec) => {
                Self::Canvas(ParticleDrift::mount(spec, host, PixmapSurface::new()))
            }
        }
    }
}

/// A generator mounted inside its wrapper.
#[derive(Debug)]
pub struct Mounted {
    pub preset: PresetId,
    pub style: WrapperStyle,
    pub content: MountedContent,
}

impl Mounted {
    pub fn scene(&self) -> Option<&Scene> {
        match &self.content {
            MountedContent::Vector(scene) => Some(scene),
            MountedContent::Canvas(_) => None,
        }
    }

    pub fn canvas(&self) -> Option<&ParticleDrift<PixmapSurface>> {
        match &self.content {
            MountedContent::Canvas(drift) => Some(drift),
            MountedContent::Vector(_) => None,
        }
    }

    /// Standalone SVG with the wrapper style on its root. `None` for canvas content.
    pub fn to_svg(&self, viewport: Size) -> Option<String> {
        self.scene()
            .map(|scene| to_svg_styled(scene, viewport, &self.style.css()))
    }
}

/// Mounts the configured generator inside an opacity, blur and color-scoped wrapper.
///
/// Holds at most one mounted generator. Replacing it always tears the previous one down
/// first, so two particle loops never run against the same container.
pub struct BackgroundRenderer {
    host: Rc<dyn FrameHost>,
    palette: ThemePalette,
    layouts: LayoutCache,
    mounted: Option<Mounted>,
}

impl std::fmt::Debug for BackgroundRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundRenderer")
            .field("palette", &self.palette)
            .field("mounted", &self.mounted)
            .finish_non_exhaustive()
    }
}

impl BackgroundRenderer {
    pub fn new(host: Rc<dyn FrameHost>) -> Self {
        Self {
            host,
            palette: ThemePalette::default(),
            layouts: LayoutCache::new(),
            mounted: None,
        }
    }

    pub fn with_palette(mut self, palette: ThemePalette) -> Self {
        self.palette = palette;
        self
    }

    pub fn palette(&self) -> &ThemePalette {
        &self.palette
    }

    /// Switch the host theme. Vector content picks it up on the next render; a mounted
    /// particle canvas keeps the colors it sampled until it reseeds.
    pub fn set_palette(&mut self, palette: ThemePalette) {
        self.palette = palette;
    }

    /// Reconcile the container with `config`.
    ///
    /// Unknown preset ids render nothing. A particle canvas that stays mounted across
    /// renders is only reseeded when its density or speed knob changed.
    #[tracing::instrument(skip_all, fields(preset = %config.preset_id))]
    pub fn render(&mut self, config: &BackgroundConfig) -> Option<&Mounted> {
        let Some((id, generator)) = registry::resolve(&config.preset_id) else {
            tracing::debug!("unknown preset id, rendering nothing");
            self.unmount();
            return None;
        };

        let overrides = config.color_overrides();
        let palette = self.palette.with_overrides(overrides.as_ref());
        let style = WrapperStyle::new(config.settings, overrides);
        let viewport = self.host.viewport();

        let mut ctx = RenderCtx::new(config.settings, &palette, viewport, &mut self.layouts);
        let output = generator.render(&mut ctx);

        if let VisualOutput::Canvas(spec) = &output
            && let Some(m) = self.mounted.as_mut()
            && m.preset == id
            && let MountedContent::Canvas(drift) = &mut m.content
        {
            drift.apply_spec(*spec);
            m.style = style;
            return self.mounted.as_ref();
        }

        // Tear down before mounting the replacement.
        self.unmount();
        let content = MountedContent::mount(output, self.host.clone());
        self.mounted = Some(Mounted {
            preset: id,
            style,
            content,
        });
        self.mounted.as_ref()
    }

    pub fn mounted(&self) -> Option<&Mounted> {
        self.mounted.as_ref()
    }

    /// Drive a mounted particle canvas. Returns whether a frame ran.
    pub fn poll(&mut self) -> bool {
        match &mut self.mounted {
            Some(Mounted {
                content: MountedContent::Canvas(drift),
                ..
            }) => drift.poll(),
            _ => false,
        }
    }

    /// Remove whatever is mounted, releasing any frame loop and resize observer.
    pub fn unmount(&mut self) {
        if let Some(previous) = self.mounted.take() {
            tracing::debug!(preset = %previous.preset, "unmounting background");
        }
    }

    pub fn layouts(&self) -> &LayoutCache {
        &self.layouts
    }
}
