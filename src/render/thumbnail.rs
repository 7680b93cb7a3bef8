use std::rc::Rc;

use kurbo::Size;

use crate::generators::{LayoutCache, RenderCtx, VisualOutput};
use crate::registry::{self, PresetId};
use crate::render::layer::WrapperStyle;
use crate::render::renderer::{Mounted, MountedContent};
use crate::settings::BackgroundSettings;
use crate::sim::FrameHost;
use crate::theme::ThemePalette;

/// A preset preview rendered with the fixed thumbnail settings.
///
/// Holds nothing beyond what it was given; selection is reported through a callback.
#[derive(Clone, Debug, PartialEq)]
pub struct Thumbnail {
    pub preset: PresetId,
    pub selected: bool,
    pub style: WrapperStyle,
    pub output: VisualOutput,
}

impl Thumbnail {
    /// Report a click on this preview.
    pub fn click(&self, on_select: impl FnOnce(PresetId)) {
        on_select(self.preset);
    }

    /// Mount the preview on `host`, starting a simulation for canvas presets.
    pub fn mount(self, host: Rc<dyn FrameHost>) -> Mounted {
        Mounted {
            preset: self.preset,
            style: self.style,
            content: MountedContent::mount(self.output, host),
        }
    }
}

/// Render a preview through the thumbnail registry.
///
/// Presets outside the thumbnail-safe subset yield `None`, as do unknown ids.
pub fn render_thumbnail(
    preset_id: &str,
    selected: bool,
    palette: &ThemePalette,
    viewport: Size,
    layouts: &mut LayoutCache,
) -> Option<Thumbnail> {
    let (preset, generator) = registry::resolve_thumbnail(preset_id)?;
    let settings = BackgroundSettings::THUMBNAIL;
    let mut ctx = RenderCtx::new(settings, palette, viewport, layouts);
    let output = generator.render(&mut ctx);
    Some(Thumbnail {
        preset,
        selected,
        style: WrapperStyle::new(settings, None),
        output,
    })
}
