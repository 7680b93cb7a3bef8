use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::foundation::error::{BackdropError, BackdropResult};
use crate::registry::{PresetId, PresetKind};
use crate::settings::{BLUR_MAX, BackgroundSettings, KNOB_MAX};
use crate::theme::{Color, ColorOverrides};

/// The full addressable background configuration, as the host application stores it.
///
/// Every field has a default, so documents written by older versions load: missing knobs
/// fall back individually and a missing preset id resolves to `mesh_gradient`. An unknown
/// `presetId` is kept verbatim; the renderer treats it as a no-op.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BackgroundConfig {
    pub preset_id: String,
    /// Duplicated from the preset's metadata for quick branching.
    #[serde(rename = "type")]
    pub kind: PresetKind,
    pub settings: BackgroundSettings,
    /// Hex color, or empty to inherit the theme.
    #[serde(deserialize_with = "lenient_color")]
    pub color1: String,
    /// Hex color, or empty to fall back to `color1`.
    #[serde(deserialize_with = "lenient_color")]
    pub color2: String,
}

fn lenient_color<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self::for_preset(PresetId::MeshGradient)
    }
}

impl BackgroundConfig {
    /// Default settings for `id` with its metadata kind and no color overrides.
    pub fn for_preset(id: PresetId) -> Self {
        Self {
            preset_id: id.as_str().to_owned(),
            kind: id.kind(),
            settings: BackgroundSettings::DEFAULT,
            color1: String::new(),
            color2: String::new(),
        }
    }

    pub fn with_settings(mut self, settings: BackgroundSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_colors(mut self, color1: impl Into<String>, color2: impl Into<String>) -> Self {
        self.color1 = color1.into();
        self.color2 = color2.into();
        self
    }

    pub fn from_json_str(s: &str) -> BackdropResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| BackdropError::serde(format!("parse background config JSON: {e}")))
    }

    pub fn from_reader<R: std::io::Read>(r: R) -> BackdropResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| BackdropError::serde(format!("parse background config JSON: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> BackdropResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            BackdropError::config(format!("open background config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn to_json_pretty(&self) -> BackdropResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| BackdropError::serde(format!("serialize background config: {e}")))
    }

    /// The registered preset, if the id is known to this library version.
    pub fn preset(&self) -> Option<PresetId> {
        self.preset_id.parse().ok()
    }

    /// Scoped color overrides implied by `color1`/`color2`.
    pub fn color_overrides(&self) -> Option<ColorOverrides> {
        ColorOverrides::derive(&self.color1, &self.color2)
    }

    /// Strict check for hosts that want to reject malformed configurations up front.
    ///
    /// The renderer never calls this; it clamps and ignores instead.
    pub fn validate(&self) -> BackdropResult<()> {
        let id: PresetId = self.preset_id.parse()?;
        if id.kind() != self.kind {
            return Err(BackdropError::config(format!(
                "preset '{id}' is {}, config says {}",
                id.kind().as_str(),
                self.kind.as_str()
            )));
        }

        let s = &self.settings;
        for (name, value, max) in [
            ("intensity", s.intensity, KNOB_MAX),
            ("speed", s.speed, KNOB_MAX),
            ("density", s.density, KNOB_MAX),
            ("blur", s.blur, BLUR_MAX),
        ] {
            if !value.is_finite() || !(0.0..=max).contains(&value) {
                return Err(BackdropError::config(format!(
                    "settings.{name} must be within 0..={max}, got {value}"
                )));
            }
        }

        for (name, value) in [("color1", &self.color1), ("color2", &self.color2)] {
            if !value.is_empty() {
                Color::parse_hex(value)
                    .map_err(|e| BackdropError::config(format!("{name}: {e}")))?;
            }
        }
        Ok(())
    }
}
