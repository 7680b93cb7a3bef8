use serde::{Deserialize, Serialize};

use crate::theme::color::Color;

/// Ratio of `color2` in the derived border tone.
pub const BORDER_MIX: f64 = 0.35;
/// Ratio of `color2` in the derived muted tone.
pub const MUTED_MIX: f64 = 0.7;

/// Named theme colors generators paint with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThemePalette {
    pub primary: Color,
    pub secondary: Color,
    pub border: Color,
    pub muted: Color,
    pub bg: Color,
    pub text: Color,
}

/// Built-in palettes, in display order.
pub const PALETTE_NAMES: [&str; 6] = ["ocean", "sunset", "forest", "grape", "slate", "sand"];

impl ThemePalette {
    /// Look up a built-in palette by name.
    pub fn named(name: &str) -> Option<Self> {
        let hex: [u32; 6] = match name {
            "ocean" => [0x0ea5e9, 0x06b6d4, 0x7dd3fc, 0xe0f2fe, 0xf0f9ff, 0x0c4a6e],
            "sunset" => [0xf97316, 0xec4899, 0xfdba74, 0xffedd5, 0xfff7ed, 0x7c2d12],
            "forest" => [0x16a34a, 0x65a30d, 0x86efac, 0xdcfce7, 0xf0fdf4, 0x14532d],
            "grape" => [0x9333ea, 0xc026d3, 0xd8b4fe, 0xf3e8ff, 0xfaf5ff, 0x581c87],
            "slate" => [0x475569, 0x64748b, 0xcbd5e1, 0xf1f5f9, 0xf8fafc, 0x0f172a],
            "sand" => [0xd97706, 0xa16207, 0xfcd34d, 0xfef3c7, 0xfffbeb, 0x78350f],
            _ => return None,
        };
        let c = |v: u32| Color::rgb8((v >> 16) as u8, (v >> 8) as u8, v as u8);
        Some(Self {
            primary: c(hex[0]),
            secondary: c(hex[1]),
            border: c(hex[2]),
            muted: c(hex[3]),
            bg: c(hex[4]),
            text: c(hex[5]),
        })
    }

    /// Apply user color overrides; `bg` and `text` are never overridden.
    pub fn with_overrides(self, overrides: Option<&ColorOverrides>) -> Self {
        match overrides {
            Some(o) => Self {
                primary: o.primary,
                secondary: o.secondary,
                border: o.border,
                muted: o.muted,
                ..self
            },
            None => self,
        }
    }

    /// CSS custom properties for the whole palette.
    pub fn css_vars(&self) -> Vec<(&'static str, String)> {
        vec![
            ("--primary", self.primary.to_hex()),
            ("--secondary", self.secondary.to_hex()),
            ("--border", self.border.to_hex()),
            ("--muted", self.muted.to_hex()),
            ("--bg", self.bg.to_hex()),
            ("--text", self.text.to_hex()),
        ]
    }
}

impl Default for ThemePalette {
    fn default() -> Self {
        Self::named("ocean").unwrap_or(Self {
            primary: Color::BLACK,
            secondary: Color::BLACK,
            border: Color::BLACK,
            muted: Color::BLACK,
            bg: Color::WHITE,
            text: Color::BLACK,
        })
    }
}

/// Scoped color variables the renderer injects when the user picked `color1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorOverrides {
    pub primary: Color,
    pub secondary: Color,
    pub border: Color,
    pub muted: Color,
}

impl ColorOverrides {
    /// Derive the override set from the two user colors.
    ///
    /// Returns `None` when `color1` is empty or unparsable. An empty or unparsable `color2`
    /// falls back to `color1`.
    pub fn derive(color1: &str, color2: &str) -> Option<Self> {
        if color1.trim().is_empty() {
            return None;
        }
        let primary = Color::parse_hex(color1).ok()?;
        let secondary = Color::parse_hex(color2).unwrap_or(primary);
        Some(Self {
            primary,
            secondary,
            border: primary.mix_oklab(secondary, BORDER_MIX),
            muted: primary.mix_oklab(secondary, MUTED_MIX),
        })
    }

    pub fn css_vars(&self) -> Vec<(&'static str, String)> {
        vec![
            ("--primary", self.primary.to_hex()),
            ("--secondary", self.secondary.to_hex()),
            ("--border", self.border.to_hex()),
            ("--muted", self.muted.to_hex()),
        ]
    }
}
