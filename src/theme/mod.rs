pub mod color;
pub mod palette;

pub use color::Color;
pub use palette::{ColorOverrides, PALETTE_NAMES, ThemePalette};
