//! Mounting generator output into the background container.

pub mod layer;
pub mod renderer;
pub mod thumbnail;

pub use layer::WrapperStyle;
pub use renderer::{BackgroundRenderer, Mounted, MountedContent};
pub use thumbnail::{Thumbnail, render_thumbnail};
