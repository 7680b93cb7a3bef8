//! The connected-particle canvas simulation and the host seam it runs against.

pub mod drift;
pub mod frame_loop;
pub mod host;
pub mod particle;
pub mod surface;

pub use drift::ParticleDrift;
pub use frame_loop::{FrameLoop, LoopState};
pub use host::{FrameHost, FrameRequest, ManualHost, ResizeObservation};
pub use particle::{CONNECTION_DISTANCE, Particle};
pub use surface::{Backing, DrawOp, MAX_DPR, PixmapSurface, RecordingSurface, Surface};
