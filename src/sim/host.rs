//! The rendering environment the particle canvas runs inside.
//!
//! A host schedules frame callbacks, observes container resizes and reports display
//! preferences. Callbacks are delivered by polling: the owner of a simulation asks the host
//! whether its frame or resize is due, which keeps the whole model single-threaded.

use std::cell::RefCell;
use std::collections::BTreeSet;

use kurbo::Size;

use crate::foundation::error::{BackdropError, BackdropResult};

/// Handle of one scheduled frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameRequest(pub u64);

/// Handle of one active resize observation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResizeObservation(pub u64);

pub trait FrameHost {
    /// Current container size in CSS pixels.
    fn viewport(&self) -> Size;

    fn device_pixel_ratio(&self) -> f64;

    fn prefers_reduced_motion(&self) -> bool;

    fn request_frame(&self) -> FrameRequest;

    fn cancel_frame(&self, request: FrameRequest);

    /// Whether `request` fires now. A fired request is consumed.
    fn take_frame(&self, request: FrameRequest) -> bool;

    fn observe_resize(&self) -> ResizeObservation;

    fn disconnect(&self, observation: ResizeObservation);

    /// The new container size if it changed since the last poll of `observation`.
    fn take_resize(&self, observation: ResizeObservation) -> Option<Size>;
}

#[derive(Debug)]
struct ManualState {
    viewport: Size,
    dpr: f64,
    reduced_motion: bool,
    next_id: u64,
    frames: BTreeSet<FrameRequest>,
    observers: BTreeSet<ResizeObservation>,
    resized: BTreeSet<ResizeObservation>,
    frames_fired: u64,
}

/// Deterministic headless host.
///
/// Every requested frame is due on the next poll. Tests use the counters to check that a
/// simulation leaves nothing scheduled behind.
#[derive(Debug)]
pub struct ManualHost {
    state: RefCell<ManualState>,
}

impl ManualHost {
    pub fn new(viewport: Size, device_pixel_ratio: f64) -> BackdropResult<Self> {
        check_viewport(viewport)?;
        if !device_pixel_ratio.is_finite() || device_pixel_ratio <= 0.0 {
            return Err(BackdropError::environment(format!(
                "device pixel ratio must be finite and > 0, got {device_pixel_ratio}"
            )));
        }
        Ok(Self {
            state: RefCell::new(ManualState {
                viewport,
                dpr: device_pixel_ratio,
                reduced_motion: false,
                next_id: 0,
                frames: BTreeSet::new(),
                observers: BTreeSet::new(),
                resized: BTreeSet::new(),
                frames_fired: 0,
            }),
        })
    }

    pub fn with_reduced_motion(self, reduced: bool) -> Self {
        self.state.borrow_mut().reduced_motion = reduced;
        self
    }

    /// Resize the container, notifying every active observer.
    pub fn set_viewport(&self, viewport: Size) -> BackdropResult<()> {
        check_viewport(viewport)?;
        let mut st = self.state.borrow_mut();
        if st.viewport != viewport {
            st.viewport = viewport;
            let observers = st.observers.clone();
            st.resized.extend(observers);
        }
        Ok(())
    }

    pub fn pending_frames(&self) -> usize {
        self.state.borrow().frames.len()
    }

    pub fn active_observers(&self) -> usize {
        self.state.borrow().observers.len()
    }

    pub fn frames_fired(&self) -> u64 {
        self.state.borrow().frames_fired
    }

    fn next_id(st: &mut ManualState) -> u64 {
        st.next_id += 1;
        st.next_id
    }
}

fn check_viewport(viewport: Size) -> BackdropResult<()> {
    if !(viewport.width.is_finite() && viewport.height.is_finite())
        || viewport.width <= 0.0
        || viewport.height <= 0.0
    {
        return Err(BackdropError::environment(format!(
            "container size must be finite and > 0, got {}x{}",
            viewport.width, viewport.height
        )));
    }
    Ok(())
}

impl FrameHost for ManualHost {
    fn viewport(&self) -> Size {
        self.state.borrow().viewport
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.state.borrow().dpr
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.state.borrow().reduced_motion
    }

    fn request_frame(&self) -> FrameRequest {
        let mut st = self.state.borrow_mut();
        let request = FrameRequest(Self::next_id(&mut st));
        st.frames.insert(request);
        request
    }

    fn cancel_frame(&self, request: FrameRequest) {
        self.state.borrow_mut().frames.remove(&request);
    }

    fn take_frame(&self, request: FrameRequest) -> bool {
        let mut st = self.state.borrow_mut();
        let fired = st.frames.remove(&request);
        if fired {
            st.frames_fired += 1;
        }
        fired
    }

    fn observe_resize(&self) -> ResizeObservation {
        let mut st = self.state.borrow_mut();
        let observation = ResizeObservation(Self::next_id(&mut st));
        st.observers.insert(observation);
        observation
    }

    fn disconnect(&self, observation: ResizeObservation) {
        let mut st = self.state.borrow_mut();
        st.observers.remove(&observation);
        st.resized.remove(&observation);
    }

    fn take_resize(&self, observation: ResizeObservation) -> Option<Size> {
        let mut st = self.state.borrow_mut();
        st.resized.remove(&observation).then_some(st.viewport)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sim/host.rs"]
mod tests;
