use std::rc::Rc;

use kurbo::Size;

use crate::sim::host::{FrameHost, FrameRequest, ResizeObservation};

/// Lifecycle of a [`FrameLoop`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    /// Created, nothing scheduled yet.
    Idle,
    /// A frame callback is (or will be) scheduled after every frame.
    Running,
    /// Torn down; every host resource has been released.
    Cancelled,
}

/// Owned redraw loop plus resize observation.
///
/// Dropping the loop cancels its pending frame and disconnects its observer, so teardown
/// happens on every exit path.
pub struct FrameLoop {
    host: Rc<dyn FrameHost>,
    state: LoopState,
    pending: Option<FrameRequest>,
    observation: Option<ResizeObservation>,
}

impl std::fmt::Debug for FrameLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameLoop")
            .field("state", &self.state)
            .field("pending", &self.pending)
            .field("observation", &self.observation)
            .finish_non_exhaustive()
    }
}

impl FrameLoop {
    pub fn new(host: Rc<dyn FrameHost>) -> Self {
        Self {
            host,
            state: LoopState::Idle,
            pending: None,
            observation: None,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn host(&self) -> &Rc<dyn FrameHost> {
        &self.host
    }

    /// Start observing container resizes. Idempotent.
    pub fn observe(&mut self) {
        if self.state != LoopState::Cancelled && self.observation.is_none() {
            self.observation = Some(self.host.observe_resize());
        }
    }

    /// Idle → Running: schedule the first frame.
    pub fn start(&mut self) {
        if self.state == LoopState::Idle {
            self.state = LoopState::Running;
            self.pending = Some(self.host.request_frame());
        }
    }

    /// Whether the scheduled frame fires now. The caller draws, then calls
    /// [`FrameLoop::schedule_next`].
    pub fn take_frame(&mut self) -> bool {
        if self.state != LoopState::Running {
            return false;
        }
        match self.pending {
            Some(request) if self.host.take_frame(request) => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub fn schedule_next(&mut self) {
        if self.state == LoopState::Running && self.pending.is_none() {
            self.pending = Some(self.host.request_frame());
        }
    }

    pub fn take_resize(&mut self) -> Option<Size> {
        self.observation.and_then(|o| self.host.take_resize(o))
    }

    /// Release every host resource. Unconditional and idempotent.
    pub fn cancel(&mut self) {
        if let Some(request) = self.pending.take() {
            self.host.cancel_frame(request);
        }
        if let Some(observation) = self.observation.take() {
            self.host.disconnect(observation);
        }
        self.state = LoopState::Cancelled;
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sim/frame_loop.rs"]
mod tests;
