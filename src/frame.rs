//! Coalesces bursts of scroll and resize events into at most one
//! recomputation per animation frame.

/// Handle returned by `requestAnimationFrame`.
pub type FrameHandle = i32;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FrameGate {
    scheduled: Option<FrameHandle>,
}

impl FrameGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no frame is pending and the caller should request one.
    pub fn is_idle(&self) -> bool {
        self.scheduled.is_none()
    }

    pub fn schedule(&mut self, handle: FrameHandle) {
        debug_assert!(self.scheduled.is_none(), "frame {handle} scheduled twice");
        self.scheduled = Some(handle);
    }

    /// Called from the frame callback. True once per scheduled frame.
    pub fn fire(&mut self) -> bool {
        self.scheduled.take().is_some()
    }

    /// Pending handle to cancel on teardown.
    pub fn cancel(&mut self) -> Option<FrameHandle> {
        self.scheduled.take()
    }
}
