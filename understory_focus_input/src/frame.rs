// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation-frame scheduling.
//!
//! The driver never sleeps or spawns. When it needs to run again on the next
//! frame (to poll gamepads or step a scroll animation) it asks a
//! [`FrameClock`] for one, and the host later calls
//! [`FocusInput::on_frame`](crate::FocusInput::on_frame) with the frame time.

/// Handle of a requested frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameId(pub u64);

/// Schedules frame callbacks, like `requestAnimationFrame`.
pub trait FrameClock {
    /// Ask for one call to `on_frame` on the next frame.
    fn request_frame(&mut self) -> FrameId;

    /// Withdraw a request made with [`request_frame`](Self::request_frame).
    fn cancel_frame(&mut self, id: FrameId);
}

/// A [`FrameClock`] for hosts that run their own loop.
///
/// Each iteration, the host checks [`take`](Self::take) and, if a frame was
/// requested, calls `on_frame`.
#[derive(Clone, Debug, Default)]
pub struct FrameQueue {
    next: u64,
    pending: Option<FrameId>,
}

impl FrameQueue {
    /// Create a queue with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// The outstanding request, if any.
    pub fn pending(&self) -> Option<FrameId> {
        self.pending
    }

    /// Consume the outstanding request.
    pub fn take(&mut self) -> Option<FrameId> {
        self.pending.take()
    }
}

impl FrameClock for FrameQueue {
    fn request_frame(&mut self) -> FrameId {
        self.next += 1;
        let id = FrameId(self.next);
        self.pending = Some(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        if self.pending == Some(id) {
            self.pending = None;
        }
    }
}
