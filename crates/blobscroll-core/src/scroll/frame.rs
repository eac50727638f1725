//! L4 Atomic Layer: Frame scheduling
//!
//! The animator asks for "the next frame" and is handed a timestamp when it
//! arrives. Browsers answer with their display refresh; everything else can
//! use `FrameQueue` and advance it from its own loop.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Work to run on the next frame, given its timestamp in milliseconds
pub type FrameCallback = Box<dyn FnOnce(f64)>;

pub trait FrameScheduler {
    /// Run `callback` once, on the next frame
    fn request_frame(&self, callback: FrameCallback);
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for Rc<S> {
    fn request_frame(&self, callback: FrameCallback) {
        (**self).request_frame(callback)
    }
}

/// Host-driven scheduler
///
/// Requests pile up until the host calls `advance()`. Callbacks requested
/// while a frame runs wait for the following frame. Clones share the queue.
#[derive(Clone, Default)]
pub struct FrameQueue {
    pending: Rc<RefCell<VecDeque<FrameCallback>>>,
}

impl std::fmt::Debug for FrameQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameQueue")
            .field("pending", &self.len())
            .finish()
    }
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of callbacks waiting for the next frame
    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }

    /// Run one frame at `timestamp`, returning how many callbacks ran
    pub fn advance(&self, timestamp: f64) -> usize {
        let batch: Vec<FrameCallback> = self.pending.borrow_mut().drain(..).collect();
        let count = batch.len();
        for callback in batch {
            callback(timestamp);
        }
        count
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&self, callback: FrameCallback) {
        self.pending.borrow_mut().push_back(callback);
    }
}
