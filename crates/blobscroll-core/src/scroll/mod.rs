//! Smooth scrolling toward an element, selector or pixel offset
//!
//! A scroll call resolves its settings, works out where it is going and
//! then nudges the parent's scroll offset once per frame until the easing
//! curve reaches 1 or another call takes over.
//!
//! # Layers
//!
//! ## L4 Atomic Layer
//! - `easing` - Pure easing curves and the named lookup table
//! - `timing` - Progress and interpolation helpers
//! - `element` - Element-like detection
//! - `dom` - Platform seam (element geometry and scroll offsets)
//! - `frame` - Frame scheduling seam and a host-driven queue
//!
//! ## L3 Molecular Layer
//! - `target` - Target resolution to pixel offsets
//! - `settings` - Option validation and defaults
//! - `animation` - Single-flight animation controller
//!
//! # Usage
//!
//! ```ignore
//! use blobscroll_core::{FrameQueue, ScrollAnimator, ScrollOptions};
//!
//! let frames = FrameQueue::new();
//! let animator = ScrollAnimator::new(dom, frames.clone());
//!
//! animator.scroll("#comments", ScrollOptions::new().transition("easeOutQuad"));
//!
//! // In the host's loop, once per frame:
//! frames.advance(now_ms);
//! ```

// L4 Atomic Layer
pub mod dom;
pub mod easing;
pub mod element;
pub mod frame;
pub mod timing;

// L3 Molecular Layer
pub mod animation;
pub mod settings;
pub mod target;

pub use animation::{Completion, ScrollAnimator, ScrollOutcome};
pub use dom::{Axis, Dom, Offset, Rect};
pub use easing::{Easing, EasingFn, EasingLibrary};
pub use element::{is_element, NodeLike};
pub use frame::{FrameCallback, FrameQueue, FrameScheduler};
pub use settings::{ScrollCallback, ScrollOptions, ScrollSettings, SettingsSummary};
pub use target::{offset, scroll_target, ScrollTarget};
