pub mod config;
pub mod error;
pub mod scroll;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{Config, ScrollConfig};
pub use error::{Error, Result};
pub use scroll::{
    is_element, offset, scroll_target, Axis, Completion, Dom, Easing, EasingFn, EasingLibrary,
    FrameCallback, FrameQueue, FrameScheduler, NodeLike, Offset, Rect, ScrollAnimator,
    ScrollCallback, ScrollOptions, ScrollOutcome, ScrollSettings, ScrollTarget, SettingsSummary,
};
