//! L4 Atomic Layer: Time calculation utilities for scroll animations
//!
//! Timestamps are frame times in milliseconds, as handed out by the
//! frame scheduler.

/// Calculate animation progress (0.0 to 1.0) from elapsed time and duration
#[inline]
pub fn progress(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    (elapsed_ms / duration_ms).clamp(0.0, 1.0)
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
