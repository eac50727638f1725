//! L4 Atomic Layer: Pure easing functions for scroll animations
//!
//! Every curve maps elapsed progress in [0, 1] to covered distance in [0, 1],
//! hitting both endpoints exactly.
//!
//! See <https://gist.github.com/gre/1650294> for the formulas.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Signature shared by every easing curve
pub type EasingFn = fn(f64) -> f64;

/// The built-in named curves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Easing {
    Linear,
    /// Alias of `EaseInOutCubic`
    Ease,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    EaseInQuint,
    EaseOutQuint,
    EaseInOutQuint,
}

impl Easing {
    pub const ALL: [Easing; 14] = [
        Easing::Linear,
        Easing::Ease,
        Easing::EaseInQuad,
        Easing::EaseOutQuad,
        Easing::EaseInOutQuad,
        Easing::EaseInCubic,
        Easing::EaseOutCubic,
        Easing::EaseInOutCubic,
        Easing::EaseInQuart,
        Easing::EaseOutQuart,
        Easing::EaseInOutQuart,
        Easing::EaseInQuint,
        Easing::EaseOutQuint,
        Easing::EaseInOutQuint,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Ease => "ease",
            Self::EaseInQuad => "easeInQuad",
            Self::EaseOutQuad => "easeOutQuad",
            Self::EaseInOutQuad => "easeInOutQuad",
            Self::EaseInCubic => "easeInCubic",
            Self::EaseOutCubic => "easeOutCubic",
            Self::EaseInOutCubic => "easeInOutCubic",
            Self::EaseInQuart => "easeInQuart",
            Self::EaseOutQuart => "easeOutQuart",
            Self::EaseInOutQuart => "easeInOutQuart",
            Self::EaseInQuint => "easeInQuint",
            Self::EaseOutQuint => "easeOutQuint",
            Self::EaseInOutQuint => "easeInOutQuint",
        }
    }

    /// The curve as a plain function pointer
    pub fn function(&self) -> EasingFn {
        match self {
            Self::Linear => linear,
            Self::Ease | Self::EaseInOutCubic => ease_in_out_cubic,
            Self::EaseInQuad => ease_in_quad,
            Self::EaseOutQuad => ease_out_quad,
            Self::EaseInOutQuad => ease_in_out_quad,
            Self::EaseInCubic => ease_in_cubic,
            Self::EaseOutCubic => ease_out_cubic,
            Self::EaseInQuart => ease_in_quart,
            Self::EaseOutQuart => ease_out_quart,
            Self::EaseInOutQuart => ease_in_out_quart,
            Self::EaseInQuint => ease_in_quint,
            Self::EaseOutQuint => ease_out_quint,
            Self::EaseInOutQuint => ease_in_out_quint,
        }
    }

    /// Apply the easing function to a progress value
    #[inline]
    pub fn apply(&self, t: f64) -> f64 {
        (self.function())(t)
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Easing {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Self::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| crate::Error::Other(format!("Unknown easing: {}", s)))
    }
}

/// Simple linear: f(t) = t
#[inline]
pub fn linear(t: f64) -> f64 {
    t
}

/// Quad accelerate in: f(t) = t²
#[inline]
pub fn ease_in_quad(t: f64) -> f64 {
    t * t
}

/// Quad decelerate out: f(t) = t(2 - t)
#[inline]
pub fn ease_out_quad(t: f64) -> f64 {
    t * (2.0 - t)
}

#[inline]
pub fn ease_in_out_quad(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

/// Cubic accelerate in: f(t) = t³
#[inline]
pub fn ease_in_cubic(t: f64) -> f64 {
    t * t * t
}

/// Cubic decelerate out: f(t) = (t-1)³ + 1
#[inline]
pub fn ease_out_cubic(t: f64) -> f64 {
    let u = t - 1.0;
    u * u * u + 1.0
}

/// Cubic in/out, also registered as "ease"
#[inline]
pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let v = 2.0 * t - 2.0;
        (t - 1.0) * v * v + 1.0
    }
}

#[inline]
pub fn ease_in_quart(t: f64) -> f64 {
    t * t * t * t
}

#[inline]
pub fn ease_out_quart(t: f64) -> f64 {
    let u = t - 1.0;
    1.0 - u * u * u * u
}

#[inline]
pub fn ease_in_out_quart(t: f64) -> f64 {
    if t < 0.5 {
        8.0 * t * t * t * t
    } else {
        let u = t - 1.0;
        1.0 - 8.0 * u * u * u * u
    }
}

#[inline]
pub fn ease_in_quint(t: f64) -> f64 {
    t * t * t * t * t
}

#[inline]
pub fn ease_out_quint(t: f64) -> f64 {
    let u = t - 1.0;
    1.0 + u * u * u * u * u
}

#[inline]
pub fn ease_in_out_quint(t: f64) -> f64 {
    if t < 0.5 {
        16.0 * t * t * t * t * t
    } else {
        let u = t - 1.0;
        1.0 + 16.0 * u * u * u * u * u
    }
}

/// Named easing curves, open for registration
///
/// Scroll calls pick their curve from this table by name. Unknown names
/// fall back to "ease" when settings are resolved.
#[derive(Clone)]
pub struct EasingLibrary {
    curves: HashMap<String, EasingFn>,
}

impl Default for EasingLibrary {
    fn default() -> Self {
        let curves = Easing::ALL
            .iter()
            .map(|e| (e.as_str().to_string(), e.function()))
            .collect();
        Self { curves }
    }
}

impl fmt::Debug for EasingLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EasingLibrary")
            .field("names", &self.names())
            .finish()
    }
}

impl EasingLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a named curve
    pub fn register(&mut self, name: impl Into<String>, curve: EasingFn) {
        self.curves.insert(name.into(), curve);
    }

    pub fn get(&self, name: &str) -> Option<EasingFn> {
        self.curves.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.curves.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.curves.keys().cloned().collect();
        names.sort();
        names
    }

    /// Evaluate a named curve directly, for animations other than scrolling
    pub fn apply(&self, name: &str, t: f64) -> Option<f64> {
        self.get(name).map(|curve| curve(t))
    }
}
