//! L3 Molecular Layer: Scroll options and resolved settings
//!
//! Options are loose: every field is optional and anything invalid quietly
//! falls back to the configured default. Resolution never fails except
//! when the platform has no scrollable parent to offer.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::dom::{Axis, Dom};
use super::easing::EasingLibrary;
use super::element::is_element;
use super::target::{parse_numeric, scroll_target, ScrollTarget};
use crate::config::{ScrollConfig, DEFAULT_TRANSITION};

/// Called once when an animation finishes on its own
pub type ScrollCallback<E> = Box<dyn FnOnce(&ScrollTarget<E>, &ScrollSettings<E>)>;

/// Per-call options, validated when the scroll starts
pub struct ScrollOptions<E> {
    /// Anything containing "x" scrolls horizontally
    pub axis: Option<String>,
    /// Milliseconds; must be a positive finite number
    pub duration: Option<f64>,
    /// Pixels added to the resolved target
    pub offset: Option<f64>,
    /// Scroll container; must be element-like
    pub parent: Option<E>,
    /// Easing curve name
    pub transition: Option<String>,
    pub callback: Option<ScrollCallback<E>>,
}

impl<E> Default for ScrollOptions<E> {
    fn default() -> Self {
        Self {
            axis: None,
            duration: None,
            offset: None,
            parent: None,
            transition: None,
            callback: None,
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for ScrollOptions<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollOptions")
            .field("axis", &self.axis)
            .field("duration", &self.duration)
            .field("offset", &self.offset)
            .field("parent", &self.parent)
            .field("transition", &self.transition)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

impl<E> ScrollOptions<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn axis(mut self, axis: impl Into<String>) -> Self {
        self.axis = Some(axis.into());
        self
    }

    pub fn duration(mut self, ms: f64) -> Self {
        self.duration = Some(ms);
        self
    }

    pub fn offset(mut self, px: f64) -> Self {
        self.offset = Some(px);
        self
    }

    pub fn parent(mut self, parent: E) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn transition(mut self, name: impl Into<String>) -> Self {
        self.transition = Some(name.into());
        self
    }

    pub fn callback<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(&ScrollTarget<E>, &ScrollSettings<E>) + 'static,
    {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Read options from a loosely typed object
    ///
    /// Numbers may be given as numeric strings. Values of the wrong type
    /// are skipped, as is anything that is not an object.
    pub fn from_json(value: &serde_json::Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::default();
        };

        let number = |key: &str| match map.get(key)? {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => parse_numeric(s),
            _ => None,
        };
        let string = |key: &str| map.get(key)?.as_str().map(str::to_string);

        Self {
            axis: string("axis"),
            duration: number("duration"),
            offset: number("offset"),
            parent: None,
            transition: string("transition"),
            callback: None,
        }
    }
}

/// Settings of one scroll call after validation
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollSettings<E> {
    pub axis: Axis,
    pub duration_ms: u64,
    pub offset_px: i64,
    pub parent: E,
    pub transition: String,
    /// Where the animation ends, never below 0
    pub scroll_target: f64,
    /// Parent's scroll offset when the call was made
    pub scroll_from: f64,
    pub scroll_distance: f64,
}

/// Settings without the parent handle, for crossing API boundaries
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsSummary {
    pub axis: Axis,
    pub duration_ms: u64,
    pub offset_px: i64,
    pub transition: String,
    pub scroll_target: f64,
    pub scroll_from: f64,
    pub scroll_distance: f64,
}

impl<E> ScrollSettings<E> {
    pub fn summary(&self) -> SettingsSummary {
        SettingsSummary {
            axis: self.axis,
            duration_ms: self.duration_ms,
            offset_px: self.offset_px,
            transition: self.transition.clone(),
            scroll_target: self.scroll_target,
            scroll_from: self.scroll_from,
            scroll_distance: self.scroll_distance,
        }
    }
}

/// Validate `options` against `config` and work out the trajectory
///
/// Returns `None` only when no parent can be found.
pub fn resolve<D: Dom>(
    dom: &D,
    config: &ScrollConfig,
    library: &EasingLibrary,
    target: &ScrollTarget<D::Element>,
    options: &ScrollOptions<D::Element>,
) -> Option<ScrollSettings<D::Element>> {
    let axis = options
        .axis
        .as_deref()
        .map(Axis::parse)
        .unwrap_or_else(|| config.axis());

    let duration_ms = match options.duration {
        Some(ms) if ms.is_finite() && ms >= 1.0 => ms.trunc() as u64,
        Some(ms) => {
            debug!(duration = ms, "Ignoring invalid scroll duration");
            config.duration_ms()
        }
        None => config.duration_ms(),
    };

    let offset_px = match options.offset {
        Some(px) if px.is_finite() => px.trunc() as i64,
        Some(px) => {
            debug!(offset = px, "Ignoring invalid scroll offset");
            config.offset_px
        }
        None => config.offset_px,
    };

    let parent = match options.parent.as_ref().filter(|p| is_element(*p)) {
        Some(parent) => parent.clone(),
        None => default_parent(dom)?,
    };

    let transition = [options.transition.as_deref(), Some(config.transition.as_str())]
        .into_iter()
        .flatten()
        .find(|name| library.contains(name))
        .unwrap_or(DEFAULT_TRANSITION)
        .to_string();
    if options.transition.as_deref().is_some_and(|t| t != transition) {
        debug!(requested = ?options.transition, using = %transition, "Unknown transition");
    }

    let mut scroll_target = scroll_target(dom, target, Some(&parent), axis) + offset_px as f64;
    if scroll_target < 0.0 {
        scroll_target = 0.0;
    }
    let scroll_from = dom.scroll_position(&parent, axis);

    Some(ScrollSettings {
        axis,
        duration_ms,
        offset_px,
        parent,
        transition,
        scroll_target,
        scroll_from,
        scroll_distance: scroll_target - scroll_from,
    })
}

/// The document's scrolling root, or the body when the root cannot move
///
/// Some engines report a scroll offset on the root but only honour writes
/// on the body. The probe nudges the root by one pixel and checks the
/// readback; the nudge is left in place.
fn default_parent<D: Dom>(dom: &D) -> Option<D::Element> {
    let root = dom.scrolling_element().or_else(|| dom.document_element())?;

    let current = dom.scroll_position(&root, Axis::Vertical);
    let nudged = if current > 0.0 { current - 1.0 } else { current + 1.0 };
    dom.set_scroll_position(&root, Axis::Vertical, nudged);

    if dom.scroll_position(&root, Axis::Vertical) != nudged {
        debug!("Scrolling root ignored a write, falling back to body");
        return dom.body().or(Some(root));
    }
    Some(root)
}
