//! L3 Molecular Layer: Target resolution
//!
//! Turns whatever the caller pointed at (a number, a pixel string, an
//! element, a collection of elements or a selector) into an absolute
//! scroll offset inside a parent. Unrecognised input resolves to 0.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::dom::{Axis, Dom, Offset};
use super::element::is_element;

static PIXEL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d.]+(px)?$").expect("pixel pattern is valid"));

/// Something to scroll to
#[derive(Debug, Clone, PartialEq)]
pub enum ScrollTarget<E> {
    /// Nothing; resolves to 0
    None,
    Pixels(f64),
    /// A pixel string such as "150px", or else a selector
    Text(String),
    Element(E),
    /// Element-like collection; its first entry is the target
    Collection(Vec<E>),
}

impl<E> ScrollTarget<E> {
    /// Whether this target counts as "nothing" (0, NaN, empty string)
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Pixels(px) => *px == 0.0 || px.is_nan(),
            Self::Text(text) => text.is_empty(),
            Self::Element(_) | Self::Collection(_) => false,
        }
    }
}

impl<E> Default for ScrollTarget<E> {
    fn default() -> Self {
        Self::None
    }
}

impl<E> From<f64> for ScrollTarget<E> {
    fn from(px: f64) -> Self {
        Self::Pixels(px)
    }
}

impl<E> From<i32> for ScrollTarget<E> {
    fn from(px: i32) -> Self {
        Self::Pixels(px as f64)
    }
}

impl<E> From<&str> for ScrollTarget<E> {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl<E> From<String> for ScrollTarget<E> {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl<E> From<Vec<E>> for ScrollTarget<E> {
    fn from(elements: Vec<E>) -> Self {
        Self::Collection(elements)
    }
}

/// Numeric value of a string under loose (JavaScript `Number`) rules
///
/// Surrounding whitespace is ignored and a blank string is 0. Returns
/// `None` where such a conversion would give NaN.
pub fn parse_numeric(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix).ok().map(|v| v as f64);
        }
    }

    match trimmed.trim_start_matches(['+', '-']) {
        "Infinity" => {
            let sign = if trimmed.starts_with('-') { -1.0 } else { 1.0 };
            return (trimmed.len() <= "Infinity".len() + 1).then_some(sign * f64::INFINITY);
        }
        // Rust accepts spellings that JavaScript does not ("inf", "nan", ...)
        rest if rest.starts_with(|c: char| c.is_ascii_alphabetic()) => return None,
        _ => {}
    }

    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Leading integer of a string (JavaScript `parseInt(text, 10)`)
///
/// `"150px"` is 150, `"12.9"` is 12 and `"1e3"` is 1.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

fn pixels_from_number(px: f64) -> f64 {
    if px.is_finite() {
        px.trunc()
    } else {
        0.0
    }
}

fn pixels_from_text(text: &str) -> Option<f64> {
    if parse_numeric(text).is_none() && !PIXEL_PATTERN.is_match(text) {
        return None;
    }
    Some(parse_leading_int(text).map(|v| v as f64).unwrap_or(0.0))
}

/// Position of `element` relative to `parent`
///
/// Falls back to the document element when `parent` is missing or not
/// element-like. Geometry failures (e.g. a detached node) give a zero
/// offset instead of an error.
pub fn offset<D: Dom>(dom: &D, element: &D::Element, parent: Option<&D::Element>) -> Offset {
    if !is_element(element) {
        return Offset::default();
    }

    let fallback;
    let parent = match parent.filter(|p| is_element(*p)) {
        Some(parent) => Some(parent),
        None => {
            fallback = dom.document_element();
            fallback.as_ref()
        }
    };

    match dom.bounding_client_rect(element) {
        Ok(rect) => {
            let (scroll_top, scroll_left) = parent
                .map(|p| {
                    (
                        dom.scroll_position(p, Axis::Vertical),
                        dom.scroll_position(p, Axis::Horizontal),
                    )
                })
                .unwrap_or((0.0, 0.0));
            Offset {
                top: rect.top + scroll_top,
                left: rect.left + scroll_left,
            }
        }
        Err(e) => {
            debug!(error = %e, "Could not measure element, using zero offset");
            Offset::default()
        }
    }
}

/// Resolve `thing` to a scroll offset in pixels along `axis`
///
/// Order: empty values, numbers and pixel strings, elements, collections
/// (first entry), then selectors queried inside `parent`.
pub fn scroll_target<D: Dom>(
    dom: &D,
    thing: &ScrollTarget<D::Element>,
    parent: Option<&D::Element>,
    axis: Axis,
) -> f64 {
    if thing.is_empty() {
        return 0.0;
    }

    match thing {
        ScrollTarget::Pixels(px) => pixels_from_number(*px),
        ScrollTarget::Element(element) if is_element(element) => {
            offset(dom, element, parent).along(axis)
        }
        ScrollTarget::Collection(elements) => match elements.first() {
            Some(first) if is_element(first) => offset(dom, first, parent).along(axis),
            _ => 0.0,
        },
        ScrollTarget::Text(text) => {
            if let Some(px) = pixels_from_text(text) {
                return px;
            }
            let scope = match parent {
                Some(parent) => Some(parent.clone()),
                None => dom.document_element(),
            };
            match scope.and_then(|scope| dom.query_selector(&scope, text)) {
                Some(found) if is_element(&found) => offset(dom, &found, parent).along(axis),
                _ => {
                    debug!(selector = %text, "Scroll target matched nothing");
                    0.0
                }
            }
        }
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeDom, FakeElement};

    fn resolve(dom: &FakeDom, thing: impl Into<ScrollTarget<FakeElement>>) -> f64 {
        scroll_target(dom, &thing.into(), Some(&dom.root()), Axis::Vertical)
    }

    #[test]
    fn test_numbers_and_pixel_strings() {
        let dom = FakeDom::new();
        assert_eq!(resolve(&dom, 150), 150.0);
        assert_eq!(resolve(&dom, 150.9), 150.0);
        assert_eq!(resolve(&dom, -20.5), -20.0);
        assert_eq!(resolve(&dom, "150px"), 150.0);
        assert_eq!(resolve(&dom, "150"), 150.0);
        assert_eq!(resolve(&dom, "12.75px"), 12.0);
        assert_eq!(resolve(&dom, " 42 "), 42.0);
        assert_eq!(resolve(&dom, "1e3"), 1.0);
    }

    #[test]
    fn test_empty_things() {
        let dom = FakeDom::new();
        assert_eq!(resolve(&dom, ""), 0.0);
        assert_eq!(resolve(&dom, ScrollTarget::<FakeElement>::None), 0.0);
        assert_eq!(resolve(&dom, 0), 0.0);
        assert_eq!(resolve(&dom, f64::NAN), 0.0);
        assert_eq!(resolve(&dom, f64::INFINITY), 0.0);
        assert_eq!(resolve(&dom, "Infinity"), 0.0);
        assert_eq!(resolve(&dom, ".px"), 0.0);
    }

    #[test]
    fn test_element_offsets() {
        let dom = FakeDom::new();
        let el = dom.add(800.0, 120.0);
        let root = dom.root();

        let target = ScrollTarget::Element(el);

        assert_eq!(scroll_target(&dom, &target, Some(&root), Axis::Vertical), 800.0);
        assert_eq!(scroll_target(&dom, &target, Some(&root), Axis::Horizontal), 120.0);

        // Position is stable while the parent is scrolled
        dom.set_scroll_position(&root, Axis::Vertical, 300.0);
        assert_eq!(scroll_target(&dom, &target, Some(&root), Axis::Vertical), 800.0);
    }

    #[test]
    fn test_nested_scroller() {
        let dom = FakeDom::new();
        let panel = dom.add(100.0, 0.0);
        let row = dom.add_in(&panel, 250.0, 0.0);
        dom.set_scroll_position(&panel, Axis::Vertical, 50.0);

        let top = scroll_target(&dom, &ScrollTarget::Element(row), Some(&panel), Axis::Vertical);
        // viewport top (100 + 250 - 50) plus the panel's own scroll
        assert_eq!(top, 350.0);
    }

    #[test]
    fn test_collection_uses_first_entry() {
        let dom = FakeDom::new();
        let first = dom.add(400.0, 0.0);
        let second = dom.add(900.0, 0.0);
        assert_eq!(resolve(&dom, vec![first, second]), 400.0);
        assert_eq!(resolve(&dom, vec![FakeElement::Opaque]), 0.0);
        assert_eq!(resolve(&dom, Vec::<FakeElement>::new()), 0.0);
    }

    #[test]
    fn test_selectors() {
        let dom = FakeDom::new();
        let heading = dom.add(640.0, 0.0);
        dom.register("#comments", &heading);

        assert_eq!(resolve(&dom, "#comments"), 640.0);
        assert_eq!(resolve(&dom, "#missing"), 0.0);
    }

    #[test]
    fn test_detached_element_resolves_to_zero() {
        let dom = FakeDom::new();
        let el = dom.add(500.0, 0.0);
        dom.detach(&el);
        assert_eq!(offset(&dom, &el, Some(&dom.root())), Offset::default());
        assert_eq!(resolve(&dom, ScrollTarget::Element(el)), 0.0);
    }

    #[test]
    fn test_non_element_handle() {
        let dom = FakeDom::new();
        assert_eq!(offset(&dom, &FakeElement::Opaque, None), Offset::default());
        assert_eq!(resolve(&dom, ScrollTarget::Element(FakeElement::Opaque)), 0.0);
    }

    #[test]
    fn test_offset_defaults_parent_to_document() {
        let dom = FakeDom::new();
        let el = dom.add(300.0, 40.0);
        let got = offset(&dom, &el, Some(&FakeElement::Opaque));
        assert_eq!(got, Offset { top: 300.0, left: 40.0 });
    }

    #[test]
    fn test_parse_numeric() {
        assert_eq!(parse_numeric("12"), Some(12.0));
        assert_eq!(parse_numeric(" 1.5 "), Some(1.5));
        assert_eq!(parse_numeric(""), Some(0.0));
        assert_eq!(parse_numeric("0x10"), Some(16.0));
        assert_eq!(parse_numeric("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_numeric("12px"), None);
        assert_eq!(parse_numeric("inf"), None);
        assert_eq!(parse_numeric("NaN"), None);
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("150px"), Some(150));
        assert_eq!(parse_leading_int("-7.9"), Some(-7));
        assert_eq!(parse_leading_int("  33"), Some(33));
        assert_eq!(parse_leading_int("px"), None);
        assert_eq!(parse_leading_int(""), None);
    }
}
