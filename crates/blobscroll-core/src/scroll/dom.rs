//! L4 Atomic Layer: The platform seam
//!
//! The animator never touches a document directly. A host supplies a `Dom`
//! that knows how to read geometry and move scroll offsets for its own
//! element handles.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::element::NodeLike;

/// Scroll axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Axis {
    #[serde(rename = "x")]
    Horizontal,
    #[default]
    #[serde(rename = "y")]
    Vertical,
}

impl Axis {
    /// Any string containing an "x" (either case) means horizontal
    pub fn parse(value: &str) -> Self {
        if value.contains(['x', 'X']) {
            Self::Horizontal
        } else {
            Self::Vertical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Horizontal => "x",
            Self::Vertical => "y",
        }
    }
}

/// Viewport-relative bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

/// Element position relative to a scroll parent
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub top: f64,
    pub left: f64,
}

impl Offset {
    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }
}

/// Document access needed to resolve targets and drive scroll offsets
pub trait Dom {
    /// Handle to a node in this document
    type Element: NodeLike + Clone + std::fmt::Debug;

    /// The document's designated scrolling root, if the platform names one
    fn scrolling_element(&self) -> Option<Self::Element>;

    /// The root element of the document
    fn document_element(&self) -> Option<Self::Element>;

    fn body(&self) -> Option<Self::Element>;

    /// Current scroll offset of `element` along `axis`, in pixels
    fn scroll_position(&self, element: &Self::Element, axis: Axis) -> f64;

    fn set_scroll_position(&self, element: &Self::Element, axis: Axis, value: f64);

    /// Bounding box of `element` relative to the viewport
    ///
    /// Fails for nodes that have no layout, e.g. detached ones.
    fn bounding_client_rect(&self, element: &Self::Element) -> crate::Result<Rect>;

    /// First descendant of `parent` matching `selector`
    fn query_selector(&self, parent: &Self::Element, selector: &str) -> Option<Self::Element>;
}

impl<D: Dom + ?Sized> Dom for Rc<D> {
    type Element = D::Element;

    fn scrolling_element(&self) -> Option<Self::Element> {
        (**self).scrolling_element()
    }

    fn document_element(&self) -> Option<Self::Element> {
        (**self).document_element()
    }

    fn body(&self) -> Option<Self::Element> {
        (**self).body()
    }

    fn scroll_position(&self, element: &Self::Element, axis: Axis) -> f64 {
        (**self).scroll_position(element, axis)
    }

    fn set_scroll_position(&self, element: &Self::Element, axis: Axis, value: f64) {
        (**self).set_scroll_position(element, axis, value)
    }

    fn bounding_client_rect(&self, element: &Self::Element) -> crate::Result<Rect> {
        (**self).bounding_client_rect(element)
    }

    fn query_selector(&self, parent: &Self::Element, selector: &str) -> Option<Self::Element> {
        (**self).query_selector(parent, selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_parse() {
        assert_eq!(Axis::parse("x"), Axis::Horizontal);
        assert_eq!(Axis::parse("X"), Axis::Horizontal);
        assert_eq!(Axis::parse("ax"), Axis::Horizontal);
        assert_eq!(Axis::parse("y"), Axis::Vertical);
        assert_eq!(Axis::parse(""), Axis::Vertical);
        assert_eq!(Axis::parse("horizontal"), Axis::Vertical);
    }

    #[test]
    fn test_axis_serde_matches_as_str() {
        for axis in [Axis::Horizontal, Axis::Vertical] {
            let json = serde_json::to_value(axis).unwrap();
            assert_eq!(json, axis.as_str());
            assert_eq!(serde_json::from_value::<Axis>(json).unwrap(), axis);
        }
    }

    #[test]
    fn test_offset_along() {
        let offset = Offset { top: 10.0, left: 20.0 };
        assert_eq!(offset.along(Axis::Vertical), 10.0);
        assert_eq!(offset.along(Axis::Horizontal), 20.0);
    }
}
