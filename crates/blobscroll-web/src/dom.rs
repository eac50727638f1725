//! Browser document access
//!
//! `WebElement` wraps a `web_sys::Element`; `JsNode` lets arbitrary
//! script values go through the same element check as native handles.

use std::borrow::Cow;

use blobscroll_core::{Axis, Dom, Error, NodeLike, Rect, Result};
use js_sys::Reflect;
use tracing::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element};

/// Element handle the animator works with in the browser
#[derive(Debug, Clone, PartialEq)]
pub struct WebElement(pub Element);

impl From<Element> for WebElement {
    fn from(element: Element) -> Self {
        Self(element)
    }
}

impl NodeLike for WebElement {
    fn is_node(&self) -> bool {
        true
    }

    fn node_type(&self) -> Option<f64> {
        Some(f64::from(self.0.node_type()))
    }

    fn node_name(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Owned(self.0.node_name()))
    }
}

/// Borrowed script value checked for node capabilities
#[derive(Debug, Clone, Copy)]
pub struct JsNode<'a>(pub &'a JsValue);

impl JsNode<'_> {
    fn property(&self, key: &str) -> Option<JsValue> {
        if !self.0.is_object() {
            return None;
        }
        Reflect::get(self.0, &JsValue::from_str(key)).ok()
    }

    /// Convert to an element handle if the value is an element node
    ///
    /// Elements from another realm fail `instanceof Element`; those are
    /// accepted when they report `nodeType == 1` and can be measured.
    pub fn to_element(&self) -> Option<WebElement> {
        if let Some(element) = self.0.dyn_ref::<Element>() {
            return Some(WebElement(element.clone()));
        }
        if !blobscroll_core::is_element(self) {
            return None;
        }
        let measurable = self
            .property("getBoundingClientRect")
            .is_some_and(|f| f.is_function());
        if self.node_type() == Some(1.0) && measurable {
            return Some(WebElement(self.0.clone().unchecked_into()));
        }
        None
    }
}

impl NodeLike for JsNode<'_> {
    fn is_node(&self) -> bool {
        self.0.is_instance_of::<web_sys::Node>()
    }

    fn node_type(&self) -> Option<f64> {
        self.property("nodeType")?.as_f64()
    }

    fn node_name(&self) -> Option<Cow<'_, str>> {
        self.property("nodeName")?.as_string().map(Cow::Owned)
    }
}

/// `Dom` backed by the page's `document`
///
/// Without a document (a worker, say) every lookup comes back empty and
/// scroll calls do nothing.
#[derive(Debug, Clone, Default)]
pub struct WebDom {
    document: Option<Document>,
}

impl WebDom {
    pub fn new() -> Self {
        let document = web_sys::window().and_then(|window| window.document());
        if document.is_none() {
            debug!("No document available, scrolling disabled");
        }
        Self { document }
    }

    pub fn from_document(document: Document) -> Self {
        Self {
            document: Some(document),
        }
    }
}

impl Dom for WebDom {
    type Element = WebElement;

    fn scrolling_element(&self) -> Option<WebElement> {
        self.document.as_ref()?.scrolling_element().map(WebElement)
    }

    fn document_element(&self) -> Option<WebElement> {
        self.document.as_ref()?.document_element().map(WebElement)
    }

    fn body(&self) -> Option<WebElement> {
        self.document
            .as_ref()?
            .body()
            .map(|body| WebElement(body.into()))
    }

    fn scroll_position(&self, element: &WebElement, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => f64::from(element.0.scroll_left()),
            Axis::Vertical => f64::from(element.0.scroll_top()),
        }
    }

    fn set_scroll_position(&self, element: &WebElement, axis: Axis, value: f64) {
        let value = value.round() as i32;
        match axis {
            Axis::Horizontal => element.0.set_scroll_left(value),
            Axis::Vertical => element.0.set_scroll_top(value),
        }
    }

    fn bounding_client_rect(&self, element: &WebElement) -> Result<Rect> {
        let measurable = Reflect::get(&element.0, &JsValue::from_str("getBoundingClientRect"))
            .is_ok_and(|f| f.is_function());
        if !measurable {
            return Err(Error::Geometry(format!(
                "{} has no layout box",
                element.0.node_name()
            )));
        }
        let rect = element.0.get_bounding_client_rect();
        Ok(Rect {
            top: rect.top(),
            left: rect.left(),
            width: rect.width(),
            height: rect.height(),
        })
    }

    fn query_selector(&self, parent: &WebElement, selector: &str) -> Option<WebElement> {
        match parent.0.query_selector(selector) {
            Ok(found) => found.map(WebElement),
            Err(e) => {
                debug!(selector, error = ?e, "Selector rejected");
                None
            }
        }
    }
}
