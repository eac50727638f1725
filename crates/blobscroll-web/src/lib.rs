//! Browser bindings for blobscroll
//!
//! Exposes a `BlobScroll` class to script:
//!
//! ```js
//! const scroller = new BlobScroll();
//! scroller.scroll('#section-2', { duration: 800, offset: -60, transition: 'easeOutQuad' });
//! ```

pub mod convert;
pub mod dom;
pub mod frames;

use blobscroll_core::{Axis, ScrollAnimator};
use js_sys::Array;
use tracing::debug;
use wasm_bindgen::prelude::*;

pub use dom::{JsNode, WebDom, WebElement};
pub use frames::AnimationFrames;

#[wasm_bindgen]
pub struct BlobScroll {
    animator: ScrollAnimator<WebDom, AnimationFrames>,
}

impl Default for BlobScroll {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl BlobScroll {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            animator: ScrollAnimator::new(WebDom::new(), AnimationFrames),
        }
    }

    /// Smoothly scroll to `target` (a number, pixel string, selector,
    /// element or array-like of elements)
    pub fn scroll(&self, target: JsValue, options: JsValue) {
        let thing = convert::target(&target);
        let options = convert::options(&options, target);
        let outcome = self.animator.scroll(thing, options);
        debug!(?outcome, "Scroll requested from script");
    }

    #[wasm_bindgen(js_name = isElement)]
    pub fn is_element(value: &JsValue) -> bool {
        blobscroll_core::is_element(&JsNode(value))
    }

    /// Absolute offset of `thing` inside `parent` along `axis` ("x" or "y")
    #[wasm_bindgen(js_name = getScrollTarget)]
    pub fn get_scroll_target(&self, thing: &JsValue, parent: &JsValue, axis: &str) -> f64 {
        let parent = convert::element(parent);
        self.animator
            .scroll_target(&convert::target(thing), parent.as_ref(), Axis::parse(axis))
    }

    /// `{ top, left }` of `element` relative to `parent`
    pub fn offset(&self, element: &JsValue, parent: &JsValue) -> JsValue {
        let offset = match convert::element(element) {
            Some(element) => {
                let parent = convert::element(parent);
                self.animator.offset(&element, parent.as_ref())
            }
            None => Default::default(),
        };
        convert::offset_object(offset)
    }

    /// Evaluate the named easing curve at `t`
    pub fn ease(&self, name: &str, t: f64) -> Option<f64> {
        self.animator.ease(name, t)
    }

    #[wasm_bindgen(js_name = easingNames)]
    pub fn easing_names(&self) -> Array {
        self.animator
            .easing_names()
            .into_iter()
            .map(JsValue::from)
            .collect()
    }

    #[wasm_bindgen(js_name = isAnimating)]
    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }
}
