//! Script values in, script values out
//!
//! Everything here is lenient: values of the wrong shape are dropped and
//! the core falls back to its defaults.

use blobscroll_core::scroll::target::parse_numeric;
use blobscroll_core::{Offset, ScrollOptions, ScrollSettings, ScrollTarget};
use js_sys::{Array, Function, Object, Reflect};
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};

use crate::dom::{JsNode, WebElement};

fn get(object: &JsValue, key: &str) -> JsValue {
    Reflect::get(object, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
}

fn set(object: &Object, key: &str, value: &JsValue) {
    // Setting a plain property on a fresh object cannot fail
    let _ = Reflect::set(object, &JsValue::from_str(key), value);
}

fn number(value: &JsValue) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_string().and_then(|s| parse_numeric(&s)))
}

/// Element handle for `value`, if it is one
pub fn element(value: &JsValue) -> Option<WebElement> {
    JsNode(value).to_element()
}

/// Interpret a scroll target passed in from script
///
/// Numbers and strings pass through for the core to resolve. Elements
/// become element targets and array-likes use their first entry.
pub fn target(value: &JsValue) -> ScrollTarget<WebElement> {
    if let Some(px) = value.as_f64() {
        return ScrollTarget::Pixels(px);
    }
    if let Some(text) = value.as_string() {
        return ScrollTarget::Text(text);
    }
    if !value.is_object() {
        return ScrollTarget::None;
    }
    if let Some(el) = element(value) {
        return ScrollTarget::Element(el);
    }
    if value.is_instance_of::<Array>() || number(&get(value, "length")).is_some() {
        return match element(&get(value, "0")) {
            Some(first) => ScrollTarget::Collection(vec![first]),
            None => ScrollTarget::None,
        };
    }
    ScrollTarget::None
}

/// Read a script options object
///
/// `callback` is invoked as `callback(target, settings)` with the target
/// exactly as script passed it.
pub fn options(value: &JsValue, original_target: JsValue) -> ScrollOptions<WebElement> {
    if !value.is_object() {
        return ScrollOptions::default();
    }

    let callback = get(value, "callback")
        .dyn_into::<Function>()
        .ok()
        .map(|function| {
            Box::new(
                move |_: &ScrollTarget<WebElement>, settings: &ScrollSettings<WebElement>| {
                    let settings = settings_object(settings);
                    if let Err(e) = function.call2(&JsValue::NULL, &original_target, &settings) {
                        warn!(error = ?e, "Scroll callback threw");
                    }
                },
            ) as blobscroll_core::ScrollCallback<WebElement>
        });

    ScrollOptions {
        axis: get(value, "axis").as_string(),
        duration: number(&get(value, "duration")),
        offset: number(&get(value, "offset")),
        parent: element(&get(value, "parent")),
        transition: get(value, "transition").as_string(),
        callback,
    }
}

/// Settings as handed to script callbacks
pub fn settings_object(settings: &ScrollSettings<WebElement>) -> JsValue {
    let summary = settings.summary();
    let object = Object::new();
    set(&object, "axis", &JsValue::from_str(summary.axis.as_str()));
    set(&object, "duration", &JsValue::from_f64(summary.duration_ms as f64));
    set(&object, "offset", &JsValue::from_f64(summary.offset_px as f64));
    set(&object, "parent", &settings.parent.0);
    set(&object, "transition", &JsValue::from_str(&summary.transition));
    set(&object, "scrollTarget", &JsValue::from_f64(summary.scroll_target));
    set(&object, "scrollFrom", &JsValue::from_f64(summary.scroll_from));
    set(
        &object,
        "scrollDistance",
        &JsValue::from_f64(summary.scroll_distance),
    );
    object.into()
}

pub fn offset_object(offset: Offset) -> JsValue {
    let object = Object::new();
    set(&object, "top", &JsValue::from_f64(offset.top));
    set(&object, "left", &JsValue::from_f64(offset.left));
    object.into()
}
