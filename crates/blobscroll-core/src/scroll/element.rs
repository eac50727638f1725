//! L4 Atomic Layer: Element-like detection
//!
//! Values count as elements either because the platform says they are
//! nodes, or because they carry a numeric `nodeType` and a string
//! `nodeName`. The structural check covers values from another realm
//! (an iframe, say) and platforms with no node base type at all.

use std::borrow::Cow;

/// Capabilities a value may expose to be treated as an element
pub trait NodeLike {
    /// Class-based check: the platform knows this value is a node
    fn is_node(&self) -> bool {
        false
    }

    /// Numeric `nodeType`, if the value carries one
    fn node_type(&self) -> Option<f64> {
        None
    }

    /// String `nodeName`, if the value carries one
    fn node_name(&self) -> Option<Cow<'_, str>> {
        None
    }
}

/// True if `value` behaves like a DOM element. Never panics.
pub fn is_element<T: NodeLike + ?Sized>(value: &T) -> bool {
    value.is_node() || (value.node_type().is_some() && value.node_name().is_some())
}

impl<T: NodeLike + ?Sized> NodeLike for &T {
    fn is_node(&self) -> bool {
        (**self).is_node()
    }

    fn node_type(&self) -> Option<f64> {
        (**self).node_type()
    }

    fn node_name(&self) -> Option<Cow<'_, str>> {
        (**self).node_name()
    }
}

impl<T: NodeLike> NodeLike for Option<T> {
    fn is_node(&self) -> bool {
        self.as_ref().is_some_and(NodeLike::is_node)
    }

    fn node_type(&self) -> Option<f64> {
        self.as_ref().and_then(NodeLike::node_type)
    }

    fn node_name(&self) -> Option<Cow<'_, str>> {
        self.as_ref().and_then(NodeLike::node_name)
    }
}

/// Duck-typed objects, e.g. `{"nodeType": 1, "nodeName": "DIV"}`
impl NodeLike for serde_json::Value {
    fn node_type(&self) -> Option<f64> {
        self.as_object()?.get("nodeType")?.as_f64()
    }

    fn node_name(&self) -> Option<Cow<'_, str>> {
        self.as_object()?.get("nodeName")?.as_str().map(Cow::Borrowed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct PlatformNode;

    impl NodeLike for PlatformNode {
        fn is_node(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_null_and_primitives() {
        assert!(!is_element(&json!(null)));
        assert!(!is_element(&json!(1)));
        assert!(!is_element(&json!("div")));
        assert!(!is_element(&json!(true)));
        assert!(!is_element(&json!([1, 2])));
    }

    #[test]
    fn test_duck_typed_objects() {
        assert!(!is_element(&json!({})));
        assert!(is_element(&json!({"nodeType": 1, "nodeName": "DIV"})));
        assert!(is_element(&json!({"nodeType": 3, "nodeName": "#text"})));
        assert!(!is_element(&json!({"nodeType": "1", "nodeName": "DIV"})));
        assert!(!is_element(&json!({"nodeType": 1, "nodeName": null})));
        assert!(!is_element(&json!({"nodeName": "DIV"})));
    }

    #[test]
    fn test_class_based() {
        assert!(is_element(&PlatformNode));
        assert!(is_element(&Some(PlatformNode)));
        assert!(!is_element(&None::<PlatformNode>));
    }
}
