//! In-memory document for tests

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::scroll::{Axis, Dom, NodeLike, Rect};

/// Install a test subscriber once; `RUST_LOG` picks the level
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FakeElement {
    Node(usize),
    /// A handle the platform does not recognise as a node
    Opaque,
}

impl NodeLike for FakeElement {
    fn is_node(&self) -> bool {
        matches!(self, FakeElement::Node(_))
    }
}

#[derive(Debug, Clone)]
struct FakeNode {
    /// Scroll container this node is laid out in
    container: Option<usize>,
    top: f64,
    left: f64,
    scroll_top: f64,
    scroll_left: f64,
    attached: bool,
}

/// Elements are positioned inside a scroll container; the root and body
/// sit at the viewport origin. Scroll offsets are not clamped.
pub(crate) struct FakeDom {
    nodes: RefCell<Vec<FakeNode>>,
    selectors: RefCell<HashMap<String, usize>>,
    root_locked: Cell<bool>,
    headless: bool,
}

const ROOT: usize = 0;
const BODY: usize = 1;

impl FakeDom {
    pub(crate) fn new() -> Self {
        let origin = FakeNode {
            container: None,
            top: 0.0,
            left: 0.0,
            scroll_top: 0.0,
            scroll_left: 0.0,
            attached: true,
        };
        Self {
            nodes: RefCell::new(vec![origin.clone(), origin]),
            selectors: RefCell::new(HashMap::new()),
            root_locked: Cell::new(false),
            headless: false,
        }
    }

    /// A platform with no document at all
    pub(crate) fn headless() -> Self {
        Self {
            headless: true,
            ..Self::new()
        }
    }

    pub(crate) fn root(&self) -> FakeElement {
        FakeElement::Node(ROOT)
    }

    pub(crate) fn body_node(&self) -> FakeElement {
        FakeElement::Node(BODY)
    }

    /// Add an element laid out in the root scroller
    pub(crate) fn add(&self, top: f64, left: f64) -> FakeElement {
        self.add_in(&self.root(), top, left)
    }

    pub(crate) fn add_in(&self, container: &FakeElement, top: f64, left: f64) -> FakeElement {
        let FakeElement::Node(container) = container else {
            panic!("container must be a node");
        };
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(FakeNode {
            container: Some(*container),
            top,
            left,
            scroll_top: 0.0,
            scroll_left: 0.0,
            attached: true,
        });
        FakeElement::Node(nodes.len() - 1)
    }

    pub(crate) fn detach(&self, element: &FakeElement) {
        if let FakeElement::Node(id) = element {
            self.nodes.borrow_mut()[*id].attached = false;
        }
    }

    pub(crate) fn register(&self, selector: &str, element: &FakeElement) {
        if let FakeElement::Node(id) = element {
            self.selectors.borrow_mut().insert(selector.to_string(), *id);
        }
    }

    /// Make the root scroller ignore writes, like engines that scroll the body
    pub(crate) fn lock_root(&self) {
        self.root_locked.set(true);
    }

    pub(crate) fn scroll_of(&self, element: &FakeElement, axis: Axis) -> f64 {
        self.scroll_position(element, axis)
    }

    fn rect_of(&self, id: usize) -> Rect {
        let (container, top, left) = {
            let nodes = self.nodes.borrow();
            (nodes[id].container, nodes[id].top, nodes[id].left)
        };
        let Some(container) = container else {
            return Rect {
                top,
                left,
                ..Default::default()
            };
        };
        let outer = self.rect_of(container);
        let nodes = self.nodes.borrow();
        Rect {
            top: outer.top + top - nodes[container].scroll_top,
            left: outer.left + left - nodes[container].scroll_left,
            ..Default::default()
        }
    }
}

impl Dom for FakeDom {
    type Element = FakeElement;

    fn scrolling_element(&self) -> Option<FakeElement> {
        (!self.headless).then(|| self.root())
    }

    fn document_element(&self) -> Option<FakeElement> {
        (!self.headless).then(|| self.root())
    }

    fn body(&self) -> Option<FakeElement> {
        (!self.headless).then(|| self.body_node())
    }

    fn scroll_position(&self, element: &FakeElement, axis: Axis) -> f64 {
        let FakeElement::Node(id) = element else {
            return 0.0;
        };
        let nodes = self.nodes.borrow();
        match axis {
            Axis::Vertical => nodes[*id].scroll_top,
            Axis::Horizontal => nodes[*id].scroll_left,
        }
    }

    fn set_scroll_position(&self, element: &FakeElement, axis: Axis, value: f64) {
        let FakeElement::Node(id) = element else {
            return;
        };
        if *id == ROOT && self.root_locked.get() {
            return;
        }
        let mut nodes = self.nodes.borrow_mut();
        match axis {
            Axis::Vertical => nodes[*id].scroll_top = value,
            Axis::Horizontal => nodes[*id].scroll_left = value,
        }
    }

    fn bounding_client_rect(&self, element: &FakeElement) -> crate::Result<Rect> {
        match element {
            FakeElement::Node(id) if self.nodes.borrow()[*id].attached => Ok(self.rect_of(*id)),
            FakeElement::Node(id) => {
                Err(crate::Error::Geometry(format!("node {} is detached", id)))
            }
            FakeElement::Opaque => Err(crate::Error::Geometry("not a node".to_string())),
        }
    }

    fn query_selector(&self, _parent: &FakeElement, selector: &str) -> Option<FakeElement> {
        self.selectors
            .borrow()
            .get(selector)
            .map(|id| FakeElement::Node(*id))
    }
}
