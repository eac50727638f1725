//! L3 Molecular Layer: Scroll animation controller
//!
//! Resolves settings, then moves the parent's scroll offset once per frame
//! along the chosen easing curve. Only one animation is live per animator:
//! the active slot holds its target and generation, and any loop that finds
//! another generation there on its next frame stops without touching
//! anything.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use tokio::sync::oneshot;
use tracing::{debug, trace, warn};

use super::dom::{Axis, Dom, Offset};
use super::easing::{Easing, EasingFn, EasingLibrary};
use super::frame::FrameScheduler;
use super::settings::{self, ScrollCallback, ScrollOptions, ScrollSettings};
use super::target::{self, ScrollTarget};
use super::timing::{lerp, progress};
use crate::config::ScrollConfig;

/// What a scroll call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollOutcome {
    /// A new animation is running
    Started,
    /// An animation to the same target was already running; it carries on
    Joined,
    /// Already at the target; nothing to animate
    NoDistance,
    /// The platform offered no scrollable parent
    NoParent,
}

/// Resolves with the final settings once the animation finishes on its own
///
/// Yields `None` if the animation never ran to the end: it was superseded,
/// had nothing to do, or joined one already in flight.
pub struct Completion<E> {
    outcome: ScrollOutcome,
    receiver: oneshot::Receiver<ScrollSettings<E>>,
}

impl<E> Completion<E> {
    pub fn outcome(&self) -> ScrollOutcome {
        self.outcome
    }

    /// Non-blocking check
    pub fn try_recv(&mut self) -> Result<ScrollSettings<E>, oneshot::error::TryRecvError> {
        self.receiver.try_recv()
    }
}

impl<E> Future for Completion<E> {
    type Output = Option<ScrollSettings<E>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.get_mut().receiver)
            .poll(cx)
            .map(Result::ok)
    }
}

/// One in-flight animation
struct Animation<E> {
    target: ScrollTarget<E>,
    settings: ScrollSettings<E>,
    /// Generation this loop was started under
    generation: u64,
    easing: EasingFn,
    /// Timestamp of the first frame
    start: Option<f64>,
    callback: Option<ScrollCallback<E>>,
    completion: Option<oneshot::Sender<ScrollSettings<E>>>,
}

impl<E> Animation<E> {
    fn finish(self) {
        let Animation {
            target,
            settings,
            callback,
            completion,
            ..
        } = self;

        if let Some(callback) = callback {
            callback(&target, &settings);
        }
        if let Some(tx) = completion {
            // Nobody waiting is fine
            let _ = tx.send(settings);
        }
    }
}

struct Inner<D, S> {
    dom: D,
    scheduler: S,
    config: RefCell<ScrollConfig>,
    easing: RefCell<EasingLibrary>,
    /// Endpoint and generation of the live animation, `None` when idle
    active: Cell<Option<(f64, u64)>>,
    /// Bumped on every started animation
    generation: Cell<u64>,
}

/// Smooth scroll controller
///
/// Call `scroll()` to start an animation; frames arrive through the
/// scheduler. Clones share state, so a clone can be handed to callbacks
/// that chain further scrolls.
pub struct ScrollAnimator<D: Dom, S: FrameScheduler> {
    inner: Rc<Inner<D, S>>,
}

impl<D: Dom, S: FrameScheduler> Clone for ScrollAnimator<D, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<D, S> ScrollAnimator<D, S>
where
    D: Dom + 'static,
    S: FrameScheduler + 'static,
{
    /// Create a new animator with default configuration
    pub fn new(dom: D, scheduler: S) -> Self {
        Self::with_config(dom, scheduler, ScrollConfig::default())
    }

    pub fn with_config(dom: D, scheduler: S, config: ScrollConfig) -> Self {
        Self {
            inner: Rc::new(Inner {
                dom,
                scheduler,
                config: RefCell::new(config),
                easing: RefCell::new(EasingLibrary::new()),
                active: Cell::new(None),
                generation: Cell::new(0),
            }),
        }
    }

    /// Update configuration; applies to subsequent calls
    pub fn set_config(&self, config: ScrollConfig) {
        *self.inner.config.borrow_mut() = config;
    }

    pub fn config(&self) -> ScrollConfig {
        self.inner.config.borrow().clone()
    }

    pub fn dom(&self) -> &D {
        &self.inner.dom
    }

    /// Check if an animation is currently active
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.inner.active.get().is_some()
    }

    /// Endpoint of the running animation
    pub fn active_target(&self) -> Option<f64> {
        self.inner.active.get().map(|(target, _)| target)
    }

    /// Add or replace a named easing curve
    pub fn register_easing(&self, name: impl Into<String>, curve: EasingFn) {
        self.inner.easing.borrow_mut().register(name, curve);
    }

    pub fn easing_names(&self) -> Vec<String> {
        self.inner.easing.borrow().names()
    }

    /// Evaluate a named curve at `t`
    pub fn ease(&self, name: &str, t: f64) -> Option<f64> {
        self.inner.easing.borrow().apply(name, t)
    }

    /// Resolve `target` to a pixel offset inside `parent`
    pub fn scroll_target(
        &self,
        thing: &ScrollTarget<D::Element>,
        parent: Option<&D::Element>,
        axis: Axis,
    ) -> f64 {
        target::scroll_target(&self.inner.dom, thing, parent, axis)
    }

    pub fn offset(&self, element: &D::Element, parent: Option<&D::Element>) -> Offset {
        target::offset(&self.inner.dom, element, parent)
    }

    /// Validate options and compute the trajectory a scroll call would use
    ///
    /// When no parent is given this runs the default-parent probe, which
    /// moves the document scroller by one pixel.
    pub fn resolve_settings(
        &self,
        target: &ScrollTarget<D::Element>,
        options: &ScrollOptions<D::Element>,
    ) -> Option<ScrollSettings<D::Element>> {
        let config = self.inner.config.borrow();
        let easing = self.inner.easing.borrow();
        settings::resolve(&self.inner.dom, &config, &easing, target, options)
    }

    /// Smoothly scroll toward `target`
    ///
    /// Never fails: bad options fall back to defaults and unresolvable
    /// targets resolve to 0. Starting a scroll supersedes any other one in
    /// flight; repeating the current one is a no-op.
    pub fn scroll(
        &self,
        target: impl Into<ScrollTarget<D::Element>>,
        options: ScrollOptions<D::Element>,
    ) -> ScrollOutcome {
        self.start(target.into(), options, None)
    }

    /// Like `scroll()`, also returning a future for the final settings
    pub fn scroll_with_completion(
        &self,
        target: impl Into<ScrollTarget<D::Element>>,
        options: ScrollOptions<D::Element>,
    ) -> Completion<D::Element> {
        let (tx, rx) = oneshot::channel();
        let outcome = self.start(target.into(), options, Some(tx));
        Completion {
            outcome,
            receiver: rx,
        }
    }

    fn start(
        &self,
        target: ScrollTarget<D::Element>,
        mut options: ScrollOptions<D::Element>,
        completion: Option<oneshot::Sender<ScrollSettings<D::Element>>>,
    ) -> ScrollOutcome {
        let callback = options.callback.take();

        let Some(settings) = self.resolve_settings(&target, &options) else {
            warn!("No scrollable parent available, ignoring scroll");
            return ScrollOutcome::NoParent;
        };

        let distance = settings.scroll_distance;
        if distance == 0.0 || distance.is_nan() {
            self.inner.active.set(None);
            debug!(target_px = settings.scroll_target, "Already at scroll target");
            return ScrollOutcome::NoDistance;
        }

        if self.active_target() == Some(settings.scroll_target) {
            trace!(target_px = settings.scroll_target, "Joining scroll already in flight");
            return ScrollOutcome::Joined;
        }

        let easing = self
            .inner
            .easing
            .borrow()
            .get(&settings.transition)
            .unwrap_or_else(|| Easing::Ease.function());

        debug!(
            from = settings.scroll_from,
            to = settings.scroll_target,
            axis = settings.axis.as_str(),
            duration_ms = settings.duration_ms,
            transition = %settings.transition,
            "Starting scroll animation"
        );

        let generation = self.inner.generation.get().wrapping_add(1);
        self.inner.generation.set(generation);
        self.inner
            .active
            .set(Some((settings.scroll_target, generation)));
        schedule(
            Rc::clone(&self.inner),
            Animation {
                target,
                settings,
                generation,
                easing,
                start: None,
                callback,
                completion,
            },
        );
        ScrollOutcome::Started
    }
}

fn schedule<D, S>(inner: Rc<Inner<D, S>>, animation: Animation<D::Element>)
where
    D: Dom + 'static,
    S: FrameScheduler + 'static,
{
    let frame_inner = Rc::clone(&inner);
    inner
        .scheduler
        .request_frame(Box::new(move |timestamp| tick(frame_inner, animation, timestamp)));
}

fn tick<D, S>(inner: Rc<Inner<D, S>>, mut animation: Animation<D::Element>, timestamp: f64)
where
    D: Dom + 'static,
    S: FrameScheduler + 'static,
{
    let target_px = animation.settings.scroll_target;
    if inner.active.get().map(|(_, generation)| generation) != Some(animation.generation) {
        debug!(target_px, "Scroll superseded, stopping");
        return;
    }

    let start = *animation.start.get_or_insert(timestamp);
    let t = progress(timestamp - start, animation.settings.duration_ms as f64);
    let scale = (animation.easing)(t);

    let settings = &animation.settings;
    let position = lerp(settings.scroll_from, settings.scroll_target, scale);
    inner
        .dom
        .set_scroll_position(&settings.parent, settings.axis, position);
    trace!(position, progress = t, "Scroll frame");

    if scale < 1.0 {
        schedule(inner, animation);
        return;
    }

    // Land exactly on the target whatever the float error
    inner
        .dom
        .set_scroll_position(&settings.parent, settings.axis, target_px);
    inner.active.set(None);
    debug!(target_px, "Scroll animation finished");
    animation.finish();
}
