use blobscroll_core::{FrameCallback, FrameScheduler};
use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Frame scheduler backed by `window.requestAnimationFrame`
#[derive(Debug, Clone, Copy, Default)]
pub struct AnimationFrames;

impl FrameScheduler for AnimationFrames {
    fn request_frame(&self, callback: FrameCallback) {
        let Some(window) = web_sys::window() else {
            warn!("No window to schedule animation frames on");
            return;
        };
        let closure = Closure::once_into_js(move |timestamp: f64| callback(timestamp));
        if let Err(e) = window.request_animation_frame(closure.unchecked_ref()) {
            warn!(error = ?e, "requestAnimationFrame failed");
        }
    }
}
