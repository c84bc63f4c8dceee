//! requestAnimationFrame as a future

use async_trait::async_trait;
use js_sys::Promise;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

use crate::session::FrameClock;

/// Resolves on the browser's next animation frame
pub struct AnimationFrameClock;

#[async_trait(?Send)]
impl FrameClock for AnimationFrameClock {
    async fn next_frame(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };

        let promise = Promise::new(&mut |resolve, _reject| {
            if window.request_animation_frame(&resolve).is_err() {
                // No frame callback available; resolve now rather than stall
                let _ = resolve.call0(&JsValue::NULL);
            }
        });
        let _ = JsFuture::from(promise).await;
    }
}
