//! Reference dance clip

use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlVideoElement;

use super::js_error_message;
use crate::session::ReferenceVideo;

/// The clip the player dances along to. Optional: the challenge works
/// without one.
pub struct HtmlReferenceVideo {
    video: Option<HtmlVideoElement>,
}

impl HtmlReferenceVideo {
    pub fn new(video: Option<HtmlVideoElement>) -> Self {
        Self { video }
    }
}

impl ReferenceVideo for HtmlReferenceVideo {
    fn play(&self) {
        let Some(video) = &self.video else { return };

        match video.play() {
            Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    log::warn!("reference video did not start: {}", js_error_message(&e));
                }
            }),
            Err(e) => log::warn!("reference video did not start: {}", js_error_message(&e)),
        }
    }

    fn pause(&self) {
        if let Some(video) = &self.video {
            if let Err(e) = video.pause() {
                log::warn!("reference video did not pause: {}", js_error_message(&e));
            }
        }
    }

    fn rewind(&self) {
        if let Some(video) = &self.video {
            video.set_current_time(0.0);
        }
    }
}
