//! Webcam capture through getUserMedia

use std::cell::RefCell;

use async_trait::async_trait;
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlVideoElement, MediaStream, MediaStreamConstraints, MediaStreamTrack};

use super::js_error_message;
use crate::config::CameraConfig;
use crate::error::CameraError;
use crate::session::CameraSource;

/// HTMLMediaElement.HAVE_CURRENT_DATA
const HAVE_CURRENT_DATA: u16 = 2;

#[derive(Serialize)]
struct VideoConstraints {
    width: u32,
    height: u32,
}

/// Camera stream rendered into the player's `<video>` element
pub struct WebCamera {
    video: HtmlVideoElement,
    config: CameraConfig,
    stream: RefCell<Option<MediaStream>>,
}

impl WebCamera {
    pub fn new(video: HtmlVideoElement, config: CameraConfig) -> Self {
        Self {
            video,
            config,
            stream: RefCell::new(None),
        }
    }

    fn classify(err: &JsValue) -> CameraError {
        let name = js_sys::Reflect::get(err, &JsValue::from_str("name"))
            .ok()
            .and_then(|v| v.as_string());

        match name.as_deref() {
            Some("NotAllowedError") | Some("SecurityError") => {
                CameraError::PermissionDenied(js_error_message(err))
            }
            _ => CameraError::Unavailable(js_error_message(err)),
        }
    }
}

#[async_trait(?Send)]
impl CameraSource for WebCamera {
    type Frame = HtmlVideoElement;

    async fn acquire(&self) -> Result<(), CameraError> {
        let window =
            web_sys::window().ok_or_else(|| CameraError::Unavailable("no window".into()))?;
        let devices = window
            .navigator()
            .media_devices()
            .map_err(|e| CameraError::Unavailable(js_error_message(&e)))?;

        let video_constraints = serde_wasm_bindgen::to_value(&VideoConstraints {
            width: self.config.width,
            height: self.config.height,
        })
        .map_err(|e| CameraError::Unavailable(e.to_string()))?;

        let constraints = MediaStreamConstraints::new();
        constraints.set_video(&video_constraints);

        let promise = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(|e| Self::classify(&e))?;
        let stream = JsFuture::from(promise)
            .await
            .map_err(|e| Self::classify(&e))?
            .dyn_into::<MediaStream>()
            .map_err(|_| CameraError::Unavailable("getUserMedia returned no stream".into()))?;

        self.video.set_src_object(Some(&stream));
        if let Err(e) = self.video.play() {
            log::warn!("camera preview did not autoplay: {}", js_error_message(&e));
        }

        // Overlapping acquisitions (reset + restart while getUserMedia was
        // pending) resolve in turn; only the newest stream stays open
        let previous = self.stream.borrow_mut().replace(stream);
        if let Some(previous) = previous {
            stop_tracks(&previous);
            log::info!("closed camera stream from an abandoned start");
        }

        log::info!("camera acquired ({}x{} requested)", self.config.width, self.config.height);
        Ok(())
    }

    fn is_live(&self) -> bool {
        self.stream.borrow().is_some()
    }

    fn frame(&self) -> Option<HtmlVideoElement> {
        let live = self.stream.borrow().is_some();
        (live && self.video.ready_state() >= HAVE_CURRENT_DATA).then(|| self.video.clone())
    }

    fn resolution(&self) -> (u32, u32) {
        (self.video.video_width(), self.video.video_height())
    }

    fn release(&self) {
        let Some(stream) = self.stream.borrow_mut().take() else {
            return;
        };

        stop_tracks(&stream);
        self.video.set_src_object(None);
        log::info!("camera released");
    }
}

fn stop_tracks(stream: &MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
            track.stop();
        }
    }
}

impl Drop for WebCamera {
    fn drop(&mut self) {
        self.release();
    }
}
