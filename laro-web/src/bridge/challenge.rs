//! DanceChallenge - the session object exported to JS

use std::rc::Rc;

use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, spawn_local};
use web_sys::{HtmlCanvasElement, HtmlVideoElement};

use super::{AnimationFrameClock, HtmlReferenceVideo, JsPoseEstimator, WebCamera};
use crate::config::{MotionConfig, OverlayBackend};
use crate::error::{ConfigError, OverlayError, SessionError};
use crate::renderer::{Canvas2dSurface, DrawingSurface, GpuSurface};
use crate::session::{MotionLoop, SessionSnapshot};

type WebMotionLoop =
    MotionLoop<WebCamera, JsPoseEstimator, HtmlReferenceVideo, Box<dyn DrawingSurface>>;

// ============================================================================
// SETUP
// ============================================================================

fn parse_config(value: JsValue) -> Result<MotionConfig, ConfigError> {
    if value.is_undefined() || value.is_null() {
        return Ok(MotionConfig::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| ConfigError::Parse(e.to_string()))
}

async fn create_surface(
    canvas: HtmlCanvasElement,
    backend: OverlayBackend,
) -> Result<Box<dyn DrawingSurface>, OverlayError> {
    match backend {
        OverlayBackend::Canvas2d => Ok(Box::new(Canvas2dSurface::new(canvas)?)),
        OverlayBackend::Webgpu => match GpuSurface::new(canvas.clone()).await {
            Ok(surface) => Ok(Box::new(surface)),
            Err(e) => {
                log::warn!("WebGPU overlay unavailable ({}), using canvas 2d", e);
                Ok(Box::new(Canvas2dSurface::new(canvas)?))
            }
        },
    }
}

fn snapshot_value(snapshot: &SessionSnapshot) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(snapshot).map_err(|e| JsValue::from_str(&e.to_string()))
}

// ============================================================================
// JS API
// ============================================================================

#[wasm_bindgen]
pub struct DanceChallenge {
    inner: Rc<WebMotionLoop>,
}

#[wasm_bindgen]
impl DanceChallenge {
    /// Bind a challenge to the page's elements.
    ///
    /// `estimator` is an object with `estimate(video)` and optionally
    /// `load()`, both returning promises. `config` may be undefined or a
    /// partial MotionConfig.
    pub async fn create(
        config: JsValue,
        user_video: HtmlVideoElement,
        overlay: HtmlCanvasElement,
        reference_video: Option<HtmlVideoElement>,
        estimator: JsValue,
    ) -> Result<DanceChallenge, JsValue> {
        let config = parse_config(config)?;
        config.validate()?;

        let estimator = JsPoseEstimator::from_js(estimator).map_err(SessionError::from)?;
        let surface = create_surface(overlay, config.overlay.backend).await?;
        let camera = WebCamera::new(user_video, config.camera);
        let video = HtmlReferenceVideo::new(reference_video);

        let inner = MotionLoop::with_config(camera, estimator, video, surface, &config)?;
        log::info!("dance challenge ready ({:?} overlay)", config.overlay.backend);

        Ok(DanceChallenge {
            inner: Rc::new(inner),
        })
    }

    /// Acquire the camera and model, then start scoring. Resolves with a
    /// snapshot once Running; rejects if acquisition fails.
    pub fn start(&self) -> Promise {
        let inner = Rc::clone(&self.inner);

        future_to_promise(async move {
            inner.start().await?;

            let looped = Rc::clone(&inner);
            spawn_local(async move {
                looped.run(&AnimationFrameClock).await;
            });

            snapshot_value(&inner.snapshot())
        })
    }

    /// Flip between Running and Paused; returns the new phase name
    #[wasm_bindgen(js_name = togglePause)]
    pub fn toggle_pause(&self) -> Result<String, JsValue> {
        let phase = self.inner.toggle_pause()?;
        Ok(phase.name().to_string())
    }

    /// Stop scoring, release the camera, and zero the score
    pub fn reset(&self) {
        self.inner.reset();
    }

    /// `{ phase, score, feedback, loading, historyLen, stats }`
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        snapshot_value(&self.inner.snapshot())
    }

    #[wasm_bindgen(getter)]
    pub fn score(&self) -> f64 {
        self.inner.score() as f64
    }

    #[wasm_bindgen(getter)]
    pub fn feedback(&self) -> String {
        self.inner.feedback()
    }
}

impl Drop for DanceChallenge {
    fn drop(&mut self) {
        // The spawned run loop holds its own Rc; reset makes it exit
        self.inner.reset();
    }
}
