//! Pose estimator handle backed by JavaScript
//!
//! MoveNet runs in tfjs on the JS side. The page hands over an object with an
//! `estimate(video)` method returning a promise of poses, and optionally a
//! `load()` method returning a promise that settles once the model is ready.

use std::cell::Cell;

use async_trait::async_trait;
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlVideoElement;

use super::js_error_message;
use crate::error::EstimatorError;
use crate::pose::PoseResult;
use crate::session::PoseEstimator;

pub struct JsPoseEstimator {
    /// The JS object, used as `this` for its methods
    target: JsValue,
    load_fn: Option<Function>,
    estimate_fn: Function,
    loaded: Cell<bool>,
}

impl JsPoseEstimator {
    pub fn from_js(target: JsValue) -> Result<Self, EstimatorError> {
        let method = |name: &str| -> Option<Function> {
            Reflect::get(&target, &JsValue::from_str(name))
                .ok()
                .and_then(|f| f.dyn_into::<Function>().ok())
        };

        let estimate_fn = method("estimate")
            .ok_or_else(|| EstimatorError::Load("estimator has no estimate() method".into()))?;
        let load_fn = method("load");
        // Without a load() the model is assumed to be ready already
        let loaded = Cell::new(load_fn.is_none());

        Ok(Self {
            target,
            load_fn,
            estimate_fn,
            loaded,
        })
    }

    /// Await a returned value, whether or not it is a promise
    async fn settle(value: JsValue) -> Result<JsValue, JsValue> {
        JsFuture::from(Promise::resolve(&value)).await
    }
}

#[async_trait(?Send)]
impl PoseEstimator for JsPoseEstimator {
    type Frame = HtmlVideoElement;

    fn is_loaded(&self) -> bool {
        self.loaded.get()
    }

    async fn load(&self) -> Result<(), EstimatorError> {
        if let Some(load) = &self.load_fn {
            let pending = load
                .call0(&self.target)
                .map_err(|e| EstimatorError::Load(js_error_message(&e)))?;
            Self::settle(pending)
                .await
                .map_err(|e| EstimatorError::Load(js_error_message(&e)))?;
        }

        self.loaded.set(true);
        log::info!("pose estimator loaded");
        Ok(())
    }

    async fn estimate(&self, frame: &HtmlVideoElement) -> Result<Vec<PoseResult>, EstimatorError> {
        let pending = self
            .estimate_fn
            .call1(&self.target, frame.as_ref())
            .map_err(|e| EstimatorError::Estimate(js_error_message(&e)))?;
        let poses = Self::settle(pending)
            .await
            .map_err(|e| EstimatorError::Estimate(js_error_message(&e)))?;

        if poses.is_undefined() || poses.is_null() {
            return Ok(Vec::new());
        }

        serde_wasm_bindgen::from_value(poses).map_err(|e| EstimatorError::Decode(e.to_string()))
    }
}
