//! Error conversions at the JS boundary

use wasm_bindgen::prelude::*;

use crate::error::{ConfigError, KeypointError, OverlayError, SessionError};

/// Best-effort text for a rejected promise or thrown value
pub(crate) fn js_error_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }

    let name = js_sys::Reflect::get(value, &JsValue::from_str("name"))
        .ok()
        .and_then(|v| v.as_string());
    let message = js_sys::Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|v| v.as_string());

    match (name, message) {
        (Some(name), Some(message)) => format!("{}: {}", name, message),
        (Some(name), None) => name,
        (None, Some(message)) => message,
        (None, None) => format!("{:?}", value),
    }
}

fn js_error(message: String) -> JsValue {
    js_sys::Error::new(&message).into()
}

impl From<SessionError> for JsValue {
    fn from(err: SessionError) -> Self {
        js_error(err.to_string())
    }
}

impl From<ConfigError> for JsValue {
    fn from(err: ConfigError) -> Self {
        js_error(err.to_string())
    }
}

impl From<OverlayError> for JsValue {
    fn from(err: OverlayError) -> Self {
        js_error(err.to_string())
    }
}

impl From<KeypointError> for JsValue {
    fn from(err: KeypointError) -> Self {
        js_error(err.to_string())
    }
}
