//! Flat-buffer helpers for JS callers

use wasm_bindgen::prelude::*;

use crate::pose::KeypointSet;
use crate::scoring::similarity;

/// Similarity (0-100) of two poses given as flat Float32Arrays of
/// `[x, y, score]` triples
#[wasm_bindgen(js_name = poseSimilarity)]
pub fn pose_similarity(a: &[f32], b: &[f32]) -> Result<f32, JsValue> {
    let a = KeypointSet::from_flat(a)?;
    let b = KeypointSet::from_flat(b)?;
    Ok(similarity(&a, &b))
}
