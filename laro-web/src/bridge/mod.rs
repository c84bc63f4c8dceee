//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod camera;
mod challenge;
mod clock;
mod errors;
mod estimator;
mod poses;
mod video;

pub use camera::WebCamera;
pub use challenge::DanceChallenge;
pub use clock::AnimationFrameClock;
pub use estimator::JsPoseEstimator;
pub use poses::pose_similarity;
pub use video::HtmlReferenceVideo;

pub(crate) use errors::js_error_message;
