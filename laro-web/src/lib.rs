//! Laro ng Lahi - dance challenge motion engine
//!
//! Entry point for WASM module. Only contains:
//! - Module declarations
//! - wasm_bindgen entry points that delegate to submodules

pub mod config;
pub mod error;
pub mod pose;
pub mod renderer;
pub mod scoring;
pub mod session;

#[cfg(target_arch = "wasm32")]
mod bridge;

use wasm_bindgen::prelude::*;

pub use config::{CameraConfig, MotionConfig, OverlayBackend, OverlayConfig};
pub use error::{CameraError, ConfigError, EstimatorError, KeypointError, OverlayError, SessionError};
pub use pose::{Keypoint, KeypointSet, PoseHistory, PoseResult};
pub use scoring::{similarity, FeedbackTier, MovementAward, MovementScorer, ScoreState, SimilarityScorer};
pub use session::{MotionLoop, SessionEvent, SessionPhase, SessionSnapshot, TickOutcome};

// Re-export wasm_bindgen types for JS access
#[cfg(target_arch = "wasm32")]
pub use bridge::{pose_similarity, DanceChallenge};

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Route `log` output to the browser console. Unknown levels fall back to info.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: &str) {
    wasm_logger::init(wasm_logger::Config::new(parse_level(level)));
    log::info!("laro-web {} logging at {}", get_version(), parse_level(level));
}

#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn parse_level(level: &str) -> log::Level {
    level.trim().parse().unwrap_or(log::Level::Info)
}
