//! Motion engine configuration
//!
//! Every field has a default, so JS can pass `{}` or a partial object.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::pose::DEFAULT_CAPACITY;
use crate::renderer::{MARKER_COLOR, MARKER_RADIUS};
use crate::scoring::{CONFIDENCE_THRESHOLD, HIGH_THRESHOLD, MEDIUM_THRESHOLD, NOISE_FLOOR};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MotionConfig {
    /// Poses kept in the rolling history
    pub history_capacity: usize,
    /// Keypoints at or below this confidence are ignored
    pub confidence_threshold: f32,
    /// Movement at or below this is treated as standing still
    pub noise_floor: f32,
    pub medium_threshold: f32,
    pub high_threshold: f32,
    pub overlay: OverlayConfig,
    pub camera: CameraConfig,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_CAPACITY,
            confidence_threshold: CONFIDENCE_THRESHOLD,
            noise_floor: NOISE_FLOOR,
            medium_threshold: MEDIUM_THRESHOLD,
            high_threshold: HIGH_THRESHOLD,
            overlay: OverlayConfig::default(),
            camera: CameraConfig::default(),
        }
    }
}

/// Which drawing backend the overlay uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayBackend {
    #[default]
    Canvas2d,
    Webgpu,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayConfig {
    pub backend: OverlayBackend,
    /// Marker radius in video pixels
    pub marker_radius: f32,
    /// RGBA, 0-1
    pub marker_color: [f32; 4],
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            backend: OverlayBackend::default(),
            marker_radius: MARKER_RADIUS,
            marker_color: MARKER_COLOR,
        }
    }
}

/// Resolution requested from getUserMedia
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

impl MotionConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: MotionConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }

        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(ConfigError::ThresholdOutOfRange(self.confidence_threshold));
        }

        if !(self.noise_floor < self.medium_threshold && self.medium_threshold < self.high_threshold) {
            return Err(ConfigError::UnorderedTiers {
                noise_floor: self.noise_floor,
                medium: self.medium_threshold,
                high: self.high_threshold,
            });
        }

        if !(self.overlay.marker_radius > 0.0) {
            return Err(ConfigError::InvalidRadius(self.overlay.marker_radius));
        }

        Ok(())
    }
}
