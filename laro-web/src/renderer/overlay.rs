//! Keypoint overlay - draws confident keypoints over the camera video

use super::surface::DrawingSurface;
use crate::config::MotionConfig;
use crate::pose::KeypointSet;
use crate::scoring::CONFIDENCE_THRESHOLD;

/// Marker radius in video pixels
pub const MARKER_RADIUS: f32 = 5.0;

/// Opaque green (#00FF00)
pub const MARKER_COLOR: [f32; 4] = [0.0, 1.0, 0.0, 1.0];

pub struct OverlayRenderer<S> {
    surface: S,
    radius: f32,
    color: [f32; 4],
    confidence_threshold: f32,
}

impl<S: DrawingSurface> OverlayRenderer<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            radius: MARKER_RADIUS,
            color: MARKER_COLOR,
            confidence_threshold: CONFIDENCE_THRESHOLD,
        }
    }

    pub fn from_config(surface: S, config: &MotionConfig) -> Self {
        Self {
            surface,
            radius: config.overlay.marker_radius,
            color: config.overlay.marker_color,
            confidence_threshold: config.confidence_threshold,
        }
    }

    /// Redraw the overlay for one pose at the video's native resolution.
    /// Returns the number of markers drawn.
    pub fn draw(&mut self, pose: &KeypointSet, width: u32, height: u32) -> usize {
        self.surface.resize(width, height);
        self.surface.clear();

        let mut drawn = 0;
        for kp in pose.confident(self.confidence_threshold) {
            self.surface.fill_circle(kp.x, kp.y, self.radius, self.color);
            drawn += 1;
        }

        self.surface.present();
        drawn
    }

    /// Wipe the overlay (session reset)
    pub fn clear(&mut self) {
        self.surface.clear();
        self.surface.present();
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
