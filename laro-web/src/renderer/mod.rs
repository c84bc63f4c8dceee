//! Renderer module - keypoint overlay and its drawing backends
//!
//! Re-exports only. All logic in submodules.

mod overlay;
mod shapes;
mod surface;

#[cfg(target_arch = "wasm32")]
mod canvas;
#[cfg(target_arch = "wasm32")]
mod gpu;

pub use overlay::{OverlayRenderer, MARKER_COLOR, MARKER_RADIUS};
pub use shapes::{create_circle_vertices, marker_vertices, pixel_to_clip, Vertex, CIRCLE_SEGMENTS};
pub use surface::DrawingSurface;

#[cfg(target_arch = "wasm32")]
pub use canvas::Canvas2dSurface;
#[cfg(target_arch = "wasm32")]
pub use gpu::GpuSurface;
