//! Drawing surface abstraction
//!
//! The overlay only needs four primitives, so the same renderer drives a
//! Canvas 2D context, a WebGPU canvas, or a recording surface in tests.

/// Transparent drawing target laid over the camera video
pub trait DrawingSurface {
    /// Match the video's native resolution (pixels)
    fn resize(&mut self, width: u32, height: u32);

    /// Erase everything drawn so far
    fn clear(&mut self);

    /// Filled circle centred at a pixel position, RGBA 0-1
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: [f32; 4]);

    /// Flush queued drawing (no-op for immediate-mode surfaces)
    fn present(&mut self) {}
}

impl<S: DrawingSurface + ?Sized> DrawingSurface for Box<S> {
    fn resize(&mut self, width: u32, height: u32) {
        (**self).resize(width, height);
    }

    fn clear(&mut self) {
        (**self).clear();
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: [f32; 4]) {
        (**self).fill_circle(x, y, radius, color);
    }

    fn present(&mut self) {
        (**self).present();
    }
}
