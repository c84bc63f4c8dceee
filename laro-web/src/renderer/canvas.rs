//! Canvas 2D surface - immediate-mode overlay drawing

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::surface::DrawingSurface;
use crate::error::OverlayError;

pub struct Canvas2dSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Canvas2dSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, OverlayError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| OverlayError::NoContext)?
            .ok_or(OverlayError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| OverlayError::NoContext)?;

        Ok(Self { canvas, ctx })
    }
}

/// RGBA 0-1 to a CSS color string
fn css_color(color: [f32; 4]) -> String {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({}, {}, {}, {})",
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        color[3].clamp(0.0, 1.0)
    )
}

impl DrawingSurface for Canvas2dSurface {
    fn resize(&mut self, width: u32, height: u32) {
        // Assigning width/height resets the context, so only touch it on change
        if self.canvas.width() != width {
            self.canvas.set_width(width);
        }
        if self.canvas.height() != height {
            self.canvas.set_height(height);
        }
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        );
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: [f32; 4]) {
        self.ctx.set_fill_style_str(&css_color(color));
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            f64::from(x),
            f64::from(y),
            f64::from(radius),
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.fill();
    }
}
