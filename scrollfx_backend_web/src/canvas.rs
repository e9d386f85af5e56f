// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Particle field renderer.

use alloc::format;
use alloc::string::String;
use core::f64::consts::TAU;

use kurbo::Size;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use scrollfx_core::ambient::ParticleField;

/// Draws a [`ParticleField`] on a 2D canvas.
pub struct ParticleCanvas {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    rgb: (u8, u8, u8),
}

impl core::fmt::Debug for ParticleCanvas {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ParticleCanvas")
            .field("width", &self.canvas.width())
            .field("height", &self.canvas.height())
            .field("rgb", &self.rgb)
            .finish_non_exhaustive()
    }
}

impl ParticleCanvas {
    /// Takes the canvas's 2D context.
    ///
    /// # Errors
    ///
    /// Fails when the canvas cannot provide a 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            canvas,
            context,
            rgb: (160, 190, 255),
        })
    }

    /// Sets the particle color.
    #[must_use]
    pub fn with_color(mut self, r: u8, g: u8, b: u8) -> Self {
        self.rgb = (r, g, b);
        self
    }

    /// Matches the canvas backing store to `size` (CSS pixels).
    pub fn resize(&self, size: Size) {
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "viewport sizes are small and non-negative"
        )]
        let (w, h) = (size.width.max(0.0) as u32, size.height.max(0.0) as u32);
        self.canvas.set_width(w);
        self.canvas.set_height(h);
    }

    /// Clears the canvas and draws every particle.
    pub fn draw(&self, field: &ParticleField) {
        let ctx = &self.context;
        let size = field.size();
        ctx.clear_rect(0.0, 0.0, size.width, size.height);
        for p in field.particles() {
            ctx.set_fill_style_str(&rgba(self.rgb, p.alpha));
            ctx.begin_path();
            let _ = ctx.arc(p.position.x, p.position.y, p.radius, 0.0, TAU);
            ctx.fill();
        }
    }
}

fn rgba((r, g, b): (u8, u8, u8), alpha: f64) -> String {
    format!("rgba({r}, {g}, {b}, {alpha:.3})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_formats_alpha() {
        assert_eq!(rgba((1, 2, 3), 0.25), "rgba(1, 2, 3, 0.250)");
    }
}
