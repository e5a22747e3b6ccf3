// src/mapper.rs

//! Affine transform between math coordinates (the viewport) and pixel
//! coordinates on a fixed-size canvas.
//!
//! Screen Y grows downward, math Y grows upward, so the Y mapping is
//! flipped. Zero-extent viewports are clamped to a small epsilon before
//! dividing so a degenerate window degrades to a visibly wrong picture
//! instead of spraying NaN through the rasterizer.

use crate::view::Viewport;
use serde::{Deserialize, Serialize};

/// Smallest viewport extent the mapper will divide by.
pub const MIN_SPAN: f64 = 1e-9;

/// Raster surface dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Maps viewport coordinates onto a `width × height` pixel canvas.
#[derive(Debug, Clone, Copy)]
pub struct PixelMapper {
    viewport: Viewport,
    width: f64,
    height: f64,
    span_x: f64,
    span_y: f64,
}

impl PixelMapper {
    pub fn new(viewport: Viewport, size: CanvasSize) -> Self {
        Self {
            viewport,
            width: size.width as f64,
            height: size.height as f64,
            span_x: clamp_span(viewport.width()),
            span_y: clamp_span(viewport.height()),
        }
    }

    /// Math X to screen X: `(x − min_x) / (max_x − min_x) · W`.
    pub fn screen_x(&self, x: f64) -> f64 {
        (x - self.viewport.min_x) / self.span_x * self.width
    }

    /// Math Y to screen Y, flipped: `H − (y − min_y) / (max_y − min_y) · H`.
    pub fn screen_y(&self, y: f64) -> f64 {
        self.height - (y - self.viewport.min_y) / self.span_y * self.height
    }

    /// Both axes at once, for callers plotting points.
    pub fn to_screen(&self, x: f64, y: f64) -> (f64, f64) {
        (self.screen_x(x), self.screen_y(y))
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }
}

fn clamp_span(span: f64) -> f64 {
    if span.is_finite() {
        span.max(MIN_SPAN)
    } else {
        // A non-finite window (a = 0 upstream) keeps its non-finite span;
        // the rasterizer discards the resulting non-finite pixels.
        span
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_viewport() -> Viewport {
        Viewport { min_x: -6.0, max_x: 6.0, min_y: -2.0, max_y: 38.0 }
    }

    #[test]
    fn corners_map_to_canvas_edges() {
        // Contract: viewport corners land exactly on the canvas corners,
        // with math-up mapping to screen-up.
        let m = PixelMapper::new(unit_viewport(), CanvasSize::new(600, 300));
        assert_eq!(m.screen_x(-6.0), 0.0);
        assert_eq!(m.screen_x(6.0), 600.0);
        assert_eq!(m.screen_y(-2.0), 300.0); // bottom of the window
        assert_eq!(m.screen_y(38.0), 0.0); // top of the window
    }

    #[test]
    fn midpoint_maps_to_canvas_center() {
        let m = PixelMapper::new(unit_viewport(), CanvasSize::new(600, 300));
        assert_eq!(m.to_screen(0.0, 18.0), (300.0, 150.0));
    }

    #[test]
    fn zero_extent_viewport_is_clamped() {
        // Contract: a collapsed window divides by MIN_SPAN instead of zero,
        // so screen coordinates stay finite.
        let vp = Viewport { min_x: 1.0, max_x: 1.0, min_y: 2.0, max_y: 2.0 };
        let m = PixelMapper::new(vp, CanvasSize::new(100, 100));
        assert!(m.screen_x(1.0).is_finite());
        assert!(m.screen_y(2.0).is_finite());
        // Points off the collapsed window are huge but still finite.
        assert!(m.screen_x(2.0).is_finite());
    }

    #[test]
    fn non_finite_window_yields_non_finite_pixels() {
        // Contract: the a = 0 degenerate case is not masked here; the
        // rasterizer is the layer that drops non-finite coordinates.
        let vp = Viewport {
            min_x: f64::NEG_INFINITY,
            max_x: f64::INFINITY,
            min_y: 0.0,
            max_y: 1.0,
        };
        let m = PixelMapper::new(vp, CanvasSize::new(100, 100));
        assert!(!m.screen_x(0.0).is_finite());
    }
}
