// src/raster.rs

//! Software rasterizer: compiles a display list into an RGBA framebuffer.
//!
//! This is the pixel-pushing half of the renderer. It owns no policy: the
//! scene builder decides what to draw and in what order, this module only
//! writes bytes. All pixel writes are bounds-checked, segments are clipped
//! to the canvas before stepping, and non-finite coordinates are dropped,
//! so no input can panic or run away — degenerate geometry degrades to a
//! visibly wrong frame instead.

use crate::color::Rgba;
use crate::font;
use crate::mapper::CanvasSize;
use crate::scene::DrawOp;

use log::trace;

/// How far outside the canvas, in pixels, clipped segments may extend so
/// thick strokes still cover edge pixels.
const CLIP_MARGIN: f64 = 8.0;

/// A fixed-size RGBA8 raster surface (row-major, 4 bytes per pixel).
#[derive(Debug, Clone)]
pub struct Frame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Frame {
    pub fn new(size: CanvasSize) -> Self {
        Self {
            width: size.width,
            height: size.height,
            data: vec![0; size.width as usize * size.height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Reads one pixel; `None` outside the canvas.
    pub fn pixel(&self, x: i64, y: i64) -> Option<Rgba> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.data[idx..idx + 4];
        Some(Rgba::new(px[0], px[1], px[2], px[3]))
    }

    /// Writes one pixel; out-of-bounds writes are silently dropped.
    pub fn put_pixel(&mut self, x: i64, y: i64, color: Rgba) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.data[idx..idx + 4].copy_from_slice(&color.to_bytes());
    }

    fn fill(&mut self, color: Rgba) {
        let bytes = color.to_bytes();
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
    }

    /// Serializes the frame as a binary PPM (P6) image. Alpha is dropped;
    /// the plot never uses transparency.
    pub fn to_ppm(&self) -> Vec<u8> {
        let mut out = format!("P6\n{} {}\n255\n", self.width, self.height).into_bytes();
        out.reserve(self.width as usize * self.height as usize * 3);
        for px in self.data.chunks_exact(4) {
            out.extend_from_slice(&px[..3]);
        }
        out
    }
}

/// Paints every op, in list order, onto `frame`.
pub fn compile_scene(ops: &[DrawOp], frame: &mut Frame) {
    trace!("rasterizing {} draw ops", ops.len());
    for op in ops {
        match op {
            DrawOp::Clear { color } => frame.fill(*color),
            DrawOp::Line { x0, y0, x1, y1, width, color } => {
                draw_segment(frame, *x0, *y0, *x1, *y1, *width, *color);
            }
            DrawOp::Polyline { points, width, color } => {
                for pair in points.windows(2) {
                    let (x0, y0) = pair[0];
                    let (x1, y1) = pair[1];
                    draw_segment(frame, x0, y0, x1, y1, *width, *color);
                }
            }
            DrawOp::Disc { x, y, radius, color } => {
                draw_disc(frame, *x, *y, *radius, *color);
            }
            DrawOp::Label { x, y, text, color } => {
                draw_text(frame, *x, *y, text, *color);
            }
        }
    }
}

/// Bresenham segment with a square pen of side `width`, after parametric
/// clipping against the (slightly expanded) canvas rectangle.
fn draw_segment(frame: &mut Frame, x0: f64, y0: f64, x1: f64, y1: f64, width: u32, color: Rgba) {
    let Some((cx0, cy0, cx1, cy1)) = clip_segment(
        x0,
        y0,
        x1,
        y1,
        frame.width as f64,
        frame.height as f64,
    ) else {
        return;
    };

    let mut x = cx0.round() as i64;
    let mut y = cy0.round() as i64;
    let xe = cx1.round() as i64;
    let ye = cy1.round() as i64;

    let dx = (xe - x).abs();
    let dy = -(ye - y).abs();
    let sx = if x < xe { 1 } else { -1 };
    let sy = if y < ye { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        stamp(frame, x, y, width, color);
        if x == xe && y == ye {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Fills a `width × width` pen footprint centered on `(x, y)`.
fn stamp(frame: &mut Frame, x: i64, y: i64, width: u32, color: Rgba) {
    if width <= 1 {
        frame.put_pixel(x, y, color);
        return;
    }
    let lo = -((width as i64 - 1) / 2);
    let hi = width as i64 / 2;
    for oy in lo..=hi {
        for ox in lo..=hi {
            frame.put_pixel(x + ox, y + oy, color);
        }
    }
}

/// Liang-Barsky clip of the segment against the canvas rectangle expanded
/// by `CLIP_MARGIN`. Returns `None` for fully-outside or non-finite input.
fn clip_segment(
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    w: f64,
    h: f64,
) -> Option<(f64, f64, f64, f64)> {
    if !(x0.is_finite() && y0.is_finite() && x1.is_finite() && y1.is_finite()) {
        return None;
    }

    let dx = x1 - x0;
    let dy = y1 - y0;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    let checks = [
        (-dx, x0 - (-CLIP_MARGIN)),
        (dx, (w + CLIP_MARGIN) - x0),
        (-dy, y0 - (-CLIP_MARGIN)),
        (dy, (h + CLIP_MARGIN) - y0),
    ];
    for (p, q) in checks {
        if p == 0.0 {
            if q < 0.0 {
                return None; // parallel and outside
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            if r > t0 {
                t0 = r;
            }
        } else {
            if r < t0 {
                return None;
            }
            if r < t1 {
                t1 = r;
            }
        }
    }

    Some((x0 + t0 * dx, y0 + t0 * dy, x0 + t1 * dx, y0 + t1 * dy))
}

fn draw_disc(frame: &mut Frame, x: f64, y: f64, radius: u32, color: Rgba) {
    if !(x.is_finite() && y.is_finite()) {
        return;
    }
    let cx = x.round() as i64;
    let cy = y.round() as i64;
    let r = radius as i64;
    for oy in -r..=r {
        for ox in -r..=r {
            if ox * ox + oy * oy <= r * r {
                frame.put_pixel(cx + ox, cy + oy, color);
            }
        }
    }
}

/// Blits label text from the built-in 5×7 font, baseline-left anchored.
fn draw_text(frame: &mut Frame, x: f64, y: f64, text: &str, color: Rgba) {
    if !(x.is_finite() && y.is_finite()) {
        return;
    }
    let mut pen_x = x.round() as i64;
    let top = y.round() as i64 - font::GLYPH_HEIGHT as i64;
    for ch in text.chars() {
        let rows = font::glyph(ch);
        for (row_idx, row) in rows.iter().enumerate() {
            for col in 0..font::GLYPH_WIDTH {
                if row & (1 << (font::GLYPH_WIDTH - 1 - col)) != 0 {
                    frame.put_pixel(pen_x + col as i64, top + row_idx as i64, color);
                }
            }
        }
        pen_x += font::ADVANCE as i64;
    }
}
