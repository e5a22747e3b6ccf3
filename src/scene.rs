// src/scene.rs

//! Scene builder: turns derived geometry plus a view window into an
//! ordered display list of abstract draw ops.
//!
//! This is the backend-agnostic half of the renderer, mirrored on the
//! export side by the artifact's embedded canvas script. It contains no
//! pixel access; `crate::raster` compiles the ops into a framebuffer.
//!
//! The layer order is fixed and load-bearing:
//!   1. background fill
//!   2. grid lines at every integer math coordinate inside the viewport
//!   3. axis lines at math coordinate zero
//!   4. the curve, sampled once per horizontal pixel column
//!   5. annotated points (vertex, roots, y-intercept), drawn last
//!
//! There is no retained scene: every call rebuilds the full list.

use crate::color::{Rgba, Theme};
use crate::mapper::{CanvasSize, PixelMapper};
use crate::math::{Coefficients, DerivedGeometry};
use crate::view::Viewport;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Marker disc radius in pixels.
pub const MARKER_RADIUS: u32 = 4;
/// Label offset from its marker, in pixels (up and to the right).
pub const LABEL_DX: f64 = 6.0;
pub const LABEL_DY: f64 = -6.0;
/// Stroke widths per layer, in pixels.
pub const GRID_WIDTH: u32 = 1;
pub const AXIS_WIDTH: u32 = 2;
pub const CURVE_WIDTH: u32 = 3;

bitflags! {
    /// Which of the five layers the scene builder emits. The default is
    /// everything; configs may switch individual layers off.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct LayerMask: u8 {
        const BACKGROUND = 1 << 0;
        const GRID       = 1 << 1;
        const AXES       = 1 << 2;
        const CURVE      = 1 << 3;
        const MARKERS    = 1 << 4;
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        LayerMask::all()
    }
}

/// One abstract drawing operation, in pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Fill the whole canvas.
    Clear { color: Rgba },
    /// Straight segment from `(x0, y0)` to `(x1, y1)`.
    Line { x0: f64, y0: f64, x1: f64, y1: f64, width: u32, color: Rgba },
    /// Connected path through `points`, in order.
    Polyline { points: Vec<(f64, f64)>, width: u32, color: Rgba },
    /// Filled disc centered at `(x, y)`.
    Disc { x: f64, y: f64, radius: u32, color: Rgba },
    /// Text anchored at baseline-left `(x, y)`.
    Label { x: f64, y: f64, text: String, color: Rgba },
}

/// Builds the full display list for one frame.
pub fn build_scene(
    q: &Coefficients,
    geom: &DerivedGeometry,
    viewport: &Viewport,
    size: CanvasSize,
    theme: &Theme,
    layers: LayerMask,
) -> Vec<DrawOp> {
    let mapper = PixelMapper::new(*viewport, size);
    let w = size.width as f64;
    let h = size.height as f64;
    let mut ops = Vec::new();

    if layers.contains(LayerMask::BACKGROUND) {
        ops.push(DrawOp::Clear { color: theme.background });
    }

    if layers.contains(LayerMask::GRID) {
        for gx in integer_ticks(viewport.min_x, viewport.max_x) {
            let sx = mapper.screen_x(gx as f64);
            ops.push(DrawOp::Line {
                x0: sx,
                y0: 0.0,
                x1: sx,
                y1: h,
                width: GRID_WIDTH,
                color: theme.grid,
            });
        }
        for gy in integer_ticks(viewport.min_y, viewport.max_y) {
            let sy = mapper.screen_y(gy as f64);
            ops.push(DrawOp::Line {
                x0: 0.0,
                y0: sy,
                x1: w,
                y1: sy,
                width: GRID_WIDTH,
                color: theme.grid,
            });
        }
    }

    if layers.contains(LayerMask::AXES) {
        // The axes may project off-canvas when 0 is outside the viewport;
        // the rasterizer clips, so no special case is needed.
        let y_axis_x = mapper.screen_x(0.0);
        ops.push(DrawOp::Line {
            x0: y_axis_x,
            y0: 0.0,
            x1: y_axis_x,
            y1: h,
            width: AXIS_WIDTH,
            color: theme.axes,
        });
        let x_axis_y = mapper.screen_y(0.0);
        ops.push(DrawOp::Line {
            x0: 0.0,
            y0: x_axis_y,
            x1: w,
            y1: x_axis_y,
            width: AXIS_WIDTH,
            color: theme.axes,
        });
    }

    if layers.contains(LayerMask::CURVE) {
        ops.push(DrawOp::Polyline {
            points: sample_curve(q, viewport, size),
            width: CURVE_WIDTH,
            color: theme.curve,
        });
    }

    if layers.contains(LayerMask::MARKERS) {
        push_marker(&mut ops, &mapper, geom.vertex.0, geom.vertex.1, theme.vertex, theme, "Vertex");
        for (i, &root) in geom.roots.as_slice().iter().enumerate() {
            let label = if i == 0 { "x₁" } else { "x₂" };
            push_marker(&mut ops, &mapper, root, 0.0, theme.root, theme, label);
        }
        push_marker(&mut ops, &mapper, 0.0, q.c, theme.intercept, theme, "y-intercept");
    }

    ops
}

/// Curve samples, one per horizontal pixel column (`width + 1` points so
/// both canvas edges are covered). This ties smoothness to canvas width;
/// the exported artifact does the same at its own width.
fn sample_curve(q: &Coefficients, viewport: &Viewport, size: CanvasSize) -> Vec<(f64, f64)> {
    let mapper = PixelMapper::new(*viewport, size);
    let w = size.width;
    let span = viewport.width();
    let mut points = Vec::with_capacity(w as usize + 1);
    for i in 0..=w {
        let x = viewport.min_x + (i as f64 / w as f64) * span;
        let y = q.evaluate(x);
        points.push(mapper.to_screen(x, y));
    }
    points
}

/// Integer math coordinates inside `[lo, hi]`. Empty for non-finite or
/// inverted bounds, which keeps the degenerate `a = 0` window harmless.
fn integer_ticks(lo: f64, hi: f64) -> impl Iterator<Item = i64> {
    let (start, end) = if lo.is_finite() && hi.is_finite() && lo <= hi {
        (lo.ceil() as i64, hi.floor() as i64)
    } else {
        (1, 0)
    };
    start..=end
}

fn push_marker(
    ops: &mut Vec<DrawOp>,
    mapper: &PixelMapper,
    x: f64,
    y: f64,
    color: Rgba,
    theme: &Theme,
    label: &str,
) {
    let (sx, sy) = mapper.to_screen(x, y);
    ops.push(DrawOp::Disc { x: sx, y: sy, radius: MARKER_RADIUS, color });
    ops.push(DrawOp::Label {
        x: sx + LABEL_DX,
        y: sy + LABEL_DY,
        text: label.to_string(),
        color: theme.label,
    });
}
