// src/view.rs

//! View window calculation: picks the rectangular math-coordinate region
//! that the raster canvas displays.
//!
//! The heuristic is intentionally simple and fixed rather than adaptive:
//! sample the function at eleven integer offsets centered on the vertex,
//! then pad the resulting bounds by one unit in X and two in Y. The
//! y-intercept `c` is folded into the Y range explicitly, so the intercept
//! marker is always on screen even when it is not among the samples.
//!
//! The constants here are shared with the export serializer; the exported
//! artifact applies the same half-span and padding so both implementations
//! agree on the viewport for any given coefficients.

use crate::math::{Coefficients, DerivedGeometry};
use serde::{Deserialize, Serialize};

/// Number of sample offsets on each side of the vertex x-coordinate.
pub const SAMPLE_HALF_SPAN: i32 = 5;
/// Horizontal padding, in math units, added beyond the sampled X range.
pub const PAD_X: f64 = 1.0;
/// Vertical padding, in math units, added beyond the sampled Y range.
pub const PAD_Y: f64 = 2.0;

/// A bounded math-coordinate region, `min_x < max_x` and `min_y < max_y`
/// for any finite input (the fixed padding guarantees positive extent).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Viewport {
    /// Computes the view window around the vertex of `q`.
    ///
    /// The X bounds are expressed as min/max over the sample positions
    /// rather than directly as `vertex.x ± (SAMPLE_HALF_SPAN + PAD_X)` so
    /// that fractional vertex positions flow through the same arithmetic
    /// as the exported engine.
    pub fn around(q: &Coefficients, geom: &DerivedGeometry) -> Self {
        let vx = geom.vertex.0;

        let mut min_sample_x = vx - SAMPLE_HALF_SPAN as f64;
        let mut max_sample_x = vx + SAMPLE_HALF_SPAN as f64;
        let mut min_sample_y = f64::INFINITY;
        let mut max_sample_y = f64::NEG_INFINITY;

        for offset in -SAMPLE_HALF_SPAN..=SAMPLE_HALF_SPAN {
            let x = vx + offset as f64;
            let y = q.evaluate(x);
            min_sample_x = min_sample_x.min(x);
            max_sample_x = max_sample_x.max(x);
            min_sample_y = min_sample_y.min(y);
            max_sample_y = max_sample_y.max(y);
        }

        Self {
            min_x: min_sample_x - PAD_X,
            max_x: max_sample_x + PAD_X,
            min_y: min_sample_y.min(q.c) - PAD_Y,
            max_y: max_sample_y.max(q.c) + PAD_Y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn contains_x(&self, x: f64) -> bool {
        self.min_x <= x && x <= self.max_x
    }

    pub fn contains_y(&self, y: f64) -> bool {
        self.min_y <= y && y <= self.max_y
    }

    pub fn is_finite(&self) -> bool {
        self.min_x.is_finite()
            && self.max_x.is_finite()
            && self.min_y.is_finite()
            && self.max_y.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_for(a: f64, b: f64, c: f64) -> (Coefficients, Viewport) {
        let q = Coefficients::new(a, b, c);
        let geom = DerivedGeometry::of(&q);
        let vp = Viewport::around(&q, &geom);
        (q, vp)
    }

    #[test]
    fn x_bounds_collapse_to_vertex_plus_minus_six() {
        // Contract: integer-offset sampling makes the X bounds equal
        // vertex.x ± (5 + 1), including for fractional vertex positions.
        let (_, vp) = window_for(2.0, -8.0, 6.0); // vertex.x = 2
        assert_eq!(vp.min_x, -4.0);
        assert_eq!(vp.max_x, 8.0);

        let (_, vp2) = window_for(1.0, 1.0, 0.0); // vertex.x = -0.5
        assert_eq!(vp2.min_x, -0.5 - 6.0);
        assert_eq!(vp2.max_x, -0.5 + 6.0);
    }

    #[test]
    fn y_range_covers_vertex_and_intercept() {
        // Contract: the viewport always contains vertex.y and c in its Y
        // range, across the whole input domain.
        let mut a = -5.0;
        while a <= 5.0 {
            if a != 0.0 {
                let mut b = -10.0;
                while b <= 10.0 {
                    let mut c = -10.0;
                    while c <= 10.0 {
                        let (q, vp) = window_for(a, b, c);
                        let (xv, yv) = q.vertex();
                        assert!(vp.contains_x(xv), "a={a} b={b} c={c}");
                        assert!(vp.contains_y(yv), "a={a} b={b} c={c}");
                        assert!(vp.contains_y(c), "a={a} b={b} c={c}");
                        c += 2.5;
                    }
                    b += 2.5;
                }
            }
            a += 1.25;
        }
    }

    #[test]
    fn padding_guarantees_positive_extent() {
        // Contract: even a curve with no vertical variation inside the
        // sample span keeps a strictly positive viewport height.
        let (_, vp) = window_for(1e-12, 0.0, 3.0); // almost flat
        assert!(vp.width() > 0.0);
        assert!(vp.height() >= 2.0 * PAD_Y);
    }

    #[test]
    fn intercept_outside_samples_is_still_visible() {
        // Contract: c is folded into the Y range even when the vertex is
        // far from x = 0 and the intercept is not among the 11 samples.
        let (q, vp) = window_for(0.5, -20.0, -9.0); // vertex.x = 20
        assert!(!vp.contains_x(0.0)); // intercept x is off-screen...
        assert!(vp.contains_y(q.c)); // ...but its y level is included.
    }

    #[test]
    fn degenerate_a_gives_non_finite_window() {
        // Contract: a = 0 propagates non-finite bounds; nothing panics.
        let (_, vp) = window_for(0.0, 1.0, 0.0);
        assert!(!vp.is_finite());
    }
}
