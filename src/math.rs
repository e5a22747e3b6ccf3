// src/math.rs

//! Pure quadratic geometry: discriminant, vertex, real roots, and function
//! evaluation for `f(x) = ax² + bx + c`.
//!
//! Everything in this module is a total function of its inputs with no side
//! effects. The rest of the pipeline (view window, scene builder, exporter)
//! derives all of its numeric decisions from the values computed here, so
//! any change to these formulas must be mirrored in the exported artifact's
//! embedded engine (see `crate::export`).
//!
//! `a = 0` is deliberately *not* validated or special-cased: the vertex and
//! root formulas divide by `2a`, so a degenerate `a` produces ±infinity or
//! NaN, which the downstream layers tolerate (the coordinate mapper clamps,
//! the rasterizer skips non-finite pixels). Masking this with clamping would
//! silently diverge from the exported re-implementation.

use serde::{Deserialize, Serialize};

/// The three coefficients of `f(x) = ax² + bx + c`.
///
/// Invariant (documented, not enforced): `a != 0`. See the module docs for
/// what happens when it is violated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Coefficients {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// `b² − 4ac`.
    pub fn discriminant(&self) -> f64 {
        self.b * self.b - 4.0 * self.a * self.c
    }

    /// The parabola's turning point `(−b/2a, f(−b/2a))`.
    pub fn vertex(&self) -> (f64, f64) {
        let xv = -self.b / (2.0 * self.a);
        (xv, self.evaluate(xv))
    }

    /// Real roots of `f(x) = 0`, keyed off the discriminant sign.
    ///
    /// For a positive discriminant the two roots are returned in formula
    /// order, `(−b−√D)/2a` before `(−b+√D)/2a`. The first element receives
    /// the `x₁` label in the plot, so this ordering is load-bearing and the
    /// exported artifact computes it identically.
    pub fn real_roots(&self) -> Roots {
        let disc = self.discriminant();
        if disc < 0.0 {
            return Roots::none();
        }
        if disc == 0.0 {
            return Roots::one(-self.b / (2.0 * self.a));
        }
        let sqrt_d = disc.sqrt();
        Roots::two(
            (-self.b - sqrt_d) / (2.0 * self.a),
            (-self.b + sqrt_d) / (2.0 * self.a),
        )
    }

    /// `a·x² + b·x + c`.
    pub fn evaluate(&self, x: f64) -> f64 {
        self.a * x * x + self.b * x + self.c
    }

    /// True when the parabola opens upward (`a > 0`).
    pub fn opens_upward(&self) -> bool {
        self.a > 0.0
    }
}

/// An ordered sequence of zero, one, or two real roots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Roots {
    count: usize,
    values: [f64; 2],
}

impl Roots {
    pub fn none() -> Self {
        Self { count: 0, values: [0.0; 2] }
    }

    pub fn one(r: f64) -> Self {
        Self { count: 1, values: [r, 0.0] }
    }

    pub fn two(first: f64, second: f64) -> Self {
        Self { count: 2, values: [first, second] }
    }

    /// The roots in label order (`x₁` first).
    pub fn as_slice(&self) -> &[f64] {
        &self.values[..self.count]
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Everything the view window and scene builder need, derived from one set
/// of coefficients. Always constructed fresh; never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedGeometry {
    pub discriminant: f64,
    pub vertex: (f64, f64),
    pub roots: Roots,
}

impl DerivedGeometry {
    pub fn of(q: &Coefficients) -> Self {
        Self {
            discriminant: q.discriminant(),
            vertex: q.vertex(),
            roots: q.real_roots(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminant_matches_reference_formula() {
        // Contract: discriminant(a,b,c) == b² - 4ac exactly, in f64 arithmetic.
        let cases = [
            (1.0, 0.0, 0.0),
            (2.0, -8.0, 6.0),
            (1.0, 6.0, 9.0),
            (-1.0, 0.0, 0.0),
            (0.3, -2.7, 9.9),
        ];
        for (a, b, c) in cases {
            let q = Coefficients::new(a, b, c);
            assert_eq!(q.discriminant(), b * b - 4.0 * a * c);
        }
    }

    #[test]
    fn vertex_lies_on_the_curve() {
        // Contract: evaluate(vertex.x) == vertex.y for all a != 0.
        for a in [-5.0, -1.0, -0.5, 0.5, 1.0, 5.0] {
            for b in [-10.0, -3.0, 0.0, 7.0] {
                for c in [-10.0, 0.0, 4.5] {
                    let q = Coefficients::new(a, b, c);
                    let (xv, yv) = q.vertex();
                    assert_eq!(q.evaluate(xv), yv, "a={a} b={b} c={c}");
                }
            }
        }
    }

    #[test]
    fn root_count_follows_discriminant_sign() {
        // Contract: D<0 → 0 roots, D=0 → 1 root, D>0 → 2 roots.
        let no_roots = Coefficients::new(1.0, 0.0, 1.0); // D = -4
        assert!(no_roots.real_roots().is_empty());

        let double = Coefficients::new(1.0, 0.0, 0.0); // D = 0
        assert_eq!(double.real_roots().as_slice(), &[0.0]);

        let pair = Coefficients::new(1.0, 0.0, -1.0); // D = 4
        assert_eq!(pair.real_roots().len(), 2);
    }

    #[test]
    fn upward_roots_come_smaller_first() {
        // Contract: for a > 0 and D > 0, formula order (−b−√D)/2a then
        // (−b+√D)/2a is ascending; x₁ labels the smaller root.
        let q = Coefficients::new(2.0, -8.0, 6.0);
        let roots = q.real_roots();
        assert_eq!(roots.as_slice(), &[1.0, 3.0]);
        assert!(roots.as_slice()[0] <= roots.as_slice()[1]);
    }

    #[test]
    fn unit_parabola_geometry() {
        // Contract: a=1,b=0,c=0 → vertex (0,0), D=0, roots [0], f(2)=4.
        let q = Coefficients::new(1.0, 0.0, 0.0);
        assert_eq!(q.vertex(), (0.0, 0.0));
        assert_eq!(q.discriminant(), 0.0);
        assert_eq!(q.real_roots().as_slice(), &[0.0]);
        assert_eq!(q.evaluate(2.0), 4.0);
    }

    #[test]
    fn worked_example_two_roots() {
        // Contract: a=2,b=-8,c=6 → vertex (2,-2), D=16, roots [1,3],
        // y-intercept (0, 6).
        let q = Coefficients::new(2.0, -8.0, 6.0);
        assert_eq!(q.vertex(), (2.0, -2.0));
        assert_eq!(q.discriminant(), 16.0);
        assert_eq!(q.real_roots().as_slice(), &[1.0, 3.0]);
        assert_eq!(q.evaluate(0.0), 6.0);
    }

    #[test]
    fn perfect_square_has_double_root() {
        // Contract: a=1,b=6,c=9 → D=0, single root -3.
        let q = Coefficients::new(1.0, 6.0, 9.0);
        assert_eq!(q.discriminant(), 0.0);
        assert_eq!(q.real_roots().as_slice(), &[-3.0]);
    }

    #[test]
    fn downward_parabola_vertex_is_maximum() {
        // Contract: a=-1,b=0,c=0 → D=0, roots [0], opens downward.
        let q = Coefficients::new(-1.0, 0.0, 0.0);
        assert_eq!(q.discriminant(), 0.0);
        assert_eq!(q.real_roots().as_slice(), &[0.0]);
        assert!(!q.opens_upward());
        // Vertex is a maximum: nearby samples sit below it.
        let (xv, yv) = q.vertex();
        assert!(q.evaluate(xv - 1.0) < yv);
        assert!(q.evaluate(xv + 1.0) < yv);
    }

    #[test]
    fn degenerate_a_is_propagated_not_masked() {
        // Contract: a=0 produces non-finite vertex coordinates rather than
        // an error; callers are expected to tolerate this.
        let q = Coefficients::new(0.0, 2.0, 1.0);
        let (xv, _) = q.vertex();
        assert!(!xv.is_finite());
        // Evaluation itself is still a perfectly ordinary line.
        assert_eq!(q.evaluate(3.0), 7.0);
    }
}
