// src/pipeline.rs

//! The recompute pipeline: the documented call contract between the host
//! shell and the plotting core.
//!
//! `PlotPipeline` owns the current coefficients and evaluation point.
//! After any parameter mutation the host calls `render_frame()` (and
//! `readouts()` for the info panel); each call runs math → view window →
//! scene → raster synchronously to completion and returns a fresh frame.
//! There is no reactive machinery and no incremental rendering: every run
//! is a full clear-and-redraw, O(canvas width), with no suspension point.

use crate::color::Theme;
use crate::config::Config;
use crate::mapper::CanvasSize;
use crate::math::{Coefficients, DerivedGeometry, Roots};
use crate::raster::{self, Frame};
use crate::scene::{self, LayerMask};
use crate::view::Viewport;

use log::debug;

/// Derived values the host shell displays alongside the plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Readouts {
    pub vertex: (f64, f64),
    pub axis_of_symmetry: f64,
    pub opens_upward: bool,
    pub discriminant: f64,
    pub roots: Roots,
    pub y_intercept: f64,
    pub eval_point: f64,
    pub value_at_eval: f64,
}

impl Readouts {
    /// Root list the way the info panel prints it.
    pub fn roots_text(&self) -> String {
        if self.roots.is_empty() {
            return "None (complex)".to_string();
        }
        self.roots
            .as_slice()
            .iter()
            .map(|r| format!("{r:.2}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Owns the mutable plot parameters and runs the render pipeline.
pub struct PlotPipeline {
    coefficients: Coefficients,
    eval_point: f64,
    canvas: CanvasSize,
    theme: Theme,
    layers: LayerMask,
    ranges: crate::config::InputRanges,
}

impl PlotPipeline {
    /// Builds a pipeline rendering at the live canvas size, with the
    /// reference initial parameters (a=1, b=0, c=0, x=1).
    pub fn new(config: &Config) -> Self {
        Self {
            coefficients: Coefficients::new(1.0, 0.0, 0.0),
            eval_point: 1.0,
            canvas: config.canvas.live,
            theme: config.theme,
            layers: config.layers,
            ranges: config.inputs,
        }
    }

    /// Replaces the coefficients, clamping each into its slider range.
    /// `a = 0` inside the range is allowed through on purpose; see
    /// `crate::math` for the degenerate semantics.
    pub fn set_coefficients(&mut self, a: f64, b: f64, c: f64) {
        self.coefficients = Coefficients::new(
            self.ranges.clamp_a(a),
            self.ranges.clamp_b(b),
            self.ranges.clamp_c(c),
        );
        debug!("coefficients set to {:?}", self.coefficients);
    }

    /// Sets the evaluation point. The point is unconstrained; parse
    /// failures are the host's concern (it substitutes 0 before calling).
    pub fn set_eval_point(&mut self, x: f64) {
        self.eval_point = x;
    }

    pub fn coefficients(&self) -> Coefficients {
        self.coefficients
    }

    pub fn geometry(&self) -> DerivedGeometry {
        DerivedGeometry::of(&self.coefficients)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::around(&self.coefficients, &self.geometry())
    }

    pub fn readouts(&self) -> Readouts {
        let q = &self.coefficients;
        let geom = self.geometry();
        Readouts {
            vertex: geom.vertex,
            axis_of_symmetry: geom.vertex.0,
            opens_upward: q.opens_upward(),
            discriminant: geom.discriminant,
            roots: geom.roots,
            y_intercept: q.c,
            eval_point: self.eval_point,
            value_at_eval: q.evaluate(self.eval_point),
        }
    }

    /// Recomputes everything and paints a fresh frame. Called by the host
    /// after every parameter mutation.
    pub fn render_frame(&self) -> Frame {
        let geom = self.geometry();
        let viewport = Viewport::around(&self.coefficients, &geom);
        let ops = scene::build_scene(
            &self.coefficients,
            &geom,
            &viewport,
            self.canvas,
            &self.theme,
            self.layers,
        );
        let mut frame = Frame::new(self.canvas);
        raster::compile_scene(&ops, &mut frame);
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use test_log::test;

    fn pipeline_with(a: f64, b: f64, c: f64) -> PlotPipeline {
        let mut pipeline = PlotPipeline::new(&Config::default());
        pipeline.set_coefficients(a, b, c);
        pipeline
    }

    #[test]
    fn readouts_reflect_worked_example() {
        let mut pipeline = pipeline_with(2.0, -8.0, 6.0);
        pipeline.set_eval_point(2.0);
        let readouts = pipeline.readouts();
        assert_eq!(readouts.vertex, (2.0, -2.0));
        assert_eq!(readouts.axis_of_symmetry, 2.0);
        assert!(readouts.opens_upward);
        assert_eq!(readouts.discriminant, 16.0);
        assert_eq!(readouts.roots_text(), "1.00, 3.00");
        assert_eq!(readouts.y_intercept, 6.0);
        assert_eq!(readouts.value_at_eval, -2.0);
    }

    #[test]
    fn complex_roots_print_as_none() {
        let pipeline = pipeline_with(1.0, 0.0, 1.0);
        assert_eq!(pipeline.readouts().roots_text(), "None (complex)");
    }

    #[test]
    fn coefficients_are_clamped_to_slider_ranges() {
        let pipeline = pipeline_with(50.0, -50.0, 0.0);
        let q = pipeline.coefficients();
        assert_eq!(q.a, 5.0);
        assert_eq!(q.b, -10.0);
    }

    #[test]
    fn rendered_frame_has_live_dimensions_and_background() {
        // Contract: the frame matches the configured live canvas and the
        // first layer fully covers it.
        let pipeline = pipeline_with(1.0, 0.0, 0.0);
        let frame = pipeline.render_frame();
        assert_eq!(frame.width(), 600);
        assert_eq!(frame.height(), 300);
        // The canvas edge carries the x = -6 grid line; one pixel inside
        // it nothing paints, so the background shows through.
        assert_eq!(frame.pixel(0, 0), Some(Theme::default().grid));
        assert_eq!(frame.pixel(1, 1), Some(Rgba::opaque(255, 255, 255)));
    }

    #[test]
    fn vertex_marker_paints_on_top_of_the_curve() {
        // Worked example: vertex (2,-2) sits in window x∈[-4,8], y∈[-4,50]
        // and maps to pixel (300, 289); the marker layer wins there.
        let pipeline = pipeline_with(2.0, -8.0, 6.0);
        let frame = pipeline.render_frame();
        let theme = Theme::default();
        assert_eq!(frame.pixel(300, 289), Some(theme.vertex));
    }

    #[test]
    fn degenerate_a_still_renders_a_frame() {
        // Contract: a = 0 (allowed through when inside the slider range)
        // must not panic anywhere in the pipeline.
        let pipeline = pipeline_with(0.0, 1.0, 0.0);
        let frame = pipeline.render_frame();
        assert_eq!(frame.width(), 600);
    }

    #[test]
    fn each_render_is_a_fresh_frame() {
        // Contract: no retained scene graph; two renders of different
        // parameters share nothing.
        let mut pipeline = pipeline_with(1.0, 0.0, 0.0);
        let first = pipeline.render_frame();
        pipeline.set_coefficients(-1.0, 0.0, 0.0);
        let second = pipeline.render_frame();
        assert_ne!(first.data(), second.data());
    }
}
