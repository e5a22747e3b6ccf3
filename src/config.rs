// src/config.rs

//! Configuration for the tutor: canvas sizes, input ranges, theme, and
//! layer toggles.
//!
//! Every section has sensible defaults and deserializes with
//! `#[serde(default)]`, so a config file only needs to name the fields it
//! changes. The file format is JSON, loaded from the path in the
//! `QUADTUTOR_CONFIG` environment variable; when the variable is unset the
//! defaults are used.

use crate::color::Theme;
use crate::mapper::CanvasSize;
use crate::scene::LayerMask;

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming the optional config file.
pub const CONFIG_ENV_VAR: &str = "QUADTUTOR_CONFIG";

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Canvas dimensions for the live view and the exported artifact.
    pub canvas: CanvasConfig,
    /// Bounds and step for the coefficient inputs.
    pub inputs: InputRanges,
    /// Plot palette.
    pub theme: Theme,
    /// Which render layers are painted.
    pub layers: LayerMask,
}

impl Config {
    /// Loads the config named by `QUADTUTOR_CONFIG`, falling back to
    /// defaults when the variable is unset.
    pub fn load_or_default() -> Result<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => {
                info!("loading config from {path}");
                Self::load(Path::new(&path))
            }
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}

/// Reference canvas sizes: 600×300 live, 800×360 exported. The export may
/// legitimately differ from the live view; both run the same aspect-aware
/// viewport and mapper logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub live: CanvasSize,
    pub export: CanvasSize,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        CanvasConfig {
            live: CanvasSize::new(600, 300),
            export: CanvasSize::new(800, 360),
        }
    }
}

/// Slider-style bounds for the coefficients. Values arriving from the host
/// are clamped into these ranges the way slider widgets would clamp them;
/// the evaluation point is deliberately unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputRanges {
    pub a_min: f64,
    pub a_max: f64,
    pub bc_min: f64,
    pub bc_max: f64,
    pub step: f64,
}

impl Default for InputRanges {
    fn default() -> Self {
        InputRanges {
            a_min: -5.0,
            a_max: 5.0,
            bc_min: -10.0,
            bc_max: 10.0,
            step: 0.1,
        }
    }
}

impl InputRanges {
    pub fn clamp_a(&self, a: f64) -> f64 {
        clamp_logged("a", a, self.a_min, self.a_max)
    }

    pub fn clamp_b(&self, b: f64) -> f64 {
        clamp_logged("b", b, self.bc_min, self.bc_max)
    }

    pub fn clamp_c(&self, c: f64) -> f64 {
        clamp_logged("c", c, self.bc_min, self.bc_max)
    }
}

fn clamp_logged(name: &str, value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        warn!("coefficient {name} is NaN, using {min}");
        return min;
    }
    let clamped = value.clamp(min, max);
    if clamped != value {
        warn!("coefficient {name}={value} outside [{min}, {max}], clamped to {clamped}");
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_surfaces() {
        // Contract: live 600×300, export 800×360, a ∈ [-5,5],
        // b,c ∈ [-10,10], step 0.1, all layers on.
        let config = Config::default();
        assert_eq!(config.canvas.live, CanvasSize::new(600, 300));
        assert_eq!(config.canvas.export, CanvasSize::new(800, 360));
        assert_eq!(config.inputs.a_min, -5.0);
        assert_eq!(config.inputs.bc_max, 10.0);
        assert_eq!(config.inputs.step, 0.1);
        assert_eq!(config.layers, LayerMask::all());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        // Contract: a config file may name only the fields it changes.
        let config: Config =
            serde_json::from_str(r#"{"canvas": {"live": {"width": 320, "height": 200}}}"#)
                .unwrap();
        assert_eq!(config.canvas.live, CanvasSize::new(320, 200));
        assert_eq!(config.canvas.export, CanvasSize::new(800, 360));
        assert_eq!(config.theme, Theme::default());
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn clamping_enforces_slider_bounds() {
        let ranges = InputRanges::default();
        assert_eq!(ranges.clamp_a(7.5), 5.0);
        assert_eq!(ranges.clamp_a(-7.5), -5.0);
        assert_eq!(ranges.clamp_b(3.0), 3.0);
        assert_eq!(ranges.clamp_c(-99.0), -10.0);
        assert_eq!(ranges.clamp_a(f64::NAN), -5.0);
    }
}
