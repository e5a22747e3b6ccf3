// src/color.rs

//! RGBA color type and the plot theme.
//!
//! `Rgba` is the raster-side pixel format (8 bits per channel). `Theme`
//! names the color of every visual element the renderer paints and is
//! serde-configurable; the defaults reproduce the reference palette used
//! by the exported artifact's stylesheet, so live and exported output
//! match visually.

use serde::{Deserialize, Serialize};

/// RGBA color in 32-bit format (8 bits per channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Convert to an RGBA byte array, the framebuffer's pixel layout.
    pub fn to_bytes(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// CSS hex form (`#rrggbb`), used when embedding the theme into the
    /// exported document. Alpha is not emitted; every theme color is opaque.
    pub fn to_css_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Colors for each layer and marker of the plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Flat background fill, painted first.
    pub background: Rgba,
    /// Light integer-coordinate grid lines.
    pub grid: Rgba,
    /// Bold axis lines at math coordinate zero.
    pub axes: Rgba,
    /// The parabola itself.
    pub curve: Rgba,
    /// Vertex marker.
    pub vertex: Rgba,
    /// Real-root markers (x₁, x₂).
    pub root: Rgba,
    /// Y-intercept marker.
    pub intercept: Rgba,
    /// Marker label text.
    pub label: Rgba,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Rgba::opaque(255, 255, 255),
            grid: Rgba::opaque(229, 231, 235),
            axes: Rgba::opaque(156, 163, 175),
            curve: Rgba::opaque(37, 99, 235),
            vertex: Rgba::opaque(239, 68, 68),
            root: Rgba::opaque(16, 185, 129),
            intercept: Rgba::opaque(245, 158, 11),
            label: Rgba::opaque(17, 24, 39),
        }
    }
}
