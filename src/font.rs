// src/font.rs

//! Built-in 5×7 bitmap font for marker labels.
//!
//! The raster output is headless, so label text is blitted from a small
//! embedded glyph table instead of going through a platform font stack.
//! Coverage is the label character set (digits, the letters appearing in
//! "Vertex" and "y-intercept", subscript ₁/₂, and light punctuation);
//! anything else renders as a hollow box so missing coverage is visible
//! rather than silent.
//!
//! Each glyph is seven rows, one byte per row, with bit 4 as the leftmost
//! of five columns.

/// Glyph cell width in pixels.
pub const GLYPH_WIDTH: u32 = 5;
/// Glyph cell height in pixels.
pub const GLYPH_HEIGHT: u32 = 7;
/// Horizontal advance between characters (one column of spacing).
pub const ADVANCE: u32 = 6;

/// Fallback bitmap for characters outside the table.
const UNKNOWN: [u8; 7] = [
    0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111,
];

/// Returns the 5×7 bitmap for `ch`.
pub fn glyph(ch: char) -> [u8; 7] {
    match ch {
        ' ' => [0; 7],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00110, 0b00110],
        ',' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00110, 0b00110, 0b01000],
        '(' => [0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010],
        ')' => [0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000],
        '=' => [0b00000, 0b00000, 0b11111, 0b00000, 0b11111, 0b00000, 0b00000],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'c' => [0b00000, 0b00000, 0b01110, 0b10000, 0b10000, 0b10001, 0b01110],
        'e' => [0b00000, 0b00000, 0b01110, 0b10001, 0b11111, 0b10000, 0b01110],
        'i' => [0b00100, 0b00000, 0b01100, 0b00100, 0b00100, 0b00100, 0b01110],
        'n' => [0b00000, 0b00000, 0b10110, 0b11001, 0b10001, 0b10001, 0b10001],
        'p' => [0b00000, 0b00000, 0b11110, 0b10001, 0b11110, 0b10000, 0b10000],
        'r' => [0b00000, 0b00000, 0b10110, 0b11001, 0b10000, 0b10000, 0b10000],
        't' => [0b01000, 0b01000, 0b11110, 0b01000, 0b01000, 0b01001, 0b00110],
        'x' => [0b00000, 0b00000, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001],
        'y' => [0b00000, 0b00000, 0b10001, 0b10001, 0b01111, 0b00001, 0b01110],
        // Subscript digits used for root labels.
        '₁' => [0b00000, 0b00000, 0b00000, 0b00100, 0b01100, 0b00100, 0b01110],
        '₂' => [0b00000, 0b00000, 0b00000, 0b01100, 0b00010, 0b00100, 0b01110],
        _ => UNKNOWN,
    }
}

/// Pixel width of a rendered string, including inter-character spacing.
pub fn text_width(text: &str) -> u32 {
    text.chars().count() as u32 * ADVANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_character_set_is_covered() {
        // Contract: every character the scene builder can emit has a real
        // glyph, not the fallback box.
        for label in ["Vertex", "x₁", "x₂", "y-intercept"] {
            for ch in label.chars() {
                assert_ne!(glyph(ch), UNKNOWN, "missing glyph for {ch:?}");
            }
        }
    }

    #[test]
    fn glyphs_fit_five_columns() {
        // Contract: no glyph row sets bits outside the 5-column cell.
        for ch in "0123456789-.,()=Vceinprtxy₁₂ ".chars() {
            for row in glyph(ch) {
                assert_eq!(row & !0b11111, 0, "glyph {ch:?} overflows cell");
            }
        }
    }

    #[test]
    fn unknown_characters_render_as_boxes() {
        assert_eq!(glyph('Z'), UNKNOWN);
        assert_eq!(glyph('@'), UNKNOWN);
    }

    #[test]
    fn text_width_counts_advance_per_char() {
        assert_eq!(text_width(""), 0);
        assert_eq!(text_width("x₁"), 2 * ADVANCE);
        assert_eq!(text_width("Vertex"), 6 * ADVANCE);
    }
}
