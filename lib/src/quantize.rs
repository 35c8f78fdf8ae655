//! Brightness-to-glyph quantization
//!
//! Index 0 of a palette is always the densest glyph and is assigned to the
//! darkest samples; the last index is the sparsest and goes to the
//! brightest. Quantization normalizes against the field's own observed
//! min/max so dark-heavy or bright-heavy images still use the full palette.

use crate::palette::GlyphPalette;
use crate::tone::BrightnessField;

/// Row-major grid of glyphs, the pipeline's final artifact.
///
/// Every row has the same glyph count, matching the brightness field the
/// grid was quantized from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterGrid {
    width: u32,
    rows: Vec<Vec<char>>,
}

impl CharacterGrid {
    pub fn new(width: u32, rows: Vec<Vec<char>>) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == width as usize));
        Self { width, rows }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.rows.len() as u32
    }

    pub fn rows(&self) -> &[Vec<char>] {
        &self.rows
    }

    pub fn glyph(&self, x: u32, y: u32) -> char {
        self.rows[y as usize][x as usize]
    }

    /// Plain-text form, rows joined with newlines.
    pub fn to_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Map a brightness field onto palette indices.
///
/// `normalized = (value - min) / range` over the observed range, then
/// `index = floor(normalized * (len - 1))`, clamped. A flat field carries
/// no contrast to normalize, so it falls back to absolute 0-255 scaling
/// (a flat white frame stays sparse instead of collapsing to the densest
/// glyph).
pub fn quantize(field: &BrightnessField, palette: &GlyphPalette) -> CharacterGrid {
    let levels = palette.len().saturating_sub(1);
    let (min, max) = field.min_max().unwrap_or((0, 0));

    let rows = (0..field.height())
        .map(|y| {
            (0..field.width())
                .map(|x| {
                    let value = field.get(x, y);
                    let normalized = if max > min {
                        (value - min) as f32 / (max - min) as f32
                    } else {
                        value as f32 / 255.0
                    };
                    let index = ((normalized * levels as f32).floor() as usize).min(levels);
                    palette.glyph(index)
                })
                .collect()
        })
        .collect();

    CharacterGrid::new(field.width(), rows)
}
