//! Glyph palettes for brightness mapping
//!
//! Every palette is ordered from the visually densest glyph (index 0,
//! assigned to the darkest pixels) to the sparsest (last index, assigned to
//! the brightest pixels).

use crate::error::{GlyphError, Result};

/// Built-in character sets, ordered dark to light.
pub const CHAR_SETS: &[(&str, &str)] = &[
    ("simple", "@%#*+=-:. "),
    (
        "standard",
        "$@B%8&WM#*oahkbdpqwmZO0QLCJUYXzcvunxrjft/\\|()1{}[]?-_+~<>i!lI;:,\"^`'. ",
    ),
    ("detailed", "@%#*+=-:. "),
    ("blocks", "█▓▒░ "),
    ("blocks-simple", "█▓▒░*+=-:. "),
];

/// An ordered, immutable set of glyphs identified by a name key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphPalette {
    name: String,
    glyphs: Vec<char>,
}

impl GlyphPalette {
    /// Look up one of the built-in palettes by name.
    pub fn named(name: &str) -> Result<Self> {
        CHAR_SETS
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(key, glyphs)| Self {
                name: (*key).to_string(),
                glyphs: glyphs.chars().collect(),
            })
            .ok_or_else(|| {
                GlyphError::InvalidConfiguration(format!(
                    "unknown character set '{}'. Available: {}",
                    name,
                    available_names().join(", ")
                ))
            })
    }

    /// Build a palette from an explicit glyph string, densest first.
    pub fn from_glyphs(name: &str, glyphs: &str) -> Result<Self> {
        if glyphs.is_empty() {
            return Err(GlyphError::InvalidConfiguration(format!(
                "character set '{name}' is empty"
            )));
        }
        Ok(Self {
            name: name.to_string(),
            glyphs: glyphs.chars().collect(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Glyph at `index`, clamped to the sparsest glyph when out of range.
    pub fn glyph(&self, index: usize) -> char {
        self.glyphs[index.min(self.glyphs.len() - 1)]
    }
}

/// Names of all built-in palettes, in registry order.
pub fn available_names() -> Vec<&'static str> {
    CHAR_SETS.iter().map(|(name, _)| *name).collect()
}
