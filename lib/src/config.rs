use crate::error::{GlyphError, Result};
use crate::palette::GlyphPalette;

/// Default output width in characters.
pub const DEFAULT_WIDTH: u32 = 100;

/// Default character set name.
pub const DEFAULT_CHAR_SET: &str = "simple";

/// Terminal characters are roughly twice as tall as they are wide, so the
/// resized height is scaled down by this factor to keep proportions.
pub const ASPECT_RATIO_CORRECTION: f32 = 0.5;

/// Saturation multiplier applied to captured colors so that quantized
/// terminal colors stay vivid.
pub const DEFAULT_SATURATION_BOOST: f32 = 3.0;

/// Configuration for one conversion run
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Output width in characters, must be positive
    pub width: u32,
    /// Glyph palette, densest glyph first
    pub palette: GlyphPalette,
    /// Capture per-glyph colors and emit ANSI codes in text output
    pub use_color: bool,
    /// Height compensation factor in (0, 1]
    pub aspect_correction: f32,
    /// HSV saturation multiplier for captured colors, must be positive
    pub saturation_boost: f32,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            palette: GlyphPalette::named(DEFAULT_CHAR_SET)
                .expect("default character set is registered"),
            use_color: false,
            aspect_correction: ASPECT_RATIO_CORRECTION,
            saturation_boost: DEFAULT_SATURATION_BOOST,
        }
    }
}

impl ConversionConfig {
    /// Convenience constructor matching the common CLI surface.
    pub fn new(width: u32, char_set: &str, use_color: bool) -> Result<Self> {
        let config = Self {
            width,
            palette: GlyphPalette::named(char_set)?,
            use_color,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 {
            return Err(GlyphError::InvalidConfiguration(
                "width must be positive".to_string(),
            ));
        }
        if !(self.aspect_correction > 0.0 && self.aspect_correction <= 1.0) {
            return Err(GlyphError::InvalidConfiguration(format!(
                "aspect_correction must be in (0, 1], got {}",
                self.aspect_correction
            )));
        }
        if self.saturation_boost <= 0.0 {
            return Err(GlyphError::InvalidConfiguration(format!(
                "saturation_boost must be positive, got {}",
                self.saturation_boost
            )));
        }
        if self.palette.is_empty() {
            return Err(GlyphError::InvalidConfiguration(
                "glyph palette is empty".to_string(),
            ));
        }
        Ok(())
    }
}
