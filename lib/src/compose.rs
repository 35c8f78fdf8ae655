//! Pipeline orchestration: one decoded image in, one character grid out

use image::DynamicImage;
use log::debug;

use crate::ansi;
use crate::color::{self, ColorField};
use crate::config::ConversionConfig;
use crate::error::Result;
use crate::geometry;
use crate::quantize::{self, CharacterGrid};
use crate::tone;

/// Brightness lift applied before color capture so dark frames still carry
/// usable color samples.
const COLOR_BRIGHTEN: i32 = 10;

/// Unsharp-mask parameters for the color-capture copy.
const SHARPEN_SIGMA: f32 = 1.0;
const SHARPEN_THRESHOLD: i32 = 3;

/// A converted frame: the glyph grid plus, when color was captured, the
/// exact color field the grid was paired with.
///
/// Returning the colors explicitly lets a downstream renderer reuse them
/// without re-deriving anything from escape sequences.
#[derive(Debug, Clone)]
pub struct AsciiArt {
    pub grid: CharacterGrid,
    pub colors: Option<ColorField>,
}

impl AsciiArt {
    /// Plain text, one line per grid row.
    pub fn to_text(&self) -> String {
        self.grid.to_text()
    }

    /// ANSI-colored text when a color field is present, plain text
    /// otherwise. Every colored glyph is followed by a reset.
    pub fn to_ansi_text(&self) -> String {
        let Some(colors) = &self.colors else {
            return self.to_text();
        };

        let mut out = String::new();
        for y in 0..self.grid.height() {
            if y > 0 {
                out.push('\n');
            }
            for x in 0..self.grid.width() {
                out.push_str(&ansi::colorize(self.grid.glyph(x, y), colors.get(x, y)));
            }
        }
        out
    }
}

/// Converts decoded images into character grids.
///
/// Holds only the immutable configuration; every call to [`compose`] is
/// independent, so one composer can serve frames from multiple threads.
///
/// [`compose`]: ArtComposer::compose
#[derive(Debug, Clone)]
pub struct ArtComposer {
    config: ConversionConfig,
}

impl ArtComposer {
    pub fn new(config: ConversionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Run the full pipeline on one decoded image.
    ///
    /// Resize, then either tone-map directly (grayscale path) or capture
    /// boosted colors from an enhanced copy and tone-map that same copy
    /// (color path), then quantize to glyphs.
    pub fn compose(&self, image: &DynamicImage) -> Result<AsciiArt> {
        let resized = geometry::resize(image, self.config.width, self.config.aspect_correction)?;

        let (field, colors) = if self.config.use_color {
            let enhanced = resized
                .brighten(COLOR_BRIGHTEN)
                .unsharpen(SHARPEN_SIGMA, SHARPEN_THRESHOLD);
            let captured = color::capture(&enhanced);
            let boosted = color::boost_saturation(&captured, self.config.saturation_boost);
            (tone::to_grayscale(&enhanced), Some(boosted))
        } else {
            (tone::to_grayscale(&resized), None)
        };

        let grid = quantize::quantize(&field, &self.config.palette);
        debug!(
            "composed {}x{} grid (color: {})",
            grid.width(),
            grid.height(),
            colors.is_some()
        );

        Ok(AsciiArt { grid, colors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::GlyphPalette;
    use image::{Rgba, RgbaImage};

    fn config(width: u32, use_color: bool) -> ConversionConfig {
        ConversionConfig {
            width,
            palette: GlyphPalette::from_glyphs("binary", "@ ").unwrap(),
            use_color,
            aspect_correction: 1.0,
            ..ConversionConfig::default()
        }
    }

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(rgba)))
    }

    #[test]
    fn test_pure_white_renders_sparse() {
        let composer = ArtComposer::new(config(2, false)).unwrap();
        let art = composer.compose(&solid(2, 2, [255, 255, 255, 255])).unwrap();
        assert_eq!(art.to_text(), "  \n  ");
    }

    #[test]
    fn test_pure_black_renders_dense() {
        let composer = ArtComposer::new(config(2, false)).unwrap();
        let art = composer.compose(&solid(2, 2, [0, 0, 0, 255])).unwrap();
        assert_eq!(art.to_text(), "@@\n@@");
    }

    #[test]
    fn test_checkerboard_preserves_positions() {
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([255, 255, 255, 255]));
        img.put_pixel(0, 1, Rgba([255, 255, 255, 255]));
        img.put_pixel(1, 1, Rgba([0, 0, 0, 255]));

        let composer = ArtComposer::new(config(2, false)).unwrap();
        let art = composer.compose(&DynamicImage::ImageRgba8(img)).unwrap();
        assert_eq!(art.to_text(), "@ \n @");
    }

    #[test]
    fn test_color_path_keeps_red_dominant() {
        let composer = ArtComposer::new(config(1, true)).unwrap();
        let art = composer.compose(&solid(1, 1, [255, 0, 0, 255])).unwrap();

        let colors = art.colors.as_ref().expect("color field retained");
        let [r, g, b] = colors.get(0, 0);
        assert!(r > 200 && g < 50 && b < 50, "hue drifted: {r},{g},{b}");

        // Boost saturates the minor channels away, so the quantized code
        // lands on the cube's pure-red corner.
        let code = crate::ansi::quantize256(r, g, b);
        assert_eq!(code, 196);

        let text = art.to_ansi_text();
        assert!(text.contains("\x1b[38;5;"));
        assert!(text.ends_with(crate::ansi::RESET));
    }

    #[test]
    fn test_grayscale_path_has_no_color_field() {
        let composer = ArtComposer::new(config(2, false)).unwrap();
        let art = composer.compose(&solid(4, 4, [128, 128, 128, 255])).unwrap();
        assert!(art.colors.is_none());
        assert_eq!(art.to_ansi_text(), art.to_text());
    }

    #[test]
    fn test_color_field_matches_grid_dimensions() {
        let composer = ArtComposer::new(config(8, true)).unwrap();
        let art = composer.compose(&solid(32, 16, [40, 90, 200, 255])).unwrap();
        let colors = art.colors.as_ref().unwrap();
        assert_eq!(colors.width(), art.grid.width());
        assert_eq!(colors.height(), art.grid.height());
    }

    #[test]
    fn test_invalid_config_rejected_up_front() {
        let bad = config(0, false);
        assert!(ArtComposer::new(bad).is_err());
    }

    #[test]
    fn test_calls_are_independent() {
        let composer = ArtComposer::new(config(2, false)).unwrap();
        let white = solid(2, 2, [255, 255, 255, 255]);
        let black = solid(2, 2, [0, 0, 0, 255]);

        let first = composer.compose(&black).unwrap();
        let _ = composer.compose(&white).unwrap();
        let again = composer.compose(&black).unwrap();
        assert_eq!(first.to_text(), again.to_text());
    }
}
