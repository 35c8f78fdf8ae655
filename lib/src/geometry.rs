//! Image geometry: resizing to the target character grid
//!
//! The output width is always the requested character width. The height is
//! derived from the source aspect ratio, scaled by the terminal aspect
//! correction factor, then clamped so aggressive correction factors cannot
//! flatten the image into illegibility.

use image::DynamicImage;
use image::imageops::FilterType;
use log::debug;

use crate::error::{GlyphError, Result};

/// Corrected height may never drop below this fraction of the true
/// (uncorrected) height.
const MIN_HEIGHT_FRACTION: f32 = 0.4;

/// If the corrected height still compresses below this ratio of the true
/// height, the correction is overridden entirely.
const COMPRESSION_FLOOR: f32 = 0.3;

/// Replacement compression applied when the floor is hit.
const COMPRESSION_OVERRIDE: f32 = 0.5;

/// Compute the output pixel dimensions for a source image.
///
/// `aspect_correction` compensates for monospace cells being taller than
/// wide. Returns `(target_width, height)` with `height >= 1`.
pub fn target_dimensions(
    source_width: u32,
    source_height: u32,
    target_width: u32,
    aspect_correction: f32,
) -> Result<(u32, u32)> {
    if target_width == 0 {
        return Err(GlyphError::InvalidConfiguration(
            "width must be positive".to_string(),
        ));
    }

    let aspect_ratio = if source_width == 0 {
        0.0
    } else {
        source_height as f32 / source_width as f32
    };

    let true_height = (target_width as f32 * aspect_ratio).round();
    let mut corrected = (target_width as f32 * aspect_ratio * aspect_correction).round();

    // Clamp 1: never compress below 40% of the true height.
    let min_height = (true_height * MIN_HEIGHT_FRACTION).round().max(1.0);
    if corrected < min_height {
        corrected = min_height;
    }

    // Clamp 2: if the overall compression ratio is still extreme, fall back
    // to a fixed 50% of the true height.
    let compression_ratio = if true_height == 0.0 {
        1.0
    } else {
        corrected / true_height
    };
    if compression_ratio < COMPRESSION_FLOOR {
        corrected = (true_height * COMPRESSION_OVERRIDE).round();
    }

    Ok((target_width, corrected.max(1.0) as u32))
}

/// Resize an image to the character grid computed by [`target_dimensions`].
///
/// Lanczos3 is used for quality; the dimension formula, not the filter, is
/// the contract here.
pub fn resize(
    image: &DynamicImage,
    target_width: u32,
    aspect_correction: f32,
) -> Result<DynamicImage> {
    let (width, height) = target_dimensions(
        image.width(),
        image.height(),
        target_width,
        aspect_correction,
    )?;

    if image.width() == width && image.height() == height {
        return Ok(image.clone());
    }

    debug!(
        "resizing {}x{} -> {}x{}",
        image.width(),
        image.height(),
        width,
        height
    );
    Ok(image.resize_exact(width, height, FilterType::Lanczos3))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    #[test]
    fn test_width_is_exact() {
        for (sw, sh) in [(100, 100), (1920, 1080), (3, 400), (640, 1)] {
            for tw in [1, 2, 50, 317] {
                let (w, _) = target_dimensions(sw, sh, tw, 0.5).unwrap();
                assert_eq!(w, tw);
            }
        }
    }

    #[test]
    fn test_height_at_least_one() {
        // Very wide sources would round to zero without the clamp.
        let (_, h) = target_dimensions(10_000, 1, 10, 0.5).unwrap();
        assert!(h >= 1);

        let (_, h) = target_dimensions(100, 100, 1, 0.01).unwrap();
        assert!(h >= 1);
    }

    #[test]
    fn test_square_source_halves_height_by_default() {
        let (w, h) = target_dimensions(200, 200, 100, 0.5).unwrap();
        assert_eq!((w, h), (100, 50));
    }

    #[test]
    fn test_identity_correction_preserves_aspect() {
        let (w, h) = target_dimensions(400, 300, 80, 1.0).unwrap();
        assert_eq!(w, 80);
        assert_eq!(h, 60); // 80 * 0.75
    }

    #[test]
    fn test_compression_floor() {
        // An extreme correction factor gets clamped to the 40% floor.
        let (_, h) = target_dimensions(100, 100, 100, 0.05).unwrap();
        let true_height = 100.0;
        assert!(h as f32 >= COMPRESSION_FLOOR * true_height);
        assert_eq!(h, 40); // min-height clamp: round(100 * 0.4)
    }

    #[test]
    fn test_zero_width_is_invalid() {
        assert!(matches!(
            target_dimensions(100, 100, 0, 0.5),
            Err(GlyphError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_resize_reports_requested_dimensions() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(64, 32));
        let resized = resize(&img, 16, 0.5).unwrap();
        assert_eq!(resized.width(), 16);
        assert_eq!(resized.height(), 4); // 16 * 0.5 * 0.5
    }

    #[test]
    fn test_resize_noop_when_dimensions_match() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(4, 2));
        let resized = resize(&img, 4, 1.0).unwrap();
        assert_eq!((resized.width(), resized.height()), (4, 2));
    }
}
