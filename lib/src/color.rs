//! Color capture and HSV saturation boosting

use image::DynamicImage;
use rayon::prelude::*;

/// Row-major grid of RGB samples, same dimensions as the brightness field
/// it accompanies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorField {
    width: u32,
    height: u32,
    data: Vec<[u8; 3]>,
}

impl ColorField {
    pub fn from_raw(width: u32, height: u32, data: Vec<[u8; 3]>) -> Self {
        assert_eq!(data.len(), (width * height) as usize);
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        self.data[(y * self.width + x) as usize]
    }

    pub fn samples(&self) -> &[[u8; 3]] {
        &self.data
    }
}

/// Read per-pixel RGB triples from an image, discarding alpha.
pub fn capture(image: &DynamicImage) -> ColorField {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    let data = rgb.pixels().map(|pixel| pixel.0).collect();
    ColorField::from_raw(width, height, data)
}

/// Multiply every sample's HSV saturation by `multiplier`, clamped to
/// [0, 1]. Pure per pixel, so the samples are processed in parallel.
pub fn boost_saturation(field: &ColorField, multiplier: f32) -> ColorField {
    let data = field
        .samples()
        .par_iter()
        .map(|&[r, g, b]| {
            let (h, s, v) = rgb_to_hsv(r, g, b);
            let boosted = (s * multiplier).clamp(0.0, 1.0);
            hsv_to_rgb(h, boosted, v)
        })
        .collect();

    ColorField::from_raw(field.width(), field.height(), data)
}

/// RGB to HSV. Hue in degrees [0, 360), saturation and value in [0, 1].
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta).rem_euclid(6.0))
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    let s = if max == 0.0 { 0.0 } else { delta / max };

    (h, s, max)
}

/// HSV back to RGB, channels rounded and clamped to [0, 255].
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [u8; 3] {
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    [
        (((r + m) * 255.0).round()).clamp(0.0, 255.0) as u8,
        (((g + m) * 255.0).round()).clamp(0.0, 255.0) as u8,
        (((b + m) * 255.0).round()).clamp(0.0, 255.0) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_capture_drops_alpha() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 7])));
        let field = capture(&img);
        assert_eq!(field.get(1, 1), [10, 20, 30]);
    }

    #[test]
    fn test_hsv_round_trip_primaries() {
        for rgb in [[255, 0, 0], [0, 255, 0], [0, 0, 255], [255, 255, 0]] {
            let (h, s, v) = rgb_to_hsv(rgb[0], rgb[1], rgb[2]);
            assert_eq!(hsv_to_rgb(h, s, v), rgb);
        }
    }

    #[test]
    fn test_boost_with_unit_multiplier_is_identity() {
        let data: Vec<[u8; 3]> = vec![
            [12, 200, 77],
            [255, 255, 255],
            [0, 0, 0],
            [130, 21, 99],
            [90, 90, 91],
            [1, 254, 3],
        ];
        let field = ColorField::from_raw(3, 2, data);
        let boosted = boost_saturation(&field, 1.0);

        for (before, after) in field.samples().iter().zip(boosted.samples()) {
            for channel in 0..3 {
                let diff = (before[channel] as i16 - after[channel] as i16).abs();
                assert!(diff <= 1, "channel drifted: {before:?} -> {after:?}");
            }
        }
    }

    #[test]
    fn test_boost_preserves_hue_of_red() {
        let field = ColorField::from_raw(1, 1, vec![[200, 60, 60]]);
        let boosted = boost_saturation(&field, 3.0);
        let [r, g, b] = boosted.get(0, 0);
        assert!(r > g && r > b);
        // Saturation saturates at 1.0, pushing the minor channels to zero.
        assert_eq!((g, b), (0, 0));
    }

    #[test]
    fn test_boost_leaves_gray_gray() {
        let field = ColorField::from_raw(1, 1, vec![[128, 128, 128]]);
        let boosted = boost_saturation(&field, 5.0);
        assert_eq!(boosted.get(0, 0), [128, 128, 128]);
    }

    #[test]
    fn test_saturation_clamped_to_one() {
        let (_, s, _) = rgb_to_hsv(255, 0, 0);
        assert!((s - 1.0).abs() < f32::EPSILON);
        let field = ColorField::from_raw(1, 1, vec![[255, 0, 0]]);
        let boosted = boost_saturation(&field, 100.0);
        assert_eq!(boosted.get(0, 0), [255, 0, 0]);
    }
}
