//! Tone mapping: luminance extraction and contrast normalization

use image::DynamicImage;

/// Row-major grid of brightness samples in [0, 255].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrightnessField {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl BrightnessField {
    /// Build a field from raw row-major samples.
    ///
    /// Panics if `data` does not hold exactly `width * height` samples.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Self {
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

    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.data[(y * self.width + x) as usize]
    }

    pub fn samples(&self) -> &[u8] {
        &self.data
    }

    /// Observed minimum and maximum sample, or `None` for an empty field.
    pub fn min_max(&self) -> Option<(u8, u8)> {
        let min = self.data.iter().copied().min()?;
        let max = self.data.iter().copied().max()?;
        Some((min, max))
    }
}

/// Extract a contrast-normalized brightness field from a color image.
///
/// Luminance uses the standard coefficients (L = 0.2127 R + 0.7152 G +
/// 0.0722 B), then histogram equalization redistributes samples across
/// [0, 255] using the image's own cumulative distribution.
pub fn to_grayscale(image: &DynamicImage) -> BrightnessField {
    equalize(&luminance(image))
}

/// Per-pixel luminance reduction, alpha discarded.
pub fn luminance(image: &DynamicImage) -> BrightnessField {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();

    let data = rgb
        .pixels()
        .map(|pixel| {
            let [r, g, b] = pixel.0;
            let lum = 0.2127 * (r as f32 / 255.0)
                + 0.7152 * (g as f32 / 255.0)
                + 0.0722 * (b as f32 / 255.0);
            (lum.clamp(0.0, 1.0) * 255.0) as u8
        })
        .collect();

    BrightnessField::from_raw(width, height, data)
}

/// Histogram equalization over the field's own distribution.
///
/// Uses the classic step-table construction: when the histogram is too
/// concentrated for a meaningful step (tiny or near-uniform fields) the
/// field is returned unchanged rather than collapsed.
pub fn equalize(field: &BrightnessField) -> BrightnessField {
    let mut histogram = [0usize; 256];
    for &value in field.samples() {
        histogram[value as usize] += 1;
    }

    let occupied = histogram.iter().filter(|&&count| count > 0).count();
    if occupied <= 1 {
        return field.clone();
    }

    let last_occupied = (0..256).rev().find(|&i| histogram[i] > 0).unwrap_or(0);
    let step = (field.samples().len() - histogram[last_occupied]) / 255;
    if step == 0 {
        return field.clone();
    }

    let mut lut = [0u8; 256];
    let mut n = step / 2;
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = (n / step).min(255) as u8;
        n += histogram[i];
    }

    let data = field.samples().iter().map(|&v| lut[v as usize]).collect();
    BrightnessField::from_raw(field.width(), field.height(), data)
}

/// Linear min/max stretch: the field's own minimum maps to 0 and its
/// maximum to 255. A flat field maps to 0 (denominator treated as 1).
pub fn normalize(field: &BrightnessField) -> BrightnessField {
    let Some((min, max)) = field.min_max() else {
        return field.clone();
    };
    let range = if max > min { (max - min) as f32 } else { 1.0 };

    let data = field
        .samples()
        .iter()
        .map(|&v| (((v - min) as f32 / range) * 255.0).round() as u8)
        .collect();

    BrightnessField::from_raw(field.width(), field.height(), data)
}
