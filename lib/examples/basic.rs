/// Basic example: convert a generated test image to character art
///
/// Creates a radial gradient, prints it as text, and re-renders it as a
/// bitmap next to the input.
use glyphcast::{ArtComposer, ConversionConfig, RasterRenderer};
use image::{DynamicImage, Rgba, RgbaImage};

fn main() {
    println!("glyphcast - Basic Example");
    println!("=========================\n");

    // A white disc on a dark background
    let size = 256;
    let mut img = RgbaImage::new(size, size);
    let center = size as f32 / 2.0;
    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 - center;
            let dy = y as f32 - center;
            let dist = (dx * dx + dy * dy).sqrt();
            let shade = (255.0 * (1.0 - (dist / center).min(1.0))) as u8;
            img.put_pixel(x, y, Rgba([shade, shade, shade, 255]));
        }
    }
    let img = DynamicImage::ImageRgba8(img);

    let config = ConversionConfig::new(60, "simple", false).expect("valid config");
    let composer = ArtComposer::new(config).expect("valid config");
    let art = composer.compose(&img).expect("conversion succeeds");

    println!("{}\n", art.to_text());

    let renderer = RasterRenderer::new(12).expect("positive font size");
    let rendered = renderer.render(&art);
    rendered
        .save("basic_output.png")
        .expect("Failed to save output");

    println!("Saved rendered bitmap to: basic_output.png");
}
