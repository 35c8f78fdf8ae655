//! glyphcast command line interface
//!
//! Thin glue around the library: argument parsing, file I/O, GIF frame
//! iteration, and output file naming. All pixel work lives in the
//! `glyphcast` crate.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use image::codecs::gif::{GifDecoder, GifEncoder, Repeat};
use image::{AnimationDecoder, DynamicImage, Frame};
use log::info;
use rayon::prelude::*;

use glyphcast::render::MonoFont;
use glyphcast::{ArtComposer, AsciiArt, ConversionConfig, GlyphError, RasterRenderer};

/// Width used when rendering to an image without an explicit --width:
/// a share of the source pixel width, capped.
const AUTO_WIDTH_FRACTION: f32 = 0.3;
const AUTO_WIDTH_CAP: u32 = 500;

#[derive(Parser, Debug)]
#[command(name = "glyphcast", version, about = "Convert images and GIFs to character art")]
struct Cli {
    /// Path to the image file to convert
    image_path: PathBuf,

    /// Width of the output in characters (default 100; auto-detected from
    /// the source when rendering to an image)
    #[arg(long)]
    width: Option<u32>,

    /// Character set to use
    #[arg(long, default_value = glyphcast::config::DEFAULT_CHAR_SET)]
    char_set: String,

    /// Output file path (prints to the terminal when omitted)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Render the character art as an image file instead of text
    #[arg(long)]
    render_image: bool,

    /// Enable color output (ANSI colors for text, per-glyph fill for images)
    #[arg(long)]
    color: bool,

    /// Font size for image rendering
    #[arg(long, default_value_t = 12)]
    font_size: u32,

    /// Explicit monospace font file for image rendering (otherwise a chain
    /// of system fonts is tried)
    #[arg(long)]
    font: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if !cli.image_path.exists() {
        return Err(GlyphError::NotFound(cli.image_path.clone()).into());
    }

    let width = effective_width(&cli)?;
    let config = ConversionConfig::new(width, &cli.char_set, cli.color)?;
    let composer = ArtComposer::new(config)?;
    info!(
        "converting {} (width {width}, char set {})",
        cli.image_path.display(),
        cli.char_set
    );

    if is_gif(&cli.image_path) {
        convert_gif(&cli, &composer)
    } else {
        convert_still(&cli, &composer)
    }
}

/// Width policy: explicit flag wins; image rendering auto-detects from the
/// source pixel width; terminal output uses the default.
fn effective_width(cli: &Cli) -> anyhow::Result<u32> {
    if let Some(width) = cli.width {
        return Ok(width);
    }
    if cli.render_image {
        let (source_width, _) = image::image_dimensions(&cli.image_path)
            .with_context(|| format!("failed to read {}", cli.image_path.display()))?;
        let auto = ((source_width as f32 * AUTO_WIDTH_FRACTION) as u32)
            .clamp(1, AUTO_WIDTH_CAP);
        info!("auto-detected width: {source_width}px -> {auto} characters");
        return Ok(auto);
    }
    Ok(glyphcast::config::DEFAULT_WIDTH)
}

fn is_gif(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gif"))
}

fn renderer(cli: &Cli) -> anyhow::Result<RasterRenderer> {
    let renderer = match &cli.font {
        Some(path) => RasterRenderer::with_font(MonoFont::from_file(path)?, cli.font_size)?,
        None => RasterRenderer::new(cli.font_size)?,
    };
    Ok(renderer)
}

fn art_text(art: &AsciiArt, color: bool) -> String {
    if color {
        art.to_ansi_text()
    } else {
        art.to_text()
    }
}

fn convert_still(cli: &Cli, composer: &ArtComposer) -> anyhow::Result<()> {
    let image = image::open(&cli.image_path)
        .with_context(|| format!("failed to decode {}", cli.image_path.display()))?;
    let art = composer.compose(&image)?;

    if cli.render_image {
        let output = cli
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from("ascii_output.png"));
        renderer(cli)?.render(&art).save(&output)?;
        println!("Rendered image written to: {}", output.display());
    } else if let Some(output) = &cli.output {
        std::fs::write(output, art_text(&art, cli.color))?;
        println!("Character art written to: {}", output.display());
    } else {
        println!("{}", art_text(&art, cli.color));
    }
    Ok(())
}

fn convert_gif(cli: &Cli, composer: &ArtComposer) -> anyhow::Result<()> {
    let file = File::open(&cli.image_path)?;
    let decoder = GifDecoder::new(BufReader::new(file))
        .with_context(|| format!("failed to decode {}", cli.image_path.display()))?;
    let frames = decoder
        .into_frames()
        .collect_frames()
        .with_context(|| format!("failed to decode {}", cli.image_path.display()))?;

    if frames.is_empty() {
        anyhow::bail!("{} contains no frames", cli.image_path.display());
    }
    info!("decoded {} frames", frames.len());

    // Frames are independent; conversion order does not matter, only the
    // output assembly below is sequential.
    let arts: Vec<AsciiArt> = frames
        .par_iter()
        .map(|frame| composer.compose(&DynamicImage::ImageRgba8(frame.buffer().clone())))
        .collect::<Result<_, _>>()?;

    if cli.render_image {
        let output = gif_output_path(cli.output.as_deref());
        let renderer = renderer(cli)?;
        let writer = BufWriter::new(File::create(&output)?);
        let mut encoder = GifEncoder::new(writer);
        encoder.set_repeat(Repeat::Infinite)?;
        for (art, source) in arts.iter().zip(&frames) {
            let rendered = renderer.render(art).to_rgba8();
            encoder.encode_frame(Frame::from_parts(rendered, 0, 0, source.delay()))?;
        }
        println!(
            "Animated output written to: {} ({} frames)",
            output.display(),
            arts.len()
        );
    } else if let Some(output) = &cli.output {
        let base = output.with_extension("");
        for (index, art) in arts.iter().enumerate() {
            let path = frame_path(&base, index);
            let mut file = File::create(&path)?;
            file.write_all(art_text(art, cli.color).as_bytes())?;
        }
        println!(
            "Character art written to {} files: {}_frame_*.txt",
            arts.len(),
            base.display()
        );
    } else {
        println!("{}", art_text(&arts[0], cli.color));
        if arts.len() > 1 {
            println!("\n(Showing first frame only. GIF has {} frames)", arts.len());
        }
    }
    Ok(())
}

fn gif_output_path(output: Option<&Path>) -> PathBuf {
    match output {
        Some(path) => path.with_extension("gif"),
        None => PathBuf::from("ascii_output.gif"),
    }
}

fn frame_path(base: &Path, index: usize) -> PathBuf {
    let stem = base.to_string_lossy();
    PathBuf::from(format!("{stem}_frame_{index:04}.txt"))
}
