//! Raster re-rendering of a character grid
//!
//! Re-renders the glyph grid into a bitmap with a monospace font. Fonts
//! are located through a short fallback chain of well-known system paths;
//! the chain ends in a built-in 8x8 bitmap font so rendering always has a
//! usable glyph source.

use std::fs;
use std::path::Path;

use ab_glyph::{FontVec, PxScale};
use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use log::{debug, warn};

use crate::ansi;
use crate::color::ColorField;
use crate::compose::AsciiArt;
use crate::error::{GlyphError, Result};
use crate::quantize::CharacterGrid;

/// Monospace cell width as a fraction of the font size.
const GLYPH_WIDTH_FACTOR: f32 = 0.6;

/// Monospace line height as a fraction of the font size.
const GLYPH_HEIGHT_FACTOR: f32 = 1.2;

/// Default ink and background for uncolored grids.
const INK: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Well-known monospace font locations, tried in order.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/liberation-mono/LiberationMono-Regular.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/System/Library/Fonts/Supplemental/Courier New.ttf",
    "C:\\Windows\\Fonts\\consola.ttf",
];

/// A font usable for glyph placement: either a loaded outline font or the
/// built-in bitmap fallback.
pub enum MonoFont {
    Outline(FontVec),
    Builtin,
}

impl MonoFont {
    /// Walk the fallback chain. Never fails: unreadable or unparsable
    /// candidates are skipped and the built-in bitmap font closes the
    /// chain.
    pub fn locate() -> Self {
        for path in FONT_CANDIDATES {
            match Self::from_file(path) {
                Ok(font) => {
                    debug!("using monospace font {path}");
                    return font;
                }
                Err(_) => continue,
            }
        }
        warn!("no system monospace font found, using built-in bitmap font");
        MonoFont::Builtin
    }

    /// Load an outline font from an explicit path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .map_err(|e| GlyphError::RenderingUnavailable(format!("{}: {e}", path.display())))?;
        let font = FontVec::try_from_vec(bytes).map_err(|_| {
            GlyphError::RenderingUnavailable(format!("{}: not a usable font", path.display()))
        })?;
        Ok(MonoFont::Outline(font))
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, MonoFont::Builtin)
    }
}

/// Renders character grids to RGBA bitmaps.
pub struct RasterRenderer {
    font: MonoFont,
    font_size: u32,
}

impl RasterRenderer {
    /// Renderer with the system font fallback chain.
    pub fn new(font_size: u32) -> Result<Self> {
        Self::with_font(MonoFont::locate(), font_size)
    }

    pub fn with_font(font: MonoFont, font_size: u32) -> Result<Self> {
        if font_size == 0 {
            return Err(GlyphError::InvalidConfiguration(
                "font size must be positive".to_string(),
            ));
        }
        Ok(Self { font, font_size })
    }

    /// Canvas dimensions for a grid of `cols` x `rows` glyphs.
    ///
    /// Approximates monospace metrics: cells are 0.6 em wide and lines
    /// 1.2 em tall.
    pub fn canvas_dimensions(&self, cols: u32, rows: u32) -> (u32, u32) {
        let width = (cols as f32 * self.font_size as f32 * GLYPH_WIDTH_FACTOR).round() as u32;
        let height = (rows as f32 * self.font_size as f32 * GLYPH_HEIGHT_FACTOR).round() as u32;
        (width.max(1), height.max(1))
    }

    /// Render a composed frame, reusing its exact color field when one was
    /// captured.
    pub fn render(&self, art: &AsciiArt) -> DynamicImage {
        self.render_grid(&art.grid, art.colors.as_ref())
    }

    /// Render text that may contain ANSI color escapes.
    ///
    /// Escape sequences are zero-width: they are stripped before any
    /// column measurement so colored and plain text lay out identically.
    /// Colors, if wanted, come from an explicit field, not the escapes.
    pub fn render_text(&self, text: &str, colors: Option<&ColorField>) -> DynamicImage {
        let stripped = ansi::strip_codes(text);
        let rows: Vec<Vec<char>> = stripped.lines().map(|line| line.chars().collect()).collect();
        let cols = rows.iter().map(|row| row.len()).max().unwrap_or(0) as u32;

        // Ragged input is padded so the grid invariant holds.
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(cols as usize, ' ');
                row
            })
            .collect();

        self.render_grid(&CharacterGrid::new(cols, rows), colors)
    }

    fn render_grid(&self, grid: &CharacterGrid, colors: Option<&ColorField>) -> DynamicImage {
        let (width, height) = self.canvas_dimensions(grid.width(), grid.height());
        let mut canvas = RgbaImage::from_pixel(width, height, BACKGROUND);

        let cell_w = self.font_size as f32 * GLYPH_WIDTH_FACTOR;
        let cell_h = self.font_size as f32 * GLYPH_HEIGHT_FACTOR;

        match (&self.font, colors) {
            (MonoFont::Outline(font), Some(colors)) => {
                // Per-glyph fill colors: one draw call per glyph.
                let scale = PxScale::from(self.font_size as f32);
                let mut buf = [0u8; 4];
                for y in 0..grid.height() {
                    for x in 0..grid.width() {
                        let glyph = grid.glyph(x, y);
                        if glyph == ' ' {
                            continue;
                        }
                        let [r, g, b] = sample_color(colors, x, y);
                        draw_text_mut(
                            &mut canvas,
                            Rgba([r, g, b, 255]),
                            (x as f32 * cell_w).round() as i32,
                            (y as f32 * cell_h).round() as i32,
                            scale,
                            font,
                            glyph.encode_utf8(&mut buf),
                        );
                    }
                }
            }
            (MonoFont::Outline(font), None) => {
                // Uniform ink: one draw call per row.
                let scale = PxScale::from(self.font_size as f32);
                for (y, row) in grid.rows().iter().enumerate() {
                    let line: String = row.iter().collect();
                    draw_text_mut(
                        &mut canvas,
                        INK,
                        0,
                        (y as f32 * cell_h).round() as i32,
                        scale,
                        font,
                        &line,
                    );
                }
            }
            (MonoFont::Builtin, _) => {
                for y in 0..grid.height() {
                    for x in 0..grid.width() {
                        let glyph = grid.glyph(x, y);
                        if glyph == ' ' {
                            continue;
                        }
                        let ink = match colors {
                            Some(colors) => {
                                let [r, g, b] = sample_color(colors, x, y);
                                Rgba([r, g, b, 255])
                            }
                            None => INK,
                        };
                        draw_builtin_glyph(
                            &mut canvas,
                            glyph,
                            (x as f32 * cell_w).round() as u32,
                            (y as f32 * cell_h).round() as u32,
                            cell_w.round().max(1.0) as u32,
                            cell_h.round().max(1.0) as u32,
                            ink,
                        );
                    }
                }
            }
        }

        DynamicImage::ImageRgba8(canvas)
    }
}

fn sample_color(colors: &ColorField, x: u32, y: u32) -> [u8; 3] {
    if x < colors.width() && y < colors.height() {
        colors.get(x, y)
    } else {
        [INK[0], INK[1], INK[2]]
    }
}

/// Paint one glyph from the built-in 8x8 bitmap font, scaled to the cell.
fn draw_builtin_glyph(
    canvas: &mut RgbaImage,
    glyph: char,
    origin_x: u32,
    origin_y: u32,
    cell_w: u32,
    cell_h: u32,
    ink: Rgba<u8>,
) {
    for py in 0..cell_h {
        for px in 0..cell_w {
            let bx = px * 8 / cell_w;
            let by = py * 8 / cell_h;
            if !builtin_pixel(glyph, bx, by) {
                continue;
            }
            let cx = origin_x + px;
            let cy = origin_y + py;
            if cx < canvas.width() && cy < canvas.height() {
                canvas.put_pixel(cx, cy, ink);
            }
        }
    }
}

/// 8x8 bitmap shapes for the glyphs the built-in palettes use.
///
/// Shaded blocks use coarse dither patterns; unknown glyphs fall back to a
/// solid cell so nothing silently disappears.
fn builtin_pixel(glyph: char, x: u32, y: u32) -> bool {
    match glyph {
        ' ' => false,

        '.' => (3..=4).contains(&x) && (5..=6).contains(&y),
        ':' => (3..=4).contains(&x) && (y == 2 || y == 5),
        '-' => y == 3 || y == 4,
        '=' => y == 2 || y == 5,
        '+' => (x == 3 || x == 4) || (y == 3 || y == 4),
        '*' => (x == 3 || x == 4) || (y == 3 || y == 4) || x == y || x == 7 - y,
        '#' => (x == 2 || x == 5) || (y == 2 || y == 5),
        '%' => (x + y == 7) || (x <= 1 && y <= 1) || (x >= 6 && y >= 6),
        '@' => {
            let dx = x as i32 - 3;
            let dy = y as i32 - 3;
            dx * dx + dy * dy <= 12
        }

        '|' => x == 3 || x == 4,
        '/' => x + y == 7 || x + y == 6,
        '\\' => x == y || x == y + 1,

        // Shading ramp: full, 3/4, 1/2, 1/4 coverage.
        '█' => true,
        '▓' => !(x % 2 == 1 && y % 2 == 1),
        '▒' => (x + y) % 2 == 0,
        '░' => x % 2 == 0 && y % 2 == 0,

        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantize::CharacterGrid;

    fn renderer(font_size: u32) -> RasterRenderer {
        RasterRenderer::with_font(MonoFont::Builtin, font_size).unwrap()
    }

    #[test]
    fn test_canvas_dimension_formula() {
        let r = renderer(10);
        assert_eq!(r.canvas_dimensions(100, 50), (600, 600));
        assert_eq!(r.canvas_dimensions(3, 2), (18, 24));
    }

    #[test]
    fn test_zero_font_size_rejected() {
        assert!(matches!(
            RasterRenderer::with_font(MonoFont::Builtin, 0),
            Err(GlyphError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_locate_always_yields_a_font() {
        // Whatever the host has installed, the chain must terminate in a
        // usable font.
        let _ = MonoFont::locate();
    }

    #[test]
    fn test_from_file_missing_font_is_rendering_unavailable() {
        assert!(matches!(
            MonoFont::from_file("/no/such/font.ttf"),
            Err(GlyphError::RenderingUnavailable(_))
        ));
    }

    #[test]
    fn test_escape_sequences_do_not_affect_layout() {
        let r = renderer(8);
        let plain = r.render_text("@@\n@@", None);
        let colored_text = format!(
            "{}{}\n{}{}",
            ansi::colorize('@', [255, 0, 0]),
            ansi::colorize('@', [0, 255, 0]),
            ansi::colorize('@', [0, 0, 255]),
            ansi::colorize('@', [255, 255, 0]),
        );
        let colored = r.render_text(&colored_text, None);
        assert_eq!(
            (plain.width(), plain.height()),
            (colored.width(), colored.height())
        );
    }

    #[test]
    fn test_ragged_lines_are_padded() {
        let r = renderer(8);
        let img = r.render_text("@@@@\n@", None);
        let (w, h) = r.canvas_dimensions(4, 2);
        assert_eq!((img.width(), img.height()), (w, h));
    }

    #[test]
    fn test_builtin_renders_ink_for_dense_glyph() {
        let r = renderer(8);
        let grid = CharacterGrid::new(1, vec![vec!['█']]);
        let img = r.render_grid(&grid, None).to_rgba8();
        assert!(img.pixels().any(|p| p.0 == INK.0));
    }

    #[test]
    fn test_space_leaves_background() {
        let r = renderer(8);
        let grid = CharacterGrid::new(1, vec![vec![' ']]);
        let img = r.render_grid(&grid, None).to_rgba8();
        assert!(img.pixels().all(|p| p.0 == BACKGROUND.0));
    }

    #[test]
    fn test_colored_glyph_uses_field_color() {
        let r = renderer(8);
        let grid = CharacterGrid::new(1, vec![vec!['█']]);
        let colors = ColorField::from_raw(1, 1, vec![[200, 10, 10]]);
        let img = r.render_grid(&grid, Some(&colors)).to_rgba8();
        assert!(img.pixels().any(|p| p.0 == [200, 10, 10, 255]));
    }

    #[test]
    fn test_shading_ramp_coverage_is_ordered() {
        let coverage = |glyph: char| {
            (0..8)
                .flat_map(|y| (0..8).map(move |x| (x, y)))
                .filter(|&(x, y)| builtin_pixel(glyph, x, y))
                .count()
        };
        assert!(coverage('█') > coverage('▓'));
        assert!(coverage('▓') > coverage('▒'));
        assert!(coverage('▒') > coverage('░'));
        assert_eq!(coverage(' '), 0);
    }
}
