//! glyphcast - image to character-art converter
//!
//! Converts raster images into textual or colored character art: resize to
//! a target character grid with aspect-ratio correction, equalize contrast,
//! map brightness to glyphs from an ordered palette, optionally capture and
//! boost per-glyph colors for ANSI output, and re-render the grid back into
//! a bitmap with a monospace font.
//!
//! # Example
//! ```no_run
//! use glyphcast::{ArtComposer, ConversionConfig};
//!
//! let image = image::open("photo.jpg").unwrap();
//! let config = ConversionConfig::new(80, "simple", false).unwrap();
//! let art = ArtComposer::new(config).unwrap().compose(&image).unwrap();
//! println!("{}", art.to_text());
//! ```

pub mod ansi;
pub mod color;
pub mod compose;
pub mod config;
pub mod error;
pub mod geometry;
pub mod palette;
pub mod quantize;
pub mod render;
pub mod tone;

// Re-export main types for convenience
pub use compose::{ArtComposer, AsciiArt};
pub use config::ConversionConfig;
pub use error::{GlyphError, Result};
pub use palette::GlyphPalette;
pub use quantize::CharacterGrid;
pub use render::{MonoFont, RasterRenderer};
