//! ANSI 256-color quantization and escape-sequence handling
//!
//! Colors are reduced to the 6x6x6 cube of the 8-bit terminal palette
//! (codes 16-231). The 16 system colors and the grayscale ramp (232-255)
//! are never produced by this mapping.

/// Resets foreground color; must follow every colored glyph so color does
/// not bleed into later output.
pub const RESET: &str = "\x1b[0m";

/// Quantize an RGB triple to the 216-color terminal cube.
///
/// `level = floor(channel / 255 * 5)` per channel, then
/// `code = 16 + 36*r + 6*g + b`. Output is always within [16, 231].
pub fn quantize256(r: u8, g: u8, b: u8) -> u8 {
    let level = |channel: u8| (channel as u16 * 5 / 255) as u8;
    16 + 36 * level(r) + 6 * level(g) + level(b)
}

/// Foreground escape sequence for an 8-bit color code.
pub fn format(code: u8) -> String {
    format!("\x1b[38;5;{code}m")
}

/// Wrap a single glyph in its quantized foreground color plus reset.
pub fn colorize(glyph: char, [r, g, b]: [u8; 3]) -> String {
    let mut out = format(quantize256(r, g, b));
    out.push(glyph);
    out.push_str(RESET);
    out
}

/// Remove ANSI escape sequences, leaving only printable glyphs.
///
/// Escape sequences are zero-width; the renderer strips them before any
/// column/row measurement.
pub fn strip_codes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\x1b' {
            out.push(ch);
            continue;
        }
        // CSI sequence: ESC '[' parameters, terminated by a byte in @..~
        if chars.peek() == Some(&'[') {
            chars.next();
            for terminator in chars.by_ref() {
                if ('\x40'..='\x7e').contains(&terminator) {
                    break;
                }
            }
        }
    }

    out
}
