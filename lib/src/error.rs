use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GlyphError>;

/// Errors produced by the conversion pipeline.
///
/// Configuration problems are surfaced before any pixel work starts.
/// Decode failures are kept distinct from missing files so callers can
/// report them differently.
#[derive(Error, Debug)]
pub enum GlyphError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("file not found: {0}")]
    NotFound(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no usable monospace font: {0}")]
    RenderingUnavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_kind() {
        let err = GlyphError::InvalidConfiguration("width must be positive".into());
        assert!(err.to_string().contains("invalid configuration"));

        let err = GlyphError::NotFound(PathBuf::from("missing.png"));
        assert!(err.to_string().contains("missing.png"));
    }
}
