use std::path::PathBuf;

use graph4::{EncodeError, PaletteError, ParseColorError, ParseOptionError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Image decode error: {0}")]
    Decode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExportError::Io {
            path: path.into(),
            source,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid viewport height: {0} (expected 192 or 212)")]
    InvalidViewport(u16),

    #[error("Invalid dither strength: {0} (expected 0.0 to 1.0)")]
    InvalidStrength(f32),

    #[error("Invalid color '{value}': {source}")]
    InvalidColor {
        value: String,
        #[source]
        source: ParseColorError,
    },

    #[error("Invalid palette: {0}")]
    InvalidPalette(#[from] PaletteError),

    #[error("Invalid option: {0}")]
    InvalidOption(#[from] ParseOptionError),

    #[error("Invalid output name '{0}'")]
    InvalidName(String),
}
