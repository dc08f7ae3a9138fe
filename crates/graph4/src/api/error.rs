//! Unified error type for the graph4 public API.
//!
//! [`EncodeError`] covers everything that can go wrong between handing a
//! pixel buffer to the encoder and getting a container back.

use crate::container::OutputFormat;
use crate::palette::{PaletteError, ParseColorError};
use std::fmt;

/// Unified error type for the graph4 public API.
///
/// # Example
///
/// ```
/// use graph4::{ChannelLayout, EncodeError, SourceImage};
///
/// let err = SourceImage::new(&[0u8; 5], 2, 1, ChannelLayout::Rgb).unwrap_err();
/// assert_eq!(err, EncodeError::BufferSizeMismatch { expected: 6, actual: 5 });
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The image does not fit the requested container.
    ///
    /// Raised before any palette or pixel work is done.
    InvalidGeometry {
        width: usize,
        height: usize,
        format: OutputFormat,
        max_height: usize,
    },
    /// Index 0 reservation was requested on a buffer without alpha.
    UnsupportedChannelLayout,
    /// A buffer length does not match `width * height` (times the channel
    /// count for pixel buffers).
    BufferSizeMismatch { expected: usize, actual: usize },
    /// A palette index at `position` is not below 16.
    IndexOutOfRange { position: usize, index: u8 },
    /// Fixed palette validation failed.
    Palette(PaletteError),
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::InvalidGeometry {
                width,
                height,
                format,
                max_height,
            } => write!(
                f,
                "image is {}x{}, {} output needs width 256 and height 1..={}",
                width, height, format, max_height
            ),
            EncodeError::UnsupportedChannelLayout => write!(
                f,
                "reserving index 0 for transparency requires an image with alpha"
            ),
            EncodeError::BufferSizeMismatch { expected, actual } => write!(
                f,
                "pixel buffer has {} bytes, expected {}",
                actual, expected
            ),
            EncodeError::IndexOutOfRange { position, index } => write!(
                f,
                "palette index {} at position {} is out of range (0..=15)",
                index, position
            ),
            EncodeError::Palette(err) => write!(f, "palette error: {}", err),
        }
    }
}

impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EncodeError::Palette(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PaletteError> for EncodeError {
    fn from(err: PaletteError) -> Self {
        EncodeError::Palette(err)
    }
}

impl From<ParseColorError> for EncodeError {
    fn from(err: ParseColorError) -> Self {
        EncodeError::Palette(PaletteError::ParseColor(err))
    }
}

/// An option name that does not match any known variant.
///
/// Returned by the `FromStr` impls of [`DitherAlgorithm`](crate::DitherAlgorithm),
/// [`PalettePolicy`](crate::PalettePolicy), [`OutputFormat`] and
/// [`ViewportHeight`](crate::ViewportHeight).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptionError {
    /// What was being parsed, e.g. `"dither algorithm"`
    pub kind: &'static str,
    /// The rejected input
    pub value: String,
    /// Accepted spellings
    pub expected: &'static [&'static str],
}

impl ParseOptionError {
    pub(crate) fn new(kind: &'static str, value: &str, expected: &'static [&'static str]) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected,
        }
    }
}

impl fmt::Display for ParseOptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown {} '{}' (expected one of: {})",
            self.kind,
            self.value,
            self.expected.join(", ")
        )
    }
}

impl std::error::Error for ParseOptionError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_geometry_display() {
        let err = EncodeError::InvalidGeometry {
            width: 256,
            height: 213,
            format: OutputFormat::Raw,
            max_height: 212,
        };
        assert_eq!(
            err.to_string(),
            "image is 256x213, raw output needs width 256 and height 1..=212"
        );
    }

    #[test]
    fn test_index_out_of_range_display() {
        let err = EncodeError::IndexOutOfRange {
            position: 3,
            index: 16,
        };
        assert_eq!(
            err.to_string(),
            "palette index 16 at position 3 is out of range (0..=15)"
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn test_palette_error_has_source() {
        let err: EncodeError = PaletteError::EmptyPalette.into();
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("palette error:"));
    }

    #[test]
    fn test_parse_option_display() {
        let err = ParseOptionError::new("output format", "sc7", &["combined", "split"]);
        assert_eq!(
            err.to_string(),
            "unknown output format 'sc7' (expected one of: combined, split)"
        );
    }

    #[test]
    fn test_parse_color_error_wraps_into_palette() {
        let err: EncodeError = ParseColorError::InvalidLength.into();
        assert!(matches!(
            err,
            EncodeError::Palette(PaletteError::ParseColor(ParseColorError::InvalidLength))
        ));
    }
}
