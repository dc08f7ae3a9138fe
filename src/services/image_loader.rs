//! PNG input.
//!
//! Every PNG flavor is normalized to 8-bit RGB or RGBA: palettes are
//! expanded, 16-bit samples stripped and greyscale widened to three
//! channels. Alpha (including a `tRNS` chunk) is kept.

use graph4::{ChannelLayout, EncodeError, SourceImage};
use std::io::Cursor;
use std::path::Path;

use crate::error::ExportError;

/// A decoded image that owns its pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    pub data: Vec<u8>,
    pub width: usize,
    pub height: usize,
    pub layout: ChannelLayout,
}

impl LoadedImage {
    /// Borrow as encoder input.
    pub fn source(&self) -> Result<SourceImage<'_>, EncodeError> {
        SourceImage::new(&self.data, self.width, self.height, self.layout)
    }
}

/// Read and decode a PNG file.
pub fn load_png(path: &Path) -> Result<LoadedImage, ExportError> {
    let bytes = std::fs::read(path).map_err(|e| ExportError::io(path, e))?;
    let image = decode_png(&bytes)?;
    tracing::debug!(
        path = %path.display(),
        width = image.width,
        height = image.height,
        layout = ?image.layout,
        "Decoded input image"
    );
    Ok(image)
}

/// Decode PNG bytes.
pub fn decode_png(bytes: &[u8]) -> Result<LoadedImage, ExportError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| ExportError::Decode(e.to_string()))?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let frame_info = reader
        .next_frame(&mut buf)
        .map_err(|e| ExportError::Decode(e.to_string()))?;
    buf.truncate(frame_info.buffer_size());

    let width = frame_info.width as usize;
    let height = frame_info.height as usize;

    let (data, layout) = match frame_info.color_type {
        png::ColorType::Rgb => (buf, ChannelLayout::Rgb),
        png::ColorType::Rgba => (buf, ChannelLayout::Rgba),
        png::ColorType::Grayscale => (
            buf.iter().flat_map(|&v| [v, v, v]).collect(),
            ChannelLayout::Rgb,
        ),
        png::ColorType::GrayscaleAlpha => (
            buf.chunks_exact(2)
                .flat_map(|p| [p[0], p[0], p[0], p[1]])
                .collect(),
            ChannelLayout::Rgba,
        ),
        png::ColorType::Indexed => {
            return Err(ExportError::Decode(
                "indexed PNG was not expanded".to_string(),
            ))
        }
    };

    Ok(LoadedImage {
        data,
        width,
        height,
        layout,
    })
}
