//! [`IndexedImage`]: palette indices plus the palette they refer to.

use crate::api::EncodeError;
use crate::palette::{Palette, PaletteStats, PALETTE_SIZE};

/// The canonical output of the quantizer.
///
/// Stores one `u8` palette index per pixel in row-major order, the image
/// dimensions, the palette and what the palette builder observed. This is
/// what the in-memory path hands back to the host; the disk path packs the
/// same indices into a [`Container`](crate::Container).
///
/// # Example
///
/// ```
/// use graph4::{ChannelLayout, Graph4Encoder, SourceImage};
///
/// // red, blue
/// let data = [255, 0, 0, 255, 0, 0, 255, 255];
/// let image = SourceImage::new(&data, 2, 1, ChannelLayout::Rgba).unwrap();
///
/// let result = Graph4Encoder::new().dithering(false).quantize(&image).unwrap();
/// // Equal counts: blue has the lower 9-bit code and takes index 0
/// assert_eq!(result.indices(), &[1, 0]);
/// assert_eq!(result.to_rgba().len(), 2 * 4);
/// ```
#[derive(Debug, Clone)]
pub struct IndexedImage {
    indices: Vec<u8>,
    width: usize,
    height: usize,
    palette: Palette,
    stats: PaletteStats,
}

impl IndexedImage {
    /// Wrap indices produced elsewhere.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::BufferSizeMismatch`] if `indices` is not
    ///   `width * height` long
    /// - [`EncodeError::IndexOutOfRange`] for any index of 16 or more
    pub fn new(
        indices: Vec<u8>,
        width: usize,
        height: usize,
        palette: Palette,
        stats: PaletteStats,
    ) -> Result<Self, EncodeError> {
        let expected = width.checked_mul(height).unwrap_or(usize::MAX);
        if indices.len() != expected {
            return Err(EncodeError::BufferSizeMismatch {
                expected,
                actual: indices.len(),
            });
        }
        if let Some(position) = indices.iter().position(|&i| i as usize >= PALETTE_SIZE) {
            return Err(EncodeError::IndexOutOfRange {
                position,
                index: indices[position],
            });
        }
        Ok(Self {
            indices,
            width,
            height,
            palette,
            stats,
        })
    }

    /// Palette indices in row-major order, each below 16.
    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[inline]
    pub fn stats(&self) -> &PaletteStats {
        &self.stats
    }

    /// Expand to 8-bit RGB through the palette.
    ///
    /// The buffer has length `width * height * 3`.
    pub fn to_rgb(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.indices.len() * 3);
        for &idx in &self.indices {
            let c = self.palette.get(idx as usize).to_rgb();
            rgb.extend_from_slice(&[c.r, c.g, c.b]);
        }
        rgb
    }

    /// Expand to 8-bit RGBA through the palette.
    ///
    /// Index 0 of a palette with reserved index 0 becomes fully transparent,
    /// every other pixel is opaque.
    pub fn to_rgba(&self) -> Vec<u8> {
        let reserved = self.palette.is_index0_reserved();
        let mut rgba = Vec::with_capacity(self.indices.len() * 4);
        for &idx in &self.indices {
            let c = self.palette.get(idx as usize).to_rgb();
            let a = if reserved && idx == 0 { 0 } else { 255 };
            rgba.extend_from_slice(&[c.r, c.g, c.b, a]);
        }
        rgba
    }
}
