use crate::api::EncodeError;
use crate::color::Rgba;

/// Byte layout of one pixel in a [`SourceImage`] buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelLayout {
    /// 3 bytes per pixel, always opaque
    Rgb,
    /// 4 bytes per pixel
    #[default]
    Rgba,
}

impl ChannelLayout {
    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            ChannelLayout::Rgb => 3,
            ChannelLayout::Rgba => 4,
        }
    }

    #[inline]
    pub const fn has_alpha(self) -> bool {
        matches!(self, ChannelLayout::Rgba)
    }
}

/// A read-only, row-major view of the host image.
///
/// The buffer is borrowed for the duration of one encode call and never
/// modified.
#[derive(Debug, Clone, Copy)]
pub struct SourceImage<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    layout: ChannelLayout,
}

impl<'a> SourceImage<'a> {
    /// Wrap a pixel buffer.
    ///
    /// # Errors
    ///
    /// [`EncodeError::BufferSizeMismatch`] when `data` is not exactly
    /// `width * height * layout.bytes_per_pixel()` bytes long.
    pub fn new(
        data: &'a [u8],
        width: usize,
        height: usize,
        layout: ChannelLayout,
    ) -> Result<Self, EncodeError> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(layout.bytes_per_pixel()))
            .unwrap_or(usize::MAX);
        if data.len() != expected {
            return Err(EncodeError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            layout,
        })
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
    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    /// The pixel at (`x`, `y`). RGB buffers report alpha 255.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the image.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let bpp = self.layout.bytes_per_pixel();
        let offset = (y * self.width + x) * bpp;
        Self::decode(&self.data[offset..offset + bpp])
    }

    /// All pixels in raster order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgba> + 'a {
        self.data
            .chunks_exact(self.layout.bytes_per_pixel())
            .map(Self::decode)
    }

    #[inline]
    fn decode(chunk: &[u8]) -> Rgba {
        let alpha = chunk.get(3).copied().unwrap_or(u8::MAX);
        Rgba::new(chunk[0], chunk[1], chunk[2], alpha)
    }
}
