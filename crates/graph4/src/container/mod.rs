//! Serialization into the legacy GRAPHICS 4 file layouts.
//!
//! | Format       | Files           | Body                                      |
//! |--------------|-----------------|-------------------------------------------|
//! | Combined     | `.SC5`          | pattern pages + 32-byte palette           |
//! | Split        | `.SR5` + `.PAL` | pattern pages / palette                   |
//! | Raw (COPY)   | `.DAT` + `.PAL` | packed rows behind a width/height prefix  |
//! | Headerless   | `.RAW`          | packed rows only                          |
//!
//! Image and palette files carry a `BSAVE` header unless it is switched off.
//! `.DAT` and `.RAW` files never do.

mod format;
mod segment;

pub use format::{OutputFormat, COPY_MAX_HEIGHT, HEADERLESS_MAX_HEIGHT};
pub use segment::{Header, Segment, BSAVE_MAGIC};

use crate::api::EncodeError;
use crate::output::IndexedImage;
use crate::pack::{pack_pages, pack_rows, ViewportHeight};
use crate::palette::{Palette, PALETTE_BYTES};

/// VRAM address of the palette table in GRAPHICS 4.
pub const PALETTE_OFFSET: usize = 0x7680;

/// Load address for pattern data.
const PATTERN_START: u16 = 0;

/// Framing switches shared by all formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramingOptions {
    /// Prefix image and palette files with a `BSAVE` header.
    pub bsave_header: bool,
    /// Also emit a `.PAL` file for formats that do not need one.
    pub export_palette: bool,
}

impl Default for FramingOptions {
    fn default() -> Self {
        Self {
            bsave_header: true,
            export_palette: false,
        }
    }
}

/// The encoded files of one image, in write order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    format: OutputFormat,
    segments: Vec<Segment>,
}

impl Container {
    /// Pack `image` and frame it as `format`.
    ///
    /// Paged formats lay the rows out over VRAM pages of `viewport` lines;
    /// the others pack rows back to back.
    ///
    /// # Errors
    ///
    /// [`EncodeError::InvalidGeometry`] when the image does not fit
    /// `format` (see [`OutputFormat::geometry()`]).
    pub fn build(
        format: OutputFormat,
        image: &IndexedImage,
        viewport: ViewportHeight,
        options: &FramingOptions,
    ) -> Result<Self, EncodeError> {
        let (width, height) = (image.width(), image.height());
        let pattern = match format.geometry(width, height, viewport)? {
            Some(pages) => pack_pages(image.indices(), height, &pages),
            None => pack_rows(image.indices(), width),
        };
        let palette = image.palette();
        let mut segments = Vec::with_capacity(2);

        match format {
            OutputFormat::Combined => {
                let palette_bytes = palette.to_bytes();
                let mut body = pattern;
                // Palette table in the hidden rows of page 0
                if let Some(table) = body.get_mut(PALETTE_OFFSET..PALETTE_OFFSET + PALETTE_BYTES) {
                    table.copy_from_slice(&palette_bytes);
                }
                body.extend_from_slice(&palette_bytes);
                segments.push(image_segment("SC5", body, options));
                if options.export_palette {
                    segments.push(palette_segment(palette, options));
                }
            }
            OutputFormat::Split => {
                segments.push(image_segment("SR5", pattern, options));
                segments.push(palette_segment(palette, options));
            }
            OutputFormat::Raw => {
                // Both fit: width is 256 and height at most 212
                let header = Header::CopyDims {
                    width: width as u16,
                    height: height as u16,
                };
                segments.push(Segment::new("DAT", Some(header), pattern));
                segments.push(palette_segment(palette, options));
            }
            OutputFormat::Headerless => {
                segments.push(Segment::new("RAW", None, pattern));
                if options.export_palette {
                    segments.push(palette_segment(palette, options));
                }
            }
        }

        Ok(Self { format, segments })
    }

    #[inline]
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The segment written with `extension`, if any.
    pub fn segment(&self, extension: &str) -> Option<&Segment> {
        self.segments
            .iter()
            .find(|s| s.extension().eq_ignore_ascii_case(extension))
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }
}

fn image_segment(extension: &'static str, body: Vec<u8>, options: &FramingOptions) -> Segment {
    let header = options
        .bsave_header
        .then(|| Header::bsave(PATTERN_START, body.len()));
    Segment::new(extension, header, body)
}

fn palette_segment(palette: &Palette, options: &FramingOptions) -> Segment {
    let header = options
        .bsave_header
        .then(|| Header::bsave(PALETTE_OFFSET as u16, PALETTE_BYTES));
    Segment::new("PAL", header, palette.to_bytes().to_vec())
}
