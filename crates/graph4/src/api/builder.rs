//! Graph4Encoder builder, the main entry point of the crate.
//!
//! [`Graph4Encoder`] holds every export option and runs the pipeline:
//! palette, quantization, packing and framing.

use crate::color::{MsxColor, Rgb8};
use crate::container::{Container, FramingOptions, OutputFormat};
use crate::dither::{quantize, DitherAlgorithm, DitherOptions};
use crate::input::{SourceImage, Transparency};
use crate::output::IndexedImage;
use crate::pack::{PageGeometry, ViewportHeight};
use crate::palette::{PaletteBuilder, PalettePolicy, PaletteSource};

use super::EncodeError;

/// GRAPHICS 4 encoder.
///
/// - Configuration methods consume and return `self`
/// - [`quantize()`](Self::quantize) and [`encode()`](Self::encode) take
///   `&self`, so one encoder can process many images
///
/// # Example
///
/// ```
/// use graph4::{ChannelLayout, Graph4Encoder, OutputFormat, SourceImage};
///
/// let data = vec![0u8; 256 * 212 * 3];
/// let image = SourceImage::new(&data, 256, 212, ChannelLayout::Rgb).unwrap();
///
/// let container = Graph4Encoder::new()
///     .dither_strength(0.5)
///     .bsave_header(false)
///     .encode(&image, OutputFormat::Combined)
///     .unwrap();
///
/// assert_eq!(container.segment("SC5").unwrap().len(), 32768 + 32);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph4Encoder {
    reserve_index0: bool,
    transparent_color: Option<Rgb8>,
    dither: DitherOptions,
    palette_source: PaletteSource,
    viewport: ViewportHeight,
    framing: FramingOptions,
}

impl Graph4Encoder {
    /// Encoder with defaults: no reservation, Floyd-Steinberg at full
    /// strength, most-frequent palette, 212-line viewport, `BSAVE` headers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve palette index 0 for transparent pixels.
    #[inline]
    pub fn reserve_index0(mut self, reserve: bool) -> Self {
        self.reserve_index0 = reserve;
        self
    }

    /// Treat pixels of exactly this RGB value as transparent.
    ///
    /// Only has an effect together with [`reserve_index0()`](Self::reserve_index0).
    #[inline]
    pub fn transparent_color(mut self, color: Option<Rgb8>) -> Self {
        self.transparent_color = color;
        self
    }

    #[inline]
    pub fn dithering(mut self, enabled: bool) -> Self {
        self.dither = self.dither.enabled(enabled);
        self
    }

    /// Error scale in `[0, 1]`, clamped.
    #[inline]
    pub fn dither_strength(mut self, strength: f32) -> Self {
        self.dither = self.dither.strength(strength);
        self
    }

    #[inline]
    pub fn algorithm(mut self, algorithm: DitherAlgorithm) -> Self {
        self.dither = self.dither.algorithm(algorithm);
        self
    }

    /// Derive the palette from the image with this fallback policy.
    #[inline]
    pub fn palette_policy(mut self, policy: PalettePolicy) -> Self {
        self.palette_source = PaletteSource::Derive(policy);
        self
    }

    /// Use these colors instead of deriving a palette.
    #[inline]
    pub fn fixed_palette(mut self, colors: Vec<MsxColor>) -> Self {
        self.palette_source = PaletteSource::Fixed(colors);
        self
    }

    #[inline]
    pub fn viewport_height(mut self, viewport: ViewportHeight) -> Self {
        self.viewport = viewport;
        self
    }

    #[inline]
    pub fn bsave_header(mut self, enabled: bool) -> Self {
        self.framing.bsave_header = enabled;
        self
    }

    /// Emit a `.PAL` file for combined and headerless output too.
    #[inline]
    pub fn export_palette(mut self, enabled: bool) -> Self {
        self.framing.export_palette = enabled;
        self
    }

    #[inline]
    pub fn viewport(&self) -> ViewportHeight {
        self.viewport
    }

    #[inline]
    pub fn transparency(&self) -> Transparency {
        Transparency::new(self.reserve_index0, self.transparent_color)
    }

    #[inline]
    pub fn dither_options(&self) -> &DitherOptions {
        &self.dither
    }

    /// Check that a `width` x `height` image fits `format`.
    ///
    /// Width must be 256. Height must be at least 1 and at most
    /// [`OutputFormat::max_height()`] for the configured viewport.
    /// Paged formats also get their page layout back.
    pub fn check_geometry(
        &self,
        width: usize,
        height: usize,
        format: OutputFormat,
    ) -> Result<Option<PageGeometry>, EncodeError> {
        format.geometry(width, height, self.viewport)
    }

    /// Build the palette and map every pixel to it.
    ///
    /// This is the in-memory path: any image size is accepted.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::UnsupportedChannelLayout`] when index 0 is reserved
    ///   but the image has no alpha channel
    /// - [`EncodeError::Palette`] when a fixed palette is invalid
    pub fn quantize(&self, image: &SourceImage<'_>) -> Result<IndexedImage, EncodeError> {
        if self.reserve_index0 && !image.layout().has_alpha() {
            return Err(EncodeError::UnsupportedChannelLayout);
        }

        let transparency = self.transparency();
        let (palette, stats) = PaletteBuilder::new(transparency)
            .source(self.palette_source.clone())
            .build(image)?;
        let indices = quantize(image, &palette, &transparency, &self.dither);

        IndexedImage::new(indices, image.width(), image.height(), palette, stats)
    }

    /// Frame an already quantized image as `format`.
    ///
    /// Runs the same geometry check as [`encode()`](Self::encode).
    pub fn pack(&self, image: &IndexedImage, format: OutputFormat) -> Result<Container, EncodeError> {
        Container::build(format, image, self.viewport, &self.framing)
    }

    /// Full disk-path pipeline.
    ///
    /// The geometry check runs first; an image that does not fit is
    /// rejected before any palette or pixel work.
    pub fn encode(
        &self,
        image: &SourceImage<'_>,
        format: OutputFormat,
    ) -> Result<Container, EncodeError> {
        self.check_geometry(image.width(), image.height(), format)?;
        let indexed = self.quantize(image)?;
        self.pack(&indexed, format)
    }
}
