#![allow(clippy::module_inception)]

//! graph4: MSX2 GRAPHICS 4 (SCREEN 5) image encoder
//!
//! Turns an 8-bit RGB(A) raster into the exact bytes an MSX2 expects for
//! its 256-wide, 16-color bitmap mode: a 16-entry palette picked from the
//! 512-color 3-3-3 space, one 4-bit index per pixel, and the legacy
//! `.SC5` / `.SR5` + `.PAL` / `.DAT` + `.PAL` / `.RAW` file layouts.
//!
//! # Quick Start
//!
//! ```
//! use graph4::{ChannelLayout, Graph4Encoder, OutputFormat, SourceImage};
//!
//! // 256x212 RGBA, a horizontal gradient
//! let data: Vec<u8> = (0..256 * 212)
//!     .flat_map(|i| [(i % 256) as u8, 0, 0, 255])
//!     .collect();
//! let image = SourceImage::new(&data, 256, 212, ChannelLayout::Rgba).unwrap();
//!
//! let container = Graph4Encoder::new()
//!     .reserve_index0(true)
//!     .encode(&image, OutputFormat::Split)
//!     .unwrap();
//!
//! for segment in container.segments() {
//!     println!("NONAME.{}: {} bytes", segment.extension(), segment.len());
//! }
//! ```
//!
//! # Pipeline
//!
//! 1. **Reduce**: every channel is rounded to 3 bits
//!    ([`reduce_channel()`]).
//! 2. **Palette**: the most used reduced colors fill 16 slots (15 when
//!    index 0 is reserved for transparency), see [`PaletteBuilder`].
//! 3. **Quantize**: each pixel gets the nearest palette index, optionally
//!    with error diffusion ([`DitherAlgorithm`]).
//! 4. **Pack**: two pixels per byte into 32 KiB VRAM pages
//!    ([`pack_pages()`]).
//! 5. **Frame**: wrap the bytes in the requested [`OutputFormat`].
//!
//! [`Graph4Encoder::quantize()`] stops after step 3 and returns an
//! [`IndexedImage`]; [`Graph4Encoder::encode()`] runs everything and
//! returns a [`Container`].
//!
//! # Palette Layout
//!
//! Each entry is two bytes in V9938 palette register order:
//!
//! ```text
//! byte 0: 0 R R R 0 B B B
//! byte 1: 0 0 0 0 0 G G G
//! ```
//!
//! # Determinism
//!
//! There is no randomness anywhere. Ties in the palette ranking go to the
//! lower 9-bit color code, ties in nearest-color matching to the lower
//! palette index, and error diffusion always scans left to right, top to
//! bottom.

pub mod api;
pub mod color;
pub mod container;
pub mod dither;
pub mod input;
pub mod output;
pub mod pack;
pub mod palette;

#[cfg(test)]
mod domain_tests;

pub use api::{EncodeError, Graph4Encoder, ParseOptionError};
pub use color::{reduce_channel, MsxColor, Rgb8, Rgba};
pub use container::{
    Container, FramingOptions, Header, OutputFormat, Segment, HEADERLESS_MAX_HEIGHT, PALETTE_OFFSET,
};
pub use dither::{quantize, DitherAlgorithm, DitherOptions};
pub use input::{ChannelLayout, SourceImage, Transparency};
pub use output::IndexedImage;
pub use pack::{pack_pages, pack_rows, unpack_rows, PageGeometry, ViewportHeight, PAGE_BYTES};
pub use palette::{
    Palette, PaletteBuilder, PaletteError, PalettePolicy, PaletteSource, PaletteStats,
    ParseColorError, PALETTE_BYTES,
};
