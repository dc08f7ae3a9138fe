//! Palette types and construction
//!
//! A GRAPHICS 4 palette always has exactly 16 entries. [`PaletteBuilder`]
//! derives one from the colors an image actually uses, or validates a
//! palette supplied by the caller; [`Palette`] is the immutable result used
//! by the quantizer and the container encoder.

mod builder;
mod error;
mod palette;

pub use builder::{PaletteBuilder, PalettePolicy, PaletteSource, PaletteStats};
pub use error::{PaletteError, ParseColorError};
pub use palette::{Palette, PALETTE_BYTES, PALETTE_SIZE};
