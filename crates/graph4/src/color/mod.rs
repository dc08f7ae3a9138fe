//! Color types for the GRAPHICS 4 pipeline
//!
//! Two color spaces matter here:
//!
//! - **8-bit RGB** ([`Rgb8`], [`Rgba`]): what the host image provides.
//! - **3-3-3 MSX color** ([`MsxColor`]): what the V9938 palette registers hold,
//!   3 bits per channel, 512 colors in total.
//!
//! # Example
//!
//! ```
//! use graph4::{MsxColor, Rgb8};
//!
//! let orange = Rgb8::new(255, 128, 0);
//! let msx = MsxColor::from(orange);
//! assert_eq!((msx.r(), msx.g(), msx.b()), (7, 4, 0));
//! ```

mod msx;
mod rgb;

pub use msx::{reduce_channel, MsxColor, CHANNEL_MAX};
pub use rgb::{Rgb8, Rgba};
