//! 9-bit MSX colors and the 8-bit to 3-bit channel reducer.

use super::rgb::{Rgb8, Rgba};

/// Highest value of a 3-bit channel.
pub const CHANNEL_MAX: u8 = 7;

/// Reduce an 8-bit channel value to 3 bits: `round(c / 255 * 7)`.
///
/// Nearest rounding, not truncation. No 8-bit input lands exactly on a
/// half step (`c * 7 / 255` is never `k + 0.5` because `255 * (2k + 1)` is
/// odd), so the integer form below agrees with the rounded real value for
/// every input.
///
/// ```
/// use graph4::reduce_channel;
///
/// assert_eq!(reduce_channel(0), 0);
/// assert_eq!(reduce_channel(18), 0);
/// assert_eq!(reduce_channel(19), 1);
/// assert_eq!(reduce_channel(255), 7);
/// ```
#[inline]
pub const fn reduce_channel(c: u8) -> u8 {
    ((c as u16 * 7 + 127) / 255) as u8
}

/// A color of the 512-color MSX2 space, 3 bits per channel.
///
/// Ordering follows the 9-bit code (`r`, then `g`, then `b`), which is the
/// deterministic tie-break key used by the palette builder.
///
/// Channels are only reachable through [`new()`](Self::new) and the
/// conversions, so every value is in `0..=7`:
///
/// ```compile_fail
/// use graph4::MsxColor;
///
/// let out_of_range = MsxColor { r: 8, g: 0, b: 0 };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct MsxColor {
    r: u8,
    g: u8,
    b: u8,
}

impl MsxColor {
    pub const BLACK: MsxColor = MsxColor::new(0, 0, 0);
    pub const WHITE: MsxColor = MsxColor::new(7, 7, 7);

    /// Create a color from 3-bit channels. Values are masked to 3 bits.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r & CHANNEL_MAX,
            g: g & CHANNEL_MAX,
            b: b & CHANNEL_MAX,
        }
    }

    /// Red, 0..=7
    #[inline]
    pub const fn r(self) -> u8 {
        self.r
    }

    /// Green, 0..=7
    #[inline]
    pub const fn g(self) -> u8 {
        self.g
    }

    /// Blue, 0..=7
    #[inline]
    pub const fn b(self) -> u8 {
        self.b
    }

    /// Reduce an 8-bit color to the nearest MSX color.
    #[inline]
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(reduce_channel(r), reduce_channel(g), reduce_channel(b))
    }

    /// 9-bit value `r << 6 | g << 3 | b`.
    #[inline]
    pub const fn code(self) -> u16 {
        (self.r as u16) << 6 | (self.g as u16) << 3 | self.b as u16
    }

    /// Inverse of [`code()`](Self::code). Bits above the 9th are ignored.
    #[inline]
    pub const fn from_code(code: u16) -> Self {
        Self::new((code >> 6) as u8, (code >> 3) as u8, code as u8)
    }

    /// Expand back to 8-bit channels (`v * 255 / 7`, rounded).
    ///
    /// ```
    /// use graph4::{MsxColor, Rgb8};
    ///
    /// assert_eq!(MsxColor::new(7, 0, 4).to_rgb(), Rgb8::new(255, 0, 146));
    /// ```
    #[inline]
    pub const fn to_rgb(self) -> Rgb8 {
        const fn expand(v: u8) -> u8 {
            ((v as u16 * 255 + 3) / 7) as u8
        }
        Rgb8::new(expand(self.r), expand(self.g), expand(self.b))
    }

    /// The two bytes the V9938 palette register expects: `0RRR0BBB`, then
    /// `00000GGG`.
    ///
    /// ```
    /// use graph4::MsxColor;
    ///
    /// assert_eq!(MsxColor::new(7, 7, 7).register_bytes(), [0x77, 0x07]);
    /// ```
    #[inline]
    pub const fn register_bytes(self) -> [u8; 2] {
        [self.r << 4 | self.b, self.g]
    }

    /// [`register_bytes()`](Self::register_bytes) read as a little-endian word.
    #[inline]
    pub const fn register_word(self) -> u16 {
        u16::from_le_bytes(self.register_bytes())
    }

    /// Channels as floats, in 3-bit units.
    #[inline]
    pub fn channels(self) -> [f32; 3] {
        [self.r as f32, self.g as f32, self.b as f32]
    }

    /// Squared Euclidean distance in 3-3-3 space.
    #[inline]
    pub fn distance_sq(self, other: MsxColor) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }
}

impl From<Rgb8> for MsxColor {
    #[inline]
    fn from(c: Rgb8) -> Self {
        Self::from_rgb8(c.r, c.g, c.b)
    }
}

impl From<Rgba> for MsxColor {
    /// Alpha is not reduced; it is consulted separately for transparency.
    #[inline]
    fn from(c: Rgba) -> Self {
        Self::from_rgb8(c.r, c.g, c.b)
    }
}
