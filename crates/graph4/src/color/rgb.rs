//! 8-bit source colors
//!
//! [`Rgba`] is one pixel of the host image. [`Rgb8`] is the alpha-less form,
//! used for the configured transparent color and for hex palette definitions.

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb8 {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Supports the following formats:
    /// - `#RRGGBB` / `RRGGBB` - standard 6-digit hex
    /// - `#RGB` / `RGB` - shorthand 3-digit hex (expands to RRGGBB)
    ///
    /// Parsing is case-insensitive. Leading and trailing whitespace is trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use graph4::Rgb8;
    ///
    /// let magenta: Rgb8 = "#ff00ff".parse().unwrap();
    /// assert_eq!(magenta, Rgb8::new(255, 0, 255));
    ///
    /// let red: Rgb8 = "F00".parse().unwrap();
    /// assert_eq!(red, Rgb8::new(255, 0, 0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                // Shorthand: expand each digit by multiplying by 17 (0xF -> 0xFF)
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}

/// One source pixel: 8-bit red, green, blue and alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque pixel.
    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// The color channels without alpha.
    #[inline]
    pub const fn rgb(self) -> Rgb8 {
        Rgb8::new(self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing_6digit() {
        let white: Rgb8 = "#FFFFFF".parse().unwrap();
        assert_eq!(white, Rgb8::new(255, 255, 255));

        let magenta: Rgb8 = "ff00ff".parse().unwrap();
        assert_eq!(magenta, Rgb8::new(255, 0, 255));
    }

    #[test]
    fn test_hex_parsing_shorthand() {
        let color: Rgb8 = "#ABC".parse().unwrap();
        assert_eq!(color, Rgb8::new(0xAA, 0xBB, 0xCC));
    }

    #[test]
    fn test_hex_parsing_errors() {
        assert!(matches!(
            "#GGG".parse::<Rgb8>(),
            Err(ParseColorError::InvalidHex(_))
        ));
        assert!(matches!(
            "#FFFF".parse::<Rgb8>(),
            Err(ParseColorError::InvalidLength)
        ));
        assert!(matches!(
            "".parse::<Rgb8>(),
            Err(ParseColorError::InvalidLength)
        ));
        // Multi-byte characters must not panic on slicing
        assert!(matches!(
            "#é0".parse::<Rgb8>(),
            Err(ParseColorError::InvalidLength)
        ));
    }

    #[test]
    fn test_hex_parsing_whitespace() {
        let white: Rgb8 = "  #FFFFFF  ".parse().unwrap();
        assert_eq!(white, Rgb8::new(255, 255, 255));
    }

    #[test]
    fn test_display_round_trips() {
        let color = Rgb8::new(0x12, 0xab, 0x00);
        assert_eq!(color.to_string(), "#12ab00");
        assert_eq!(color.to_string().parse::<Rgb8>().unwrap(), color);
    }

    #[test]
    fn test_rgba_rgb() {
        let px = Rgba::new(1, 2, 3, 0);
        assert_eq!(px.rgb(), Rgb8::new(1, 2, 3));
        assert_eq!(Rgba::opaque(1, 2, 3).a, 255);
    }
}
