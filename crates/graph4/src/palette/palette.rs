//! The 16-entry GRAPHICS 4 palette with nearest-color matching.

use std::fmt::Write as _;
use std::ops::Range;

use super::error::PaletteError;
use crate::color::{MsxColor, Rgb8};

/// Number of palette entries in GRAPHICS 4.
pub const PALETTE_SIZE: usize = 16;

/// Size of the serialized palette: 16 entries x 2 register bytes.
pub const PALETTE_BYTES: usize = PALETTE_SIZE * 2;

/// A GRAPHICS 4 palette: exactly 16 MSX colors.
///
/// When index 0 is reserved it holds the transparency sentinel and is never
/// returned by [`find_nearest()`](Self::find_nearest); only transparent
/// pixels are ever assigned to it. Real colors follow in order, and any
/// remaining slots are padded with [`Palette::PADDING`].
///
/// # Example
///
/// ```
/// use graph4::{MsxColor, Palette};
///
/// let palette = Palette::new(&[MsxColor::BLACK, MsxColor::WHITE], true).unwrap();
///
/// assert_eq!(palette.len(), 16);
/// assert_eq!(palette.get(1), MsxColor::BLACK);
/// assert_eq!(palette.get(2), MsxColor::WHITE);
/// assert_eq!(palette.find_nearest_color(MsxColor::new(6, 6, 6)), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: [MsxColor; PALETTE_SIZE],
    index0_reserved: bool,
    used: usize,
}

impl Palette {
    /// Color stored in the reserved index 0.
    pub const SENTINEL: MsxColor = MsxColor::BLACK;

    /// Color stored in slots the image did not need.
    pub const PADDING: MsxColor = MsxColor::BLACK;

    /// Create a palette from caller-supplied colors.
    ///
    /// Colors are placed in order starting at index 0, or at index 1 when
    /// `reserve_index0` is set.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::EmptyPalette`] if `colors` is empty
    /// - [`PaletteError::TooManyColors`] if the colors do not fit
    /// - [`PaletteError::DuplicateColor`] if a color repeats
    pub fn new(colors: &[MsxColor], reserve_index0: bool) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        let capacity = Self::capacity(reserve_index0);
        if colors.len() > capacity {
            return Err(PaletteError::TooManyColors {
                count: colors.len(),
                capacity,
            });
        }
        for (i, color) in colors.iter().enumerate() {
            if colors[..i].contains(color) {
                return Err(PaletteError::DuplicateColor { index: i });
            }
        }
        Ok(Self::from_ordered(colors, reserve_index0))
    }

    /// Create a palette from hex strings (`#RRGGBB` or `#RGB`).
    ///
    /// Each color is reduced to the nearest MSX color before validation, so
    /// two hex colors that reduce to the same MSX color are duplicates.
    ///
    /// ```
    /// use graph4::{MsxColor, Palette};
    ///
    /// let palette = Palette::from_hex(&["#000000", "#ff0000"], false).unwrap();
    /// assert_eq!(palette.get(1), MsxColor::new(7, 0, 0));
    /// ```
    pub fn from_hex(colors: &[&str], reserve_index0: bool) -> Result<Self, PaletteError> {
        let parsed = colors
            .iter()
            .map(|s| s.parse::<Rgb8>().map(MsxColor::from))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&parsed, reserve_index0)
    }

    /// Build a palette from already-selected distinct colors.
    ///
    /// Used by the builder, which guarantees distinctness and capacity.
    pub(crate) fn from_ordered(colors: &[MsxColor], reserve_index0: bool) -> Self {
        let first = usize::from(reserve_index0);
        let used = colors.len().min(PALETTE_SIZE - first);

        let mut entries = [Self::PADDING; PALETTE_SIZE];
        if reserve_index0 {
            entries[0] = Self::SENTINEL;
        }
        entries[first..first + used].copy_from_slice(&colors[..used]);

        Self {
            entries,
            index0_reserved: reserve_index0,
            used,
        }
    }

    /// Number of slots available for image colors.
    #[inline]
    pub const fn capacity(reserve_index0: bool) -> usize {
        if reserve_index0 {
            PALETTE_SIZE - 1
        } else {
            PALETTE_SIZE
        }
    }

    /// Always 16.
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        PALETTE_SIZE
    }

    /// All 16 entries, including sentinel and padding.
    #[inline]
    pub fn entries(&self) -> &[MsxColor; PALETTE_SIZE] {
        &self.entries
    }

    /// Entry at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 16`.
    #[inline]
    pub fn get(&self, index: usize) -> MsxColor {
        self.entries[index]
    }

    #[inline]
    pub fn is_index0_reserved(&self) -> bool {
        self.index0_reserved
    }

    /// Number of real colors (sentinel and padding excluded).
    #[inline]
    pub fn used_colors(&self) -> usize {
        self.used
    }

    /// Indices eligible for non-transparent pixels.
    #[inline]
    pub fn candidates(&self) -> Range<usize> {
        let first = usize::from(self.index0_reserved);
        first..first + self.used
    }

    /// Find the nearest candidate entry to a color given in 3-bit units.
    ///
    /// Distance is squared Euclidean in 3-3-3 space. Ties go to the lowest
    /// index: the scan runs in ascending order and only a strictly smaller
    /// distance replaces the current best. A palette without any real color
    /// (an image that was entirely transparent) returns its first candidate
    /// slot.
    pub fn find_nearest(&self, color: [f32; 3]) -> u8 {
        let candidates = self.candidates();
        let mut best = candidates.start;
        let mut best_dist = f32::INFINITY;

        for i in candidates {
            let entry = self.entries[i].channels();
            let dr = color[0] - entry[0];
            let dg = color[1] - entry[1];
            let db = color[2] - entry[2];
            let dist = dr * dr + dg * dg + db * db;
            if dist < best_dist {
                best_dist = dist;
                best = i;
            }
        }

        best as u8
    }

    /// [`find_nearest()`](Self::find_nearest) for an exact MSX color.
    #[inline]
    pub fn find_nearest_color(&self, color: MsxColor) -> u8 {
        self.find_nearest(color.channels())
    }

    /// Serialize to the 32-byte palette register block.
    pub fn to_bytes(&self) -> [u8; PALETTE_BYTES] {
        let mut out = [0u8; PALETTE_BYTES];
        for (chunk, color) in out.chunks_exact_mut(2).zip(self.entries.iter()) {
            chunk.copy_from_slice(&color.register_bytes());
        }
        out
    }

    /// Plain-text listing, one `index: r, g, b` line per entry.
    ///
    /// ```
    /// use graph4::{MsxColor, Palette};
    ///
    /// let palette = Palette::new(&[MsxColor::new(7, 0, 3)], false).unwrap();
    /// let text = palette.to_text();
    /// assert!(text.starts_with("SCREEN 5 palette:\n0: 7, 0, 3\n"));
    /// ```
    pub fn to_text(&self) -> String {
        let mut text = String::from("SCREEN 5 palette:\n");
        for (i, c) in self.entries.iter().enumerate() {
            let _ = writeln!(text, "{}: {}, {}, {}", i, c.r(), c.g(), c.b());
        }
        text
    }
}
