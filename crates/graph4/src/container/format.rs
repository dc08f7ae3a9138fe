use std::fmt;
use std::str::FromStr;

use crate::api::{EncodeError, ParseOptionError};
use crate::pack::{PageGeometry, ViewportHeight, MAX_PAGES, PAGE_ROWS, SCREEN_WIDTH};

/// Tallest image a COPY (`.DAT`) file can hold.
pub const COPY_MAX_HEIGHT: usize = 212;

/// Tallest headerless (`.RAW`) image: every row of all four pages.
///
/// Rows are packed back to back, so the viewport does not apply.
pub const HEADERLESS_MAX_HEIGHT: usize = PAGE_ROWS * MAX_PAGES;

/// The legacy file layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// `.SC5`: pattern pages followed by the palette, palette also at 0x7680.
    #[default]
    Combined,
    /// `.SR5` + `.PAL`: pattern pages and palette in separate files.
    Split,
    /// `.DAT` + `.PAL`: MSX-BASIC `COPY` layout, one screen at most.
    Raw,
    /// `.RAW`: bare packed rows, nothing else.
    Headerless,
}

impl OutputFormat {
    pub const NAMES: &'static [&'static str] = &["combined", "split", "raw", "headerless"];

    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Combined => "combined",
            OutputFormat::Split => "split",
            OutputFormat::Raw => "raw",
            OutputFormat::Headerless => "headerless",
        }
    }

    /// Tallest accepted image for this format and viewport.
    ///
    /// Only the paged formats depend on the viewport.
    ///
    /// ```
    /// use graph4::{OutputFormat, ViewportHeight};
    ///
    /// assert_eq!(OutputFormat::Combined.max_height(ViewportHeight::Lines212), 848);
    /// assert_eq!(OutputFormat::Raw.max_height(ViewportHeight::Lines212), 212);
    /// assert_eq!(OutputFormat::Headerless.max_height(ViewportHeight::Lines192), 1024);
    /// ```
    pub fn max_height(self, viewport: ViewportHeight) -> usize {
        match self {
            OutputFormat::Combined | OutputFormat::Split => viewport.lines() * MAX_PAGES,
            OutputFormat::Raw => COPY_MAX_HEIGHT,
            OutputFormat::Headerless => HEADERLESS_MAX_HEIGHT,
        }
    }

    /// Whether the pattern is laid out in whole VRAM pages.
    #[inline]
    pub fn is_paged(self) -> bool {
        matches!(self, OutputFormat::Combined | OutputFormat::Split)
    }

    /// Check that a `width` x `height` image fits this format.
    ///
    /// Width must be 256 and height `1..=max_height(viewport)`. Paged
    /// formats get their page layout back, row formats `None`.
    pub fn geometry(
        self,
        width: usize,
        height: usize,
        viewport: ViewportHeight,
    ) -> Result<Option<PageGeometry>, EncodeError> {
        let max_height = self.max_height(viewport);
        let invalid = || EncodeError::InvalidGeometry {
            width,
            height,
            format: self,
            max_height,
        };
        if width != SCREEN_WIDTH || height == 0 || height > max_height {
            return Err(invalid());
        }
        if self.is_paged() {
            PageGeometry::for_height(height, viewport)
                .map(Some)
                .ok_or_else(invalid)
        } else {
            Ok(None)
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "combined" | "sc5" => Ok(OutputFormat::Combined),
            "split" | "sr5" => Ok(OutputFormat::Split),
            "raw" | "copy" | "dat" => Ok(OutputFormat::Raw),
            "headerless" => Ok(OutputFormat::Headerless),
            _ => Err(ParseOptionError::new("output format", s, Self::NAMES)),
        }
    }
}
