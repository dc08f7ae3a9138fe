use std::fmt;
use std::str::FromStr;

use crate::api::ParseOptionError;

/// Width of a GRAPHICS 4 screen in pixels.
pub const SCREEN_WIDTH: usize = 256;

/// Bytes per packed row of a full-width screen.
pub const BYTES_PER_ROW: usize = SCREEN_WIDTH / 2;

/// Rows per VRAM page, visible or not.
pub const PAGE_ROWS: usize = 256;

/// Bytes per VRAM page.
pub const PAGE_BYTES: usize = PAGE_ROWS * BYTES_PER_ROW;

/// Number of VRAM pages in GRAPHICS 4.
pub const MAX_PAGES: usize = 4;

/// Visible lines of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewportHeight {
    /// 192 lines (MSX1-compatible timing)
    Lines192,
    /// 212 lines
    #[default]
    Lines212,
}

impl ViewportHeight {
    pub const NAMES: &'static [&'static str] = &["192", "212"];

    #[inline]
    pub const fn lines(self) -> usize {
        match self {
            ViewportHeight::Lines192 => 192,
            ViewportHeight::Lines212 => 212,
        }
    }

    /// `None` for anything but 192 or 212.
    pub const fn from_lines(lines: usize) -> Option<Self> {
        match lines {
            192 => Some(ViewportHeight::Lines192),
            212 => Some(ViewportHeight::Lines212),
            _ => None,
        }
    }
}

impl fmt::Display for ViewportHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines())
    }
}

impl FromStr for ViewportHeight {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<usize>()
            .ok()
            .and_then(Self::from_lines)
            .ok_or_else(|| ParseOptionError::new("viewport height", s, Self::NAMES))
    }
}

/// How an image of a given height is laid out over VRAM pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGeometry {
    viewport: ViewportHeight,
    page_count: usize,
}

impl PageGeometry {
    /// Geometry for an image `height` rows tall.
    ///
    /// Each page holds `viewport` image rows. Returns `None` when the image
    /// needs no page (height 0) or more than [`MAX_PAGES`].
    ///
    /// ```
    /// use graph4::{PageGeometry, ViewportHeight};
    ///
    /// let g = PageGeometry::for_height(424, ViewportHeight::Lines212).unwrap();
    /// assert_eq!(g.page_count(), 2);
    /// assert!(PageGeometry::for_height(849, ViewportHeight::Lines212).is_none());
    /// ```
    pub fn for_height(height: usize, viewport: ViewportHeight) -> Option<Self> {
        let page_count = height.div_ceil(viewport.lines());
        (1..=MAX_PAGES).contains(&page_count).then_some(Self {
            viewport,
            page_count,
        })
    }

    #[inline]
    pub fn viewport(&self) -> ViewportHeight {
        self.viewport
    }

    #[inline]
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Tallest image these pages can hold.
    #[inline]
    pub fn max_rows(&self) -> usize {
        self.page_count * self.viewport.lines()
    }

    /// Size of the packed pattern: whole pages.
    #[inline]
    pub fn pattern_len(&self) -> usize {
        self.page_count * PAGE_BYTES
    }

    /// Byte offset of image row `y` inside the packed pattern.
    #[inline]
    pub fn row_offset(&self, y: usize) -> usize {
        let lines = self.viewport.lines();
        (y / lines) * PAGE_BYTES + (y % lines) * BYTES_PER_ROW
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_is_32k() {
        assert_eq!(PAGE_BYTES, 32768);
    }

    #[test]
    fn test_page_count() {
        let vp = ViewportHeight::Lines212;
        assert!(PageGeometry::for_height(0, vp).is_none());
        assert_eq!(PageGeometry::for_height(1, vp).unwrap().page_count(), 1);
        assert_eq!(PageGeometry::for_height(212, vp).unwrap().page_count(), 1);
        assert_eq!(PageGeometry::for_height(213, vp).unwrap().page_count(), 2);
        assert_eq!(PageGeometry::for_height(848, vp).unwrap().page_count(), 4);
        assert!(PageGeometry::for_height(849, vp).is_none());

        let vp = ViewportHeight::Lines192;
        assert_eq!(PageGeometry::for_height(193, vp).unwrap().page_count(), 2);
        assert_eq!(PageGeometry::for_height(768, vp).unwrap().max_rows(), 768);
        assert!(PageGeometry::for_height(769, vp).is_none());
    }

    #[test]
    fn test_row_offset_crosses_pages() {
        let g = PageGeometry::for_height(400, ViewportHeight::Lines192).unwrap();
        assert_eq!(g.row_offset(0), 0);
        assert_eq!(g.row_offset(191), 191 * 128);
        assert_eq!(g.row_offset(192), PAGE_BYTES);
        assert_eq!(g.row_offset(385), 2 * PAGE_BYTES + 128);
    }

    #[test]
    fn test_viewport_parsing() {
        assert_eq!("192".parse::<ViewportHeight>().unwrap(), ViewportHeight::Lines192);
        assert_eq!(" 212 ".parse::<ViewportHeight>().unwrap(), ViewportHeight::Lines212);
        assert!("200".parse::<ViewportHeight>().is_err());
        assert!("tall".parse::<ViewportHeight>().is_err());
    }
}
