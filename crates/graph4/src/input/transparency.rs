use crate::color::{Rgb8, Rgba};

/// Which pixels are forced to palette index 0.
///
/// Only active when index 0 is reserved. A pixel is then transparent when
/// its alpha is exactly 0 or its RGB equals the configured color. Any other
/// alpha counts as opaque. Without reservation nothing is transparent and
/// alpha is ignored entirely.
///
/// # Example
///
/// ```
/// use graph4::{Rgb8, Rgba, Transparency};
///
/// let t = Transparency::new(true, Some(Rgb8::new(255, 0, 255)));
/// assert!(t.is_transparent(Rgba::new(255, 0, 255, 255)));
/// assert!(t.is_transparent(Rgba::new(12, 34, 56, 0)));
/// assert!(!t.is_transparent(Rgba::new(12, 34, 56, 1)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transparency {
    reserve_index0: bool,
    color: Option<Rgb8>,
}

impl Transparency {
    pub const fn new(reserve_index0: bool, color: Option<Rgb8>) -> Self {
        Self {
            reserve_index0,
            color,
        }
    }

    /// No reservation, every pixel is opaque.
    pub const fn disabled() -> Self {
        Self::new(false, None)
    }

    #[inline]
    pub fn reserves_index0(&self) -> bool {
        self.reserve_index0
    }

    #[inline]
    pub fn color(&self) -> Option<Rgb8> {
        self.color
    }

    #[inline]
    pub fn is_transparent(&self, pixel: Rgba) -> bool {
        self.reserve_index0 && (pixel.a == 0 || self.color == Some(pixel.rgb()))
    }
}
