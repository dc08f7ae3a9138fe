//! Palette index assignment with optional error diffusion.
//!
//! [`quantize()`] walks the image strictly in raster order. For every
//! non-transparent pixel it adds the pending error to the reduced MSX color,
//! picks the nearest palette entry and pushes the remaining error (scaled by
//! the dither strength) to unvisited neighbors through an [`ErrorBuffer`].
//!
//! Transparent pixels are written as index 0 and are skipped entirely: their
//! pending error is discarded and they diffuse nothing.
//!
//! # Example
//!
//! ```
//! use graph4::{quantize, ChannelLayout, DitherOptions, MsxColor, Palette, SourceImage, Transparency};
//!
//! let palette = Palette::new(&[MsxColor::BLACK, MsxColor::WHITE], false).unwrap();
//! let data = [0, 0, 0, 255, 255, 255];
//! let image = SourceImage::new(&data, 2, 1, ChannelLayout::Rgb).unwrap();
//!
//! let indices = quantize(&image, &palette, &Transparency::disabled(), &DitherOptions::new());
//! assert_eq!(indices, vec![0, 1]);
//! ```

mod kernel;
mod options;

pub use kernel::*;
pub use options::DitherOptions;

use std::fmt;
use std::str::FromStr;

use crate::api::ParseOptionError;
use crate::color::{MsxColor, CHANNEL_MAX};
use crate::input::{SourceImage, Transparency};
use crate::palette::Palette;

/// Error diffusion kernel selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DitherAlgorithm {
    /// Floyd-Steinberg, 4 neighbors, 100% propagation.
    #[default]
    FloydSteinberg,

    /// Atkinson, 6 neighbors, 75% propagation.
    ///
    /// Keeps flat areas cleaner at the cost of some contrast.
    Atkinson,

    /// Sierra Lite, 3 neighbors, 100% propagation.
    SierraLite,

    /// Sierra two-row, 7 neighbors, 100% propagation.
    SierraTwoRow,

    /// Jarvis-Judice-Ninke, 12 neighbors over 3 rows, 100% propagation.
    JarvisJudiceNinke,
}

impl DitherAlgorithm {
    /// Spellings accepted by `FromStr`.
    pub const NAMES: &'static [&'static str] = &[
        "floyd-steinberg",
        "atkinson",
        "sierra-lite",
        "sierra-two-row",
        "jarvis-judice-ninke",
    ];

    /// The diffusion kernel for this algorithm.
    pub fn kernel(self) -> &'static Kernel {
        match self {
            DitherAlgorithm::FloydSteinberg => &FLOYD_STEINBERG,
            DitherAlgorithm::Atkinson => &ATKINSON,
            DitherAlgorithm::SierraLite => &SIERRA_LITE,
            DitherAlgorithm::SierraTwoRow => &SIERRA_TWO_ROW,
            DitherAlgorithm::JarvisJudiceNinke => &JARVIS_JUDICE_NINKE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DitherAlgorithm::FloydSteinberg => "floyd-steinberg",
            DitherAlgorithm::Atkinson => "atkinson",
            DitherAlgorithm::SierraLite => "sierra-lite",
            DitherAlgorithm::SierraTwoRow => "sierra-two-row",
            DitherAlgorithm::JarvisJudiceNinke => "jarvis-judice-ninke",
        }
    }
}

impl fmt::Display for DitherAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DitherAlgorithm {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "floyd-steinberg" | "fs" => Ok(DitherAlgorithm::FloydSteinberg),
            "atkinson" => Ok(DitherAlgorithm::Atkinson),
            "sierra-lite" => Ok(DitherAlgorithm::SierraLite),
            "sierra-two-row" => Ok(DitherAlgorithm::SierraTwoRow),
            "jarvis-judice-ninke" | "jjn" => Ok(DitherAlgorithm::JarvisJudiceNinke),
            _ => Err(ParseOptionError::new("dither algorithm", s, Self::NAMES)),
        }
    }
}

/// Error buffer for error diffusion.
///
/// Holds a sliding window of error rows, only as many as the kernel can
/// reach (`max_dy + 1`). Errors are in 3-bit channel units.
///
/// # Usage Pattern
///
/// 1. Create buffer with `new(width, row_depth)`
/// 2. For each row:
///    a. Read accumulated error with `get_accumulated(x)`
///    b. After processing pixel, distribute error with `add_error(x, dy, error)`
///    c. After row complete, call `advance_row()`
#[derive(Debug)]
pub struct ErrorBuffer {
    /// Error rows: rows[0] is current row, rows[1] is next, etc.
    rows: Vec<Vec<[f32; 3]>>,
    width: usize,
}

impl ErrorBuffer {
    /// Create a new error buffer tracking `row_depth` rows of `width` pixels.
    pub fn new(width: usize, row_depth: usize) -> Self {
        Self {
            rows: (0..row_depth).map(|_| vec![[0.0; 3]; width]).collect(),
            width,
        }
    }

    /// Error accumulated so far for pixel `x` of the current row.
    #[inline]
    pub fn get_accumulated(&self, x: usize) -> [f32; 3] {
        self.rows[0][x]
    }

    /// Add error to a future pixel.
    ///
    /// `row_offset` 0 is the current row. Out-of-bounds targets are ignored.
    #[inline]
    pub fn add_error(&mut self, x: usize, row_offset: usize, error: [f32; 3]) {
        if x < self.width && row_offset < self.rows.len() {
            for c in 0..3 {
                self.rows[row_offset][x][c] += error[c];
            }
        }
    }

    /// Discard the current row and start a zeroed row at the far end.
    pub fn advance_row(&mut self) {
        // Rotate left: [0,1,2] -> [1,2,0]
        self.rows.rotate_left(1);
        if let Some(last) = self.rows.last_mut() {
            last.fill([0.0; 3]);
        }
    }
}

#[inline]
fn clamp_channel(value: f32) -> f32 {
    value.clamp(0.0, CHANNEL_MAX as f32)
}

/// Map every pixel of `image` to a palette index.
///
/// Returns `width * height` indices in row-major order, each below 16.
/// Transparent pixels (see [`Transparency`]) are always 0. The result is
/// fully deterministic.
pub fn quantize(
    image: &SourceImage<'_>,
    palette: &Palette,
    transparency: &Transparency,
    options: &DitherOptions,
) -> Vec<u8> {
    let width = image.width();
    let height = image.height();
    let mut output = vec![0u8; width * height];

    let kernel = options.algorithm.kernel();
    let strength = options.effective_strength();
    let mut error_buf = ErrorBuffer::new(width, kernel.max_dy + 1);

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let pixel = image.pixel(x, y);

            if transparency.is_transparent(pixel) {
                output[idx] = 0;
                continue;
            }

            let base = MsxColor::from(pixel).channels();
            let accumulated = error_buf.get_accumulated(x);
            let working = [
                clamp_channel(base[0] + accumulated[0]),
                clamp_channel(base[1] + accumulated[1]),
                clamp_channel(base[2] + accumulated[2]),
            ];

            let nearest = palette.find_nearest(working);
            output[idx] = nearest;

            if strength == 0.0 {
                continue;
            }

            let entry = palette.get(nearest as usize).channels();
            let error = [
                (working[0] - entry[0]) * strength,
                (working[1] - entry[1]) * strength,
                (working[2] - entry[2]) * strength,
            ];

            let divisor = kernel.divisor as f32;
            for &(dx, dy, weight) in kernel.entries {
                let nx = x as i32 + dx;
                if nx >= 0 && (nx as usize) < width && y + (dy as usize) < height {
                    let w = weight as f32 / divisor;
                    error_buf.add_error(
                        nx as usize,
                        dy as usize,
                        [error[0] * w, error[1] * w, error[2] * w],
                    );
                }
            }
        }
        error_buf.advance_row();
    }

    output
}
