//! Palette derivation from image content.
//!
//! The builder counts how many pixels use each reduced MSX color and keeps
//! the colors that cover the most pixels. When the image uses more colors
//! than there are free slots, a [`PalettePolicy`] decides which survive.

use std::fmt;
use std::str::FromStr;

use super::error::PaletteError;
use super::palette::Palette;
use crate::api::ParseOptionError;
use crate::color::MsxColor;
use crate::input::{SourceImage, Transparency};

/// Number of distinct MSX colors.
const COLOR_SPACE: usize = 512;

/// How to pick the palette when the image has more colors than free slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PalettePolicy {
    /// Keep the colors covering the most pixels, drop the rest.
    ///
    /// Ties are broken by the lower 9-bit color code.
    #[default]
    MostFrequent,

    /// Repeatedly fold the least used color into its nearest neighbour.
    ///
    /// The removed color's pixel count is added to the nearest remaining
    /// color (Euclidean 3-3-3 distance), so a large family of similar rare
    /// shades can outvote a single common color. Ties: the removed color is
    /// the one with the highest code, the receiving color the one with the
    /// lowest code.
    MergeNearest,
}

impl PalettePolicy {
    pub const NAMES: &'static [&'static str] = &["most-frequent", "merge-nearest"];

    pub fn name(self) -> &'static str {
        match self {
            PalettePolicy::MostFrequent => "most-frequent",
            PalettePolicy::MergeNearest => "merge-nearest",
        }
    }
}

impl fmt::Display for PalettePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PalettePolicy {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "most-frequent" => Ok(PalettePolicy::MostFrequent),
            "merge-nearest" => Ok(PalettePolicy::MergeNearest),
            _ => Err(ParseOptionError::new("palette policy", s, Self::NAMES)),
        }
    }
}

/// Where the palette comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteSource {
    /// Derive from the image's own colors.
    Derive(PalettePolicy),
    /// Use the given colors in order (validated by [`Palette::new()`]).
    Fixed(Vec<MsxColor>),
}

impl Default for PaletteSource {
    fn default() -> Self {
        PaletteSource::Derive(PalettePolicy::default())
    }
}

/// What the builder saw while building a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteStats {
    /// Distinct reduced colors among non-transparent pixels
    pub distinct_colors: usize,
    /// Free palette slots (16, or 15 with index 0 reserved)
    pub capacity: usize,
    /// Pixels that will be forced to index 0
    pub transparent_pixels: u64,
}

impl PaletteStats {
    /// True when the image had more colors than slots and some were dropped
    /// or merged.
    #[inline]
    pub fn overflowed(&self) -> bool {
        self.distinct_colors > self.capacity
    }
}

/// Builds the 16-entry working palette for one image.
///
/// # Example
///
/// ```
/// use graph4::{ChannelLayout, PaletteBuilder, SourceImage, Transparency};
///
/// // 2x1 image: one red and one blue pixel
/// let data = [255, 0, 0, 0, 0, 255];
/// let image = SourceImage::new(&data, 2, 1, ChannelLayout::Rgb).unwrap();
///
/// let (palette, stats) = PaletteBuilder::new(Transparency::disabled())
///     .build(&image)
///     .unwrap();
/// assert_eq!(stats.distinct_colors, 2);
/// assert_eq!(palette.used_colors(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PaletteBuilder {
    source: PaletteSource,
    transparency: Transparency,
}

impl PaletteBuilder {
    pub fn new(transparency: Transparency) -> Self {
        Self {
            source: PaletteSource::default(),
            transparency,
        }
    }

    /// Set where the palette comes from.
    #[inline]
    pub fn source(mut self, source: PaletteSource) -> Self {
        self.source = source;
        self
    }

    /// Build the palette for `image`.
    ///
    /// # Errors
    ///
    /// Only a [`PaletteSource::Fixed`] palette can fail validation; derived
    /// palettes always succeed.
    pub fn build(&self, image: &SourceImage<'_>) -> Result<(Palette, PaletteStats), PaletteError> {
        let reserve = self.transparency.reserves_index0();
        let capacity = Palette::capacity(reserve);
        let histogram = Histogram::from_image(image, &self.transparency);

        let stats = PaletteStats {
            distinct_colors: histogram.distinct(),
            capacity,
            transparent_pixels: histogram.transparent,
        };

        let palette = match &self.source {
            PaletteSource::Fixed(colors) => Palette::new(colors, reserve)?,
            PaletteSource::Derive(policy) => {
                let ranked = histogram.ranked();
                let selected = if ranked.len() <= capacity {
                    ranked
                } else {
                    match policy {
                        PalettePolicy::MostFrequent => {
                            ranked.into_iter().take(capacity).collect()
                        }
                        PalettePolicy::MergeNearest => merge_nearest(ranked, capacity),
                    }
                };
                let colors: Vec<MsxColor> = selected.iter().map(|&(c, _)| c).collect();
                Palette::from_ordered(&colors, reserve)
            }
        };

        Ok((palette, stats))
    }
}

/// Pixel counts per reduced color.
struct Histogram {
    counts: Vec<u64>,
    transparent: u64,
}

impl Histogram {
    fn from_image(image: &SourceImage<'_>, transparency: &Transparency) -> Self {
        let mut counts = vec![0u64; COLOR_SPACE];
        let mut transparent = 0;
        for pixel in image.pixels() {
            if transparency.is_transparent(pixel) {
                transparent += 1;
            } else {
                counts[MsxColor::from(pixel).code() as usize] += 1;
            }
        }
        Self {
            counts,
            transparent,
        }
    }

    fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&n| n > 0).count()
    }

    /// Used colors, most frequent first, ties by ascending code.
    fn ranked(&self) -> Vec<(MsxColor, u64)> {
        let mut ranked: Vec<(MsxColor, u64)> = self
            .counts
            .iter()
            .enumerate()
            .filter(|&(_, &n)| n > 0)
            .map(|(code, &n)| (MsxColor::from_code(code as u16), n))
            .collect();
        sort_by_frequency(&mut ranked);
        ranked
    }
}

fn sort_by_frequency(colors: &mut [(MsxColor, u64)]) {
    colors.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
}

fn merge_nearest(mut pool: Vec<(MsxColor, u64)>, capacity: usize) -> Vec<(MsxColor, u64)> {
    while pool.len() > capacity {
        let victim = pool
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
            .map(|(i, _)| i);
        let Some(victim) = victim else { break };
        let (color, count) = pool.remove(victim);

        let target = pool
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                color
                    .distance_sq(a.0)
                    .cmp(&color.distance_sq(b.0))
                    .then(a.0.cmp(&b.0))
            })
            .map(|(i, _)| i);
        let Some(target) = target else { break };
        pool[target].1 += count;
    }
    sort_by_frequency(&mut pool);
    pool
}
