//! Dithering options and configuration.

use super::DitherAlgorithm;

/// Configuration for the quantizer.
///
/// # Defaults
///
/// - Dithering: enabled
/// - Strength: `1.0` (full kernel weights)
/// - Algorithm: Floyd-Steinberg
///
/// # Example
///
/// ```
/// use graph4::{DitherAlgorithm, DitherOptions};
///
/// let options = DitherOptions::new()
///     .algorithm(DitherAlgorithm::Atkinson)
///     .strength(0.5);
/// assert_eq!(options.strength_value(), 0.5);
///
/// // Out-of-range strengths are clamped
/// assert_eq!(DitherOptions::new().strength(3.0).strength_value(), 1.0);
/// ```
///
/// The strength can only be set through the clamping setter:
///
/// ```compile_fail
/// use graph4::{DitherAlgorithm, DitherOptions};
///
/// let options = DitherOptions {
///     enabled: true,
///     strength: 5.0,
///     algorithm: DitherAlgorithm::Atkinson,
/// };
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DitherOptions {
    /// Diffuse quantization error to neighbors.
    ///
    /// When disabled every pixel maps to its nearest palette entry.
    pub enabled: bool,

    /// Scale applied to the diffused error, always in `[0, 1]`.
    ///
    /// Only settable through [`strength()`](Self::strength), which clamps.
    strength: f32,

    /// Diffusion kernel.
    pub algorithm: DitherAlgorithm,
}

impl Default for DitherOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            strength: 1.0,
            algorithm: DitherAlgorithm::default(),
        }
    }
}

impl DitherOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the error scale. Clamped to `[0, 1]`; NaN becomes `0`.
    #[inline]
    pub fn strength(mut self, strength: f32) -> Self {
        self.strength = if strength.is_nan() {
            0.0
        } else {
            strength.clamp(0.0, 1.0)
        };
        self
    }

    #[inline]
    pub fn algorithm(mut self, algorithm: DitherAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// The clamped error scale. `0.0` behaves exactly like disabled
    /// dithering.
    #[inline]
    pub fn strength_value(&self) -> f32 {
        self.strength
    }

    /// Strength actually applied: `0` when dithering is off.
    #[inline]
    pub(crate) fn effective_strength(&self) -> f32 {
        if self.enabled {
            self.strength
        } else {
            0.0
        }
    }
}
