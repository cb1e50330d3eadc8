//! Hue-saturation-value color representation and thresholding bounds.
//!
//! Vegetation is isolated by thresholding in HSV rather than RGB:
//! chlorophyll color in RGB varies with illumination, while hue is
//! comparatively illumination-invariant. Saturation and value bounds
//! suppress shadow and near-white artifacts.
//!
//! Hue is stored in degrees (`0.0..360.0`); saturation and value use
//! the full `u8` range, matching the 8-bit pixel data they derive from.

use image::Rgb;
use serde::{Deserialize, Serialize};

/// A color in hue-saturation-value space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsv {
    /// Hue angle in degrees, `0.0..360.0`. Zero for achromatic colors.
    pub hue: f32,
    /// Saturation, `0` (gray) to `255` (fully saturated).
    pub saturation: u8,
    /// Value (brightness), `0` (black) to `255`.
    pub value: u8,
}

impl Hsv {
    /// Create an HSV color.
    #[must_use]
    pub const fn new(hue: f32, saturation: u8, value: u8) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }

    /// Convert an 8-bit RGB pixel to HSV.
    ///
    /// Value is the maximum channel, saturation the ratio of channel
    /// spread to the maximum, and hue is derived from the relative
    /// ordering of the three channels. Reference values: pure green
    /// `(0, 255, 0)` maps to hue 120°, pure blue to 240°.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_rgb(pixel: Rgb<u8>) -> Self {
        let [r, g, b] = pixel.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = f32::from(max) - f32::from(min);

        let saturation = if max == 0 {
            0
        } else {
            (delta / f32::from(max) * 255.0).round() as u8
        };

        let hue = if delta == 0.0 {
            0.0
        } else {
            let segment = if max == r {
                (f32::from(g) - f32::from(b)) / delta
            } else if max == g {
                (f32::from(b) - f32::from(r)) / delta + 2.0
            } else {
                (f32::from(r) - f32::from(g)) / delta + 4.0
            };
            (segment * 60.0).rem_euclid(360.0)
        };

        Self {
            hue,
            saturation,
            value: max,
        }
    }
}

/// Inclusive lower/upper HSV bounds defining which pixels count as
/// vegetation.
///
/// Bands that wrap around the 0°/360° hue discontinuity are not
/// supported; `lower.hue` must not exceed `upper.hue`. The vegetation
/// band sits comfortably in the middle of the circle, so this never
/// matters in practice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HsvRange {
    /// Inclusive lower bound.
    pub lower: Hsv,
    /// Inclusive upper bound.
    pub upper: Hsv,
}

impl HsvRange {
    /// The healthy-vegetation band of NDVI coloring: yellow-green to
    /// green hues at high saturation and high value.
    pub const VEGETATION: Self = Self {
        lower: Hsv::new(84.0, 197, 245),
        upper: Hsv::new(168.0, 255, 255),
    };

    /// Whether all three components of `color` fall within the bounds.
    #[must_use]
    pub fn contains(&self, color: Hsv) -> bool {
        (self.lower.hue..=self.upper.hue).contains(&color.hue)
            && (self.lower.saturation..=self.upper.saturation).contains(&color.saturation)
            && (self.lower.value..=self.upper.value).contains(&color.value)
    }
}

impl Default for HsvRange {
    fn default() -> Self {
        Self::VEGETATION
    }
}
