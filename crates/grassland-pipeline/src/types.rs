//! Shared types for the grassland segmentation pipeline.

use serde::{Deserialize, Serialize};

use crate::hsv::HsvRange;

/// Re-export `GrayImage` so downstream crates can reference masks and
/// edge maps without depending on `image` directly.
pub use image::GrayImage;

/// Re-export `RgbImage` so downstream crates can reference decoded
/// rasters without depending on `image` directly.
///
/// All color data in this pipeline is 8-bit, 3-channel, RGB byte order.
pub use image::RgbImage;

/// A 2D point in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position (pixels from left edge).
    pub x: f64,
    /// Vertical position (pixels from top edge).
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Avoids the square root for comparison purposes.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.mul_add(dx, dy * dy)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Dimensions of an RGB raster.
    #[must_use]
    pub fn of(image: &RgbImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
        }
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Configuration for the segmentation and contour extraction pipeline.
///
/// All parameters have defaults matching the reference map-processing
/// behavior. The pipeline holds no process-wide state; a config is
/// passed explicitly into [`crate::process_images`] per invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Inclusive HSV bounds selecting vegetation pixels in the NDVI map.
    pub vegetation_range: HsvRange,

    /// Gaussian smoothing kernel width in pixels. Must be odd; even
    /// values are rounded up. Values below 3 disable smoothing.
    pub blur_kernel: u32,

    /// Gaussian smoothing kernel sigma. Non-positive values disable
    /// smoothing.
    pub blur_sigma: f32,

    /// Canny edge detector low threshold.
    ///
    /// Clamped to at least [`crate::edge::MIN_THRESHOLD`] and at most
    /// `canny_high`.
    pub canny_low: f32,

    /// Canny edge detector high threshold. The reference behavior uses
    /// equal low/high thresholds, a deliberately permissive near
    /// single-threshold configuration.
    pub canny_high: f32,

    /// Minimum enclosed area (in square pixels) for a contour to
    /// survive noise filtering. The comparison is strict: a contour is
    /// kept only when its area exceeds this value.
    pub min_contour_area: f64,

    /// Polygon approximation accuracy as a fraction of each contour's
    /// perimeter. Used for the simplified polygon attached to every
    /// kept contour; drawing always uses the raw boundary.
    pub approx_accuracy_ratio: f64,

    /// Stroke color for drawn contour boundaries, RGB byte order.
    pub stroke_color: [u8; 3],

    /// Stroke width in pixels for drawn contour boundaries.
    pub stroke_width: u32,
}

impl PipelineConfig {
    /// Default Gaussian kernel width (matches the reference 7x7 window).
    pub const DEFAULT_BLUR_KERNEL: u32 = 7;
    /// Default Gaussian sigma.
    pub const DEFAULT_BLUR_SIGMA: f32 = 1.0;
    /// Default Canny low threshold.
    pub const DEFAULT_CANNY_LOW: f32 = 50.0;
    /// Default Canny high threshold.
    pub const DEFAULT_CANNY_HIGH: f32 = 50.0;
    /// Default minimum contour area in square pixels.
    pub const DEFAULT_MIN_CONTOUR_AREA: f64 = 50.0;
    /// Default polygon approximation accuracy ratio.
    pub const DEFAULT_APPROX_ACCURACY_RATIO: f64 = 0.02;
    /// Default stroke color (pure red).
    pub const DEFAULT_STROKE_COLOR: [u8; 3] = [255, 0, 0];
    /// Default stroke width in pixels.
    pub const DEFAULT_STROKE_WIDTH: u32 = 2;
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            vegetation_range: HsvRange::VEGETATION,
            blur_kernel: Self::DEFAULT_BLUR_KERNEL,
            blur_sigma: Self::DEFAULT_BLUR_SIGMA,
            canny_low: Self::DEFAULT_CANNY_LOW,
            canny_high: Self::DEFAULT_CANNY_HIGH,
            min_contour_area: Self::DEFAULT_MIN_CONTOUR_AREA,
            approx_accuracy_ratio: Self::DEFAULT_APPROX_ACCURACY_RATIO,
            stroke_color: Self::DEFAULT_STROKE_COLOR,
            stroke_width: Self::DEFAULT_STROKE_WIDTH,
        }
    }
}

/// Result of running the full pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessResult {
    /// The composed road map with vegetation boundaries drawn on it,
    /// encoded as PNG bytes. Always a valid, decodable image, even
    /// when no vegetation was detected.
    pub encoded: Vec<u8>,

    /// The surviving contours, in extraction order. Each retains its
    /// raw boundary (used for drawing) and its simplified polygon.
    pub contours: Vec<crate::contour::Contour>,

    /// Dimensions of the output image (identical to both inputs).
    pub dimensions: Dimensions,
}

/// Errors that can occur during pipeline processing.
///
/// The pipeline returns no partial results: either a complete encoded
/// image is produced or one of these errors is returned.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// The input bytes are not a valid or supported raster image.
    /// Not retriable; the input itself is malformed.
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    /// The composed result could not be serialized to PNG. Indicates
    /// an internal defect rather than bad input.
    #[error("failed to encode result image: {0}")]
    Encode(#[source] image::ImageError),

    /// The road and NDVI maps do not share spatial dimensions.
    ///
    /// The two inputs must be pixel co-registered; rather than silently
    /// proceeding over mismatched coordinate systems, the pipeline
    /// rejects the pair up front.
    #[error("road map is {road} but NDVI map is {ndvi}; inputs must be pixel co-registered")]
    DimensionMismatch {
        /// Dimensions of the road map.
        road: Dimensions,
        /// Dimensions of the NDVI map.
        ndvi: Dimensions,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::hsv::Hsv;

    // --- Point tests ---

    #[test]
    fn point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance_squared(b) - 25.0).abs() < f64::EPSILON);
        assert!((a.distance(b) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn point_distance_to_self_is_zero() {
        let p = Point::new(7.0, 11.0);
        assert!((p.distance(p)).abs() < f64::EPSILON);
    }

    // --- Dimensions tests ---

    #[test]
    fn dimensions_of_image() {
        let img = RgbImage::new(17, 31);
        assert_eq!(
            Dimensions::of(&img),
            Dimensions {
                width: 17,
                height: 31
            },
        );
    }

    #[test]
    fn dimensions_display() {
        let d = Dimensions {
            width: 640,
            height: 480,
        };
        assert_eq!(d.to_string(), "640x480");
    }

    // --- PipelineConfig tests ---

    #[test]
    fn config_defaults_match_reference_behavior() {
        let config = PipelineConfig::default();
        assert_eq!(config.vegetation_range, HsvRange::VEGETATION);
        assert_eq!(config.blur_kernel, 7);
        assert!((config.blur_sigma - 1.0).abs() < f32::EPSILON);
        assert!((config.canny_low - 50.0).abs() < f32::EPSILON);
        assert!((config.canny_high - 50.0).abs() < f32::EPSILON);
        assert!((config.min_contour_area - 50.0).abs() < f64::EPSILON);
        assert!((config.approx_accuracy_ratio - 0.02).abs() < f64::EPSILON);
        assert_eq!(config.stroke_color, [255, 0, 0]);
        assert_eq!(config.stroke_width, 2);
    }

    #[test]
    fn config_serde_round_trip() {
        let config = PipelineConfig {
            vegetation_range: HsvRange {
                lower: Hsv::new(60.0, 100, 100),
                upper: Hsv::new(180.0, 255, 255),
            },
            blur_kernel: 5,
            blur_sigma: 1.4,
            canny_low: 30.0,
            canny_high: 90.0,
            min_contour_area: 25.0,
            approx_accuracy_ratio: 0.01,
            stroke_color: [0, 255, 255],
            stroke_width: 3,
        };
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: PipelineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    // --- PipelineError tests ---

    #[test]
    fn error_empty_input_display() {
        let err = PipelineError::EmptyInput;
        assert_eq!(err.to_string(), "input image data is empty");
    }

    #[test]
    fn error_dimension_mismatch_display() {
        let err = PipelineError::DimensionMismatch {
            road: Dimensions {
                width: 100,
                height: 100,
            },
            ndvi: Dimensions {
                width: 200,
                height: 100,
            },
        };
        assert_eq!(
            err.to_string(),
            "road map is 100x100 but NDVI map is 200x100; inputs must be pixel co-registered",
        );
    }
}
