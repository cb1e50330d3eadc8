//! Canny edge detection on the smoothed grayscale image.
//!
//! Wraps [`imageproc::edges::canny`] to reduce the masked vegetation
//! image to structural edges. Returns a binary image where white pixels
//! (255) are edges and black pixels (0) are background.

use image::GrayImage;

/// Minimum allowed Canny threshold.
///
/// A low threshold of zero treats every pixel with any gradient as a
/// potential edge, producing a degenerate edge map that overwhelms
/// contour extraction.
pub const MIN_THRESHOLD: f32 = 1.0;
const _: () = assert!(MIN_THRESHOLD > 0.0);

/// Detect edges using the Canny algorithm.
///
/// Returns a binary image: 255 for edge pixels, 0 for non-edge.
///
/// Pixels with gradient magnitude above `high_threshold` are definite
/// edges; those between the thresholds are edges only if connected to a
/// definite edge. The reference configuration uses equal low/high
/// thresholds, collapsing hysteresis to a single-threshold detector.
///
/// Both thresholds are clamped to a minimum of [`MIN_THRESHOLD`] and
/// `low_threshold` is clamped to be at most `high_threshold`.
#[must_use = "returns the binary edge map"]
pub fn canny(image: &GrayImage, low_threshold: f32, high_threshold: f32) -> GrayImage {
    let high = high_threshold.max(MIN_THRESHOLD);
    let low = low_threshold.max(MIN_THRESHOLD).min(high);
    imageproc::edges::canny(image, low, high)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 20x20 image with a sharp vertical boundary at x = 10.
    fn sharp_edge_image() -> GrayImage {
        GrayImage::from_fn(20, 20, |x, _y| {
            if x < 10 {
                image::Luma([0])
            } else {
                image::Luma([255])
            }
        })
    }

    fn edge_count(edges: &GrayImage) -> u32 {
        edges.pixels().map(|p| u32::from(p.0[0] > 0)).sum()
    }

    #[test]
    fn uniform_image_produces_no_edges() {
        let img = GrayImage::from_pixel(20, 20, image::Luma([128]));
        let edges = canny(&img, 50.0, 50.0);
        assert_eq!(edge_count(&edges), 0, "expected no edges in uniform image");
    }

    #[test]
    fn sharp_boundary_is_detected() {
        let img = sharp_edge_image();
        let edges = canny(&img, 50.0, 50.0);
        assert!(
            edge_count(&edges) > 0,
            "expected edges at sharp boundary, found none"
        );
    }

    #[test]
    fn output_dimensions_match_input() {
        let img = GrayImage::new(17, 31);
        let edges = canny(&img, 50.0, 50.0);
        assert_eq!(edges.width(), 17);
        assert_eq!(edges.height(), 31);
    }

    #[test]
    fn zero_low_threshold_is_clamped_to_min() {
        let img = sharp_edge_image();
        let edges_zero = canny(&img, 0.0, 150.0);
        let edges_min = canny(&img, MIN_THRESHOLD, 150.0);
        assert_eq!(edges_zero, edges_min);
    }

    #[test]
    fn low_above_high_is_clamped() {
        let img = sharp_edge_image();
        let edges_inverted = canny(&img, 200.0, 100.0);
        let edges_equal = canny(&img, 100.0, 100.0);
        assert_eq!(edges_inverted, edges_equal);
    }
}
