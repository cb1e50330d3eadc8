//! Gaussian smoothing before edge detection.
//!
//! Builds an explicit 1-D Gaussian kernel of configurable width and
//! sigma and applies it separably via
//! [`imageproc::filter::separable_filter_equal`]. An explicit kernel
//! width (rather than one derived from sigma) matches the reference
//! behavior of a fixed 7x7 window with sigma 1.

use image::GrayImage;

/// Apply separable Gaussian smoothing to a grayscale image.
///
/// `kernel_size` is the window width in pixels and must be odd; even
/// values are rounded up. A size below 3 or a non-positive `sigma`
/// returns the image unchanged (no smoothing requested).
#[must_use = "returns the smoothed image"]
pub fn gaussian_blur(image: &GrayImage, kernel_size: u32, sigma: f32) -> GrayImage {
    if sigma <= 0.0 || kernel_size < 3 {
        return image.clone();
    }

    let size = if kernel_size.is_multiple_of(2) {
        kernel_size + 1
    } else {
        kernel_size
    };

    let kernel = gaussian_kernel(size, sigma);
    imageproc::filter::separable_filter_equal(image, &kernel)
}

/// Build a normalized 1-D Gaussian kernel of odd width `size`.
#[allow(clippy::cast_precision_loss)]
fn gaussian_kernel(size: u32, sigma: f32) -> Vec<f32> {
    let center = (size / 2) as f32;
    let two_sigma_sq = 2.0 * sigma * sigma;

    let mut kernel: Vec<f32> = (0..size)
        .map(|i| {
            let d = i as f32 - center;
            (-d * d / two_sigma_sq).exp()
        })
        .collect();

    let sum: f32 = kernel.iter().sum();
    for w in &mut kernel {
        *w /= sum;
    }
    kernel
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 10x10 image with a sharp black-to-white boundary at x=5.
    fn sharp_edge_image() -> GrayImage {
        GrayImage::from_fn(10, 10, |x, _y| {
            if x < 5 {
                image::Luma([0])
            } else {
                image::Luma([255])
            }
        })
    }

    #[test]
    fn zero_sigma_returns_identical_image() {
        let img = sharp_edge_image();
        assert_eq!(gaussian_blur(&img, 7, 0.0), img);
    }

    #[test]
    fn tiny_kernel_returns_identical_image() {
        let img = sharp_edge_image();
        assert_eq!(gaussian_blur(&img, 1, 1.0), img);
    }

    #[test]
    fn output_dimensions_preserved() {
        let img = GrayImage::new(17, 31);
        let blurred = gaussian_blur(&img, 7, 1.0);
        assert_eq!(blurred.width(), 17);
        assert_eq!(blurred.height(), 31);
    }

    #[test]
    fn blur_smooths_sharp_edge() {
        let img = sharp_edge_image();
        let blurred = gaussian_blur(&img, 7, 1.5);

        let left_of_edge = blurred.get_pixel(4, 5).0[0];
        let right_of_edge = blurred.get_pixel(5, 5).0[0];
        assert!(
            left_of_edge > 0,
            "expected blur to raise left-of-edge above 0, got {left_of_edge}",
        );
        assert!(
            right_of_edge < 255,
            "expected blur to lower right-of-edge below 255, got {right_of_edge}",
        );
    }

    #[test]
    fn uniform_image_unchanged_by_blur() {
        let img = GrayImage::from_pixel(10, 10, image::Luma([128]));
        let blurred = gaussian_blur(&img, 7, 1.0);
        for pixel in blurred.pixels() {
            let diff = i16::from(pixel.0[0]) - 128;
            assert!(
                diff.abs() <= 1,
                "expected uniform image to stay near 128 after blur, got {}",
                pixel.0[0],
            );
        }
    }

    #[test]
    fn even_kernel_size_is_rounded_up() {
        let img = sharp_edge_image();
        assert_eq!(gaussian_blur(&img, 6, 1.0), gaussian_blur(&img, 7, 1.0));
    }

    #[test]
    fn kernel_is_normalized_and_symmetric() {
        let kernel = gaussian_kernel(7, 1.0);
        assert_eq!(kernel.len(), 7);
        let sum: f32 = kernel.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5, "kernel sum was {sum}");
        for i in 0..3 {
            assert!((kernel[i] - kernel[6 - i]).abs() < 1e-6);
        }
        // Center weight dominates.
        assert!(kernel[3] > kernel[2]);
    }
}
