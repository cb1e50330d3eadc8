//! Grayscale reduction of the masked color image.
//!
//! Uses the standard luminance-weighted combination of channels
//! (`0.299*R + 0.587*G + 0.114*B`) so that bright, saturated vegetation
//! pixels map to high intensities while the masked-out background stays
//! at zero, giving the edge detector a clean two-level input.

use image::{GrayImage, Luma, RgbImage};

/// Reduce an RGB raster to single-channel grayscale.
///
/// The masked background (pure black) maps to 0 exactly; the result has
/// the same spatial dimensions as the input.
#[must_use = "returns the grayscale image"]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn luminance(image: &RgbImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b] = image.get_pixel(x, y).0;
        let luma = 0.114f32.mul_add(
            f32::from(b),
            0.299f32.mul_add(f32::from(r), 0.587 * f32::from(g)),
        );
        Luma([luma.round() as u8])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn output_dimensions_match_input() {
        let img = RgbImage::new(17, 31);
        let gray = luminance(&img);
        assert_eq!(gray.width(), 17);
        assert_eq!(gray.height(), 31);
    }

    #[test]
    fn black_maps_to_zero_and_white_to_255() {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(1, 0, Rgb([255, 255, 255]));
        let gray = luminance(&img);
        assert_eq!(gray.get_pixel(0, 0).0[0], 0);
        assert_eq!(gray.get_pixel(1, 0).0[0], 255);
    }

    #[test]
    fn channel_weights_are_luminance_ordered() {
        let value = |pixel: [u8; 3]| {
            let img = RgbImage::from_pixel(1, 1, Rgb(pixel));
            luminance(&img).get_pixel(0, 0).0[0]
        };
        let r = value([255, 0, 0]);
        let g = value([0, 255, 0]);
        let b = value([0, 0, 255]);
        assert!(
            g > r && r > b,
            "expected green > red > blue luminance, got R={r} G={g} B={b}",
        );
        // Exact weights: 0.299, 0.587, 0.114 of 255.
        assert_eq!(r, 76);
        assert_eq!(g, 150);
        assert_eq!(b, 29);
    }
}
