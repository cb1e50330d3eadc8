//! Vegetation segmentation: HSV thresholding of the NDVI map.
//!
//! Produces a binary mask selecting pixels whose color falls inside the
//! configured vegetation band, plus the masked color image consumed by
//! the contour extraction stages. This stage never fails on a valid
//! raster; an NDVI map with no vegetation simply yields an all-black
//! mask.

use image::{GrayImage, Luma, Rgb, RgbImage};

use crate::hsv::{Hsv, HsvRange};

/// Binary mask value for pixels inside the vegetation band.
pub const MASK_SET: u8 = 255;

/// Build a binary vegetation mask from an NDVI color raster.
///
/// Each pixel is converted to HSV and tested against `range`; pixels
/// inside the band become 255, all others 0. The mask has the same
/// spatial dimensions as the input.
#[must_use = "returns the binary vegetation mask"]
pub fn vegetation_mask(ndvi: &RgbImage, range: &HsvRange) -> GrayImage {
    GrayImage::from_fn(ndvi.width(), ndvi.height(), |x, y| {
        if range.contains(Hsv::from_rgb(*ndvi.get_pixel(x, y))) {
            Luma([MASK_SET])
        } else {
            Luma([0])
        }
    })
}

/// Apply a binary mask to a color raster.
///
/// Returns a new image carrying the original pixel wherever the mask is
/// set and black elsewhere. Equivalent to a bitwise AND of the image
/// with itself under the mask.
#[must_use = "returns the masked color image"]
pub fn apply_mask(image: &RgbImage, mask: &GrayImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        if mask.get_pixel(x, y).0[0] == 0 {
            Rgb([0, 0, 0])
        } else {
            *image.get_pixel(x, y)
        }
    })
}
