//! Image decoding into the pipeline's fixed in-memory pixel format.
//!
//! Accepts raw encoded bytes (PNG, JPEG, BMP, WebP) and produces an
//! 8-bit, 3-channel RGB raster. Every stage downstream assumes this
//! channel order.

use image::RgbImage;

use crate::types::PipelineError;

/// Decode raw image bytes into an RGB raster.
///
/// Supports whatever formats the `image` crate can decode. Alpha
/// channels are dropped; grayscale sources are expanded to three
/// channels.
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] if `bytes` is empty.
/// Returns [`PipelineError::Decode`] if the image format is
/// unrecognized or the data is corrupt.
pub fn decode_rgb(bytes: &[u8]) -> Result<RgbImage, PipelineError> {
    if bytes.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    let img = image::load_from_memory(bytes).map_err(PipelineError::Decode)?;
    Ok(img.to_rgb8())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Encode an RGB image as PNG bytes.
    fn encode_png(img: &RgbImage) -> Vec<u8> {
        let mut buf = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut buf);
        image::ImageEncoder::write_image(
            encoder,
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgb8,
        )
        .unwrap();
        buf
    }

    #[test]
    fn empty_input_returns_error() {
        let result = decode_rgb(&[]);
        assert!(matches!(result, Err(PipelineError::EmptyInput)));
    }

    #[test]
    fn corrupt_bytes_return_decode_error() {
        let result = decode_rgb(&[0xFF, 0xFE, 0x00, 0x01]);
        assert!(matches!(result, Err(PipelineError::Decode(_))));
    }

    #[test]
    #[allow(clippy::cast_possible_truncation)]
    fn valid_png_round_trips_pixels() {
        let img =
            RgbImage::from_fn(3, 2, |x, y| image::Rgb([(x * 80) as u8, (y * 100) as u8, 7]));
        let decoded = decode_rgb(&encode_png(&img)).unwrap();
        assert_eq!(decoded, img);
    }

    #[test]
    fn output_dimensions_match_input() {
        let img = RgbImage::new(17, 31);
        let decoded = decode_rgb(&encode_png(&img)).unwrap();
        assert_eq!(decoded.width(), 17);
        assert_eq!(decoded.height(), 31);
    }
}
