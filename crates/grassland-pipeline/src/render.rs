//! Rendering: draw contour boundaries on the road map and encode PNG.
//!
//! Boundaries are stroked, never filled, onto a fresh copy of the road
//! raster. With an empty contour set the output is an identity copy of
//! the road image, still re-encoded, so the result is always a valid
//! decodable image.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};

use crate::contour::Contour;
use crate::types::PipelineError;

/// Draw every contour's raw boundary onto a copy of the road image.
///
/// Consecutive boundary points are connected with line segments and the
/// loop is closed back to the first point. For `stroke_width > 1` each
/// boundary point is additionally stamped with a filled disc of radius
/// `stroke_width / 2`, thickening the stroke.
#[must_use = "returns the composed image"]
#[allow(clippy::cast_possible_truncation)]
pub fn draw_contours(
    road: &RgbImage,
    contours: &[Contour],
    stroke_color: [u8; 3],
    stroke_width: u32,
) -> RgbImage {
    let mut canvas = road.clone();
    let color = Rgb(stroke_color);
    let radius = i32::try_from(stroke_width / 2).unwrap_or(i32::MAX);

    for contour in contours {
        let points = &contour.points;
        if points.len() < 2 {
            continue;
        }

        for pair in points.windows(2) {
            draw_line_segment_mut(
                &mut canvas,
                (pair[0].x as f32, pair[0].y as f32),
                (pair[1].x as f32, pair[1].y as f32),
                color,
            );
        }
        // Close the loop.
        let first = points[0];
        let last = points[points.len() - 1];
        draw_line_segment_mut(
            &mut canvas,
            (last.x as f32, last.y as f32),
            (first.x as f32, first.y as f32),
            color,
        );

        if stroke_width > 1 {
            for p in points {
                draw_filled_circle_mut(
                    &mut canvas,
                    (p.x.round() as i32, p.y.round() as i32),
                    radius,
                    color,
                );
            }
        }
    }

    canvas
}

/// Encode an RGB raster as PNG bytes.
///
/// # Errors
///
/// Returns [`PipelineError::Encode`] if PNG serialization fails.
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>, PipelineError> {
    let mut buf = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut buf);
    image::ImageEncoder::write_image(
        encoder,
        image.as_raw(),
        image.width(),
        image.height(),
        image::ExtendedColorType::Rgb8,
    )
    .map_err(PipelineError::Encode)?;
    Ok(buf)
}
