//! grassland-pipeline: Pure vegetation segmentation pipeline (sans-IO).
//!
//! Derives a "grassland map" from two co-registered rasters: an NDVI
//! map is thresholded in HSV space to select vegetation, boundary
//! contours of the vegetation regions are extracted, and the surviving
//! boundaries are stroked onto a copy of the road map:
//!
//! segment -> grayscale -> blur -> edge detection -> contour
//! extraction -> area filtering -> polygon approximation -> render.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! rasters and byte slices and returns structured data. Network
//! fetching lives in `grassland-fetch`.

pub mod blur;
pub mod contour;
pub mod decode;
pub mod edge;
pub mod grayscale;
pub mod hsv;
pub mod render;
pub mod segment;
pub mod simplify;
pub mod types;

pub use contour::Contour;
pub use hsv::{Hsv, HsvRange};
pub use types::{Dimensions, PipelineConfig, PipelineError, Point, ProcessResult};

/// Run the full pipeline on two decoded rasters.
///
/// The road map is never consulted for segmentation; it is only the
/// canvas the vegetation boundaries are drawn on. Both images must be
/// pixel co-registered and therefore share dimensions.
///
/// The pipeline is a pure function: it holds no state across calls and
/// identical inputs produce identical output bytes.
///
/// # Pipeline steps
///
/// 1. Validate that road and NDVI dimensions match
/// 2. HSV-threshold the NDVI map into a binary vegetation mask
/// 3. Apply the mask and reduce to grayscale
/// 4. Gaussian smoothing (noise reduction)
/// 5. Canny edge detection
/// 6. External contour extraction with strict minimum-area filtering
/// 7. Polygon approximation of each survivor (perimeter-relative
///    tolerance)
/// 8. Stroke the raw boundaries onto a copy of the road map, encode PNG
///
/// An NDVI map with no vegetation is not an error: the result carries
/// zero contours and a re-encoded identity copy of the road map.
///
/// # Errors
///
/// Returns [`PipelineError::DimensionMismatch`] when the inputs do not
/// share spatial dimensions and [`PipelineError::Encode`] when the
/// composed image cannot be serialized.
pub fn process_images(
    road: &types::RgbImage,
    ndvi: &types::RgbImage,
    config: &PipelineConfig,
) -> Result<ProcessResult, PipelineError> {
    let dimensions = Dimensions::of(road);
    let ndvi_dimensions = Dimensions::of(ndvi);
    if dimensions != ndvi_dimensions {
        return Err(PipelineError::DimensionMismatch {
            road: dimensions,
            ndvi: ndvi_dimensions,
        });
    }

    // 1. Vegetation mask and masked color image.
    let mask = segment::vegetation_mask(ndvi, &config.vegetation_range);
    let masked = segment::apply_mask(ndvi, &mask);

    // 2. Grayscale reduction and Gaussian smoothing.
    let gray = grayscale::luminance(&masked);
    let blurred = blur::gaussian_blur(&gray, config.blur_kernel, config.blur_sigma);

    // 3. Canny edge detection.
    let edges = edge::canny(&blurred, config.canny_low, config.canny_high);

    // 4. External contours, filtered by enclosed area.
    let extracted = contour::find_external_contours(&edges);
    let mut contours = contour::filter_by_area(extracted, config.min_contour_area);

    // 5. Polygon approximation, tolerance relative to each perimeter.
    for c in &mut contours {
        let tolerance = config.approx_accuracy_ratio * c.perimeter;
        c.approx = simplify::approx_polygon(&c.points, tolerance);
    }

    // 6. Stroke boundaries onto a copy of the road map, encode.
    let composed =
        render::draw_contours(road, &contours, config.stroke_color, config.stroke_width);
    let encoded = render::encode_png(&composed)?;

    Ok(ProcessResult {
        encoded,
        contours,
        dimensions,
    })
}

/// Decode two encoded images and run [`process_images`].
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] or [`PipelineError::Decode`]
/// when either byte buffer is not a valid image, plus any error from
/// [`process_images`].
pub fn process_bytes(
    road_bytes: &[u8],
    ndvi_bytes: &[u8],
    config: &PipelineConfig,
) -> Result<ProcessResult, PipelineError> {
    let road = decode::decode_rgb(road_bytes)?;
    let ndvi = decode::decode_rgb(ndvi_bytes)?;
    process_images(&road, &ndvi, config)
}
