//! grassland-fetch: HTTP adapter around the pure pipeline.
//!
//! `grassland-pipeline` is a pure function over decoded rasters; this
//! crate supplies its inputs. [`process`] is the single logical
//! operation the surrounding service invokes: fetch the road and NDVI
//! maps from their URLs (concurrently -- they are independent), run the
//! pipeline, and hand back the encoded grassland map.
//!
//! Each invocation is stateless and shares nothing with concurrent
//! invocations; callers may run any number in parallel.

pub mod fetch;

pub use fetch::{FetchError, FetchOptions, fetch_bytes, fetch_image};

use grassland_pipeline::types::RgbImage;
use grassland_pipeline::{PipelineConfig, PipelineError, ProcessResult};

/// Errors from end-to-end processing: either input retrieval or the
/// pipeline itself.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    /// A source image could not be fetched or decoded.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The pipeline rejected the inputs or failed to encode the result.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Fetch both source images and run the full pipeline.
///
/// The two fetches proceed concurrently; the segmentation, extraction,
/// and rendering stages are sequential per invocation.
///
/// # Errors
///
/// Returns [`ProcessError::Fetch`] when either image cannot be
/// retrieved or decoded and [`ProcessError::Pipeline`] for dimension
/// mismatches or encoding failures.
pub fn process(
    road_url: &str,
    ndvi_url: &str,
    config: &PipelineConfig,
    options: &FetchOptions,
) -> Result<ProcessResult, ProcessError> {
    let (road, ndvi) = fetch_pair(road_url, ndvi_url, options)?;

    log::info!(
        "processing road map {road_url} ({}x{}) with NDVI map {ndvi_url}",
        road.width(),
        road.height(),
    );
    let result = grassland_pipeline::process_images(&road, &ndvi, config)?;
    log::info!(
        "kept {} contour(s), encoded {} bytes",
        result.contours.len(),
        result.encoded.len(),
    );
    Ok(result)
}

/// Fetch the road and NDVI images concurrently.
///
/// The road fetch runs on a scoped worker thread while the NDVI fetch
/// proceeds on the caller's thread. A panic on the worker is resumed on
/// the caller rather than swallowed.
fn fetch_pair(
    road_url: &str,
    ndvi_url: &str,
    options: &FetchOptions,
) -> Result<(RgbImage, RgbImage), FetchError> {
    std::thread::scope(|scope| {
        let road_handle = scope.spawn(|| fetch_image(road_url, options));
        let ndvi = fetch_image(ndvi_url, options);
        let road = match road_handle.join() {
            Ok(result) => result,
            Err(payload) => std::panic::resume_unwind(payload),
        };
        Ok((road?, ndvi?))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_failure_surfaces_as_process_error() {
        // Malformed URLs fail before any network I/O.
        let result = process(
            "not a url",
            "also not a url",
            &PipelineConfig::default(),
            &FetchOptions::default(),
        );
        assert!(matches!(result, Err(ProcessError::Fetch(_))));
    }

    #[test]
    fn process_error_preserves_pipeline_message() {
        let err = ProcessError::from(PipelineError::EmptyInput);
        assert_eq!(err.to_string(), "input image data is empty");
    }
}
