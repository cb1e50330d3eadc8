//! grassland: derive a grassland map from a road map and an NDVI map.
//!
//! Runs the vegetation segmentation pipeline on two sources (HTTP(S)
//! URLs or local files), exposes every pipeline tunable as a flag, and
//! writes the composed PNG. Useful for:
//!
//! - Tuning the HSV vegetation band, Canny thresholds, and blur
//! - Checking the noise filter against a target map resolution
//! - Reproducing a service-side request offline from local files
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin grassland -- [OPTIONS] <ROAD> <NDVI>
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use grassland_fetch::FetchOptions;
use grassland_pipeline::types::RgbImage;
use grassland_pipeline::{Hsv, HsvRange, PipelineConfig, ProcessResult};

/// Outline vegetation regions from an NDVI raster onto a co-registered
/// road map.
///
/// Each source may be an http(s):// URL (fetched with a request-scoped
/// timeout) or a local file path.
#[derive(Parser)]
#[command(name = "grassland", version)]
struct Cli {
    /// Road map source (URL or file path).
    road: String,

    /// NDVI map source (URL or file path).
    ndvi: String,

    /// Output PNG path.
    #[arg(long, short, default_value = "grassland.png")]
    output: PathBuf,

    /// Vegetation hue lower bound in degrees (0-360).
    #[arg(long, default_value_t = HsvRange::VEGETATION.lower.hue)]
    hue_low: f32,

    /// Vegetation hue upper bound in degrees (0-360).
    #[arg(long, default_value_t = HsvRange::VEGETATION.upper.hue)]
    hue_high: f32,

    /// Vegetation saturation lower bound (0-255).
    #[arg(long, default_value_t = HsvRange::VEGETATION.lower.saturation)]
    saturation_low: u8,

    /// Vegetation saturation upper bound (0-255).
    #[arg(long, default_value_t = HsvRange::VEGETATION.upper.saturation)]
    saturation_high: u8,

    /// Vegetation value lower bound (0-255).
    #[arg(long, default_value_t = HsvRange::VEGETATION.lower.value)]
    value_low: u8,

    /// Vegetation value upper bound (0-255).
    #[arg(long, default_value_t = HsvRange::VEGETATION.upper.value)]
    value_high: u8,

    /// Gaussian smoothing kernel width (odd).
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_BLUR_KERNEL)]
    blur_kernel: u32,

    /// Gaussian smoothing sigma.
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_BLUR_SIGMA)]
    blur_sigma: f32,

    /// Canny low threshold.
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_CANNY_LOW)]
    canny_low: f32,

    /// Canny high threshold.
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_CANNY_HIGH)]
    canny_high: f32,

    /// Minimum enclosed contour area in square pixels (strict).
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_MIN_CONTOUR_AREA)]
    min_area: f64,

    /// Polygon approximation accuracy as a fraction of each contour's
    /// perimeter.
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_APPROX_ACCURACY_RATIO)]
    approx_ratio: f64,

    /// Stroke color for drawn boundaries as `R,G,B` (0-255 each).
    #[arg(long, value_parser = parse_rgb, default_value = "255,0,0")]
    stroke_color: [u8; 3],

    /// Stroke width in pixels for drawn boundaries.
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_STROKE_WIDTH)]
    stroke_width: u32,

    /// Per-request fetch timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Full pipeline config as a JSON string.
    ///
    /// When provided, all other pipeline parameter flags are ignored.
    /// The JSON must be a valid `PipelineConfig` serialization.
    #[arg(long)]
    config_json: Option<String>,
}

impl Cli {
    fn pipeline_config(&self) -> Result<PipelineConfig, serde_json::Error> {
        if let Some(json) = &self.config_json {
            return serde_json::from_str(json);
        }

        Ok(PipelineConfig {
            vegetation_range: HsvRange {
                lower: Hsv::new(self.hue_low, self.saturation_low, self.value_low),
                upper: Hsv::new(self.hue_high, self.saturation_high, self.value_high),
            },
            blur_kernel: self.blur_kernel,
            blur_sigma: self.blur_sigma,
            canny_low: self.canny_low,
            canny_high: self.canny_high,
            min_contour_area: self.min_area,
            approx_accuracy_ratio: self.approx_ratio,
            stroke_color: self.stroke_color,
            stroke_width: self.stroke_width,
        })
    }
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Parse an `R,G,B` color triple with 0-255 components.
fn parse_rgb(s: &str) -> Result<[u8; 3], String> {
    let mut parts = s.split(',');
    let mut channel = |name: &str| {
        parts
            .next()
            .ok_or_else(|| format!("missing {name} component in {s:?}"))?
            .trim()
            .parse::<u8>()
            .map_err(|e| format!("bad {name} component in {s:?}: {e}"))
    };
    let rgb = [channel("red")?, channel("green")?, channel("blue")?];
    if parts.next().is_some() {
        return Err(format!("expected exactly three components in {s:?}"));
    }
    Ok(rgb)
}

/// Load a source image from a URL or a local file.
fn load_source(
    source: &str,
    options: &FetchOptions,
) -> Result<RgbImage, Box<dyn std::error::Error>> {
    if is_url(source) {
        Ok(grassland_fetch::fetch_image(source, options)?)
    } else {
        let bytes = std::fs::read(source)?;
        Ok(grassland_pipeline::decode::decode_rgb(&bytes)?)
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli.pipeline_config()?;
    log::debug!("pipeline config: {config:?}");
    let options = FetchOptions {
        timeout: Duration::from_secs(cli.timeout_secs),
        ..FetchOptions::default()
    };

    // When both sources are remote, use the end-to-end entry point so
    // the two fetches run concurrently.
    let result: ProcessResult = if is_url(&cli.road) && is_url(&cli.ndvi) {
        grassland_fetch::process(&cli.road, &cli.ndvi, &config, &options)?
    } else {
        let road = load_source(&cli.road, &options)?;
        let ndvi = load_source(&cli.ndvi, &options)?;
        grassland_pipeline::process_images(&road, &ndvi, &config)?
    };

    std::fs::write(&cli.output, &result.encoded)?;
    println!(
        "{}: {} contour(s) kept, {} bytes written to {}",
        result.dimensions,
        result.contours.len(),
        result.encoded.len(),
        cli.output.display(),
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
