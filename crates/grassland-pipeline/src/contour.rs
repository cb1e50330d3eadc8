//! Contour extraction: external boundary curves of vegetation regions.
//!
//! Uses Suzuki-Abe border following via
//! [`imageproc::contours::find_contours`], keeping only outer borders:
//! each detected boundary is a maximal outer loop, and holes nested
//! inside a vegetation blob are not separately reported. Each contour
//! carries its enclosed area (shoelace formula) and closed perimeter,
//! used for noise filtering and polygon approximation.

use image::GrayImage;
use serde::{Deserialize, Serialize};

use crate::types::Point;

/// An external boundary curve traced from a binary edge map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contour {
    /// The raw traced boundary, in tracing order. Drawing uses this
    /// sequence, never the simplified polygon.
    pub points: Vec<Point>,

    /// Enclosed area in square pixels (shoelace formula over the closed
    /// boundary).
    pub area: f64,

    /// Closed perimeter length in pixels.
    pub perimeter: f64,

    /// Simplified polygon approximation of the boundary. Populated by
    /// the pipeline for downstream geometric consumers; empty until
    /// then.
    pub approx: Vec<Point>,
}

impl Contour {
    /// Build a contour from a traced boundary, computing its enclosed
    /// area and closed perimeter.
    #[must_use]
    pub fn from_boundary(points: Vec<Point>) -> Self {
        let area = enclosed_area(&points);
        let perimeter = closed_arc_length(&points);
        Self {
            points,
            area,
            perimeter,
            approx: Vec::new(),
        }
    }

    /// Axis-aligned bounding box as `(min, max)` corners, or `None` for
    /// an empty contour.
    #[must_use]
    pub fn bounding_box(&self) -> Option<(Point, Point)> {
        let first = self.points.first()?;
        let mut min = *first;
        let mut max = *first;
        for p in &self.points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some((min, max))
    }
}

/// Extract external contours from a binary edge map.
///
/// Inner (hole) borders are discarded; degenerate traces of fewer than
/// two points are dropped. An all-black edge map yields an empty
/// vector.
#[must_use = "returns the extracted contours"]
pub fn find_external_contours(edges: &GrayImage) -> Vec<Contour> {
    let traced: Vec<imageproc::contours::Contour<u32>> =
        imageproc::contours::find_contours(edges);

    traced
        .into_iter()
        .filter(|c| c.border_type == imageproc::contours::BorderType::Outer)
        .filter(|c| c.points.len() >= 2)
        .map(|c| {
            let points = c
                .points
                .into_iter()
                .map(|p| Point::new(f64::from(p.x), f64::from(p.y)))
                .collect();
            Contour::from_boundary(points)
        })
        .collect()
}

/// Discard contours whose enclosed area does not exceed `min_area`.
///
/// The comparison is strict: a contour with area exactly equal to
/// `min_area` is dropped.
#[must_use = "returns the surviving contours"]
pub fn filter_by_area(contours: Vec<Contour>, min_area: f64) -> Vec<Contour> {
    contours.into_iter().filter(|c| c.area > min_area).collect()
}

/// Enclosed area of a closed polygon via the shoelace formula.
///
/// The boundary is treated as implicitly closed (last point connects
/// back to the first). Orientation-independent.
#[must_use]
pub fn enclosed_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let mut twice_area = 0.0;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        twice_area += a.x.mul_add(b.y, -(b.x * a.y));
    }
    twice_area.abs() / 2.0
}

/// Length of a closed boundary: the sum of consecutive segment lengths
/// plus the closing segment back to the first point.
#[must_use]
pub fn closed_arc_length(points: &[Point]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }

    let mut length: f64 = points.windows(2).map(|w| w[0].distance(w[1])).sum();
    length += points[points.len() - 1].distance(points[0]);
    length
}
