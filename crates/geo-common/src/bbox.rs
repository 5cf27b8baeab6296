//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

use crate::longitude::normalize_longitude;

/// A geographic bounding box in degrees.
///
/// `min_x`/`max_x` are longitudes and `min_y`/`max_y` latitudes. When built
/// with antimeridian wrapping the longitudes are in `[0, 360)`, so a box
/// straddling the ±180 line still satisfies `min_x <= max_x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Bounding box of a ring of `(lon, lat)` vertices.
    ///
    /// Longitudes are passed through [`normalize_longitude`] with `wrap`
    /// before taking the extremes. Returns `None` for an empty ring or one
    /// containing non-finite coordinates.
    pub fn from_ring(ring: &[(f64, f64)], wrap: bool) -> Option<Self> {
        if ring.iter().any(|(lon, lat)| !lon.is_finite() || !lat.is_finite()) {
            return None;
        }

        let mut iter = ring.iter();
        let &(lon, lat) = iter.next()?;
        let lon = normalize_longitude(lon, wrap);
        let mut bbox = Self::new(lon, lat, lon, lat);

        for &(lon, lat) in iter {
            let lon = normalize_longitude(lon, wrap);
            bbox.min_x = bbox.min_x.min(lon);
            bbox.max_x = bbox.max_x.max(lon);
            bbox.min_y = bbox.min_y.min(lat);
            bbox.max_y = bbox.max_y.max(lat);
        }

        Some(bbox)
    }

    /// Width of the bounding box in degrees of longitude.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box in degrees of latitude.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// True when the box has no area along at least one axis.
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Longitude range as `[min, max]`.
    pub fn lon_range(&self) -> (f64, f64) {
        (self.min_x, self.max_x)
    }

    /// Latitude range as `[min, max]`.
    pub fn lat_range(&self) -> (f64, f64) {
        (self.min_y, self.max_y)
    }

    /// Check if this bbox intersects another.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    /// Check if a point is contained within this bbox (edges included).
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}
