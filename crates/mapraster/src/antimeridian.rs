//! Longitude convention applied end to end.

use geo_common::{normalize_longitude, BoundingBox};

use crate::error::{MapRasterError, Result};
use crate::normalize::to_lon360;
use crate::types::{Footprint, RasterDataset};

/// Whether longitudes are compared in the wrapped `[0, 360)` convention.
///
/// The same policy drives the footprint bounding box, the raster longitude
/// axis and the target pixel longitudes, so all three agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AntimeridianPolicy {
    wrap: bool,
}

impl AntimeridianPolicy {
    pub fn new(cross_antimeridian: bool) -> Self {
        Self {
            wrap: cross_antimeridian,
        }
    }

    pub fn is_wrapping(&self) -> bool {
        self.wrap
    }

    /// Bounding box of the footprint's exterior ring under this policy.
    pub fn footprint_bbox(&self, footprint: &Footprint) -> Result<BoundingBox> {
        BoundingBox::from_ring(footprint.exterior(), self.wrap).ok_or_else(|| {
            MapRasterError::DegenerateGeometry(
                "footprint exterior ring is empty or has non-finite vertices".to_string(),
            )
        })
    }

    /// Raster with its longitude axis in this policy's convention.
    ///
    /// Wrapping rolls the columns so the axis stays ascending in
    /// `[0, 360)`; a raster already in that range is returned unchanged.
    pub fn raster(&self, raster: RasterDataset) -> RasterDataset {
        if self.wrap {
            to_lon360(raster)
        } else {
            raster
        }
    }

    #[inline]
    pub fn longitude(&self, lon: f64) -> f64 {
        normalize_longitude(lon, self.wrap)
    }

    /// Longitudes expressed in this policy's convention.
    pub fn longitudes(&self, lons: &[f64]) -> Vec<f64> {
        lons.iter().map(|&lon| self.longitude(lon)).collect()
    }
}
