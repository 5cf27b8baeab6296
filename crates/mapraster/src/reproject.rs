//! Bringing rasters into a geographic CRS.
//!
//! CRS transformation math lives outside this crate. The pipeline only asks
//! a [`Reprojector`] for a geographic copy of rasters that are not tagged
//! with a geographic CRS.

use crate::error::{MapRasterError, Result};
use crate::types::RasterDataset;

/// Capability to resample a raster into WGS84 longitude/latitude.
pub trait Reprojector: Send + Sync {
    /// Return `raster` on a regular WGS84 (EPSG:4326) grid.
    fn reproject_to_geographic(&self, raster: RasterDataset) -> Result<RasterDataset>;
}

/// Reprojector that accepts geographic rasters as they are and rejects
/// everything else.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeographicOnly;

impl Reprojector for GeographicOnly {
    fn reproject_to_geographic(&self, raster: RasterDataset) -> Result<RasterDataset> {
        if raster.crs.is_geographic() {
            Ok(raster)
        } else {
            Err(MapRasterError::ProjectionError(format!(
                "raster is in {} and no reprojector was supplied",
                raster.crs
            )))
        }
    }
}

impl<F> Reprojector for F
where
    F: Fn(RasterDataset) -> Result<RasterDataset> + Send + Sync,
{
    fn reproject_to_geographic(&self, raster: RasterDataset) -> Result<RasterDataset> {
        self(raster)
    }
}
