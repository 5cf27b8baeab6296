//! Two-stage resampling of one raster variable onto the target pixels.
//!
//! Stage 1 resamples the cropped raster onto the uniform intermediate grid,
//! Stage 2 reads that grid at every target pixel location.

use crate::error::Result;
use crate::interpolation::{regular_grid_interpolate, select_interpolator, RegularGrid};
use crate::sampler::IntermediateGrid;
use crate::types::InterpolationMethod;

/// Shared, read-only inputs for mapping any variable of one cropped raster.
#[derive(Debug, Clone, Copy)]
pub struct FieldInterpolator<'a> {
    /// Cropped raster latitude axis.
    y: &'a [f64],
    /// Cropped raster longitude axis.
    x: &'a [f64],
    grid: &'a IntermediateGrid,
    /// Target pixel latitudes, row-major over the image dims.
    target_lat: &'a [f64],
    /// Target pixel longitudes in the raster's longitude convention.
    target_lon: &'a [f64],
    method: InterpolationMethod,
}

impl<'a> FieldInterpolator<'a> {
    pub fn new(
        y: &'a [f64],
        x: &'a [f64],
        grid: &'a IntermediateGrid,
        target_lat: &'a [f64],
        target_lon: &'a [f64],
        method: InterpolationMethod,
    ) -> Self {
        Self {
            y,
            x,
            grid,
            target_lat,
            target_lon,
            method,
        }
    }

    /// Resample one cropped variable onto the intermediate grid.
    pub fn onto_intermediate(&self, name: &str, values: &[f64]) -> Result<Vec<f64>> {
        let source = RegularGrid::new(self.y, self.x, values)?;
        let interpolator = select_interpolator(self.method, values);

        tracing::debug!(
            variable = %name,
            method = interpolator.name(),
            rows = self.y.len(),
            cols = self.x.len(),
            "Resampling variable onto intermediate grid"
        );

        interpolator.interpolate_grid(&source, &self.grid.lats, &self.grid.lons)
    }

    /// Read an intermediate-grid field at every target pixel.
    pub fn onto_target(&self, intermediate: &[f64]) -> Result<Vec<f64>> {
        let grid = RegularGrid::new(&self.grid.lats, &self.grid.lons, intermediate)?;
        regular_grid_interpolate(&grid, self.target_lat, self.target_lon)
    }

    /// Map one cropped variable onto the target pixels.
    pub fn map_variable(&self, name: &str, values: &[f64]) -> Result<Vec<f64>> {
        let intermediate = self.onto_intermediate(name, values)?;
        self.onto_target(&intermediate)
    }
}
