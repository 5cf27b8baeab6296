//! End-to-end raster mapping.

use std::collections::BTreeMap;

use geo_common::ring_crosses_antimeridian;
use rayon::prelude::*;

use crate::antimeridian::AntimeridianPolicy;
use crate::assemble::{assemble, into_dataset};
use crate::config::MapRasterConfig;
use crate::crop::CropWindow;
use crate::error::{MapRasterError, Result};
use crate::field::FieldInterpolator;
use crate::normalize::{normalize_raster, target_geolocation};
use crate::reproject::{GeographicOnly, Reprojector};
use crate::sampler::{intermediate_size, IntermediateGrid};
use crate::stats::nan_ratio;
use crate::types::{Footprint, MappedRaster, RasterInput, TargetGrid};

/// Map a raster onto a target grid with the default configuration.
///
/// Non-geographic rasters are rejected; use [`map_raster_with`] to supply a
/// [`Reprojector`].
///
/// # Arguments
/// * `raster` - A single field or a dataset of variables
/// * `target` - Target grid carrying per-pixel longitude/latitude
/// * `footprint` - Ground footprint of the target grid
/// * `cross_antimeridian` - Compare longitudes in `[0, 360)`, wrapping the
///   footprint, the raster longitude axis and the target pixels alike
pub fn map_raster(
    raster: impl Into<RasterInput>,
    target: &TargetGrid,
    footprint: &Footprint,
    cross_antimeridian: bool,
) -> Result<MappedRaster> {
    map_raster_with(
        raster,
        target,
        footprint,
        cross_antimeridian,
        &MapRasterConfig::default(),
        &GeographicOnly,
    )
}

/// Map a raster onto a target grid.
///
/// The output mirrors the input: a field maps to a field with the same
/// name, a dataset to a dataset with the same variables. Each output
/// variable has the target grid's image shape, with NaN wherever the
/// target pixel lies outside the footprint's bounding box or its stencil
/// reaches missing source data.
pub fn map_raster_with(
    raster: impl Into<RasterInput>,
    target: &TargetGrid,
    footprint: &Footprint,
    cross_antimeridian: bool,
    config: &MapRasterConfig,
    reprojector: &dyn Reprojector,
) -> Result<MappedRaster> {
    config.validate().map_err(MapRasterError::ConfigError)?;

    let (dataset, shape) = into_dataset(raster.into());
    let geolocation = target_geolocation(target, &config.polarization_dim)?;
    let raster = normalize_raster(dataset, reprojector)?;

    let policy = AntimeridianPolicy::new(cross_antimeridian);
    let raster = policy.raster(raster);
    if !cross_antimeridian && ring_crosses_antimeridian(footprint.exterior()) {
        tracing::warn!("Footprint crosses the antimeridian but antimeridian handling is off");
    }
    let bbox = policy.footprint_bbox(footprint)?;

    let window = CropWindow::covering(&raster, &bbox)?;
    let cropped = window.apply(&raster);

    let (ny, nx) = geolocation.shape;
    let num = intermediate_size(ny, nx, config.max_intermediate_size);
    let grid = IntermediateGrid::spanning(&bbox, num)?;

    tracing::debug!(
        bbox = ?bbox,
        crop_y = ?window.y,
        crop_x = ?window.x,
        intermediate = num,
        target_shape = ?geolocation.shape,
        wrap = policy.is_wrapping(),
        "Mapping {} variables",
        cropped.variables.len()
    );

    let target_lon = policy.longitudes(&geolocation.longitude);
    let field = FieldInterpolator::new(
        &cropped.y,
        &cropped.x,
        &grid,
        &geolocation.latitude,
        &target_lon,
        config.stage_one,
    );

    let mapped: BTreeMap<String, Vec<f64>> = if config.parallel_variables {
        cropped
            .variables
            .par_iter()
            .map(|(name, values)| {
                field
                    .map_variable(name, values)
                    .map(|mapped| (name.clone(), mapped))
            })
            .collect::<Result<_>>()?
    } else {
        cropped
            .variables
            .iter()
            .map(|(name, values)| {
                field
                    .map_variable(name, values)
                    .map(|mapped| (name.clone(), mapped))
            })
            .collect::<Result<_>>()?
    };

    for (name, values) in &mapped {
        let ratio = nan_ratio(values);
        if !values.is_empty() && ratio >= 1.0 {
            tracing::warn!(
                variable = %name,
                "Mapped variable is entirely NaN; footprint may not overlap valid raster data"
            );
        } else {
            tracing::debug!(variable = %name, nan_ratio = ratio, "Mapped variable");
        }
    }

    Ok(assemble(mapped, shape, geolocation.dims, geolocation.shape))
}
