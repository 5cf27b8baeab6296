//! Coordinate normalization for rasters and target grids.
//!
//! Rasters are brought into a geographic CRS, stored in `(y, x)` order and
//! given strictly ascending axes. Target grids are reduced to a pair of 2D
//! longitude/latitude arrays over the two image dimensions.

use geo_common::{normalize_longitude, CrsCode};

use crate::error::{MapRasterError, Result};
use crate::reproject::Reprojector;
use crate::types::{AxisOrder, LabeledArray, RasterDataset, TargetGrid};

/// Recognized `(longitude, latitude)` field names, primary first.
pub const GEOLOCATION_NAMES: [(&str, &str); 2] = [("longitude", "latitude"), ("owiLon", "owiLat")];

/// CRS a reprojected raster is expected to come back in.
pub const GEOGRAPHIC_CRS: CrsCode = CrsCode::Epsg4326;

/// Per-pixel target geolocation over the two image dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct Geolocation {
    pub dims: (String, String),
    pub shape: (usize, usize),
    /// Row-major over `dims`.
    pub longitude: Vec<f64>,
    pub latitude: Vec<f64>,
}

fn geolocation_fields(target: &TargetGrid) -> Result<(&LabeledArray, &LabeledArray)> {
    for (lon_name, lat_name) in GEOLOCATION_NAMES {
        if let Some(lon) = target.get(lon_name) {
            let lat = target.get(lat_name).ok_or_else(|| {
                MapRasterError::missing_geolocation(format!(
                    "'{}' alongside '{}'",
                    lat_name, lon_name
                ))
            })?;
            return Ok((lon, lat));
        }
    }
    Err(MapRasterError::missing_geolocation("'longitude' or 'owiLon'"))
}

/// Infer the two image dimensions from the target's longitude field,
/// ignoring `polarization_dim`.
pub fn image_dims(target: &TargetGrid, polarization_dim: &str) -> Result<(String, String)> {
    let (lon, _) = geolocation_fields(target)?;
    let dims: Vec<&String> = lon.dims.iter().filter(|d| *d != polarization_dim).collect();
    match dims.as_slice() {
        [first, second] => Ok(((*first).clone(), (*second).clone())),
        _ => Err(MapRasterError::shape_mismatch(format!(
            "longitude must have exactly two image dimensions besides '{}', got {:?}",
            polarization_dim, lon.dims
        ))),
    }
}

/// Extract 2D target geolocation.
///
/// When the geolocation arrays carry `polarization_dim`, the first
/// polarization slice is used.
pub fn target_geolocation(target: &TargetGrid, polarization_dim: &str) -> Result<Geolocation> {
    let dims = image_dims(target, polarization_dim)?;
    let (lon, lat) = geolocation_fields(target)?;

    if lon.dims != lat.dims || lon.shape != lat.shape {
        return Err(MapRasterError::shape_mismatch(format!(
            "longitude {:?}{:?} and latitude {:?}{:?} differ",
            lon.dims, lon.shape, lat.dims, lat.shape
        )));
    }

    let lon = lon.select_first(polarization_dim);
    let lat = lat.select_first(polarization_dim);

    Ok(Geolocation {
        shape: (lon.shape[0], lon.shape[1]),
        dims,
        longitude: lon.values,
        latitude: lat.values,
    })
}

/// Bring a raster into canonical form.
///
/// Non-geographic rasters are handed to `reprojector` first. The result is
/// `(y, x)` ordered with both axes strictly ascending.
pub fn normalize_raster(
    raster: RasterDataset,
    reprojector: &dyn Reprojector,
) -> Result<RasterDataset> {
    raster.validate()?;

    let raster = if raster.crs.is_geographic() {
        raster
    } else {
        let source = raster.crs;
        let reprojected = reprojector.reproject_to_geographic(raster)?;
        if !reprojected.crs.is_geographic() {
            return Err(MapRasterError::ProjectionError(format!(
                "reprojection of {} returned a raster in {}",
                source, reprojected.crs
            )));
        }
        tracing::debug!(
            from = %source,
            to = %reprojected.crs,
            "Reprojected raster to geographic CRS"
        );
        reprojected.validate()?;
        reprojected
    };

    let mut raster = into_yx(raster);

    if raster.y.len() > 1 && raster.y[raster.y.len() - 1] < raster.y[0] {
        reverse_y(&mut raster);
    }
    if raster.x.len() > 1 && raster.x[raster.x.len() - 1] < raster.x[0] {
        reverse_x(&mut raster);
    }

    for (name, axis) in [("y", &raster.y), ("x", &raster.x)] {
        if axis.windows(2).any(|w| !(w[1] > w[0])) {
            return Err(MapRasterError::invalid_axis(name, "not strictly monotonic"));
        }
    }

    Ok(raster)
}

/// Transpose `(x, y)` stored variables into `(y, x)` order.
pub fn into_yx(mut raster: RasterDataset) -> RasterDataset {
    if raster.layout == AxisOrder::YX {
        return raster;
    }

    let (ny, nx) = raster.shape();
    for values in raster.variables.values_mut() {
        let mut transposed = Vec::with_capacity(values.len());
        for iy in 0..ny {
            transposed.extend((0..nx).map(|ix| values[ix * ny + iy]));
        }
        *values = transposed;
    }
    raster.layout = AxisOrder::YX;
    raster
}

fn reverse_y(raster: &mut RasterDataset) {
    let nx = raster.x.len();
    raster.y.reverse();
    for values in raster.variables.values_mut() {
        *values = values.chunks(nx.max(1)).rev().flatten().copied().collect();
    }
}

fn reverse_x(raster: &mut RasterDataset) {
    let nx = raster.x.len();
    raster.x.reverse();
    for values in raster.variables.values_mut() {
        values.chunks_mut(nx.max(1)).for_each(|row| row.reverse());
    }
}

/// Reorder columns so that column `k` of the result is `order[k]` of the
/// input, relabelling the x axis with `x`.
fn permute_columns(mut raster: RasterDataset, order: &[usize], x: Vec<f64>) -> RasterDataset {
    let nx = raster.x.len();
    for values in raster.variables.values_mut() {
        *values = values
            .chunks(nx.max(1))
            .flat_map(|row| order.iter().map(move |&ix| row[ix]))
            .collect();
    }
    raster.x = x;
    raster
}

/// Shift a raster with a `[0, 360)` longitude axis to `[-180, 180)`.
///
/// Columns from 180 degrees onward are rolled to the front and relabelled
/// by subtracting 360.
pub fn to_lon180(raster: RasterDataset) -> RasterDataset {
    let raster = into_yx(raster);
    let split = raster.x.partition_point(|&lon| lon < 180.0);
    let order: Vec<usize> = (split..raster.x.len()).chain(0..split).collect();
    let x = order
        .iter()
        .map(|&ix| {
            let lon = raster.x[ix];
            if lon >= 180.0 {
                lon - 360.0
            } else {
                lon
            }
        })
        .collect();
    permute_columns(raster, &order, x)
}

/// Wrap a raster's longitude axis into `[0, 360)` and sort it ascending.
pub fn to_lon360(raster: RasterDataset) -> RasterDataset {
    let raster = into_yx(raster);
    let wrapped: Vec<f64> = raster.x.iter().map(|&lon| normalize_longitude(lon, true)).collect();
    let mut order: Vec<usize> = (0..wrapped.len()).collect();
    order.sort_by(|&a, &b| wrapped[a].total_cmp(&wrapped[b]));
    let x = order.iter().map(|&ix| wrapped[ix]).collect();
    permute_columns(raster, &order, x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reproject::GeographicOnly;

    fn lon_lat(dims: [&str; 2]) -> TargetGrid {
        TargetGrid::new()
            .with_field("longitude", LabeledArray::new(dims, vec![2, 3], vec![0.0; 6]).unwrap())
            .with_field("latitude", LabeledArray::new(dims, vec![2, 3], vec![0.0; 6]).unwrap())
    }

    #[test]
    fn test_image_dims_primary_names() {
        let target = lon_lat(["line", "sample"]);
        assert_eq!(image_dims(&target, "pol").unwrap(), ("line".to_string(), "sample".to_string()));
    }

    #[test]
    fn test_image_dims_ignore_pol() {
        let lon =
            LabeledArray::new(["line", "sample", "pol"], vec![10, 20, 2], vec![0.0; 400]).unwrap();
        let target = TargetGrid::new()
            .with_field("longitude", lon.clone())
            .with_field("latitude", lon);

        let (az, ra) = image_dims(&target, "pol").unwrap();
        assert_eq!(az, "line");
        assert_eq!(ra, "sample");

        let geoloc = target_geolocation(&target, "pol").unwrap();
        assert_eq!(geoloc.shape, (10, 20));
        assert_eq!(geoloc.longitude.len(), 200);
    }

    #[test]
    fn test_legacy_names() {
        let field =
            LabeledArray::new(["azimuth", "range"], vec![2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let target = TargetGrid::new()
            .with_field("owiLon", field.clone())
            .with_field("owiLat", field);

        let geoloc = target_geolocation(&target, "pol").unwrap();
        assert_eq!(geoloc.dims, ("azimuth".to_string(), "range".to_string()));
        assert_eq!(geoloc.longitude, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_missing_longitude() {
        let target = TargetGrid::new()
            .with_field("lon", LabeledArray::new(["a", "b"], vec![1, 1], vec![0.0]).unwrap());
        let err = image_dims(&target, "pol").unwrap_err();
        assert!(matches!(err, MapRasterError::MissingGeolocation { .. }));
        assert!(err.to_string().contains("owiLon"));
    }

    #[test]
    fn test_mismatched_geolocation_shapes() {
        let lon = LabeledArray::new(["line", "sample"], vec![2, 3], vec![0.0; 6]).unwrap();
        let lat = LabeledArray::new(["line", "sample"], vec![3, 2], vec![0.0; 6]).unwrap();
        let target = TargetGrid::new()
            .with_field("longitude", lon)
            .with_field("latitude", lat);
        assert!(matches!(
            target_geolocation(&target, "pol"),
            Err(MapRasterError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn test_normalize_reverses_descending_axes() {
        // y descending (north to south), x descending
        let raster = RasterDataset::new(vec![10.0, 0.0], vec![2.0, 1.0, 0.0])
            .with_variable("v", vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        let out = normalize_raster(raster, &GeographicOnly).unwrap();
        assert_eq!(out.y, vec![0.0, 10.0]);
        assert_eq!(out.x, vec![0.0, 1.0, 2.0]);
        assert_eq!(out.variable("v").unwrap(), &[6.0, 5.0, 4.0, 3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_normalize_transposes_xy_layout() {
        // values[ix * ny + iy] = 10 * ix + iy
        let raster = RasterDataset::new(vec![0.0, 1.0], vec![0.0, 1.0, 2.0])
            .with_variable("v", vec![0.0, 1.0, 10.0, 11.0, 20.0, 21.0])
            .with_layout(AxisOrder::XY);

        let out = normalize_raster(raster, &GeographicOnly).unwrap();
        assert_eq!(out.layout, AxisOrder::YX);
        assert_eq!(out.variable("v").unwrap(), &[0.0, 10.0, 20.0, 1.0, 11.0, 21.0]);
    }

    #[test]
    fn test_normalize_rejects_unsorted_axis() {
        let raster = RasterDataset::new(vec![0.0, 2.0, 1.0, 3.0], vec![0.0, 1.0])
            .with_variable("v", vec![0.0; 8]);
        assert!(matches!(
            normalize_raster(raster, &GeographicOnly),
            Err(MapRasterError::InvalidAxis { .. })
        ));
    }

    #[test]
    fn test_normalize_uses_reprojector() {
        let projected = RasterDataset::new(vec![0.0, 1.0], vec![0.0, 1.0])
            .with_variable("v", vec![0.0; 4])
            .with_crs(CrsCode::Epsg3857);

        assert!(matches!(
            normalize_raster(projected.clone(), &GeographicOnly),
            Err(MapRasterError::ProjectionError(_))
        ));

        let relabel = |raster: RasterDataset| -> Result<RasterDataset> {
            Ok(raster.with_crs(GEOGRAPHIC_CRS))
        };
        let out = normalize_raster(projected.clone(), &relabel).unwrap();
        assert!(out.crs.is_geographic());

        let broken = |raster: RasterDataset| -> Result<RasterDataset> { Ok(raster) };
        assert!(matches!(
            normalize_raster(projected, &broken),
            Err(MapRasterError::ProjectionError(_))
        ));
    }

    #[test]
    fn test_longitude_conventions() {
        let x: Vec<f64> = (0..8).map(|i| i as f64 * 45.0).collect();
        let values: Vec<f64> = x.clone();
        let raster = RasterDataset::new(vec![0.0], x).with_variable("lon", values);

        let signed = to_lon180(raster);
        assert_eq!(signed.x, vec![-180.0, -135.0, -90.0, -45.0, 0.0, 45.0, 90.0, 135.0]);
        assert_eq!(
            signed.variable("lon").unwrap(),
            &[180.0, 225.0, 270.0, 315.0, 0.0, 45.0, 90.0, 135.0]
        );

        let wrapped = to_lon360(signed);
        assert_eq!(wrapped.x, vec![0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0]);
        assert_eq!(wrapped.variable("lon").unwrap(), wrapped.x.as_slice());
    }
}
