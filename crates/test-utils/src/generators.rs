//! Synthetic rasters and target grids.
//!
//! The wind raster and the tilted target grid are small enough to run in
//! every test and produce stable summary statistics.

use geo_common::to_lon180;
use mapraster::{Footprint, LabeledArray, RasterDataset, TargetGrid};

/// Lines (rows) of the synthetic target image.
pub const TARGET_LINES: usize = 50;

/// Samples (columns) of the synthetic target image.
pub const TARGET_SAMPLES: usize = 60;

/// Per-pixel `(longitude, latitude)` of a tilted 50 x 60 swath.
///
/// With `cross_antimeridian` the swath starts at 170E and runs over the
/// dateline, longitudes kept in `[-180, 180)`. Otherwise it sits around
/// 30W. Both are row-major over `(line, sample)`.
pub fn fake_target_lon_lat(cross_antimeridian: bool) -> (Vec<f64>, Vec<f64>) {
    let mut lon = Vec::with_capacity(TARGET_LINES * TARGET_SAMPLES);
    let mut lat = Vec::with_capacity(TARGET_LINES * TARGET_SAMPLES);

    for line in 0..TARGET_LINES {
        for sample in 0..TARGET_SAMPLES {
            let (l, s) = (line as f64, sample as f64);
            let x = if cross_antimeridian {
                to_lon180(170.0 + 0.25 * s - 0.12 * l)
            } else {
                -30.0 + 0.25 * s - 0.12 * l
            };
            lon.push(x);
            lat.push(-29.0 + 0.06 * l + 0.01 * s);
        }
    }

    (lon, lat)
}

/// The synthetic swath as a target grid over `(line, sample)`.
pub fn fake_target_grid(cross_antimeridian: bool) -> TargetGrid {
    let (lon, lat) = fake_target_lon_lat(cross_antimeridian);
    fake_target_grid_named(("longitude", "latitude"), lon, lat)
}

/// The synthetic swath with custom geolocation field names.
pub fn fake_target_grid_named(names: (&str, &str), lon: Vec<f64>, lat: Vec<f64>) -> TargetGrid {
    let shape = vec![TARGET_LINES, TARGET_SAMPLES];
    let dims = ["line", "sample"];
    TargetGrid::new()
        .with_field(names.0, LabeledArray::new(dims, shape.clone(), lon).unwrap())
        .with_field(names.1, LabeledArray::new(dims, shape, lat).unwrap())
}

/// Footprint through the four corner pixels of a target grid, read from
/// its `longitude`/`latitude` fields.
pub fn footprint_from_target(target: &TargetGrid) -> Footprint {
    let lon = target.get("longitude").unwrap();
    let lat = target.get("latitude").unwrap();
    let (rows, cols) = (lon.shape[0], lon.shape[1]);

    let corner = |row: usize, col: usize| {
        let k = row * cols + col;
        (lon.values[k], lat.values[k])
    };

    Footprint::new(vec![
        corner(0, 0),
        corner(0, cols - 1),
        corner(rows - 1, cols - 1),
        corner(rows - 1, 0),
    ])
}

/// Global 1 x 1 degree wind raster of 181 latitudes by 360 longitudes.
///
/// * `U10 = 5 + 2 cos(lat)`
/// * `V10 = 2 sin(lon)`
///
/// With `lon180` the longitude axis is `[-180, 180)`, otherwise
/// `[0, 360)`. With `with_nan`, a sparse block of missing values is punched
/// around the dateline between 40S and 20S: every other latitude row and
/// every third longitude column within 10 degrees on either side of 180.
pub fn fake_wind_raster(lon180: bool, with_nan: bool) -> RasterDataset {
    let y: Vec<f64> = (0..181).map(|i| -90.0 + i as f64).collect();
    let x: Vec<f64> = (0..360).map(|i| i as f64).collect();

    let u10 = y
        .iter()
        .flat_map(|&lat| x.iter().map(move |_| 5.0 + 2.0 * lat.to_radians().cos()))
        .collect();
    let v10 = y
        .iter()
        .flat_map(|_| x.iter().map(|&lon| 2.0 * lon.to_radians().sin()))
        .collect();

    let raster = RasterDataset::new(y, x)
        .with_variable("U10", u10)
        .with_variable("V10", v10);
    let mut raster = if lon180 {
        mapraster::to_lon180(raster)
    } else {
        mapraster::to_lon360(raster)
    };

    if with_nan {
        let nx = raster.x.len();
        let in_gap = |lon: f64| {
            let east = (170.0..=179.0).contains(&lon);
            let west = if lon180 {
                (-179.0..=-170.0).contains(&lon)
            } else {
                (180.0..=189.0).contains(&lon)
            };
            east || west
        };
        let masked: Vec<usize> = raster
            .y
            .iter()
            .enumerate()
            .filter(|&(iy, &lat)| iy % 2 == 0 && (-40.0..=-20.0).contains(&lat))
            .flat_map(|(iy, _)| {
                raster
                    .x
                    .iter()
                    .enumerate()
                    .filter(|&(ix, &lon)| ix % 3 == 0 && in_gap(lon))
                    .map(move |(ix, _)| iy * nx + ix)
            })
            .collect();

        for values in raster.variables.values_mut() {
            for &k in &masked {
                values[k] = f64::NAN;
            }
        }
    }

    raster
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_grid_shape() {
        let target = fake_target_grid(false);
        let lon = target.get("longitude").unwrap();
        assert_eq!(lon.dims, vec!["line", "sample"]);
        assert_eq!(lon.shape, vec![TARGET_LINES, TARGET_SAMPLES]);
        assert_eq!(lon.values[0], -30.0);
    }

    #[test]
    fn test_crossing_target_wraps_to_signed_range() {
        let (lon, _) = fake_target_lon_lat(true);
        assert!(lon.iter().all(|&x| (-180.0..180.0).contains(&x)));
        assert!(lon.iter().any(|&x| x > 170.0));
        assert!(lon.iter().any(|&x| x < -170.0));
    }

    #[test]
    fn test_footprint_corners() {
        let target = fake_target_grid(false);
        let footprint = footprint_from_target(&target);
        let ring = footprint.exterior();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring[0], ring[4]);
        assert!((ring[1].0 - (-30.0 + 0.25 * 59.0)).abs() < 1e-12);
    }

    #[test]
    fn test_wind_raster_conventions() {
        let signed = fake_wind_raster(true, false);
        assert_eq!(signed.shape(), (181, 360));
        assert_eq!(signed.x[0], -180.0);
        assert_eq!(signed.x[359], 179.0);

        let wrapped = fake_wind_raster(false, false);
        assert_eq!(wrapped.x[0], 0.0);
        assert_eq!(wrapped.x[359], 359.0);
    }

    #[test]
    fn test_wind_raster_gaps() {
        for lon180 in [true, false] {
            let raster = fake_wind_raster(lon180, true);
            let u10 = raster.variable("U10").unwrap();
            let missing = u10.iter().filter(|v| v.is_nan()).count();
            assert!(missing > 0);
            assert_eq!(
                missing,
                raster.variable("V10").unwrap().iter().filter(|v| v.is_nan()).count()
            );
        }
    }
}
