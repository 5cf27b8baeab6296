//! Longitude conventions and antimeridian helpers.
//!
//! Two conventions are in use: the signed `[-180, 180)` range most imagery
//! geolocation is delivered in, and the wrapped `[0, 360)` range used when a
//! region straddles the antimeridian. Every longitude comparison in the
//! pipeline goes through [`normalize_longitude`] so that footprint bounds,
//! raster axes and target pixels agree on one convention.

/// Express a longitude in the convention selected by `wrap`.
///
/// With `wrap` set the value is mapped into `[0, 360)`; otherwise it is
/// returned unchanged. Wrapping is idempotent.
///
/// ```
/// use geo_common::normalize_longitude;
///
/// assert_eq!(normalize_longitude(-175.25, true), 184.75);
/// assert_eq!(normalize_longitude(-175.25, false), -175.25);
/// ```
#[inline]
pub fn normalize_longitude(lon: f64, wrap: bool) -> f64 {
    if !wrap {
        return lon;
    }
    let wrapped = lon.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Map a longitude into the signed `[-180, 180)` convention.
#[inline]
pub fn to_lon180(lon: f64) -> f64 {
    normalize_longitude(lon + 180.0, true) - 180.0
}

/// Check whether a ring of `(lon, lat)` vertices straddles the antimeridian.
///
/// Consecutive vertices more than 180 degrees apart in longitude are taken
/// as a jump across the ±180 line rather than a ring spanning half the globe.
pub fn ring_crosses_antimeridian(ring: &[(f64, f64)]) -> bool {
    ring.windows(2)
        .any(|pair| (pair[1].0 - pair[0].0).abs() > 180.0)
}
