//! Interpolation of regular grids.
//!
//! Two strategies resample a regular `(y, x)` grid onto another regular
//! grid: [`SplineInterpolator`] for complete data and
//! [`LinearInterpolator`] when values are missing. Scattered point queries
//! (the curvilinear target pixels) always go through
//! [`regular_grid_interpolate`].

pub mod linear;
pub mod spline;

pub use linear::{regular_grid_interpolate, LinearInterpolator};
pub use spline::{BicubicSpline, SplineInterpolator};

use crate::error::{MapRasterError, Result};
use crate::stats::has_missing_values;
use crate::types::InterpolationMethod;

/// Values on the outer product of two strictly ascending axes.
#[derive(Debug, Clone, Copy)]
pub struct RegularGrid<'a> {
    y: &'a [f64],
    x: &'a [f64],
    values: &'a [f64],
}

impl<'a> RegularGrid<'a> {
    /// Wrap row-major `(y, x)` values.
    ///
    /// Both axes need at least two strictly ascending coordinates.
    pub fn new(y: &'a [f64], x: &'a [f64], values: &'a [f64]) -> Result<Self> {
        check_axis("y", y)?;
        check_axis("x", x)?;
        if values.len() != y.len() * x.len() {
            return Err(MapRasterError::shape_mismatch(format!(
                "{} values on a {} x {} grid",
                values.len(),
                y.len(),
                x.len()
            )));
        }
        Ok(Self { y, x, values })
    }

    pub fn y(&self) -> &'a [f64] {
        self.y
    }

    pub fn x(&self) -> &'a [f64] {
        self.x
    }

    pub fn values(&self) -> &'a [f64] {
        self.values
    }

    #[inline]
    pub(crate) fn at(&self, iy: usize, ix: usize) -> f64 {
        self.values[iy * self.x.len() + ix]
    }
}

fn check_axis(name: &str, axis: &[f64]) -> Result<()> {
    if axis.len() < 2 {
        return Err(MapRasterError::invalid_axis(
            name,
            format!("needs at least 2 coordinates, got {}", axis.len()),
        ));
    }
    if axis.windows(2).any(|w| !(w[1] > w[0])) {
        return Err(MapRasterError::invalid_axis(name, "not strictly ascending"));
    }
    Ok(())
}

/// Cell index and fractional position of `v` on a strictly ascending axis.
///
/// Returns `None` outside `[axis[0], axis[n-1]]` and for NaN. The last
/// coordinate maps to the last cell with offset 1.
#[inline]
pub(crate) fn locate(axis: &[f64], v: f64) -> Option<(usize, f64)> {
    let n = axis.len();
    if !(v >= axis[0] && v <= axis[n - 1]) {
        return None;
    }
    let i = (axis.partition_point(|&a| a <= v) - 1).min(n - 2);
    Some((i, (v - axis[i]) / (axis[i + 1] - axis[i])))
}

/// Strategy for resampling one regular grid onto another.
pub trait GridInterpolator: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Resample `grid` onto the outer product of `ys` and `xs`.
    ///
    /// # Returns
    /// `ys.len() * xs.len()` values, row-major over `ys`.
    fn interpolate_grid(&self, grid: &RegularGrid<'_>, ys: &[f64], xs: &[f64]) -> Result<Vec<f64>>;
}

static LINEAR: LinearInterpolator = LinearInterpolator;
static SPLINE: SplineInterpolator = SplineInterpolator;

/// Pick the stage-one interpolator for a variable.
///
/// With [`InterpolationMethod::Auto`] the choice depends only on whether
/// `values` contains NaN.
pub fn select_interpolator(
    method: InterpolationMethod,
    values: &[f64],
) -> &'static dyn GridInterpolator {
    match method.resolve(has_missing_values(values)) {
        InterpolationMethod::Linear => &LINEAR,
        _ => &SPLINE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate() {
        let axis = [0.0, 1.0, 2.0, 4.0];
        assert_eq!(locate(&axis, 0.0), Some((0, 0.0)));
        assert_eq!(locate(&axis, 1.0), Some((1, 0.0)));
        assert_eq!(locate(&axis, 3.0), Some((2, 0.5)));
        assert_eq!(locate(&axis, 4.0), Some((2, 1.0)));
        assert_eq!(locate(&axis, -0.1), None);
        assert_eq!(locate(&axis, 4.1), None);
        assert_eq!(locate(&axis, f64::NAN), None);
    }

    #[test]
    fn test_regular_grid_rejects_bad_axes() {
        let values = [0.0; 4];
        assert!(RegularGrid::new(&[0.0, 1.0], &[0.0, 1.0], &values).is_ok());
        assert!(RegularGrid::new(&[1.0, 0.0], &[0.0, 1.0], &values).is_err());
        assert!(RegularGrid::new(&[0.0, 0.0], &[0.0, 1.0], &values).is_err());
        assert!(RegularGrid::new(&[0.0], &[0.0, 1.0, 2.0, 3.0], &values).is_err());
        assert!(RegularGrid::new(&[0.0, 1.0], &[0.0, 1.0, 2.0], &values).is_err());
    }

    #[test]
    fn test_select_interpolator() {
        let complete = [1.0, 2.0, 3.0];
        let gappy = [1.0, f64::NAN, 3.0];
        let auto = InterpolationMethod::Auto;

        assert_eq!(select_interpolator(auto, &complete).name(), "spline");
        assert_eq!(select_interpolator(auto, &gappy).name(), "linear");
        assert_eq!(select_interpolator(InterpolationMethod::Linear, &complete).name(), "linear");
        assert_eq!(select_interpolator(InterpolationMethod::Spline, &gappy).name(), "spline");
    }
}
