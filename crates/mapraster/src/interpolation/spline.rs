//! Bicubic interpolating spline on regular grids.
//!
//! The surface is the tensor product of 1D cubic splines with not-a-knot end
//! conditions, which is the interpolating (zero smoothing) bicubic B-spline
//! with knots at the interior data points. Each cell is evaluated as a
//! bicubic Hermite patch from the node values and the spline's partial
//! derivatives at the four corners.

use super::{locate, GridInterpolator, RegularGrid};
use crate::error::{MapRasterError, Result};

/// Minimum number of coordinates per axis for a cubic fit.
pub const MIN_SPLINE_POINTS: usize = 4;

/// First derivatives at the nodes of the not-a-knot cubic spline through
/// `(x[i], y[i])`.
///
/// Solves the tridiagonal slope system with the Thomas algorithm. `x` must
/// be strictly ascending with at least [`MIN_SPLINE_POINTS`] entries.
fn not_a_knot_slopes(x: &[f64], y: &[f64]) -> Result<Vec<f64>> {
    let n = x.len();
    debug_assert!(n >= MIN_SPLINE_POINTS && y.len() == n);

    let dx: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
    let slope: Vec<f64> = (0..n - 1).map(|i| (y[i + 1] - y[i]) / dx[i]).collect();

    // sub, diag, sup, rhs
    let mut a = vec![0.0; n];
    let mut b = vec![0.0; n];
    let mut c = vec![0.0; n];
    let mut r = vec![0.0; n];

    for i in 1..n - 1 {
        a[i] = dx[i];
        b[i] = 2.0 * (dx[i - 1] + dx[i]);
        c[i] = dx[i - 1];
        r[i] = 3.0 * (dx[i] * slope[i - 1] + dx[i - 1] * slope[i]);
    }

    let d = x[2] - x[0];
    b[0] = dx[1];
    c[0] = d;
    r[0] = ((dx[0] + 2.0 * d) * dx[1] * slope[0] + dx[0] * dx[0] * slope[1]) / d;

    let d = x[n - 1] - x[n - 3];
    a[n - 1] = d;
    b[n - 1] = dx[n - 3];
    r[n - 1] = (dx[n - 2] * dx[n - 2] * slope[n - 3]
        + (2.0 * d + dx[n - 2]) * dx[n - 3] * slope[n - 2])
        / d;

    // forward sweep
    let mut c_prime = vec![0.0; n];
    let mut r_prime = vec![0.0; n];
    c_prime[0] = c[0] / b[0];
    r_prime[0] = r[0] / b[0];
    for i in 1..n {
        let m = b[i] - a[i] * c_prime[i - 1];
        if m == 0.0 || !m.is_finite() {
            return Err(MapRasterError::interpolation(
                "singular spline system; axis spacing is degenerate",
            ));
        }
        c_prime[i] = if i < n - 1 { c[i] / m } else { 0.0 };
        r_prime[i] = (r[i] - a[i] * r_prime[i - 1]) / m;
    }

    // back substitution
    let mut s = vec![0.0; n];
    s[n - 1] = r_prime[n - 1];
    for i in (0..n - 1).rev() {
        s[i] = r_prime[i] - c_prime[i] * s[i + 1];
    }

    Ok(s)
}

/// Cubic Hermite basis on one interval: weights for `(p0, m0, p1, m1)`,
/// slopes pre-scaled by the interval length `h`.
#[inline]
fn hermite_basis(t: f64, h: f64) -> [f64; 4] {
    let t2 = t * t;
    let t3 = t2 * t;
    [
        2.0 * t3 - 3.0 * t2 + 1.0,
        (t3 - 2.0 * t2 + t) * h,
        -2.0 * t3 + 3.0 * t2,
        (t3 - t2) * h,
    ]
}

/// A fitted bicubic interpolating spline over a regular `(y, x)` grid.
#[derive(Debug, Clone)]
pub struct BicubicSpline {
    y: Vec<f64>,
    x: Vec<f64>,
    z: Vec<f64>,
    /// dz/dx at the nodes
    zx: Vec<f64>,
    /// dz/dy at the nodes
    zy: Vec<f64>,
    /// d2z/dxdy at the nodes
    zxy: Vec<f64>,
}

impl BicubicSpline {
    /// Fit the spline to every value of `grid`.
    ///
    /// Fails when an axis has fewer than [`MIN_SPLINE_POINTS`] coordinates
    /// or when any value is NaN.
    pub fn fit(grid: &RegularGrid<'_>) -> Result<Self> {
        let (ny, nx) = (grid.y().len(), grid.x().len());
        if ny < MIN_SPLINE_POINTS || nx < MIN_SPLINE_POINTS {
            return Err(MapRasterError::interpolation(format!(
                "bicubic spline needs at least {} points per axis, got {} x {}",
                MIN_SPLINE_POINTS, ny, nx
            )));
        }
        if grid.values().iter().any(|v| !v.is_finite()) {
            return Err(MapRasterError::interpolation(
                "bicubic spline cannot be fitted to missing or non-finite values",
            ));
        }

        let z = grid.values().to_vec();

        let mut zx = vec![0.0; ny * nx];
        for (row, out) in z.chunks(nx).zip(zx.chunks_mut(nx)) {
            out.copy_from_slice(&not_a_knot_slopes(grid.x(), row)?);
        }

        let zy = column_slopes(grid.y(), &z, nx)?;
        let zxy = column_slopes(grid.y(), &zx, nx)?;

        Ok(Self {
            y: grid.y().to_vec(),
            x: grid.x().to_vec(),
            z,
            zx,
            zy,
            zxy,
        })
    }

    /// Evaluate at one `(y, x)` location.
    ///
    /// Locations outside the fitted extent are clamped to its boundary.
    pub fn evaluate(&self, y: f64, x: f64) -> f64 {
        let ny = self.y.len();
        let nx = self.x.len();
        let y = y.clamp(self.y[0], self.y[ny - 1]);
        let x = x.clamp(self.x[0], self.x[nx - 1]);

        let (Some((iy, u)), Some((ix, t))) = (locate(&self.y, y), locate(&self.x, x)) else {
            return f64::NAN;
        };

        let by = hermite_basis(u, self.y[iy + 1] - self.y[iy]);
        let bx = hermite_basis(t, self.x[ix + 1] - self.x[ix]);

        let mut value = 0.0;
        for corner_y in 0..2 {
            let (wy_val, wy_slope) = (by[2 * corner_y], by[2 * corner_y + 1]);
            for corner_x in 0..2 {
                let (wx_val, wx_slope) = (bx[2 * corner_x], bx[2 * corner_x + 1]);
                let k = (iy + corner_y) * nx + ix + corner_x;
                value += wy_val * (wx_val * self.z[k] + wx_slope * self.zx[k])
                    + wy_slope * (wx_val * self.zy[k] + wx_slope * self.zxy[k]);
            }
        }
        value
    }

    /// Evaluate on the outer product of `ys` and `xs`, row-major over `ys`.
    pub fn evaluate_grid(&self, ys: &[f64], xs: &[f64]) -> Vec<f64> {
        ys.iter()
            .flat_map(|&y| xs.iter().map(move |&x| self.evaluate(y, x)))
            .collect()
    }
}

/// Not-a-knot slopes along `y` for every column of a row-major array.
fn column_slopes(y: &[f64], values: &[f64], nx: usize) -> Result<Vec<f64>> {
    let ny = y.len();
    let mut out = vec![0.0; ny * nx];
    let mut column = vec![0.0; ny];
    for ix in 0..nx {
        for (iy, v) in column.iter_mut().enumerate() {
            *v = values[iy * nx + ix];
        }
        for (iy, s) in not_a_knot_slopes(y, &column)?.into_iter().enumerate() {
            out[iy * nx + ix] = s;
        }
    }
    Ok(out)
}

/// Smooth resampling with a bicubic interpolating spline.
///
/// Requires a fully populated grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct SplineInterpolator;

impl GridInterpolator for SplineInterpolator {
    fn name(&self) -> &'static str {
        "spline"
    }

    fn interpolate_grid(&self, grid: &RegularGrid<'_>, ys: &[f64], xs: &[f64]) -> Result<Vec<f64>> {
        Ok(BicubicSpline::fit(grid)?.evaluate_grid(ys, xs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(y: &[f64], x: &[f64], f: impl Fn(f64, f64) -> f64) -> Vec<f64> {
        y.iter()
            .flat_map(|&yy| x.iter().map(move |&xx| (yy, xx)))
            .map(|(yy, xx)| f(yy, xx))
            .collect()
    }

    #[test]
    fn test_slopes_exact_for_cubic() {
        // A single cubic is its own not-a-knot interpolant
        let x = [0.0, 0.5, 1.5, 2.0, 3.5];
        let f = |v: f64| v * v * v - 2.0 * v * v + v - 1.0;
        let df = |v: f64| 3.0 * v * v - 4.0 * v + 1.0;
        let y: Vec<f64> = x.iter().map(|&v| f(v)).collect();

        let s = not_a_knot_slopes(&x, &y).unwrap();
        for (xi, si) in x.iter().zip(&s) {
            assert!((si - df(*xi)).abs() < 1e-10, "slope at {}: {} vs {}", xi, si, df(*xi));
        }
    }

    #[test]
    fn test_reproduces_bicubic_polynomial() {
        let y = vec![-3.0, -1.0, 0.0, 2.0, 2.5];
        let x = vec![10.0, 11.0, 12.5, 13.0, 15.0, 16.0];
        let f = |yy: f64, xx: f64| {
            let u = xx - 12.0;
            0.5 * yy * yy * yy - yy * u * u + 0.1 * u * u * u + 2.0 * yy * u + 3.0
        };
        let values = sample(&y, &x, f);
        let grid = RegularGrid::new(&y, &x, &values).unwrap();
        let spline = BicubicSpline::fit(&grid).unwrap();

        for &(yy, xx) in &[(-2.2, 10.4), (0.0, 12.5), (1.1, 14.9), (2.5, 16.0)] {
            let got = spline.evaluate(yy, xx);
            let expected = f(yy, xx);
            assert!(
                (got - expected).abs() < 1e-9,
                "at ({}, {}): {} vs {}",
                yy,
                xx,
                got,
                expected
            );
        }
    }

    #[test]
    fn test_interpolates_nodes() {
        let y = vec![0.0, 1.0, 2.0, 3.0];
        let x = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        let values = sample(&y, &x, |yy, xx| (yy * 0.7).sin() + (xx * 1.3).cos());
        let grid = RegularGrid::new(&y, &x, &values).unwrap();
        let spline = BicubicSpline::fit(&grid).unwrap();

        let out = spline.evaluate_grid(&y, &x);
        for (a, b) in out.iter().zip(&values) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_clamps_outside_extent() {
        let y = vec![0.0, 1.0, 2.0, 3.0];
        let x = vec![0.0, 1.0, 2.0, 3.0];
        let values = sample(&y, &x, |yy, xx| yy + 2.0 * xx);
        let grid = RegularGrid::new(&y, &x, &values).unwrap();
        let spline = BicubicSpline::fit(&grid).unwrap();

        assert!((spline.evaluate(-5.0, 1.0) - spline.evaluate(0.0, 1.0)).abs() < 1e-12);
        assert!((spline.evaluate(1.0, 9.0) - spline.evaluate(1.0, 3.0)).abs() < 1e-12);
    }

    #[test]
    fn test_fit_rejects_small_or_gappy_grids() {
        let axis3 = vec![0.0, 1.0, 2.0];
        let axis4 = vec![0.0, 1.0, 2.0, 3.0];

        let values = vec![1.0; 12];
        let grid = RegularGrid::new(&axis3, &axis4, &values).unwrap();
        assert!(BicubicSpline::fit(&grid).is_err());

        let mut values = vec![1.0; 16];
        values[5] = f64::NAN;
        let grid = RegularGrid::new(&axis4, &axis4, &values).unwrap();
        assert!(matches!(
            SplineInterpolator.interpolate_grid(&grid, &[0.5], &[0.5]),
            Err(MapRasterError::InterpolationError(_))
        ));
    }
}
