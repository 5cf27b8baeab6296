//! Bilinear interpolation on regular grids.

use super::{locate, GridInterpolator, RegularGrid};
use crate::error::{MapRasterError, Result};

/// Bilinear interpolation inside one located cell.
///
/// Any NaN corner yields NaN, even with a zero weight.
#[inline]
fn bilinear(grid: &RegularGrid<'_>, (iy, wy): (usize, f64), (ix, wx): (usize, f64)) -> f64 {
    let v00 = grid.at(iy, ix);
    let v01 = grid.at(iy, ix + 1);
    let v10 = grid.at(iy + 1, ix);
    let v11 = grid.at(iy + 1, ix + 1);

    v00 * (1.0 - wy) * (1.0 - wx)
        + v01 * (1.0 - wy) * wx
        + v10 * wy * (1.0 - wx)
        + v11 * wy * wx
}

/// Interpolate a regular grid at paired `(ys[k], xs[k])` coordinates.
///
/// Points outside the grid extent map to NaN, as do points whose 2x2
/// stencil touches a NaN value.
///
/// # Arguments
/// * `grid` - Source grid
/// * `ys` - Query coordinates along the grid's y axis
/// * `xs` - Query coordinates along the grid's x axis, same length as `ys`
pub fn regular_grid_interpolate(
    grid: &RegularGrid<'_>,
    ys: &[f64],
    xs: &[f64],
) -> Result<Vec<f64>> {
    if ys.len() != xs.len() {
        return Err(MapRasterError::shape_mismatch(format!(
            "{} y coordinates paired with {} x coordinates",
            ys.len(),
            xs.len()
        )));
    }

    Ok(ys
        .iter()
        .zip(xs)
        .map(|(&y, &x)| match (locate(grid.y(), y), locate(grid.x(), x)) {
            (Some(cy), Some(cx)) => bilinear(grid, cy, cx),
            _ => f64::NAN,
        })
        .collect())
}

/// NaN-propagating bilinear resampling.
///
/// Missing values bloom: every output cell whose stencil touches a NaN is
/// NaN. Nothing is filled in.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearInterpolator;

impl GridInterpolator for LinearInterpolator {
    fn name(&self) -> &'static str {
        "linear"
    }

    fn interpolate_grid(&self, grid: &RegularGrid<'_>, ys: &[f64], xs: &[f64]) -> Result<Vec<f64>> {
        let cols: Vec<Option<(usize, f64)>> = xs.iter().map(|&x| locate(grid.x(), x)).collect();

        let mut output = vec![f64::NAN; ys.len() * xs.len()];
        for (row, &y) in output.chunks_mut(xs.len().max(1)).zip(ys) {
            let Some(cy) = locate(grid.y(), y) else {
                continue;
            };
            for (out, col) in row.iter_mut().zip(&cols) {
                if let Some(cx) = *col {
                    *out = bilinear(grid, cy, cx);
                }
            }
        }

        Ok(output)
    }
}
