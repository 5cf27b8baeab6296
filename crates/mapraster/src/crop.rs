//! Footprint-bounded cropping of the source raster.

use std::ops::Range;

use geo_common::BoundingBox;

use crate::error::{MapRasterError, Result};
use crate::types::RasterDataset;

/// Index ranges of a raster crop, one per axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropWindow {
    pub y: Range<usize>,
    pub x: Range<usize>,
}

/// Padded index range covering `[lower, upper]` on an ascending axis.
///
/// Both bounds are located with a left binary search. The lower index is
/// clamped to at least 1 before stepping down by one, so the padding below
/// is lost when the box starts at the first coordinate. The upper index is
/// stepped up by one and clamped to the axis length.
pub fn padded_index_range(axis: &[f64], lower: f64, upper: f64) -> Range<usize> {
    let n = axis.len();
    let lo = axis.partition_point(|&a| a < lower).max(1);
    let hi = axis.partition_point(|&a| a < upper).min(n);
    (lo - 1)..(hi + 1).min(n)
}

impl CropWindow {
    /// Window covering `bbox` on a normalized raster.
    ///
    /// Fails when either axis keeps fewer than two coordinates, which
    /// happens for boxes lying outside the raster extent.
    pub fn covering(raster: &RasterDataset, bbox: &BoundingBox) -> Result<Self> {
        let y = padded_index_range(&raster.y, bbox.min_y, bbox.max_y);
        if y.len() < 2 {
            return Err(MapRasterError::empty_crop("y", bbox.min_y, bbox.max_y));
        }

        let x = padded_index_range(&raster.x, bbox.min_x, bbox.max_x);
        if x.len() < 2 {
            return Err(MapRasterError::empty_crop("x", bbox.min_x, bbox.max_x));
        }

        Ok(Self { y, x })
    }

    /// `(ny, nx)` of the cropped raster.
    pub fn shape(&self) -> (usize, usize) {
        (self.y.len(), self.x.len())
    }

    /// Slice a `(y, x)` ordered raster to this window.
    pub fn apply(&self, raster: &RasterDataset) -> RasterDataset {
        let nx = raster.x.len();
        let y = raster.y[self.y.clone()].to_vec();
        let x = raster.x[self.x.clone()].to_vec();
        let mut cropped = RasterDataset::new(y, x)
            .with_layout(raster.layout)
            .with_crs(raster.crs);

        for (name, values) in &raster.variables {
            let mut out = Vec::with_capacity(self.y.len() * self.x.len());
            for iy in self.y.clone() {
                let row = iy * nx;
                out.extend_from_slice(&values[row + self.x.start..row + self.x.end]);
            }
            cropped.variables.insert(name.clone(), out);
        }

        cropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64).collect()
    }

    #[test]
    fn test_padded_range_interior() {
        let a = axis(10);
        // lower 2.5 -> first index >= is 3, upper 5.5 -> 6
        assert_eq!(padded_index_range(&a, 2.5, 5.5), 2..7);
        // bounds on nodes
        assert_eq!(padded_index_range(&a, 2.0, 5.0), 1..6);
    }

    #[test]
    fn test_padded_range_lower_edge_is_asymmetric() {
        let a = axis(10);
        assert_eq!(padded_index_range(&a, 0.0, 3.0), 0..4);
        assert_eq!(padded_index_range(&a, 0.5, 3.0), 0..4);
        assert_eq!(padded_index_range(&a, -5.0, 3.0), 0..4);
    }

    #[test]
    fn test_padded_range_upper_edge_clamped() {
        let a = axis(10);
        assert_eq!(padded_index_range(&a, 7.5, 9.0), 7..10);
        assert_eq!(padded_index_range(&a, 7.5, 42.0), 7..10);
    }

    #[test]
    fn test_covering_outside_extent_fails() {
        let raster = RasterDataset::new(axis(5), axis(5)).with_variable("v", vec![0.0; 25]);

        let beyond = BoundingBox::new(1.0, 10.0, 2.0, 12.0);
        let err = CropWindow::covering(&raster, &beyond).unwrap_err();
        assert!(matches!(err, MapRasterError::EmptyCrop { axis: "y", .. }));

        let below = BoundingBox::new(-9.0, 1.0, -8.0, 2.0);
        let err = CropWindow::covering(&raster, &below).unwrap_err();
        assert!(matches!(err, MapRasterError::EmptyCrop { axis: "x", .. }));
    }

    #[test]
    fn test_apply_slices_rows_and_columns() {
        // value = 10 * iy + ix
        let values: Vec<f64> = (0..5)
            .flat_map(|iy| (0..6).map(move |ix| (10 * iy + ix) as f64))
            .collect();
        let raster = RasterDataset::new(axis(5), axis(6)).with_variable("v", values);

        let window = CropWindow::covering(&raster, &BoundingBox::new(2.5, 1.5, 3.5, 2.5)).unwrap();
        assert_eq!(window, CropWindow { y: 1..4, x: 2..5 });
        assert_eq!(window.shape(), (3, 3));

        let cropped = window.apply(&raster);
        assert_eq!(cropped.y, vec![1.0, 2.0, 3.0]);
        assert_eq!(cropped.x, vec![2.0, 3.0, 4.0]);
        assert_eq!(
            cropped.variable("v").unwrap(),
            &[12.0, 13.0, 14.0, 22.0, 23.0, 24.0, 32.0, 33.0, 34.0]
        );
    }
}
