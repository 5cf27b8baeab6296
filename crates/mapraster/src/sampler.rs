//! Uniform intermediate sampling grid.

use geo_common::BoundingBox;

use crate::error::{MapRasterError, Result};

/// Samples per intermediate axis for a target image of `ny x nx` pixels.
///
/// The mean of the two image sizes, truncated, then capped at `cap`.
pub fn intermediate_size(ny: usize, nx: usize, cap: usize) -> usize {
    ((ny + nx) / 2).min(cap)
}

/// `num` evenly spaced values over `[start, stop]`, both ends included.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            let mut values: Vec<f64> = (0..num).map(|i| start + i as f64 * step).collect();
            values[num - 1] = stop;
            values
        }
    }
}

/// Uniform longitude/latitude axes spanning the footprint bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct IntermediateGrid {
    pub lons: Vec<f64>,
    pub lats: Vec<f64>,
}

impl IntermediateGrid {
    /// `num x num` grid over `bbox`.
    pub fn spanning(bbox: &BoundingBox, num: usize) -> Result<Self> {
        if num < 2 {
            return Err(MapRasterError::DegenerateGeometry(format!(
                "intermediate grid needs at least 2 samples per axis, got {}",
                num
            )));
        }
        if bbox.is_degenerate() {
            return Err(MapRasterError::DegenerateGeometry(format!(
                "footprint bounding box [{}, {}] x [{}, {}] has no area",
                bbox.min_x, bbox.max_x, bbox.min_y, bbox.max_y
            )));
        }

        Ok(Self {
            lons: linspace(bbox.min_x, bbox.max_x, num),
            lats: linspace(bbox.min_y, bbox.max_y, num),
        })
    }

    /// `(lats, lons)` sizes.
    pub fn shape(&self) -> (usize, usize) {
        (self.lats.len(), self.lons.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intermediate_size() {
        assert_eq!(intermediate_size(50, 60, 1000), 55);
        assert_eq!(intermediate_size(50, 61, 1000), 55);
        assert_eq!(intermediate_size(3000, 2000, 1000), 1000);
        assert_eq!(intermediate_size(1, 2, 1000), 1);
    }

    #[test]
    fn test_linspace_includes_both_ends() {
        let values = linspace(-1.0, 1.0, 5);
        assert_eq!(values, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);

        let values = linspace(0.1, 0.7, 7);
        assert_eq!(values.len(), 7);
        assert_eq!(values[0], 0.1);
        assert_eq!(values[6], 0.7);

        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
    }

    #[test]
    fn test_spanning() {
        let bbox = BoundingBox::new(10.0, -5.0, 20.0, 5.0);
        let grid = IntermediateGrid::spanning(&bbox, 11).unwrap();
        assert_eq!(grid.shape(), (11, 11));
        assert_eq!(grid.lons[1], 11.0);
        assert_eq!(grid.lats[10], 5.0);
    }

    #[test]
    fn test_spanning_rejects_degenerate_input() {
        let bbox = BoundingBox::new(10.0, -5.0, 20.0, 5.0);
        assert!(matches!(
            IntermediateGrid::spanning(&bbox, 1),
            Err(MapRasterError::DegenerateGeometry(_))
        ));

        let flat = BoundingBox::new(10.0, 5.0, 20.0, 5.0);
        assert!(matches!(
            IntermediateGrid::spanning(&flat, 10),
            Err(MapRasterError::DegenerateGeometry(_))
        ));
    }
}
