//! Recorded reference statistics for the synthetic mapping scenarios.
//!
//! Each case maps [`fake_wind_raster`](crate::fake_wind_raster) onto
//! [`fake_target_grid`](crate::fake_target_grid). The antimeridian cases
//! use the `[0, 360)` raster, the others the `[-180, 180)` raster.

/// NaN-aware summary of one mapped variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStats {
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
    pub nan_ratio: f64,
}

/// One regression scenario and its expected output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionCase {
    pub name: &'static str,
    pub cross_antimeridian: bool,
    pub with_nan: bool,
    pub u10: FieldStats,
    pub v10: FieldStats,
}

impl RegressionCase {
    /// Raster longitude convention matching the antimeridian flag.
    pub fn lon180(&self) -> bool {
        !self.cross_antimeridian
    }
}

const U10_COMPLETE: FieldStats = FieldStats {
    mean: 6.77806260204507,
    std: 0.014106023390006,
    nan_ratio: 0.0,
};

/// Absolute tolerance on mean and standard deviation.
pub const STATS_TOLERANCE: f64 = 1e-6;

/// NaN ratio measured for the antimeridian gap case by an earlier
/// implementation of this pipeline.
pub const GAP_NAN_RATIO: f64 = 0.6207;

/// Allowed distance from [`GAP_NAN_RATIO`].
pub const GAP_NAN_RATIO_TOLERANCE: f64 = 0.05;

pub const REGRESSION_CASES: [RegressionCase; 4] = [
    RegressionCase {
        name: "no_antimeridian_no_nan",
        cross_antimeridian: false,
        with_nan: false,
        u10: U10_COMPLETE,
        v10: FieldStats {
            mean: -0.8602113794284965,
            std: 0.14652583839235925,
            nan_ratio: 0.0,
        },
    },
    // The gap lies around the dateline, away from this footprint
    RegressionCase {
        name: "no_antimeridian_with_nan",
        cross_antimeridian: false,
        with_nan: true,
        u10: U10_COMPLETE,
        v10: FieldStats {
            mean: -0.8602113794284965,
            std: 0.14652583839235925,
            nan_ratio: 0.0,
        },
    },
    RegressionCase {
        name: "antimeridian_no_nan",
        cross_antimeridian: true,
        with_nan: false,
        u10: U10_COMPLETE,
        v10: FieldStats {
            mean: 0.19330757475425273,
            std: 0.16163073379720902,
            nan_ratio: 0.0,
        },
    },
    RegressionCase {
        name: "antimeridian_with_nan",
        cross_antimeridian: true,
        with_nan: true,
        u10: FieldStats {
            mean: 6.7804763604695095,
            std: 0.01322711750902978,
            nan_ratio: 0.6616666666666666,
        },
        v10: FieldStats {
            mean: 0.3047385475425177,
            std: 0.1550093985369728,
            nan_ratio: 0.6616666666666666,
        },
    },
];
