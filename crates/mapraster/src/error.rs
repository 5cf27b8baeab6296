//! Error types for raster mapping.

use thiserror::Error;

/// Errors that can occur while mapping a raster onto a target grid.
#[derive(Error, Debug)]
pub enum MapRasterError {
    /// Invalid pipeline configuration.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// The target grid does not expose a recognized geolocation field.
    #[error("target grid must contain {expected}")]
    MissingGeolocation { expected: String },

    /// The footprint does not overlap enough of a raster axis to crop it.
    #[error("empty crop range on axis '{axis}' for bounds [{lower}, {upper}]")]
    EmptyCrop {
        axis: &'static str,
        lower: f64,
        upper: f64,
    },

    /// The footprint or intermediate grid collapses to nothing.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Array lengths do not match the declared axes or dimensions.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A coordinate axis is not strictly monotonic.
    #[error("invalid axis '{axis}': {reason}")]
    InvalidAxis { axis: String, reason: String },

    /// The raster could not be brought into a geographic CRS.
    #[error("projection error: {0}")]
    ProjectionError(String),

    /// Interpolation error.
    #[error("interpolation error: {0}")]
    InterpolationError(String),
}

impl MapRasterError {
    /// Create a MissingGeolocation error.
    pub fn missing_geolocation(expected: impl Into<String>) -> Self {
        Self::MissingGeolocation {
            expected: expected.into(),
        }
    }

    /// Create an EmptyCrop error.
    pub fn empty_crop(axis: &'static str, lower: f64, upper: f64) -> Self {
        Self::EmptyCrop { axis, lower, upper }
    }

    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(msg: impl Into<String>) -> Self {
        Self::ShapeMismatch(msg.into())
    }

    /// Create an InvalidAxis error.
    pub fn invalid_axis(axis: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAxis {
            axis: axis.into(),
            reason: reason.into(),
        }
    }

    /// Create an InterpolationError.
    pub fn interpolation(msg: impl Into<String>) -> Self {
        Self::InterpolationError(msg.into())
    }
}

/// Result type for raster mapping operations.
pub type Result<T> = std::result::Result<T, MapRasterError>;
