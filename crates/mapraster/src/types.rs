//! Core types for raster mapping.

use std::collections::BTreeMap;

use geo_common::CrsCode;
use serde::{Deserialize, Serialize};

use crate::error::{MapRasterError, Result};
use crate::stats;

/// Storage order of a raster's two spatial axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisOrder {
    /// Row-major over `(y, x)`: `values[iy * nx + ix]`.
    #[default]
    YX,
    /// Row-major over `(x, y)`: `values[ix * ny + iy]`.
    XY,
}

/// Method used to resample the raster onto the intermediate grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationMethod {
    /// Spline for complete variables, linear when any value is missing.
    #[default]
    Auto,
    /// Bilinear, NaN-propagating.
    Linear,
    /// Bicubic interpolating spline; fails on missing values.
    Spline,
}

impl InterpolationMethod {
    /// Parse from string (case-insensitive), falling back to `Auto`.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "linear" | "bilinear" => Self::Linear,
            "spline" | "cubic" | "bicubic" => Self::Spline,
            _ => Self::Auto,
        }
    }

    /// Resolve `Auto` against the presence of missing values.
    pub fn resolve(self, has_missing: bool) -> Self {
        match self {
            Self::Auto if has_missing => Self::Linear,
            Self::Auto => Self::Spline,
            other => other,
        }
    }
}

/// A single 2D raster variable with its own axes.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterField {
    /// Variable name; `None` for an anonymous field.
    pub name: Option<String>,
    /// Latitude-like axis coordinates.
    pub y: Vec<f64>,
    /// Longitude-like axis coordinates.
    pub x: Vec<f64>,
    /// Values in `layout` order.
    pub values: Vec<f64>,
    pub layout: AxisOrder,
    pub crs: CrsCode,
}

impl RasterField {
    /// Create a `(y, x)` ordered geographic field.
    pub fn new(name: Option<String>, y: Vec<f64>, x: Vec<f64>, values: Vec<f64>) -> Self {
        Self {
            name,
            y,
            x,
            values,
            layout: AxisOrder::YX,
            crs: CrsCode::Epsg4326,
        }
    }

    /// Set the storage order of `values`.
    pub fn with_layout(mut self, layout: AxisOrder) -> Self {
        self.layout = layout;
        self
    }

    /// Set the CRS tag.
    pub fn with_crs(mut self, crs: CrsCode) -> Self {
        self.crs = crs;
        self
    }
}

/// A collection of raster variables sharing one pair of spatial axes.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterDataset {
    /// Latitude-like axis coordinates.
    pub y: Vec<f64>,
    /// Longitude-like axis coordinates.
    pub x: Vec<f64>,
    pub layout: AxisOrder,
    pub crs: CrsCode,
    /// Variable values keyed by name, each in `layout` order.
    pub variables: BTreeMap<String, Vec<f64>>,
}

impl RasterDataset {
    /// Create an empty `(y, x)` ordered geographic dataset.
    pub fn new(y: Vec<f64>, x: Vec<f64>) -> Self {
        Self {
            y,
            x,
            layout: AxisOrder::YX,
            crs: CrsCode::Epsg4326,
            variables: BTreeMap::new(),
        }
    }

    /// Add or replace a variable.
    pub fn with_variable(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.variables.insert(name.into(), values);
        self
    }

    /// Set the storage order of all variables.
    pub fn with_layout(mut self, layout: AxisOrder) -> Self {
        self.layout = layout;
        self
    }

    /// Set the CRS tag.
    pub fn with_crs(mut self, crs: CrsCode) -> Self {
        self.crs = crs;
        self
    }

    /// `(ny, nx)` sizes of the spatial axes.
    pub fn shape(&self) -> (usize, usize) {
        (self.y.len(), self.x.len())
    }

    /// Values of a variable, if present.
    pub fn variable(&self, name: &str) -> Option<&[f64]> {
        self.variables.get(name).map(Vec::as_slice)
    }

    /// Check that every variable holds exactly `ny * nx` values.
    pub fn validate(&self) -> Result<()> {
        let (ny, nx) = self.shape();
        for (name, values) in &self.variables {
            if values.len() != ny * nx {
                return Err(MapRasterError::shape_mismatch(format!(
                    "variable '{}' has {} values, expected {} ({} x {})",
                    name,
                    values.len(),
                    ny * nx,
                    ny,
                    nx
                )));
            }
        }
        Ok(())
    }
}

/// Raster handed to the pipeline: one field or a named collection.
#[derive(Debug, Clone, PartialEq)]
pub enum RasterInput {
    Field(RasterField),
    Dataset(RasterDataset),
}

impl From<RasterField> for RasterInput {
    fn from(field: RasterField) -> Self {
        Self::Field(field)
    }
}

impl From<RasterDataset> for RasterInput {
    fn from(dataset: RasterDataset) -> Self {
        Self::Dataset(dataset)
    }
}

/// An N-dimensional array with named dimensions, row-major over `dims`.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledArray {
    pub dims: Vec<String>,
    pub shape: Vec<usize>,
    pub values: Vec<f64>,
}

impl LabeledArray {
    /// Create an array, checking that `values` fills `shape`.
    pub fn new<S: Into<String>>(
        dims: impl IntoIterator<Item = S>,
        shape: Vec<usize>,
        values: Vec<f64>,
    ) -> Result<Self> {
        let dims: Vec<String> = dims.into_iter().map(Into::into).collect();
        if dims.len() != shape.len() {
            return Err(MapRasterError::shape_mismatch(format!(
                "{} dimension names for a {}-dimensional shape",
                dims.len(),
                shape.len()
            )));
        }
        let expected: usize = shape.iter().product();
        if values.len() != expected {
            return Err(MapRasterError::shape_mismatch(format!(
                "{} values for shape {:?}",
                values.len(),
                shape
            )));
        }
        Ok(Self { dims, shape, values })
    }

    /// Drop `dim` by keeping only its first index. Arrays without `dim` are
    /// returned unchanged.
    pub fn select_first(&self, dim: &str) -> Self {
        let Some(axis) = self.dims.iter().position(|d| d == dim) else {
            return self.clone();
        };

        let outer: usize = self.shape[..axis].iter().product();
        let inner: usize = self.shape[axis + 1..].iter().product();
        let stride = self.shape[axis] * inner;

        let mut values = Vec::with_capacity(outer * inner);
        for block in 0..outer {
            let start = block * stride;
            values.extend_from_slice(&self.values[start..start + inner]);
        }

        let mut dims = self.dims.clone();
        let mut shape = self.shape.clone();
        dims.remove(axis);
        shape.remove(axis);

        Self { dims, shape, values }
    }
}

/// Named geolocation arrays describing a target image grid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetGrid {
    pub fields: BTreeMap<String, LabeledArray>,
}

impl TargetGrid {
    /// Create an empty target grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Target grid with `longitude`/`latitude` fields over two image axes.
    pub fn from_lon_lat(
        dims: (&str, &str),
        shape: (usize, usize),
        longitude: Vec<f64>,
        latitude: Vec<f64>,
    ) -> Result<Self> {
        let shape = vec![shape.0, shape.1];
        Ok(Self::new()
            .with_field("longitude", LabeledArray::new([dims.0, dims.1], shape.clone(), longitude)?)
            .with_field("latitude", LabeledArray::new([dims.0, dims.1], shape, latitude)?))
    }

    /// Add or replace a field.
    pub fn with_field(mut self, name: impl Into<String>, field: LabeledArray) -> Self {
        self.fields.insert(name.into(), field);
        self
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&LabeledArray> {
        self.fields.get(name)
    }
}

/// Ground-coverage polygon of the target image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    exterior: Vec<(f64, f64)>,
}

impl Footprint {
    /// Footprint from an exterior ring of `(lon, lat)` vertices. The ring is
    /// closed if its last vertex differs from the first.
    pub fn new(mut exterior: Vec<(f64, f64)>) -> Self {
        if let (Some(&first), Some(&last)) = (exterior.first(), exterior.last()) {
            if first != last {
                exterior.push(first);
            }
        }
        Self { exterior }
    }

    /// Exterior ring vertices, closed.
    pub fn exterior(&self) -> &[(f64, f64)] {
        &self.exterior
    }
}

/// One mapped variable on the target image grid.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedField {
    pub name: Option<String>,
    /// Target image dimension names.
    pub dims: (String, String),
    /// Target image shape, row-major over `dims`.
    pub shape: (usize, usize),
    pub values: Vec<f64>,
}

impl MappedField {
    /// Fraction of NaN pixels.
    pub fn nan_ratio(&self) -> f64 {
        stats::nan_ratio(&self.values)
    }

    /// Mean over non-NaN pixels.
    pub fn nan_mean(&self) -> f64 {
        stats::nan_mean(&self.values)
    }

    /// Population standard deviation over non-NaN pixels.
    pub fn nan_std(&self) -> f64 {
        stats::nan_std(&self.values)
    }
}

/// Mapped variables sharing the target image grid.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedDataset {
    pub dims: (String, String),
    pub shape: (usize, usize),
    pub variables: BTreeMap<String, Vec<f64>>,
}

impl MappedDataset {
    /// Variable names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    /// Values of a variable, if present.
    pub fn variable(&self, name: &str) -> Option<&[f64]> {
        self.variables.get(name).map(Vec::as_slice)
    }

    /// Extract one variable as a standalone field.
    pub fn field(&self, name: &str) -> Option<MappedField> {
        self.variables.get(name).map(|values| MappedField {
            name: Some(name.to_string()),
            dims: self.dims.clone(),
            shape: self.shape,
            values: values.clone(),
        })
    }
}

/// Pipeline output, mirroring the [`RasterInput`] kind.
#[derive(Debug, Clone, PartialEq)]
pub enum MappedRaster {
    Field(MappedField),
    Dataset(MappedDataset),
}

impl MappedRaster {
    /// True when the input was a single field.
    pub fn is_field(&self) -> bool {
        matches!(self, Self::Field(_))
    }

    /// Target image shape.
    pub fn shape(&self) -> (usize, usize) {
        match self {
            Self::Field(field) => field.shape,
            Self::Dataset(dataset) => dataset.shape,
        }
    }

    pub fn into_field(self) -> Option<MappedField> {
        match self {
            Self::Field(field) => Some(field),
            Self::Dataset(_) => None,
        }
    }

    pub fn into_dataset(self) -> Option<MappedDataset> {
        match self {
            Self::Dataset(dataset) => Some(dataset),
            Self::Field(_) => None,
        }
    }
}
