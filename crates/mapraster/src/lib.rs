//! Raster to Target Grid Mapping
//!
//! This crate resamples a regular geophysical raster (model winds, sea
//! surface temperature, ...) onto the curvilinear pixel grid of a target
//! image such as a SAR scene, whose pixels carry their own longitude and
//! latitude.
//!
//! - **Footprint cropping**: only the part of the raster under the image is fitted
//! - **NaN aware**: complete variables get a bicubic spline, gappy ones a
//!   NaN-propagating bilinear fit
//! - **Antimeridian safe**: scenes crossing the dateline are handled in `[0, 360)`
//!
//! # Architecture
//!
//! ```text
//! raster + target grid + footprint
//!      │
//!      ▼
//! normalize_raster()           reproject, (y, x) order, ascending axes
//!      │
//!      ├─► AntimeridianPolicy  footprint bbox, target longitudes
//!      │
//!      ├─► CropWindow          padded index ranges under the bbox
//!      │
//!      ├─► IntermediateGrid    uniform num x num lon/lat axes
//!      │
//!      ├─► FieldInterpolator   per variable
//!      │         │
//!      │         ├─► Stage 1: raster -> intermediate (spline | linear)
//!      │         │
//!      │         └─► Stage 2: intermediate -> target pixels (bilinear)
//!      │
//!      └─► assemble()           field in, field out; dataset in, dataset out
//! ```
//!
//! # Example
//!
//! ```ignore
//! use mapraster::{map_raster, Footprint, RasterDataset, TargetGrid};
//!
//! let raster = RasterDataset::new(lat, lon).with_variable("U10", u10);
//! let target = TargetGrid::from_lon_lat(("line", "sample"), (ny, nx), pixel_lon, pixel_lat)?;
//! let footprint = Footprint::new(corners);
//!
//! let mapped = map_raster(raster, &target, &footprint, false)?;
//! let u10 = mapped.into_dataset().and_then(|d| d.field("U10"));
//! ```

pub mod antimeridian;
pub mod assemble;
pub mod config;
pub mod crop;
pub mod error;
pub mod field;
pub mod interpolation;
pub mod normalize;
pub mod pipeline;
pub mod reproject;
pub mod sampler;
pub mod stats;
pub mod types;

// Re-export commonly used types at crate root
pub use antimeridian::AntimeridianPolicy;
pub use config::MapRasterConfig;
pub use crop::CropWindow;
pub use error::{MapRasterError, Result};
pub use field::FieldInterpolator;
pub use interpolation::{
    regular_grid_interpolate, select_interpolator, BicubicSpline, GridInterpolator,
    LinearInterpolator, RegularGrid, SplineInterpolator,
};
pub use normalize::{
    image_dims, normalize_raster, target_geolocation, to_lon180, to_lon360, Geolocation,
};
pub use pipeline::{map_raster, map_raster_with};
pub use reproject::{GeographicOnly, Reprojector};
pub use sampler::{intermediate_size, linspace, IntermediateGrid};
pub use types::{
    AxisOrder, Footprint, InterpolationMethod, LabeledArray, MappedDataset, MappedField,
    MappedRaster, RasterDataset, RasterField, RasterInput, TargetGrid,
};

pub use geo_common::{BoundingBox, CrsCode};
