//! Conversion between the caller's raster shape and the internal dataset.

use std::collections::BTreeMap;

use crate::types::{MappedDataset, MappedField, MappedRaster, RasterDataset, RasterInput};

/// Variable name used internally for an unnamed single field.
pub const UNNAMED_FIELD: &str = "__mapraster_field__";

/// Shape of the raster handed to the pipeline, remembered for reassembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputShape {
    /// A single field, with its original name.
    Field(Option<String>),
    Dataset,
}

/// Name under which a single field travels through the pipeline.
fn internal_name(name: Option<&str>) -> String {
    name.unwrap_or(UNNAMED_FIELD).to_string()
}

/// Promote the caller's raster to a dataset.
pub fn into_dataset(raster: RasterInput) -> (RasterDataset, InputShape) {
    match raster {
        RasterInput::Dataset(dataset) => (dataset, InputShape::Dataset),
        RasterInput::Field(field) => {
            let name = internal_name(field.name.as_deref());
            let dataset = RasterDataset::new(field.y, field.x)
                .with_variable(name, field.values)
                .with_layout(field.layout)
                .with_crs(field.crs);
            (dataset, InputShape::Field(field.name))
        }
    }
}

/// Rebuild the caller's shape from per-variable results on the target grid.
pub fn assemble(
    mut variables: BTreeMap<String, Vec<f64>>,
    shape: InputShape,
    dims: (String, String),
    image_shape: (usize, usize),
) -> MappedRaster {
    match shape {
        InputShape::Dataset => MappedRaster::Dataset(MappedDataset {
            dims,
            shape: image_shape,
            variables,
        }),
        InputShape::Field(name) => {
            let values = variables
                .remove(&internal_name(name.as_deref()))
                .unwrap_or_else(|| vec![f64::NAN; image_shape.0 * image_shape.1]);
            MappedRaster::Field(MappedField {
                name,
                dims,
                shape: image_shape,
                values,
            })
        }
    }
}
