//! Configuration for the raster mapping pipeline.

use crate::types::InterpolationMethod;
use serde::{Deserialize, Serialize};

/// Upper bound on the intermediate grid size along each axis.
pub const DEFAULT_MAX_INTERMEDIATE_SIZE: usize = 1000;

/// Dimension name excluded when inferring the target image axes.
pub const DEFAULT_POLARIZATION_DIM: &str = "pol";

/// Configuration for [`map_raster_with`](crate::map_raster_with).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapRasterConfig {
    /// Cap on the number of intermediate samples per axis.
    pub max_intermediate_size: usize,

    /// Map raster variables on the rayon thread pool.
    pub parallel_variables: bool,

    /// Name of the target grid axis that carries polarization.
    pub polarization_dim: String,

    /// Raster to intermediate grid method. `Auto` picks the spline for
    /// complete variables and linear interpolation otherwise.
    pub stage_one: InterpolationMethod,
}

impl Default for MapRasterConfig {
    fn default() -> Self {
        Self {
            max_intermediate_size: DEFAULT_MAX_INTERMEDIATE_SIZE,
            parallel_variables: false,
            polarization_dim: DEFAULT_POLARIZATION_DIM.to_string(),
            stage_one: InterpolationMethod::Auto,
        }
    }
}

impl MapRasterConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("MAPRASTER_MAX_INTERMEDIATE_SIZE") {
            if let Ok(size) = val.parse() {
                config.max_intermediate_size = size;
            }
        }

        if let Ok(val) = std::env::var("MAPRASTER_PARALLEL") {
            config.parallel_variables = val.to_lowercase() == "true" || val == "1";
        }

        if let Ok(val) = std::env::var("MAPRASTER_POLARIZATION_DIM") {
            config.polarization_dim = val;
        }

        if let Ok(val) = std::env::var("MAPRASTER_STAGE_ONE") {
            config.stage_one = InterpolationMethod::from_str(&val);
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_intermediate_size < 2 {
            return Err("max_intermediate_size must be >= 2".to_string());
        }

        if self.polarization_dim.is_empty() {
            return Err("polarization_dim must not be empty".to_string());
        }

        Ok(())
    }
}
