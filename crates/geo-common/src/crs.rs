//! Coordinate Reference System codes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Well-known CRS codes a raster may be tagged with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrsCode {
    /// WGS84 Geographic (lat/lon in degrees)
    #[default]
    Epsg4326,
    /// NAD83 Geographic
    Epsg4269,
    /// Web Mercator (meters)
    Epsg3857,
    /// Lambert Conformal Conic (CONUS)
    Epsg5070,
    /// Polar Stereographic North
    Epsg3413,
    /// Polar Stereographic South
    Epsg3031,
    /// UTM zone on WGS84, e.g. EPSG:32610 (zone 10 north)
    Utm { zone: u8, north: bool },
}

impl CrsCode {
    /// Parse a CRS identifier.
    ///
    /// Accepts formats like:
    /// - "EPSG:4326"
    /// - "epsg:4326"
    /// - "CRS:84" (equivalent to EPSG:4326 with lon/lat axis order)
    /// - "EPSG:32733" (UTM 33 south)
    pub fn parse(s: &str) -> Result<Self, CrsParseError> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "EPSG:4326" | "CRS:84" | "WGS84" => return Ok(CrsCode::Epsg4326),
            "EPSG:4269" => return Ok(CrsCode::Epsg4269),
            "EPSG:3857" | "EPSG:900913" => return Ok(CrsCode::Epsg3857),
            "EPSG:5070" => return Ok(CrsCode::Epsg5070),
            "EPSG:3413" => return Ok(CrsCode::Epsg3413),
            "EPSG:3031" => return Ok(CrsCode::Epsg3031),
            _ => {}
        }

        let code: u32 = normalized
            .strip_prefix("EPSG:")
            .and_then(|c| c.parse().ok())
            .ok_or_else(|| CrsParseError::UnsupportedCrs(s.to_string()))?;

        match code {
            32601..=32660 => Ok(CrsCode::Utm {
                zone: (code - 32600) as u8,
                north: true,
            }),
            32701..=32760 => Ok(CrsCode::Utm {
                zone: (code - 32700) as u8,
                north: false,
            }),
            _ => Err(CrsParseError::UnsupportedCrs(s.to_string())),
        }
    }

    /// Numeric EPSG code.
    pub fn epsg(&self) -> u32 {
        match self {
            CrsCode::Epsg4326 => 4326,
            CrsCode::Epsg4269 => 4269,
            CrsCode::Epsg3857 => 3857,
            CrsCode::Epsg5070 => 5070,
            CrsCode::Epsg3413 => 3413,
            CrsCode::Epsg3031 => 3031,
            CrsCode::Utm { zone, north: true } => 32600 + *zone as u32,
            CrsCode::Utm { zone, north: false } => 32700 + *zone as u32,
        }
    }

    /// Check if this is a geographic (lat/lon) CRS.
    pub fn is_geographic(&self) -> bool {
        matches!(self, CrsCode::Epsg4326 | CrsCode::Epsg4269)
    }
}

impl fmt::Display for CrsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg())
    }
}

impl std::str::FromStr for CrsCode {
    type Err = CrsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CrsParseError {
    #[error("Unsupported CRS: {0}")]
    UnsupportedCrs(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_crs() {
        assert_eq!(CrsCode::parse("EPSG:4326").unwrap(), CrsCode::Epsg4326);
        assert_eq!(CrsCode::parse("epsg:3857").unwrap(), CrsCode::Epsg3857);
        assert_eq!(CrsCode::parse("CRS:84").unwrap(), CrsCode::Epsg4326);
        assert_eq!(
            CrsCode::parse("EPSG:32733").unwrap(),
            CrsCode::Utm {
                zone: 33,
                north: false
            }
        );
        assert!(CrsCode::parse("EPSG:99999").is_err());
        assert!(CrsCode::parse("not a crs").is_err());
    }

    #[test]
    fn test_is_geographic() {
        assert!(CrsCode::Epsg4326.is_geographic());
        assert!(CrsCode::Epsg4269.is_geographic());
        assert!(!CrsCode::Epsg3857.is_geographic());
        assert!(!CrsCode::Utm { zone: 10, north: true }.is_geographic());
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        for code in [
            CrsCode::Epsg4326,
            CrsCode::Epsg3413,
            CrsCode::Utm { zone: 10, north: true },
        ] {
            assert_eq!(code.to_string().parse::<CrsCode>().unwrap(), code);
        }
    }
}
