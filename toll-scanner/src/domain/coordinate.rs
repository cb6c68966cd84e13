//! Geographic coordinate type.

use std::fmt;

/// Error returned when a latitude/longitude pair is not a valid position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate: {reason}")]
pub struct InvalidCoordinate {
    reason: &'static str,
}

impl InvalidCoordinate {
    /// Why the coordinate was rejected.
    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

/// A WGS-84 position in decimal degrees.
///
/// Latitude is always within `[-90, 90]` and longitude within `[-180, 180]`.
///
/// # Examples
///
/// ```
/// use toll_scanner::domain::Coordinate;
///
/// let calais = Coordinate::parse("50.9513", "1.8587").unwrap();
/// assert_eq!(calais.to_string(), "50.9513, 1.8587");
///
/// // Out of range is rejected
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// assert!(Coordinate::parse("abc", "1.0").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    /// Create a coordinate, validating both components.
    pub fn new(lat: f64, lon: f64) -> Result<Self, InvalidCoordinate> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(InvalidCoordinate {
                reason: "components must be finite numbers",
            });
        }

        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinate {
                reason: "latitude must be within [-90, 90]",
            });
        }

        if !(-180.0..=180.0).contains(&lon) {
            return Err(InvalidCoordinate {
                reason: "longitude must be within [-180, 180]",
            });
        }

        Ok(Self { lat, lon })
    }

    /// Parse a coordinate from decimal-degree strings, as found in GPX files.
    pub fn parse(lat: &str, lon: &str) -> Result<Self, InvalidCoordinate> {
        let lat = lat.trim().parse::<f64>().map_err(|_| InvalidCoordinate {
            reason: "latitude is not a decimal number",
        })?;
        let lon = lon.trim().parse::<f64>().map_err(|_| InvalidCoordinate {
            reason: "longitude is not a decimal number",
        })?;
        Self::new(lat, lon)
    }

    /// Latitude in decimal degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in decimal degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }
}

/// Formats as `"lat, lon"`, the form accepted by the Overpass `around` filter.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lon)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every in-range pair is accepted and preserved exactly
        #[test]
        fn in_range_always_valid(lat in -90.0f64..=90.0, lon in -180.0f64..=180.0) {
            let c = Coordinate::new(lat, lon).unwrap();
            prop_assert_eq!(c.lat(), lat);
            prop_assert_eq!(c.lon(), lon);
        }

        /// Display output parses back to the same coordinate
        #[test]
        fn display_parses_back(lat in -90.0f64..=90.0, lon in -180.0f64..=180.0) {
            let c = Coordinate::new(lat, lon).unwrap();
            let text = c.to_string();
            let (lat_s, lon_s) = text.split_once(", ").unwrap();
            prop_assert_eq!(Coordinate::parse(lat_s, lon_s).unwrap(), c);
        }
    }
}
