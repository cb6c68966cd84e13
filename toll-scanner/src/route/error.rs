//! Route reading error types.

use crate::domain::InvalidCoordinate;

/// Errors that can occur while reading a route file.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// The file could not be opened or read
    #[error("failed to read route: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not well-formed XML
    #[error("malformed GPX: {0}")]
    Xml(#[from] quick_xml::Error),

    /// A waypoint lacks its `lat` or `lon` attribute
    #[error("point {index} is missing its {attribute} attribute")]
    MissingAttribute {
        index: usize,
        attribute: &'static str,
    },

    /// A waypoint has an unusable position
    #[error("point {index}: {source}")]
    InvalidCoordinate {
        index: usize,
        #[source]
        source: InvalidCoordinate,
    },

    /// No track or route points in the file
    #[error("no track or route points found")]
    Empty,
}

impl From<quick_xml::events::attributes::AttrError> for RouteError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        RouteError::Xml(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;

    #[test]
    fn error_display() {
        let err = RouteError::MissingAttribute {
            index: 3,
            attribute: "lon",
        };
        assert_eq!(err.to_string(), "point 3 is missing its lon attribute");

        let source = Coordinate::new(95.0, 0.0).unwrap_err();
        let err = RouteError::InvalidCoordinate { index: 1, source };
        assert_eq!(
            err.to_string(),
            "point 1: invalid coordinate: latitude must be within [-90, 90]"
        );

        assert_eq!(RouteError::Empty.to_string(), "no track or route points found");
    }
}
