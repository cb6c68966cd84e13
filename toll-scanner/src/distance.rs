//! Geodesic distance between coordinates.
//!
//! Distances are measured on the WGS-84 ellipsoid (Karney's algorithm via
//! the `geo` crate). Everything stored downstream uses whole meters,
//! truncated toward zero.

use geo::{Distance, Geodesic, Point};

use crate::domain::Coordinate;

fn to_point(c: Coordinate) -> Point<f64> {
    // geo points are (x = lon, y = lat)
    Point::new(c.lon(), c.lat())
}

/// Geodesic distance between two coordinates, in meters.
pub fn geodesic_distance_m(a: Coordinate, b: Coordinate) -> f64 {
    Geodesic.distance(to_point(a), to_point(b))
}

/// Geodesic distance truncated to whole meters.
pub fn whole_meters(a: Coordinate, b: Coordinate) -> u64 {
    geodesic_distance_m(a, b).abs().trunc() as u64
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn coordinate() -> impl Strategy<Value = Coordinate> {
        (-89.0f64..89.0, -179.0f64..179.0).prop_map(|(lat, lon)| Coordinate::new(lat, lon).unwrap())
    }

    proptest! {
        /// Swapping the endpoints never changes the distance
        #[test]
        fn symmetric(a in coordinate(), b in coordinate()) {
            let forward = geodesic_distance_m(a, b);
            let backward = geodesic_distance_m(b, a);
            prop_assert!((forward - backward).abs() < 1e-6, "{} vs {}", forward, backward);
        }

        /// Distances are finite and non-negative
        #[test]
        fn non_negative(a in coordinate(), b in coordinate()) {
            let d = geodesic_distance_m(a, b);
            prop_assert!(d.is_finite());
            prop_assert!(d >= 0.0);
        }
    }
}
