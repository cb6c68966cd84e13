//! Route points and their scan results.

use crate::distance::whole_meters;

use super::{Coordinate, MatchResult};

/// A single waypoint of the scanned route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutePoint {
    /// 1-based position in the route.
    pub sequence: u32,

    /// Where the point is.
    pub coordinate: Coordinate,

    /// Whole meters to the preceding point (0 for the first point).
    pub distance_to_previous_m: u64,
}

impl RoutePoint {
    /// Number an ordered list of coordinates and compute point-to-point spacing.
    ///
    /// Each spacing depends only on the point and its immediate predecessor.
    pub fn sequence_from(coordinates: &[Coordinate]) -> Vec<RoutePoint> {
        let mut previous: Option<Coordinate> = None;

        coordinates
            .iter()
            .zip(1u32..)
            .map(|(&coordinate, sequence)| {
                let distance_to_previous_m =
                    whole_meters(coordinate, previous.unwrap_or(coordinate));
                previous = Some(coordinate);
                RoutePoint {
                    sequence,
                    coordinate,
                    distance_to_previous_m,
                }
            })
            .collect()
    }
}

/// A route point together with the match produced for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScannedPoint {
    pub point: RoutePoint,
    pub result: MatchResult,
}
