//! Overpass QL construction.

use crate::domain::Coordinate;

/// Builds the toll-way lookup query sent for each route point.
///
/// The query selects ways tagged `toll=yes` within `radius_m` meters of
/// the point, then recurses down to their member nodes so node
/// coordinates come back in the same response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TollWayQuery {
    pub radius_m: u32,
    /// Server-side timeout written into the query header.
    pub timeout_secs: u64,
}

impl TollWayQuery {
    pub fn new(radius_m: u32, timeout_secs: u64) -> Self {
        Self {
            radius_m,
            timeout_secs,
        }
    }

    /// Render the Overpass QL text for a coordinate.
    pub fn build(&self, around: Coordinate) -> String {
        format!(
            "[out:json][timeout:{timeout}];\n\
             (way[\"toll\"=\"yes\"](around:{radius},{around}););\n\
             (._;>;);\n\
             out;",
            timeout = self.timeout_secs,
            radius = self.radius_m,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_reference_query() {
        let query = TollWayQuery::new(5, 25);
        let around = Coordinate::new(50.9513, 1.8587).unwrap();

        assert_eq!(
            query.build(around),
            "[out:json][timeout:25];\n\
             (way[\"toll\"=\"yes\"](around:5,50.9513, 1.8587););\n\
             (._;>;);\n\
             out;"
        );
    }

    #[test]
    fn radius_and_timeout_are_configurable() {
        let query = TollWayQuery::new(50, 10);
        let text = query.build(Coordinate::new(0.0, 0.0).unwrap());

        assert!(text.starts_with("[out:json][timeout:10];"));
        assert!(text.contains("(around:50,0, 0)"));
    }
}
