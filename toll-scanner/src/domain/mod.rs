//! Domain types for the toll route scanner.
//!
//! Coordinates are validated at construction, so code that receives a
//! `Coordinate` can trust it is a real position. Everything else here is
//! plain data passed between the query client, the matcher and the
//! scanner.

mod coordinate;
mod match_result;
mod route_point;
mod stats;

pub use coordinate::{Coordinate, InvalidCoordinate};
pub use match_result::{MatchResult, Toll};
pub use route_point::{RoutePoint, ScannedPoint};
pub use stats::{CallStatistics, QueryStatus};
