//! Route input.
//!
//! Reads the ordered waypoints of a recorded trip from a GPX file.

mod error;
mod gpx;

pub use error::RouteError;
pub use gpx::{read_gpx, read_gpx_file};
