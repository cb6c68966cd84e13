//! Toll route scanner.
//!
//! Checks every point of a recorded route against OpenStreetMap: is
//! there a toll motorway right under this point, and if so, which way
//! and how far away is its closest node?

pub mod distance;
pub mod domain;
pub mod matcher;
pub mod overpass;
pub mod report;
pub mod route;
pub mod scanner;
