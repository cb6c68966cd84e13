//! Route scanning.
//!
//! Walks a route point by point, asks the backend for toll ways around
//! each point and records the match plus call statistics. A failing point
//! only degrades its own row; the scan always covers the whole route.

mod config;
mod scan;

pub use config::ScanConfig;
pub use scan::{RouteScanner, ScanReport, TollQueryBackend};
