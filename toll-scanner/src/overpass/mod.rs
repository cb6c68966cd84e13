//! Overpass API client.
//!
//! This module provides an HTTP client for the OpenStreetMap Overpass API,
//! used to find toll-tagged ways around a coordinate.
//!
//! Key characteristics of Overpass:
//! - Public instances are rate limited per IP (HTTP 429) and shed load
//!   with gateway timeouts (HTTP 504)
//! - Queries keep running server-side after the client gives up; the
//!   `kill_my_queries` endpoint aborts them
//! - A malformed query is answered with HTTP 400

mod client;
mod error;
mod query;
mod types;


pub use client::{OverpassClient, OverpassConfig};
pub use error::{OverpassError, TransportKind};
pub use query::TollWayQuery;
pub use types::{Element, Node, OverpassResponse, QueryBody, QueryOutcome, Way};
