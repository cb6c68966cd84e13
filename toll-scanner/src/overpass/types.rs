//! Overpass API response DTOs and query outcomes.
//!
//! Elements map directly to the Overpass JSON output (`[out:json]`).
//! Only nodes and ways matter for toll matching; other element kinds
//! are accepted and ignored.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::domain::QueryStatus;

use super::error::OverpassError;

/// Top-level Overpass JSON response.
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassResponse {
    pub elements: Vec<Element>,
}

/// One element of an Overpass response, discriminated by its `type` field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Node(Node),
    Way(Way),

    /// Relations, areas and anything else.
    #[serde(other)]
    Other,
}

/// A single geographic point.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Node {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

/// A linear feature made of an ordered list of node ids.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Way {
    pub id: i64,
    #[serde(default)]
    pub nodes: Vec<i64>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl Way {
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

/// Body of a backend answer.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryBody {
    /// Parsed JSON payload.
    Json(Value),

    /// An error description, or a response body that was not JSON.
    Text(String),

    /// Deliberately empty (malformed query responses).
    Empty,
}

/// Formats JSON compactly, text verbatim and `Empty` as `{}`.
impl fmt::Display for QueryBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryBody::Json(value) => write!(f, "{value}"),
            QueryBody::Text(text) => f.write_str(text),
            QueryBody::Empty => f.write_str("{}"),
        }
    }
}

/// The terminal result of one client invocation, after any retries.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    pub status: QueryStatus,
    pub headers: BTreeMap<String, String>,
    pub body: QueryBody,
}

impl QueryOutcome {
    /// Outcome for a request that never produced an HTTP response.
    pub fn transport_failure(err: &OverpassError) -> Self {
        Self {
            status: QueryStatus::Error,
            headers: BTreeMap::new(),
            body: QueryBody::Text(err.to_string()),
        }
    }

    /// Outcome for a 400 response: the query itself was rejected.
    pub fn malformed_query() -> Self {
        Self {
            status: QueryStatus::Http(400),
            headers: BTreeMap::new(),
            body: QueryBody::Empty,
        }
    }

    /// Whether the backend rejected the query text, which points at a
    /// query-construction bug rather than a transient problem.
    pub fn is_malformed_query(&self) -> bool {
        self.status == QueryStatus::Http(400)
    }
}
