//! The per-point outcome of toll matching.

use std::fmt;

/// Toll status reported for a route point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toll {
    /// The matched way's own `toll` tag value (normally `"yes"`).
    Tagged(String),

    /// The backend answered and found no toll way near the point.
    No,

    /// The backend could not be queried or returned something unusable.
    NoData,
}

impl Toll {
    pub fn as_str(&self) -> &str {
        match self {
            Toll::Tagged(value) => value,
            Toll::No => "No",
            Toll::NoData => "No data",
        }
    }
}

impl fmt::Display for Toll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closest toll-road information found for one route point.
///
/// All fields default to absent; the matcher fills in what it can
/// determine. `toll` and `comments` are never both absent on a result
/// returned by the matcher.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchResult {
    /// OSM id of the matched way.
    pub way_id: Option<i64>,

    /// The way's `highway` tag.
    pub way_type: Option<String>,

    /// The way's `int_ref` tag (e.g. "E 15").
    pub int_ref: Option<String>,

    /// The way's `ref` tag (e.g. "A 26").
    pub ref_: Option<String>,

    /// The way's `name` tag.
    pub way_name: Option<String>,

    /// The way's `operator` tag.
    pub operator: Option<String>,

    pub toll: Option<Toll>,

    /// OSM id of the closest node on the way.
    pub node_id: Option<i64>,
    pub node_lat: Option<f64>,
    pub node_lon: Option<f64>,

    /// Whole meters from the route point to the closest node.
    pub distance_m: Option<u64>,

    /// Free-text explanation for anything unusual.
    pub comments: Option<String>,
}

impl MatchResult {
    /// The backend gave no usable answer.
    pub fn no_data(comments: impl Into<String>) -> Self {
        Self {
            toll: Some(Toll::NoData),
            comments: Some(comments.into()),
            ..Self::default()
        }
    }

    /// The backend answered with no toll objects at all.
    pub fn no_toll() -> Self {
        Self {
            toll: Some(Toll::No),
            comments: Some("No toll objects found".to_string()),
            ..Self::default()
        }
    }

    /// Whether a toll way node was located near the point.
    pub fn has_toll_node(&self) -> bool {
        self.node_id.is_some() && matches!(self.toll, Some(Toll::Tagged(_)))
    }
}
