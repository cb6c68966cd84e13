//! Nearest toll node matching.
//!
//! Turns a raw Overpass answer into a `MatchResult` for one route point.
//! Only motorway-class ways are measured; other toll ways only contribute
//! their tags when nothing better is found.
//!
//! Node lists are scanned with an early exit: the first measured node
//! becomes the best candidate, nearer nodes replace it, and the first node
//! that is not nearer ends the scan of its way. Node order within a way
//! therefore affects which node is reported.

use std::collections::HashMap;

use serde::Deserialize;

use crate::distance::whole_meters;
use crate::domain::{Coordinate, MatchResult, Toll};
use crate::overpass::{Element, Node, OverpassResponse, QueryBody, QueryOutcome, Way};

/// Road types that are measured against the route point.
const MOTORWAY_CLASS: [&str; 2] = ["motorway", "motorway_link"];

/// Best node found so far.
struct Candidate<'a> {
    way: &'a Way,
    node: &'a Node,
    distance_m: u64,
}

/// Match a backend answer against the route point it was issued for.
///
/// Never fails: failed queries and odd payloads come back as `No data`
/// with an explanation in `comments`.
pub fn match_outcome(outcome: &QueryOutcome, reference: Coordinate) -> MatchResult {
    let payload = match &outcome.body {
        QueryBody::Json(value) if outcome.status.is_ok() => value,
        _ => return MatchResult::no_data(describe(outcome)),
    };

    let response = match OverpassResponse::deserialize(payload) {
        Ok(response) => response,
        Err(_) if payload.get("elements").is_none() => {
            return MatchResult::no_data(describe(outcome));
        }
        Err(e) => {
            return MatchResult::no_data(format!(
                "{}, undecodable elements: {e}",
                outcome.status
            ));
        }
    };

    if response.elements.is_empty() {
        return MatchResult::no_toll();
    }

    match_elements(&response.elements, reference)
}

/// Pick the closest motorway-class toll node among decoded elements.
pub fn match_elements(elements: &[Element], reference: Coordinate) -> MatchResult {
    let nodes: HashMap<i64, &Node> = elements
        .iter()
        .filter_map(|element| match element {
            Element::Node(node) => Some((node.id, node)),
            _ => None,
        })
        .collect();

    let mut best: Option<Candidate<'_>> = None;
    let mut last_other_way: Option<&Way> = None;
    let mut unresolved = 0usize;

    for element in elements {
        let Element::Way(way) = element else {
            continue;
        };

        if !is_motorway_class(way) {
            last_other_way = Some(way);
            continue;
        }

        for node_id in &way.nodes {
            let Some(&node) = nodes.get(node_id) else {
                unresolved += 1;
                continue;
            };
            let Ok(position) = Coordinate::new(node.lat, node.lon) else {
                unresolved += 1;
                continue;
            };

            let candidate = Candidate {
                way,
                node,
                distance_m: whole_meters(position, reference),
            };

            let Some(current) = &best else {
                best = Some(candidate);
                continue;
            };

            // Farther or equal ends this way's node list.
            if candidate.distance_m >= current.distance_m {
                break;
            }
            best = Some(candidate);
        }
    }

    let mut result = MatchResult::default();
    let mut notes = Vec::new();

    if unresolved > 0 {
        notes.push(format!("{unresolved} node reference(s) missing from response"));
    }

    match (best, last_other_way) {
        (Some(candidate), _) => {
            apply_way_tags(&mut result, candidate.way);
            result.node_id = Some(candidate.node.id);
            result.node_lat = Some(candidate.node.lat);
            result.node_lon = Some(candidate.node.lon);
            result.distance_m = Some(candidate.distance_m);
        }
        (None, Some(way)) => apply_way_tags(&mut result, way),
        (None, None) => notes.push(format!(
            "No toll way with resolvable nodes among {} elements",
            elements.len()
        )),
    }

    if result.toll.is_none() && notes.is_empty() {
        notes.push("Matched way has no toll tag".to_string());
    }

    if !notes.is_empty() {
        result.comments = Some(notes.join("; "));
    }

    result
}

fn is_motorway_class(way: &Way) -> bool {
    way.tag("highway")
        .is_some_and(|highway| MOTORWAY_CLASS.contains(&highway))
}

fn apply_way_tags(result: &mut MatchResult, way: &Way) {
    let tag = |key: &str| way.tag(key).map(str::to_string);

    result.way_id = Some(way.id);
    result.way_type = tag("highway");
    result.int_ref = tag("int_ref");
    result.ref_ = tag("ref");
    result.way_name = tag("name");
    result.operator = tag("operator");
    result.toll = way.tag("toll").map(|value| Toll::Tagged(value.to_string()));
}

/// `"<status>, <body>"`, used when the answer could not be matched at all.
fn describe(outcome: &QueryOutcome) -> String {
    format!("{}, {}", outcome.status, outcome.body)
}
