//! Semicolon-separated output of scan results.
//!
//! Two tables are written per run: one row per route point with its
//! match, and one row per point with the backend call statistics.

use std::fs::File;
use std::io;
use std::path::Path;

use crate::domain::{CallStatistics, MatchResult, ScannedPoint};

const DELIMITER: u8 = b';';

/// Placeholder for a tag the matched way does not carry.
const MISSING_TAG: &str = "na";

const POINT_HEADER: [&str; 16] = [
    "pointID",
    "pointLat",
    "pointLon",
    "p2p_dist",
    "osmWayID",
    "osmWayType",
    "int_ref",
    "ref",
    "way_name",
    "operator",
    "toll",
    "nodeId",
    "nodeLat",
    "nodeLon",
    "p2nodeDistance",
    "comments",
];

const STATS_HEADER: [&str; 3] = ["row", "response_code", "duration"];

/// Errors from writing report tables.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

fn writer<W: io::Write>(out: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .from_writer(out)
}

fn cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// A way tag cell: the value, `na` if the way lacks it, empty without a way.
fn tag_cell(result: &MatchResult, value: &Option<String>) -> String {
    match (value, result.way_id) {
        (Some(value), _) => value.clone(),
        (None, Some(_)) => MISSING_TAG.to_string(),
        (None, None) => String::new(),
    }
}

/// Write one row per scanned route point.
pub fn write_points<W: io::Write>(out: W, points: &[ScannedPoint]) -> Result<(), ReportError> {
    let mut wtr = writer(out);
    wtr.write_record(POINT_HEADER)?;

    for ScannedPoint { point, result } in points {
        wtr.write_record([
            point.sequence.to_string(),
            point.coordinate.lat().to_string(),
            point.coordinate.lon().to_string(),
            point.distance_to_previous_m.to_string(),
            cell(result.way_id),
            tag_cell(result, &result.way_type),
            tag_cell(result, &result.int_ref),
            tag_cell(result, &result.ref_),
            tag_cell(result, &result.way_name),
            tag_cell(result, &result.operator),
            cell(result.toll.as_ref()),
            cell(result.node_id),
            cell(result.node_lat),
            cell(result.node_lon),
            cell(result.distance_m),
            result.comments.clone().unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write one row of call statistics per route point.
pub fn write_stats<W: io::Write>(out: W, stats: &[CallStatistics]) -> Result<(), ReportError> {
    let mut wtr = writer(out);
    wtr.write_record(STATS_HEADER)?;

    for entry in stats {
        wtr.write_record([
            entry.sequence.to_string(),
            entry.status.to_string(),
            format!("{:.2}", entry.duration.as_secs_f64()),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the per-point table to a file, replacing it if present.
pub fn write_points_file(
    path: impl AsRef<Path>,
    points: &[ScannedPoint],
) -> Result<(), ReportError> {
    write_points(File::create(path)?, points)
}

/// Write the statistics table to a file, replacing it if present.
pub fn write_stats_file(
    path: impl AsRef<Path>,
    stats: &[CallStatistics],
) -> Result<(), ReportError> {
    write_stats(File::create(path)?, stats)
}
