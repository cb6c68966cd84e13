//! GPX waypoint extraction.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;

use crate::domain::Coordinate;

use super::error::RouteError;

/// Read the waypoints of a GPX document in document order.
///
/// Track points (`trkpt`) of every track and segment are returned. Files
/// without any track point fall back to their route points (`rtept`).
/// Standalone waypoints (`wpt`) are ignored.
pub fn read_gpx<R: BufRead>(input: R) -> Result<Vec<Coordinate>, RouteError> {
    let mut reader = Reader::from_reader(input);
    let mut buf = Vec::new();
    let mut track = Vec::new();
    let mut route = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(start) | Event::Empty(start) => match start.local_name().as_ref() {
                b"trkpt" => track.push(parse_point(&start, track.len() + 1)?),
                b"rtept" => route.push(parse_point(&start, route.len() + 1)?),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    debug!(
        track_points = track.len(),
        route_points = route.len(),
        "Read GPX"
    );

    let points = if track.is_empty() { route } else { track };
    if points.is_empty() {
        return Err(RouteError::Empty);
    }

    Ok(points)
}

/// Open and read a GPX file.
pub fn read_gpx_file(path: impl AsRef<Path>) -> Result<Vec<Coordinate>, RouteError> {
    let file = File::open(path.as_ref())?;
    read_gpx(BufReader::new(file))
}

/// Parse the `lat`/`lon` attributes of the `index`-th (1-based) point.
fn parse_point(start: &BytesStart<'_>, index: usize) -> Result<Coordinate, RouteError> {
    let mut lat = None;
    let mut lon = None;

    for attr in start.attributes() {
        let attr = attr?;
        match attr.key.as_ref() {
            b"lat" => lat = Some(String::from_utf8_lossy(&attr.value).into_owned()),
            b"lon" => lon = Some(String::from_utf8_lossy(&attr.value).into_owned()),
            _ => {}
        }
    }

    let lat = lat.ok_or(RouteError::MissingAttribute {
        index,
        attribute: "lat",
    })?;
    let lon = lon.ok_or(RouteError::MissingAttribute {
        index,
        attribute: "lon",
    })?;

    Coordinate::parse(&lat, &lon).map_err(|source| RouteError::InvalidCoordinate { index, source })
}
