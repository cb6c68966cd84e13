//! The route scan loop.

use std::future::Future;
use std::time::Instant;

use futures::future::join_all;
use tracing::{debug, error, info};

use crate::domain::{CallStatistics, Coordinate, RoutePoint, ScannedPoint};
use crate::matcher::match_outcome;
use crate::overpass::{OverpassClient, QueryOutcome};

use super::config::ScanConfig;

/// Source of toll-way answers for a coordinate.
///
/// This abstraction allows the scanner to be tested with scripted answers.
pub trait TollQueryBackend {
    /// Query toll ways around `coordinate`, retries included.
    fn query(&self, coordinate: Coordinate) -> impl Future<Output = QueryOutcome>;
}

impl TollQueryBackend for OverpassClient {
    async fn query(&self, coordinate: Coordinate) -> QueryOutcome {
        OverpassClient::query(self, coordinate).await
    }
}

/// Everything a scan produced, in route order.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// One enriched row per route point.
    pub points: Vec<ScannedPoint>,

    /// One entry per route point.
    pub stats: Vec<CallStatistics>,
}

impl ScanReport {
    /// Number of points matched to a toll way node.
    pub fn toll_hits(&self) -> usize {
        self.points
            .iter()
            .filter(|p| p.result.has_toll_node())
            .count()
    }

    /// Number of points whose backend call did not end in HTTP 200.
    pub fn failed_calls(&self) -> usize {
        self.stats.iter().filter(|s| !s.status.is_ok()).count()
    }
}

/// Scans routes against a toll query backend.
pub struct RouteScanner<B> {
    backend: B,
    config: ScanConfig,
}

impl<B: TollQueryBackend> RouteScanner<B> {
    pub fn new(backend: B, config: ScanConfig) -> Self {
        Self { backend, config }
    }

    /// Scan an ordered list of coordinates.
    pub async fn scan(&self, coordinates: &[Coordinate]) -> ScanReport {
        self.scan_points(RoutePoint::sequence_from(coordinates))
            .await
    }

    /// Scan already-numbered route points, preserving their order.
    pub async fn scan_points(&self, points: Vec<RoutePoint>) -> ScanReport {
        let started = Instant::now();
        info!(points = points.len(), "Scanning route");

        let mut report = ScanReport {
            points: Vec::with_capacity(points.len()),
            stats: Vec::with_capacity(points.len()),
        };

        for batch in points.chunks(self.config.batch_size()) {
            let results = join_all(batch.iter().map(|point| self.scan_point(*point))).await;

            for (scanned, stats) in results {
                report.points.push(scanned);
                report.stats.push(stats);
            }
        }

        info!(
            points = report.points.len(),
            toll_hits = report.toll_hits(),
            failed_calls = report.failed_calls(),
            runtime = %format!("{:.2}s", started.elapsed().as_secs_f64()),
            "Route scan complete"
        );

        report
    }

    /// Query and match a single point, timing both together.
    async fn scan_point(&self, point: RoutePoint) -> (ScannedPoint, CallStatistics) {
        let started = Instant::now();

        let outcome = self.backend.query(point.coordinate).await;
        if outcome.is_malformed_query() {
            error!(
                sequence = point.sequence,
                "Backend rejected the toll query as malformed"
            );
        }

        let result = match_outcome(&outcome, point.coordinate);
        let duration = started.elapsed();

        info!(
            sequence = point.sequence,
            status = %outcome.status,
            duration = %format!("{:.2} sec.", duration.as_secs_f64()),
            "Scanned point"
        );
        debug!(sequence = point.sequence, ?result, "Match result");

        let stats = CallStatistics {
            sequence: point.sequence,
            status: outcome.status,
            duration,
        };

        (ScannedPoint { point, result }, stats)
    }
}
