use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use toll_scanner::overpass::{OverpassClient, OverpassConfig};
use toll_scanner::report::{write_points_file, write_stats_file};
use toll_scanner::route::read_gpx_file;
use toll_scanner::scanner::{RouteScanner, ScanConfig};

/// Find toll motorways along a GPX route using the Overpass API.
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// The path to the GPX route
    route: PathBuf,

    /// Where to write the per-point results
    #[arg(long, default_value = "route_points.csv")]
    points_out: PathBuf,

    /// Where to write the per-call statistics
    #[arg(long, default_value = "execution_stats.csv")]
    stats_out: PathBuf,

    /// Search radius around each point, in meters
    #[arg(long, default_value_t = 5)]
    radius: u32,

    /// Per-attempt timeout, in seconds
    #[arg(long, default_value_t = 25)]
    timeout: u64,

    /// Interpreter endpoint; repeat to set the primary and its 504 fallbacks in order
    #[arg(long = "endpoint")]
    endpoints: Vec<String>,

    /// Endpoint asked to kill running queries after a failed call
    #[arg(long)]
    kill_url: Option<String>,

    /// Number of route points queried at once
    #[arg(long, default_value_t = 1)]
    concurrency: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let started = Instant::now();

    let coordinates = read_gpx_file(&cli.route)?;
    info!(count = coordinates.len(), route = %cli.route.display(), "Loaded route points");

    let mut config = OverpassConfig::new()
        .with_radius(cli.radius)
        .with_timeout(cli.timeout)
        .with_max_concurrent(cli.concurrency.max(1));
    if !cli.endpoints.is_empty() {
        config = config.with_endpoints(cli.endpoints);
    }
    if let Some(kill_url) = cli.kill_url {
        config = config.with_kill_url(kill_url);
    }

    let client = OverpassClient::new(config)?;
    let scanner = RouteScanner::new(client, ScanConfig::new(cli.concurrency));
    let report = scanner.scan(&coordinates).await;

    write_points_file(&cli.points_out, &report.points)?;
    write_stats_file(&cli.stats_out, &report.stats)?;

    info!(
        points = %cli.points_out.display(),
        stats = %cli.stats_out.display(),
        toll_hits = report.toll_hits(),
        failed_calls = report.failed_calls(),
        "Wrote results"
    );
    info!("Runtime duration: {:.2}", started.elapsed().as_secs_f64());

    Ok(())
}
