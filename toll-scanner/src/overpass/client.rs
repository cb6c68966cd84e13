//! Overpass API HTTP client.
//!
//! Issues the toll-way query for one coordinate and applies the retry,
//! fallback and kill-request rules for each failure class. Backend
//! failures never surface as `Err`: every path ends in a `QueryOutcome`.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde_json::Value;
use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

use crate::domain::{Coordinate, QueryStatus};

use super::error::OverpassError;
use super::query::TollWayQuery;
use super::types::{QueryBody, QueryOutcome};

/// Main endpoint, around 10000 queries per day.
const PRIMARY_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

/// Fallback endpoint with no quota but much slower.
const FALLBACK_ENDPOINT: &str = "https://overpass.kumi.systems/api/interpreter";

/// Aborts queries still running on the server for this client's IP.
const DEFAULT_KILL_URL: &str = "http://overpass-api.de/api/kill_my_queries";

const DEFAULT_RADIUS_M: u32 = 5;
const DEFAULT_TIMEOUT_SECS: u64 = 25;
const DEFAULT_MAX_CONCURRENT: usize = 1;

/// Longest body excerpt written to logs.
const LOG_BODY_CHARS: usize = 500;

/// Configuration for the Overpass client.
#[derive(Debug, Clone)]
pub struct OverpassConfig {
    /// Interpreter endpoints: the primary first, then 504 fallbacks in order.
    pub endpoints: Vec<String>,
    /// Administrative endpoint hit on failure paths.
    pub kill_url: String,
    /// Search radius around each point in meters
    pub radius_m: u32,
    /// Per-attempt timeout in seconds
    pub timeout_secs: u64,
    /// Maximum points queried at once
    pub max_concurrent: usize,
    pub user_agent: String,
}

impl OverpassConfig {
    /// Create a config pointing at the public Overpass instances.
    pub fn new() -> Self {
        Self {
            endpoints: vec![PRIMARY_ENDPOINT.to_string(), FALLBACK_ENDPOINT.to_string()],
            kill_url: DEFAULT_KILL_URL.to_string(),
            radius_m: DEFAULT_RADIUS_M,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            user_agent: concat!("toll-scanner/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Replace the endpoint list (primary first).
    pub fn with_endpoints<I, S>(mut self, endpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.endpoints = endpoints.into_iter().map(Into::into).collect();
        self
    }

    /// Set the kill endpoint URL.
    pub fn with_kill_url(mut self, url: impl Into<String>) -> Self {
        self.kill_url = url.into();
        self
    }

    /// Set the search radius.
    pub fn with_radius(mut self, meters: u32) -> Self {
        self.radius_m = meters;
        self
    }

    /// Set the per-attempt timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set maximum concurrent point queries.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Overpass API client.
///
/// One `query` call performs at most one retry of the primary endpoint
/// (on 429) or walks the fallback list (on 504), never more. A semaphore
/// admits at most `max_concurrent` points at once, and a point keeps its
/// permit for the whole retry sequence.
#[derive(Debug, Clone)]
pub struct OverpassClient {
    http: reqwest::Client,
    endpoints: Vec<String>,
    kill_url: String,
    query: TollWayQuery,
    semaphore: Arc<Semaphore>,
}

impl OverpassClient {
    /// Create a new client with the given configuration.
    pub fn new(config: OverpassConfig) -> Result<Self, OverpassError> {
        if config.endpoints.is_empty() {
            return Err(OverpassError::Config(
                "at least one interpreter endpoint is required".to_string(),
            ));
        }

        if config.max_concurrent == 0 {
            return Err(OverpassError::Config(
                "max_concurrent must be at least 1".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoints: config.endpoints,
            kill_url: config.kill_url,
            query: TollWayQuery::new(config.radius_m, config.timeout_secs),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Look up toll ways around a coordinate.
    ///
    /// * 429: kill running queries, retry the same endpoint once.
    /// * 504: retry on the next endpoint; a further 504 keeps walking the
    ///   list until it runs out.
    /// * 400: empty outcome, no retry.
    /// * transport failure: kill running queries, no retry.
    ///
    /// Whatever the last attempt returns is the outcome.
    pub async fn query(&self, coordinate: Coordinate) -> QueryOutcome {
        let _permit = match self.semaphore.acquire().await {
            Ok(permit) => permit,
            Err(_) => {
                return QueryOutcome {
                    status: QueryStatus::Error,
                    headers: BTreeMap::new(),
                    body: QueryBody::Text("admission semaphore closed".to_string()),
                };
            }
        };

        let ql = self.query.build(coordinate);
        debug!(%coordinate, query = %ql, "Querying Overpass");

        let mut endpoint = 0;
        let mut outcome = self.attempt(endpoint, &ql).await;

        match outcome.status {
            QueryStatus::Http(429) => {
                warn!(
                    endpoint = %self.endpoints[endpoint],
                    "Rate limited, killing running queries and retrying once"
                );
                self.kill_running_queries().await;
                outcome = self.attempt(endpoint, &ql).await;
            }
            QueryStatus::Http(504) => {
                while outcome.status == QueryStatus::Http(504) && endpoint + 1 < self.endpoints.len()
                {
                    endpoint += 1;
                    warn!(
                        fallback = %self.endpoints[endpoint],
                        "Gateway timeout, retrying on fallback endpoint"
                    );
                    outcome = self.attempt(endpoint, &ql).await;
                }
            }
            _ => {}
        }

        outcome
    }

    /// One HTTP exchange against `endpoints[index]`.
    async fn attempt(&self, index: usize, ql: &str) -> QueryOutcome {
        let url = &self.endpoints[index];

        let response = match self.http.get(url).query(&[("data", ql)]).send().await {
            Ok(response) => response,
            Err(e) => return self.transport_failure(e.into()).await,
        };

        let status = response.status();

        if status == StatusCode::BAD_REQUEST {
            error!(
                endpoint = %url,
                query = %ql,
                "Overpass rejected the query as malformed"
            );
            return QueryOutcome::malformed_query();
        }

        let headers = header_map(response.headers());

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => return self.transport_failure(e.into()).await,
        };

        let body = match serde_json::from_str::<Value>(&text) {
            Ok(value) => QueryBody::Json(value),
            Err(_) => QueryBody::Text(text),
        };

        // 429 and 504 are handled by the caller
        if !matches!(status.as_u16(), 200 | 429 | 504) {
            warn!(
                endpoint = %url,
                status = status.as_u16(),
                body = %excerpt(&body),
                "Unexpected response from Overpass"
            );
        }

        QueryOutcome {
            status: QueryStatus::Http(status.as_u16()),
            headers,
            body,
        }
    }

    async fn transport_failure(&self, err: OverpassError) -> QueryOutcome {
        match err.transport_kind() {
            Some(kind) => warn!(%kind, error = %err, "Overpass request failed"),
            None => warn!(error = %err, "Overpass request failed"),
        }
        self.kill_running_queries().await;
        QueryOutcome::transport_failure(&err)
    }

    /// Ask the backend to abort queries still running for us.
    ///
    /// Awaited so it lands before any retry, but its result is ignored.
    async fn kill_running_queries(&self) {
        match self.http.get(&self.kill_url).send().await {
            Ok(response) => debug!(
                status = response.status().as_u16(),
                "Requested kill of running queries"
            ),
            Err(e) => debug!(error = %e, "Kill request failed"),
        }
    }
}

fn header_map(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}

fn excerpt(body: &QueryBody) -> String {
    body.to_string().chars().take(LOG_BODY_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = OverpassConfig::new()
            .with_endpoints(["http://localhost:8080/a", "http://localhost:8080/b"])
            .with_kill_url("http://localhost:8080/kill")
            .with_radius(20)
            .with_timeout(60)
            .with_max_concurrent(4)
            .with_user_agent("test-agent");

        assert_eq!(
            config.endpoints,
            vec!["http://localhost:8080/a", "http://localhost:8080/b"]
        );
        assert_eq!(config.kill_url, "http://localhost:8080/kill");
        assert_eq!(config.radius_m, 20);
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.max_concurrent, 4);
        assert_eq!(config.user_agent, "test-agent");
    }

    #[test]
    fn config_defaults() {
        let config = OverpassConfig::default();

        assert_eq!(config.endpoints, vec![PRIMARY_ENDPOINT, FALLBACK_ENDPOINT]);
        assert_eq!(config.kill_url, DEFAULT_KILL_URL);
        assert_eq!(config.radius_m, 5);
        assert_eq!(config.timeout_secs, 25);
        assert_eq!(config.max_concurrent, 1);
        assert!(config.user_agent.starts_with("toll-scanner/"));
    }

    #[test]
    fn client_creation() {
        let client = OverpassClient::new(OverpassConfig::new()).unwrap();
        assert_eq!(client.endpoints, vec![PRIMARY_ENDPOINT, FALLBACK_ENDPOINT]);
    }

    #[test]
    fn rejects_empty_endpoint_list() {
        let config = OverpassConfig::new().with_endpoints(Vec::<String>::new());
        let err = OverpassClient::new(config).unwrap_err();
        assert!(matches!(err, OverpassError::Config(_)));
    }

    #[test]
    fn rejects_zero_concurrency() {
        let config = OverpassConfig::new().with_max_concurrent(0);
        assert!(matches!(
            OverpassClient::new(config),
            Err(OverpassError::Config(_))
        ));
    }

    #[test]
    fn excerpt_is_bounded() {
        let body = QueryBody::Text("x".repeat(2000));
        assert_eq!(excerpt(&body).len(), LOG_BODY_CHARS);
    }
}
