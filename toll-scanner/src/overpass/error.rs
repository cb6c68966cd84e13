//! Overpass client error types.

use std::fmt;

/// What part of an HTTP exchange failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// The per-attempt timeout elapsed.
    Timeout,

    /// Could not connect to the endpoint.
    Connect,

    /// The request could not be built or sent.
    Request,

    /// The response body could not be read.
    Body,

    Other,
}

impl TransportKind {
    /// Classify a reqwest error by where it happened.
    pub fn classify(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportKind::Timeout
        } else if err.is_connect() {
            TransportKind::Connect
        } else if err.is_builder() || err.is_request() || err.is_redirect() {
            TransportKind::Request
        } else if err.is_body() || err.is_decode() {
            TransportKind::Body
        } else {
            TransportKind::Other
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransportKind::Timeout => "timeout",
            TransportKind::Connect => "connection",
            TransportKind::Request => "request",
            TransportKind::Body => "response body",
            TransportKind::Other => "transport",
        };
        f.write_str(name)
    }
}

/// Errors from the Overpass HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum OverpassError {
    /// The request never produced a usable HTTP response.
    #[error("{kind} failure: {source}")]
    Transport {
        kind: TransportKind,
        #[source]
        source: reqwest::Error,
    },

    /// The client was configured with unusable settings.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl OverpassError {
    /// The transport failure kind, if this is a transport failure.
    pub fn transport_kind(&self) -> Option<TransportKind> {
        match self {
            OverpassError::Transport { kind, .. } => Some(*kind),
            OverpassError::Config(_) => None,
        }
    }
}

impl From<reqwest::Error> for OverpassError {
    fn from(source: reqwest::Error) -> Self {
        OverpassError::Transport {
            kind: TransportKind::classify(&source),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder_error() -> reqwest::Error {
        reqwest::Client::new()
            .get("not a url")
            .build()
            .unwrap_err()
    }

    #[test]
    fn builder_errors_are_request_failures() {
        let err = OverpassError::from(builder_error());
        assert_eq!(err.transport_kind(), Some(TransportKind::Request));
        assert!(err.to_string().starts_with("request failure: "));
    }

    #[test]
    fn transport_keeps_original_cause() {
        use std::error::Error;

        let err = OverpassError::from(builder_error());
        assert!(err.source().is_some());
    }

    #[test]
    fn config_error_display() {
        let err = OverpassError::Config("no endpoints configured".into());
        assert_eq!(
            err.to_string(),
            "invalid configuration: no endpoints configured"
        );
        assert_eq!(err.transport_kind(), None);
    }

    #[test]
    fn kind_display() {
        assert_eq!(TransportKind::Timeout.to_string(), "timeout");
        assert_eq!(TransportKind::Connect.to_string(), "connection");
        assert_eq!(TransportKind::Body.to_string(), "response body");
    }
}
