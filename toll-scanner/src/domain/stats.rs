//! Per-call observability records.

use std::fmt;
use std::time::Duration;

/// Status of a backend call: an HTTP status or a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryStatus {
    Http(u16),

    /// The request never produced an HTTP response.
    Error,
}

impl QueryStatus {
    pub fn is_ok(&self) -> bool {
        *self == QueryStatus::Http(200)
    }
}

/// Formats as the numeric status, or `error` for transport failures.
impl fmt::Display for QueryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryStatus::Http(code) => write!(f, "{code}"),
            QueryStatus::Error => f.write_str("error"),
        }
    }
}

/// Timing and outcome of the backend call made for one route point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallStatistics {
    /// Sequence number of the route point.
    pub sequence: u32,
    pub status: QueryStatus,
    /// Wall-clock time for query and match combined.
    pub duration: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display() {
        assert_eq!(QueryStatus::Http(200).to_string(), "200");
        assert_eq!(QueryStatus::Http(504).to_string(), "504");
        assert_eq!(QueryStatus::Error.to_string(), "error");
    }

    #[test]
    fn only_200_is_ok() {
        assert!(QueryStatus::Http(200).is_ok());
        assert!(!QueryStatus::Http(204).is_ok());
        assert!(!QueryStatus::Http(429).is_ok());
        assert!(!QueryStatus::Error.is_ok());
    }
}
