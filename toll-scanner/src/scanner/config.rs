//! Scan configuration.

/// Configuration for a route scan.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Number of route points resolved at once.
    ///
    /// 1 scans strictly in sequence. Higher values run points in batches;
    /// the backend client still bounds calls actually in flight.
    pub concurrency: usize,
}

impl ScanConfig {
    /// Create a new configuration with the given concurrency.
    pub fn new(concurrency: usize) -> Self {
        Self { concurrency }
    }

    /// Set the number of points resolved at once.
    pub fn with_concurrency(mut self, n: usize) -> Self {
        self.concurrency = n;
        self
    }

    /// Batch size actually used; zero is treated as sequential.
    pub fn batch_size(&self) -> usize {
        self.concurrency.max(1)
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self { concurrency: 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sequential() {
        let config = ScanConfig::default();
        assert_eq!(config.concurrency, 1);
        assert_eq!(config.batch_size(), 1);
    }

    #[test]
    fn custom_config() {
        let config = ScanConfig::new(2).with_concurrency(4);
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.batch_size(), 4);
    }

    #[test]
    fn zero_concurrency_falls_back_to_sequential() {
        assert_eq!(ScanConfig::new(0).batch_size(), 1);
    }
}
