// Configuration module

use crate::constants::DEFAULT_CONCURRENCY;

/// Immutable scan configuration, constructed once at startup from the CLI
/// and shared read-only by every worker.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Emit progress narration and diagnostics for failed attempts.
    pub verbose: bool,
    /// Attempt destructive write probes (test upload, policy widening).
    pub aggressive: bool,
    /// Stop after the bucket ACL and open-listing checks.
    pub quick: bool,
    /// Number of buckets scanned in parallel.
    pub concurrency: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            aggressive: false,
            quick: false,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}
