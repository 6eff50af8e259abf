// Error types module

use thiserror::Error;

/// Centralized error type for the scanner.
///
/// Everything except `Bootstrap` is contained within the pipeline of the
/// bucket that produced it; only a bootstrap failure aborts the process.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The region probe got a response but no region header.
    #[error("bucket region not found in response headers")]
    RegionNotFound,

    /// The region probe could not be completed (DNS, connection, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// A bucket or object ACL could not be fetched.
    #[error("failed to fetch ACL: {0}")]
    AclFetch(String),

    /// A listing page could not be fetched mid-enumeration.
    #[error("listing pagination failed: {0}")]
    Pagination(String),

    /// An aggressive probe attempt failed. Never reported as a finding.
    #[error("probe failed: {0}")]
    Probe(String),

    /// AWS client/credential construction failed. Fatal.
    #[error("failed to bootstrap AWS client: {0}")]
    Bootstrap(String),
}

impl From<reqwest::Error> for ScanError {
    fn from(err: reqwest::Error) -> Self {
        ScanError::Network(err.to_string())
    }
}
