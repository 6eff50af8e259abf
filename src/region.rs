//! Bucket region discovery.
//!
//! S3 answers unauthenticated HEAD requests on a bucket's virtual-hosted
//! endpoint with an `x-amz-bucket-region` header, even for buckets the
//! caller cannot read. The probe is metadata discovery, not secure
//! transport, so certificate validation is deliberately disabled.

use async_trait::async_trait;

use crate::constants::BUCKET_REGION_HEADER;
use crate::error::ScanError;

/// Resolves a bucket name to the region hosting it.
#[async_trait]
pub trait ResolveRegion: Send + Sync {
    async fn resolve(&self, bucket: &str) -> Result<String, ScanError>;
}

/// Region resolver backed by an HTTP HEAD probe.
#[derive(Debug, Clone)]
pub struct HttpRegionResolver {
    client: reqwest::Client,
    /// Custom endpoint for S3-compatible or mock servers. When set, the
    /// probe is path-style (`{endpoint}/{bucket}`) instead of virtual-hosted.
    endpoint: Option<String>,
}

impl HttpRegionResolver {
    pub fn new() -> Result<Self, ScanError> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| ScanError::Bootstrap(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: None,
        })
    }

    /// Point the probe at a custom endpoint instead of `*.s3.amazonaws.com`.
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = Some(endpoint.trim_end_matches('/').to_string());
        self
    }

    fn probe_url(&self, bucket: &str) -> String {
        match &self.endpoint {
            Some(endpoint) => format!("{}/{}", endpoint, bucket),
            None => format!("https://{}.s3.amazonaws.com", bucket),
        }
    }
}

#[async_trait]
impl ResolveRegion for HttpRegionResolver {
    async fn resolve(&self, bucket: &str) -> Result<String, ScanError> {
        let response = self.client.head(self.probe_url(bucket)).send().await?;

        response
            .headers()
            .get(BUCKET_REGION_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .ok_or(ScanError::RegionNotFound)
    }
}
