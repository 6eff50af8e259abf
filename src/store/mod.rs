//! S3 data-plane abstraction.
//!
//! The pipeline, prober and enumerator talk to buckets through the
//! [`ObjectStore`] trait rather than the SDK client directly, so the scan
//! logic can be exercised against in-memory fakes. [`aws::AwsObjectStore`]
//! is the real implementation.

pub mod aws;

use std::sync::Arc;

use async_trait::async_trait;

use crate::acl::AccessGrant;
use crate::error::ScanError;

/// One page of an object listing.
#[derive(Debug, Clone, Default)]
pub struct ObjectPage {
    pub keys: Vec<String>,
    /// Token for the next page; `None` means the listing is exhausted.
    pub continuation_token: Option<String>,
}

/// Region-bound handle to a bucket's data plane.
///
/// Every operation is a single attempt; retries are out of scope for the
/// scanner and callers decide per call site whether a failure is skippable.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch the bucket's ACL grants.
    async fn bucket_grants(&self, bucket: &str) -> Result<Vec<AccessGrant>, ScanError>;

    /// Fetch one object's ACL grants.
    async fn object_grants(&self, bucket: &str, key: &str) -> Result<Vec<AccessGrant>, ScanError>;

    /// Fetch one listing page. `max_keys` caps the page size; the
    /// open-listing check passes 1 to keep the probe cheap.
    async fn list_page(
        &self,
        bucket: &str,
        continuation_token: Option<String>,
        max_keys: Option<i32>,
    ) -> Result<ObjectPage, ScanError>;

    /// Upload a test object. Destructive; the object is not cleaned up.
    async fn put_test_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
    ) -> Result<(), ScanError>;

    /// Grant READ on the bucket ACL to the given group URI. Destructive.
    async fn widen_bucket_acl(&self, bucket: &str, group_uri: &str) -> Result<(), ScanError>;

    /// Set an object's ACL to the public-read canned ACL. Destructive.
    async fn publicize_object_acl(&self, bucket: &str, key: &str) -> Result<(), ScanError>;
}

/// Mints a region-bound [`ObjectStore`] for each bucket once its region is
/// known.
pub trait StoreFactory: Send + Sync {
    fn store_for_region(&self, region: &str) -> Arc<dyn ObjectStore>;
}
