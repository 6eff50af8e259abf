//! Aggressive write probes.
//!
//! Each probe is a single best-effort mutating attempt: upload a test
//! object, widen the bucket ACL, or set an object ACL to public-read. A
//! probe that succeeds proves write-level exposure and emits a finding; a
//! probe that fails emits nothing beyond a verbose diagnostic. There is no
//! retry and no cleanup — artifacts and widened grants are left in place,
//! which is why these run only behind the aggressive flag.

use crate::constants::{AUTHENTICATED_USERS_URI, TEST_OBJECT_BODY, TEST_OBJECT_KEY};
use crate::report::{Finding, FindingKind, Reporter};
use crate::store::ObjectStore;

pub struct AccessProber<'a> {
    store: &'a dyn ObjectStore,
    reporter: &'a dyn Reporter,
}

impl<'a> AccessProber<'a> {
    pub fn new(store: &'a dyn ObjectStore, reporter: &'a dyn Reporter) -> Self {
        Self { store, reporter }
    }

    /// Attempt to write a fixed test object into the bucket.
    pub async fn probe_upload(&self, bucket: &str) {
        tracing::debug!(bucket, key = TEST_OBJECT_KEY, "attempting test upload");
        match self
            .store
            .put_test_object(bucket, TEST_OBJECT_KEY, TEST_OBJECT_BODY.to_vec())
            .await
        {
            Ok(()) => self
                .reporter
                .report(&Finding::bucket_level(bucket, FindingKind::UploadAllowed)),
            Err(err) => tracing::debug!(bucket, error = %err, "test upload rejected"),
        }
    }

    /// Attempt to grant READ on the bucket ACL to the AuthenticatedUsers
    /// group.
    pub async fn probe_bucket_acl(&self, bucket: &str) {
        tracing::debug!(bucket, "attempting bucket ACP write");
        match self
            .store
            .widen_bucket_acl(bucket, AUTHENTICATED_USERS_URI)
            .await
        {
            Ok(()) => self.reporter.report(&Finding::bucket_level(
                bucket,
                FindingKind::BucketPolicyWritable,
            )),
            Err(err) => tracing::debug!(bucket, error = %err, "bucket ACP write rejected"),
        }
    }

    /// Attempt to set one object's ACL to public-read.
    pub async fn probe_object_acl(&self, bucket: &str, key: &str) {
        tracing::debug!(bucket, key, "attempting object ACP write");
        match self.store.publicize_object_acl(bucket, key).await {
            Ok(()) => self.reporter.report(&Finding::object_level(
                bucket,
                key,
                FindingKind::ObjectPolicyWritable,
            )),
            Err(err) => {
                tracing::debug!(bucket, key, error = %err, "object ACP write rejected")
            }
        }
    }
}
