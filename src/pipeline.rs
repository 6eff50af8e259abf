//! Per-bucket scan pipeline.
//!
//! Each bucket runs the same fixed sequence of stages, each reachable only
//! from its predecessor:
//!
//! ```text
//! ResolveRegion -> CheckBucketACL -> CheckOpenListing
//!     -> (quick? Done)
//!     -> (aggressive? ProbeBucket)
//!     -> EnumerateObjects -> Done
//! ```
//!
//! Region resolution failure abandons the bucket; every other stage failure
//! is absorbed and the pipeline moves on. Every bucket reaches Done exactly
//! once.
//!
//! Caveat on the open-listing check: the listing runs under the caller's
//! own credentials, so success may reflect the caller's authorized access
//! rather than true public exposure. The finding is worded "possible" for
//! that reason.

use std::sync::Arc;

use async_trait::async_trait;

use crate::acl::classify;
use crate::config::ScanConfig;
use crate::enumerate::ObjectEnumerator;
use crate::probe::AccessProber;
use crate::region::ResolveRegion;
use crate::report::{Finding, FindingKind, Reporter};
use crate::store::{ObjectStore, StoreFactory};

/// One unit of scan work. The orchestrator is generic over this so worker
/// scheduling can be tested without any network.
#[async_trait]
pub trait ProcessBucket: Send + Sync {
    async fn process(&self, bucket: &str);
}

/// Runs the full scan pipeline for one bucket at a time.
pub struct BucketPipeline {
    config: Arc<ScanConfig>,
    resolver: Arc<dyn ResolveRegion>,
    stores: Arc<dyn StoreFactory>,
    reporter: Arc<dyn Reporter>,
}

impl BucketPipeline {
    pub fn new(
        config: Arc<ScanConfig>,
        resolver: Arc<dyn ResolveRegion>,
        stores: Arc<dyn StoreFactory>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            config,
            resolver,
            stores,
            reporter,
        }
    }

    async fn check_bucket_acl(&self, store: &dyn ObjectStore, bucket: &str) {
        let grants = match store.bucket_grants(bucket).await {
            Ok(grants) => grants,
            Err(err) => {
                // Treated as "no grants observed", not fatal to the pipeline
                tracing::debug!(bucket, error = %err, "failed to get bucket ACL");
                return;
            }
        };

        let access = classify(&grants);
        if access.write {
            self.reporter
                .report(&Finding::bucket_level(bucket, FindingKind::PublicWrite));
        }
        if access.read {
            self.reporter
                .report(&Finding::bucket_level(bucket, FindingKind::PublicRead));
        }
        if !access.is_exposed() {
            tracing::debug!(bucket, "no public access found on bucket ACL");
        }
    }

    async fn check_open_listing(&self, store: &dyn ObjectStore, bucket: &str) {
        match store.list_page(bucket, None, Some(1)).await {
            Ok(_) => self
                .reporter
                .report(&Finding::bucket_level(bucket, FindingKind::OpenListing)),
            Err(err) => {
                tracing::debug!(bucket, error = %err, "no open directory listing found")
            }
        }
    }
}

#[async_trait]
impl ProcessBucket for BucketPipeline {
    async fn process(&self, bucket: &str) {
        let region = match self.resolver.resolve(bucket).await {
            Ok(region) => region,
            Err(err) => {
                tracing::debug!(bucket, error = %err, "unable to resolve bucket region");
                return;
            }
        };
        tracing::debug!(bucket, region = %region, "bucket found in region");

        let store = self.stores.store_for_region(&region);

        self.check_bucket_acl(store.as_ref(), bucket).await;
        self.check_open_listing(store.as_ref(), bucket).await;

        if self.config.quick {
            return;
        }

        if self.config.aggressive {
            let prober = AccessProber::new(store.as_ref(), self.reporter.as_ref());
            prober.probe_upload(bucket).await;
            prober.probe_bucket_acl(bucket).await;
        }

        ObjectEnumerator::new(&self.config, store.as_ref(), self.reporter.as_ref())
            .enumerate(bucket)
            .await;
    }
}
