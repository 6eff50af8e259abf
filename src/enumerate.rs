//! Object enumeration with bounded cost.
//!
//! Walks a bucket's listing page by page, classifying each object's ACL
//! (and, in aggressive mode, probing its ACP first). Enumeration stops
//! early once enough public-write objects have been found: past that point
//! the bucket is demonstrably exposed and further pages only add latency.
//! A failed page fetch abandons the rest of the bucket but keeps whatever
//! findings were already emitted.

use crate::acl::classify;
use crate::config::ScanConfig;
use crate::constants::PUBLIC_WRITE_ISSUE_CAP;
use crate::probe::AccessProber;
use crate::report::{Finding, FindingKind, Reporter};
use crate::store::ObjectStore;

pub struct ObjectEnumerator<'a> {
    config: &'a ScanConfig,
    store: &'a dyn ObjectStore,
    reporter: &'a dyn Reporter,
}

impl<'a> ObjectEnumerator<'a> {
    pub fn new(config: &'a ScanConfig, store: &'a dyn ObjectStore, reporter: &'a dyn Reporter) -> Self {
        Self {
            config,
            store,
            reporter,
        }
    }

    /// Enumerate one bucket's objects, emitting findings as they are found.
    pub async fn enumerate(&self, bucket: &str) {
        let prober = AccessProber::new(self.store, self.reporter);

        // public-write findings for this bucket only
        let mut issue_counter: u32 = 0;
        let mut continuation_token: Option<String> = None;

        loop {
            let page = match self
                .store
                .list_page(bucket, continuation_token.take(), None)
                .await
            {
                Ok(page) => page,
                Err(err) => {
                    tracing::debug!(bucket, error = %err, "failed to fetch listing page");
                    return;
                }
            };

            for key in &page.keys {
                if self.config.aggressive {
                    prober.probe_object_acl(bucket, key).await;
                }
                tracing::debug!(bucket, key = key.as_str(), "checking object ACP");

                let grants = match self.store.object_grants(bucket, key).await {
                    Ok(grants) => grants,
                    Err(err) => {
                        tracing::debug!(
                            bucket,
                            key = key.as_str(),
                            error = %err,
                            "failed to fetch object ACL"
                        );
                        continue;
                    }
                };

                let access = classify(&grants);

                if access.write {
                    self.reporter.report(&Finding::object_level(
                        bucket,
                        key,
                        FindingKind::PublicWrite,
                    ));
                    issue_counter += 1;
                    if issue_counter >= PUBLIC_WRITE_ISSUE_CAP {
                        tracing::debug!(
                            bucket,
                            cap = PUBLIC_WRITE_ISSUE_CAP,
                            "public-write cap reached, skipping the rest of the bucket"
                        );
                        return;
                    }
                }

                if access.read {
                    self.reporter.report(&Finding::object_level(
                        bucket,
                        key,
                        FindingKind::PublicRead,
                    ));
                }
            }

            match page.continuation_token {
                Some(token) => continuation_token = Some(token),
                None => return,
            }
        }
    }
}
