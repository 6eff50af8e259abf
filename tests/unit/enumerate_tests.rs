// Object enumerator tests: early exit, pagination failure, probe ordering

use std::sync::atomic::Ordering;

use s3sentry::acl::Permission;
use s3sentry::config::ScanConfig;
use s3sentry::enumerate::ObjectEnumerator;
use s3sentry::report::FindingKind;

use super::fakes::{owner_grant, public_grant, CollectingReporter, FakeStore};

fn writable_objects(count: usize) -> Vec<(String, Vec<s3sentry::acl::AccessGrant>)> {
    (0..count)
        .map(|i| {
            (
                format!("object-{:03}", i),
                vec![owner_grant(), public_grant(Permission::Write)],
            )
        })
        .collect()
}

#[tokio::test]
async fn test_emits_findings_for_exposed_objects() {
    let store = FakeStore {
        objects: vec![
            ("readable.txt".to_string(), vec![public_grant(Permission::Read)]),
            ("private.txt".to_string(), vec![owner_grant()]),
            (
                "writable.txt".to_string(),
                vec![public_grant(Permission::FullControl)],
            ),
        ],
        ..FakeStore::default()
    };
    let reporter = CollectingReporter::default();
    let config = ScanConfig::default();

    ObjectEnumerator::new(&config, &store, &reporter)
        .enumerate("bucket")
        .await;

    let findings = reporter.findings();
    assert_eq!(findings.len(), 2);
    assert_eq!(findings[0].key.as_deref(), Some("readable.txt"));
    assert_eq!(findings[0].kind, FindingKind::PublicRead);
    assert_eq!(findings[1].key.as_deref(), Some("writable.txt"));
    assert_eq!(findings[1].kind, FindingKind::PublicWrite);
}

#[tokio::test]
async fn test_stops_after_five_public_write_objects() {
    // 10 write-exposed objects, one per page: exactly 5 findings and the
    // 6th page onwards is never fetched
    let store = FakeStore {
        objects: writable_objects(10),
        page_size: 1,
        ..FakeStore::default()
    };
    let reporter = CollectingReporter::default();
    let config = ScanConfig::default();

    ObjectEnumerator::new(&config, &store, &reporter)
        .enumerate("bucket")
        .await;

    assert_eq!(reporter.count_of(FindingKind::PublicWrite), 5);
    assert_eq!(store.pages_fetched.load(Ordering::SeqCst), 5);
}

#[tokio::test]
async fn test_cap_applies_within_a_single_page() {
    let store = FakeStore {
        objects: writable_objects(20),
        ..FakeStore::default()
    };
    let reporter = CollectingReporter::default();
    let config = ScanConfig::default();

    ObjectEnumerator::new(&config, &store, &reporter)
        .enumerate("bucket")
        .await;

    assert_eq!(reporter.count_of(FindingKind::PublicWrite), 5);
    assert_eq!(store.pages_fetched.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_public_read_objects_do_not_trigger_early_exit() {
    let objects = (0..8)
        .map(|i| {
            (
                format!("object-{}", i),
                vec![public_grant(Permission::Read)],
            )
        })
        .collect();
    let store = FakeStore {
        objects,
        page_size: 2,
        ..FakeStore::default()
    };
    let reporter = CollectingReporter::default();
    let config = ScanConfig::default();

    ObjectEnumerator::new(&config, &store, &reporter)
        .enumerate("bucket")
        .await;

    assert_eq!(reporter.count_of(FindingKind::PublicRead), 8);
    assert_eq!(reporter.count_of(FindingKind::PublicWrite), 0);
    assert_eq!(store.pages_fetched.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_pagination_failure_keeps_collected_findings() {
    let store = FakeStore {
        objects: writable_objects(6),
        page_size: 2,
        fail_listing_at_page: Some(1),
        ..FakeStore::default()
    };
    let reporter = CollectingReporter::default();
    let config = ScanConfig::default();

    ObjectEnumerator::new(&config, &store, &reporter)
        .enumerate("bucket")
        .await;

    // First page's two findings survive the failed second page
    assert_eq!(reporter.count_of(FindingKind::PublicWrite), 2);
    assert_eq!(store.pages_fetched.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_object_acl_fetch_failure_skips_that_object() {
    let mut objects = writable_objects(2);
    objects.insert(1, ("ghost.txt".to_string(), Vec::new()));
    let store = FakeStore {
        objects,
        acl_denied_keys: vec!["ghost.txt".to_string()],
        ..FakeStore::default()
    };
    let reporter = CollectingReporter::default();
    let config = ScanConfig::default();

    ObjectEnumerator::new(&config, &store, &reporter)
        .enumerate("bucket")
        .await;

    assert_eq!(reporter.count_of(FindingKind::PublicWrite), 2);
}

#[tokio::test]
async fn test_aggressive_mode_probes_every_object_before_cap() {
    let store = FakeStore {
        objects: writable_objects(3),
        ..FakeStore::default()
    };
    let reporter = CollectingReporter::default();
    let config = ScanConfig {
        aggressive: true,
        ..ScanConfig::default()
    };

    ObjectEnumerator::new(&config, &store, &reporter)
        .enumerate("bucket")
        .await;

    let probed = store.object_acl_probes.lock().unwrap().clone();
    assert_eq!(probed, vec!["object-000", "object-001", "object-002"]);
    // Probes were rejected, so no writable-ACP findings
    assert_eq!(reporter.count_of(FindingKind::ObjectPolicyWritable), 0);
}

#[tokio::test]
async fn test_aggressive_probe_success_emits_object_policy_finding() {
    let store = FakeStore {
        objects: vec![("only.txt".to_string(), vec![owner_grant()])],
        object_acl_writable: true,
        ..FakeStore::default()
    };
    let reporter = CollectingReporter::default();
    let config = ScanConfig {
        aggressive: true,
        ..ScanConfig::default()
    };

    ObjectEnumerator::new(&config, &store, &reporter)
        .enumerate("bucket")
        .await;

    assert_eq!(reporter.count_of(FindingKind::ObjectPolicyWritable), 1);
    let finding = &reporter.findings()[0];
    assert_eq!(finding.key.as_deref(), Some("only.txt"));
}

#[tokio::test]
async fn test_non_aggressive_mode_never_probes() {
    let store = FakeStore {
        objects: writable_objects(2),
        object_acl_writable: true,
        ..FakeStore::default()
    };
    let reporter = CollectingReporter::default();
    let config = ScanConfig::default();

    ObjectEnumerator::new(&config, &store, &reporter)
        .enumerate("bucket")
        .await;

    assert!(store.object_acl_probes.lock().unwrap().is_empty());
    assert!(store.uploads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_bucket_produces_no_findings() {
    let store = FakeStore::default();
    let reporter = CollectingReporter::default();
    let config = ScanConfig::default();

    ObjectEnumerator::new(&config, &store, &reporter)
        .enumerate("bucket")
        .await;

    assert!(reporter.findings().is_empty());
    assert_eq!(store.pages_fetched.load(Ordering::SeqCst), 1);
}
