// Constants module - well-known identifiers and scan defaults

/// URI of the AllUsers group. A grant to this group is exercisable by anyone
/// on the internet, with or without AWS credentials.
pub const ALL_USERS_URI: &str = "http://acs.amazonaws.com/groups/global/AllUsers";

/// URI of the AuthenticatedUsers group (any AWS account). Grantee used by the
/// aggressive bucket-policy widening probe.
pub const AUTHENTICATED_USERS_URI: &str =
    "http://acs.amazonaws.com/groups/global/AuthenticatedUsers";

/// Response header carrying the bucket's region on the virtual-hosted endpoint.
pub const BUCKET_REGION_HEADER: &str = "x-amz-bucket-region";

/// Default number of buckets scanned in parallel.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Per-bucket cap on reported public-write objects. Once this many are found
/// the bucket is clearly exposed and enumeration stops early.
pub const PUBLIC_WRITE_ISSUE_CAP: u32 = 5;

/// Key of the object written by the aggressive upload probe. Not deleted
/// afterwards.
pub const TEST_OBJECT_KEY: &str = "s3sentry-test.txt";

/// Body of the upload-probe object.
pub const TEST_OBJECT_BODY: &[u8] = b"s3sentry-test";
