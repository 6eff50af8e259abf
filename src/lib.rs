// s3sentry library
//
// Scans S3 buckets named on stdin for public-exposure misconfigurations:
// open ACL grants, open directory listings, and (aggressive mode only)
// writable access policies.

pub mod acl;
pub mod config;
pub mod constants;
pub mod enumerate;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod probe;
pub mod region;
pub mod report;
pub mod scanner;
pub mod store;
