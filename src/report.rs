//! Finding types and console rendering.
//!
//! Classification produces [`Finding`] values; rendering them is the
//! reporter's job. Keeping the two apart means the classifiers can be unit
//! tested without capturing stdout, and alternative sinks (the tests use a
//! collecting one) can slot in behind the same trait.

use std::fmt;

/// What kind of exposure a finding describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingKind {
    /// AllUsers group holds READ on a bucket or object ACL.
    PublicRead,
    /// AllUsers group holds WRITE or FULL_CONTROL on a bucket or object ACL.
    PublicWrite,
    /// A listing request succeeded, suggesting directory listing is open.
    OpenListing,
    /// The aggressive upload probe landed a test object.
    UploadAllowed,
    /// The aggressive probe widened the bucket ACL.
    BucketPolicyWritable,
    /// The aggressive probe set an object ACL to public-read.
    ObjectPolicyWritable,
}

/// Severity buckets used for verbose color coding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Write-level exposure.
    High,
    /// Read-level exposure or a listing heuristic hit.
    Low,
    /// A probe succeeded; informational.
    Probe,
}

impl FindingKind {
    pub fn severity(&self) -> Severity {
        match self {
            FindingKind::PublicWrite
            | FindingKind::BucketPolicyWritable
            | FindingKind::ObjectPolicyWritable => Severity::High,
            FindingKind::PublicRead | FindingKind::OpenListing => Severity::Low,
            FindingKind::UploadAllowed => Severity::Probe,
        }
    }
}

/// One exposure finding, attributable to exactly one bucket and optionally
/// one key within it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub bucket: String,
    pub key: Option<String>,
    pub kind: FindingKind,
}

impl Finding {
    pub fn bucket_level(bucket: &str, kind: FindingKind) -> Self {
        Self {
            bucket: bucket.to_string(),
            key: None,
            kind,
        }
    }

    pub fn object_level(bucket: &str, key: &str, kind: FindingKind) -> Self {
        Self {
            bucket: bucket.to_string(),
            key: Some(key.to_string()),
            kind,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, &self.key) {
            (FindingKind::PublicRead, None) => {
                write!(f, "Bucket with public read access found: {}", self.bucket)
            }
            (FindingKind::PublicWrite, None) => {
                write!(f, "Bucket with public write access found: {}", self.bucket)
            }
            (FindingKind::PublicRead, Some(key)) => {
                write!(
                    f,
                    "Object with public read access found: {}/{}",
                    self.bucket, key
                )
            }
            (FindingKind::PublicWrite, Some(key)) => {
                write!(
                    f,
                    "Object with public write access found: {}/{}",
                    self.bucket, key
                )
            }
            (FindingKind::OpenListing, _) => {
                write!(f, "Possible open directory listing in {}", self.bucket)
            }
            (FindingKind::UploadAllowed, _) => {
                write!(f, "Upload allowed in bucket {}", self.bucket)
            }
            (FindingKind::BucketPolicyWritable, _) => {
                write!(f, "Writable Bucket ACP in bucket {}", self.bucket)
            }
            (FindingKind::ObjectPolicyWritable, Some(key)) => {
                write!(f, "Writable Bucket Object ACP {}/{}", self.bucket, key)
            }
            (FindingKind::ObjectPolicyWritable, None) => {
                write!(f, "Writable Bucket Object ACP in bucket {}", self.bucket)
            }
        }
    }
}

/// Sink for findings. Implementations must tolerate concurrent calls from
/// multiple workers.
pub trait Reporter: Send + Sync {
    fn report(&self, finding: &Finding);
}

// ANSI SGR sequences for verbose severity coding
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

/// Renders findings to stdout, one line each.
///
/// Verbose mode color-codes by severity; non-verbose mode prints the bare
/// line with no decoration.
#[derive(Debug)]
pub struct ConsoleReporter {
    verbose: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// The exact line rendered for a finding, color included when verbose.
    pub fn render(&self, finding: &Finding) -> String {
        if !self.verbose {
            return finding.to_string();
        }
        let color = match finding.kind.severity() {
            Severity::High => RED,
            Severity::Low => YELLOW,
            Severity::Probe => GREEN,
        };
        format!("{}{}{}", color, finding, RESET)
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, finding: &Finding) {
        println!("{}", self.render(finding));
    }
}
