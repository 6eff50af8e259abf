//! ACL grant model and public-exposure classification.
//!
//! S3 access-control lists are a list of grants, each a (grantee, permission)
//! pair. A bucket or object is publicly exposed when a grant names the
//! well-known AllUsers group as grantee. Classification here is pure: raw
//! grants in, a pair of booleans out, no I/O and no rendering.

use crate::constants::ALL_USERS_URI;

/// Kind of grantee a grant names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GranteeType {
    CanonicalUser,
    Group,
    Other,
}

/// Permission conferred by a grant.
///
/// ACP-only permissions (READ_ACP / WRITE_ACP) are folded into `Other`;
/// they expose the ACL itself, not the data, and are out of scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Read,
    Write,
    FullControl,
    Other,
}

/// One access-control grant, decoupled from the SDK's wire types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGrant {
    pub grantee_type: GranteeType,
    /// Group URI, canonical user ID, or email depending on `grantee_type`.
    pub grantee_id: String,
    pub permission: Permission,
}

impl AccessGrant {
    /// Whether this grant's grantee is the public AllUsers group.
    pub fn is_public(&self) -> bool {
        self.grantee_type == GranteeType::Group && self.grantee_id == ALL_USERS_URI
    }
}

/// Result of classifying a grant list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublicAccess {
    pub read: bool,
    pub write: bool,
}

impl PublicAccess {
    pub fn is_exposed(&self) -> bool {
        self.read || self.write
    }
}

/// Classify a grant list for public exposure.
///
/// `read` is set iff some grant gives the AllUsers group READ; `write` is set
/// iff some grant gives it WRITE or FULL_CONTROL. Both flags are always
/// computed regardless of grant order.
pub fn classify(grants: &[AccessGrant]) -> PublicAccess {
    let mut access = PublicAccess::default();
    for grant in grants {
        if !grant.is_public() {
            continue;
        }
        match grant.permission {
            Permission::Read => access.read = true,
            Permission::Write | Permission::FullControl => access.write = true,
            Permission::Other => {}
        }
    }
    access
}
