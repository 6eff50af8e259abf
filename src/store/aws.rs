// AWS SDK implementation of the object-store abstraction

use std::sync::Arc;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{Grant, ObjectCannedAcl, Permission as S3Permission, Type as S3Type};
use aws_sdk_s3::Client;

use super::{ObjectPage, ObjectStore, StoreFactory};
use crate::acl::{AccessGrant, GranteeType, Permission};
use crate::error::ScanError;

/// Loads the ambient AWS configuration once and builds region-bound clients
/// from it per bucket. Construction failure here is fatal to the process.
#[derive(Debug)]
pub struct AwsClientFactory {
    base: aws_config::SdkConfig,
}

impl AwsClientFactory {
    pub async fn load() -> Result<Self, ScanError> {
        let base = aws_config::defaults(BehaviorVersion::latest()).load().await;
        if base.region().is_none() && base.endpoint_url().is_none() {
            // Region is overridden per bucket anyway; nothing to validate yet.
            tracing::debug!("no default region configured, relying on per-bucket resolution");
        }
        Ok(Self { base })
    }
}

impl StoreFactory for AwsClientFactory {
    fn store_for_region(&self, region: &str) -> Arc<dyn ObjectStore> {
        let config = aws_sdk_s3::config::Builder::from(&self.base)
            .region(Region::new(region.to_string()))
            .build();
        Arc::new(AwsObjectStore::new(Client::from_conf(config)))
    }
}

/// [`ObjectStore`] over a region-bound `aws_sdk_s3::Client`.
#[derive(Debug, Clone)]
pub struct AwsObjectStore {
    client: Client,
}

impl AwsObjectStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// Translate an SDK grant into the scanner's grant model.
///
/// Grants without a grantee are dropped; a grant that names nobody cannot
/// expose anything.
fn convert_grant(grant: &Grant) -> Option<AccessGrant> {
    let grantee = grant.grantee()?;

    let grantee_type = match grantee.r#type() {
        S3Type::Group => GranteeType::Group,
        S3Type::CanonicalUser => GranteeType::CanonicalUser,
        _ => GranteeType::Other,
    };

    let grantee_id = grantee
        .uri()
        .or_else(|| grantee.id())
        .or_else(|| grantee.email_address())
        .unwrap_or_default()
        .to_string();

    let permission = match grant.permission() {
        Some(S3Permission::Read) => Permission::Read,
        Some(S3Permission::Write) => Permission::Write,
        Some(S3Permission::FullControl) => Permission::FullControl,
        _ => Permission::Other,
    };

    Some(AccessGrant {
        grantee_type,
        grantee_id,
        permission,
    })
}

#[async_trait]
impl ObjectStore for AwsObjectStore {
    async fn bucket_grants(&self, bucket: &str) -> Result<Vec<AccessGrant>, ScanError> {
        let output = self
            .client
            .get_bucket_acl()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| ScanError::AclFetch(e.to_string()))?;

        Ok(output.grants().iter().filter_map(convert_grant).collect())
    }

    async fn object_grants(&self, bucket: &str, key: &str) -> Result<Vec<AccessGrant>, ScanError> {
        let output = self
            .client
            .get_object_acl()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| ScanError::AclFetch(e.to_string()))?;

        Ok(output.grants().iter().filter_map(convert_grant).collect())
    }

    async fn list_page(
        &self,
        bucket: &str,
        continuation_token: Option<String>,
        max_keys: Option<i32>,
    ) -> Result<ObjectPage, ScanError> {
        let output = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .set_continuation_token(continuation_token)
            .set_max_keys(max_keys)
            .send()
            .await
            .map_err(|e| ScanError::Pagination(e.to_string()))?;

        let keys = output
            .contents()
            .iter()
            .filter_map(|object| object.key().map(str::to_string))
            .collect();

        let continuation_token = if output.is_truncated().unwrap_or(false) {
            output.next_continuation_token().map(str::to_string)
        } else {
            None
        };

        Ok(ObjectPage {
            keys,
            continuation_token,
        })
    }

    async fn put_test_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
    ) -> Result<(), ScanError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| ScanError::Probe(e.to_string()))?;
        Ok(())
    }

    async fn widen_bucket_acl(&self, bucket: &str, group_uri: &str) -> Result<(), ScanError> {
        self.client
            .put_bucket_acl()
            .bucket(bucket)
            .grant_read(format!("uri={}", group_uri))
            .send()
            .await
            .map_err(|e| ScanError::Probe(e.to_string()))?;
        Ok(())
    }

    async fn publicize_object_acl(&self, bucket: &str, key: &str) -> Result<(), ScanError> {
        self.client
            .put_object_acl()
            .bucket(bucket)
            .key(key)
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .await
            .map_err(|e| ScanError::Probe(e.to_string()))?;
        Ok(())
    }
}
