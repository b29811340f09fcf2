//! S3-backed object store.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use chrono::DateTime;
use tracing::info;

use crate::{ObjectInfo, ObjectStore, StoreError};

/// Object store over a single S3 bucket.
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    /// Build a client for `bucket` in `region` using the default credential chain.
    pub async fn connect(region: &str, bucket: &str) -> Result<Self, StoreError> {
        if region.trim().is_empty() || bucket.trim().is_empty() {
            return Err(StoreError::Config(format!(
                "S3 store needs a region and a bucket (region={region:?}, bucket={bucket:?})"
            )));
        }
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        Ok(Self::from_client(Client::new(&config), bucket))
    }

    pub fn from_client(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

fn s3_error<E: std::error::Error>(err: E) -> StoreError {
    StoreError::S3(DisplayErrorContext(err).to_string())
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn list_objects(&self, prefix: &str) -> Result<Vec<ObjectInfo>, StoreError> {
        let mut objects = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let output = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(prefix)
                .set_continuation_token(continuation.take())
                .send()
                .await
                .map_err(s3_error)?;

            for object in output.contents() {
                let Some(key) = object.key() else { continue };
                objects.push(ObjectInfo {
                    key: key.to_string(),
                    size: object.size().unwrap_or(0).max(0) as u64,
                    last_modified: object
                        .last_modified()
                        .and_then(|t| DateTime::from_timestamp(t.secs(), t.subsec_nanos())),
                });
            }

            continuation = output.next_continuation_token().map(str::to_string);
            if output.is_truncated() != Some(true) || continuation.is_none() {
                break;
            }
        }

        objects.sort_by(|a, b| a.key.cmp(&b.key));
        info!(bucket = %self.bucket, prefix, count = objects.len(), "listed s3 objects");
        Ok(objects)
    }

    async fn get_object(&self, key: &str) -> Result<String, StoreError> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error().is_some_and(|se| se.is_no_such_key()) {
                    StoreError::NotFound(key.to_string())
                } else {
                    s3_error(e)
                }
            })?;

        let bytes = output.body.collect().await.map_err(s3_error)?.into_bytes();
        String::from_utf8(bytes.to_vec()).map_err(|_| StoreError::NotUtf8(key.to_string()))
    }

    async fn put_object(&self, key: &str, body: &str) -> Result<(), StoreError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body.as_bytes().to_vec()))
            .send()
            .await
            .map_err(s3_error)?;
        Ok(())
    }

    async fn presigned_url(&self, key: &str, expires_in: Duration) -> Result<String, StoreError> {
        let config = PresigningConfig::expires_in(expires_in).map_err(s3_error)?;
        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(config)
            .await
            .map_err(s3_error)?;
        Ok(request.uri().to_string())
    }
}
