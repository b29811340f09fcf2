use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::StoreError;

/// Listing entry for one stored object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectInfo {
    pub key: String,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

/// Minimal bucket interface used by the catalog loader and configuration listing.
///
/// Keys are `/`-separated and relative to the bucket root.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// All objects whose key starts with `prefix`, ordered by key.
    async fn list_objects(&self, prefix: &str) -> Result<Vec<ObjectInfo>, StoreError>;

    /// Fetch an object as UTF-8 text.
    async fn get_object(&self, key: &str) -> Result<String, StoreError>;

    async fn put_object(&self, key: &str, body: &str) -> Result<(), StoreError>;

    /// A time-limited download URL for `key`.
    async fn presigned_url(&self, key: &str, expires_in: Duration) -> Result<String, StoreError>;
}
