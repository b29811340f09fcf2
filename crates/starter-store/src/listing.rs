//! Presigned listing of the files published for a configuration version.

use std::time::Duration;

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{ObjectInfo, ObjectStore, StoreError};

/// Default lifetime of a presigned download URL.
pub const DEFAULT_URL_EXPIRY: Duration = Duration::from_secs(60);

/// One downloadable configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(flatten)]
    pub object: ObjectInfo,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationListing {
    pub version: String,
    pub resources: Vec<Resource>,
}

/// List every non-empty object under `configurations/{version}/` with a presigned URL.
///
/// Zero-byte objects are skipped (folder placeholders in S3).
pub async fn list_configurations<S: ObjectStore + ?Sized>(
    store: &S,
    version: &str,
    expires_in: Duration,
) -> Result<ConfigurationListing, StoreError> {
    let prefix = format!("configurations/{version}/");
    let objects = store.list_objects(&prefix).await?;

    let resources = try_join_all(objects.into_iter().filter(|o| o.size > 0).map(|object| async move {
        let url = store.presigned_url(&object.key, expires_in).await?;
        Ok::<_, StoreError>(Resource { object, url })
    }))
    .await?;

    info!(version, count = resources.len(), "listed configuration resources");
    Ok(ConfigurationListing {
        version: version.to_string(),
        resources,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LocalStore;
    use tempfile::TempDir;

    #[tokio::test]
    async fn skips_empty_objects_and_attaches_urls() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::open(tmp.path()).unwrap();
        store
            .put_object("configurations/1.0.0/EmployeeProbability.csv", "名稱\n")
            .await
            .unwrap();
        store
            .put_object("configurations/1.0.0/placeholder", "")
            .await
            .unwrap();
        store
            .put_object("configurations/1.0.1/Other.csv", "x")
            .await
            .unwrap();

        let listing = list_configurations(&store, "1.0.0", DEFAULT_URL_EXPIRY)
            .await
            .unwrap();
        assert_eq!(listing.version, "1.0.0");
        assert_eq!(listing.resources.len(), 1);
        let resource = &listing.resources[0];
        assert_eq!(
            resource.object.key,
            "configurations/1.0.0/EmployeeProbability.csv"
        );
        assert!(resource.url.contains("EmployeeProbability.csv?expires="));
    }

    #[tokio::test]
    async fn unknown_version_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::open(tmp.path()).unwrap();
        let listing = list_configurations(&store, "0.0.0", DEFAULT_URL_EXPIRY)
            .await
            .unwrap();
        assert!(listing.resources.is_empty());
    }

    #[test]
    fn resource_flattens_object_fields() {
        let resource = Resource {
            object: ObjectInfo {
                key: "configurations/1.0.0/a.csv".into(),
                size: 3,
                last_modified: None,
            },
            url: "https://example.com/a.csv".into(),
        };
        let json = serde_json::to_value(&resource).unwrap();
        assert_eq!(json["key"], "configurations/1.0.0/a.csv");
        assert_eq!(json["size"], 3);
        assert_eq!(json["url"], "https://example.com/a.csv");
    }
}
