//! Directory-backed object store for local runs and tests.

use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::{ObjectInfo, ObjectStore, StoreError};

/// Object store rooted at a local directory.
///
/// Object keys map to paths below the root, so `configurations/1.0.0/a.csv`
/// lives at `<root>/configurations/1.0.0/a.csv`. Presigned URLs are `file://`
/// URLs tagged with an `expires` unix timestamp; nothing enforces the expiry.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Open a store over an existing directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(StoreError::Config(format!(
                "store root {} is not a directory",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let relative = Path::new(key);
        let clean = !key.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !clean {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ObjectStore for LocalStore {
    async fn list_objects(&self, prefix: &str) -> Result<Vec<ObjectInfo>, StoreError> {
        let root = self.root.clone();
        let prefix = prefix.to_string();
        let mut objects = tokio::task::spawn_blocking(move || {
            let mut found = Vec::new();
            walk(&root, &root, &mut found)?;
            found.retain(|o: &ObjectInfo| o.key.starts_with(&prefix));
            Ok::<_, StoreError>(found)
        })
        .await
        .map_err(|e| StoreError::Other(format!("listing task failed: {e}")))??;

        objects.sort_by(|a, b| a.key.cmp(&b.key));
        info!(count = objects.len(), "listed local objects");
        Ok(objects)
    }

    async fn get_object(&self, key: &str) -> Result<String, StoreError> {
        let path = self.path_for(key)?;
        debug!(path = %path.display(), "reading local object");
        match tokio::fs::read_to_string(&path).await {
            Ok(body) => Ok(body),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(key.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                Err(StoreError::NotUtf8(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn put_object(&self, key: &str, body: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, body).await?;
        debug!(key, bytes = body.len(), "wrote local object");
        Ok(())
    }

    async fn presigned_url(&self, key: &str, expires_in: Duration) -> Result<String, StoreError> {
        let path = self.path_for(key)?;
        if !tokio::fs::try_exists(&path).await? {
            return Err(StoreError::NotFound(key.to_string()));
        }
        let path = tokio::fs::canonicalize(&path).await?;
        let expires = Utc::now().timestamp() + expires_in.as_secs() as i64;
        Ok(format!("file://{}?expires={expires}", path.display()))
    }
}

fn walk(root: &Path, dir: &Path, found: &mut Vec<ObjectInfo>) -> Result<(), StoreError> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let metadata = entry.metadata()?;
        if metadata.is_dir() {
            walk(root, &path, found)?;
            continue;
        }
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        let key = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        found.push(ObjectInfo {
            key,
            size: metadata.len(),
            last_modified: metadata.modified().ok().map(DateTime::<Utc>::from),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, LocalStore) {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::open(tmp.path()).unwrap();
        (tmp, store)
    }

    #[test]
    fn open_missing_dir_errors() {
        let result = LocalStore::open("/nonexistent/store/root");
        assert!(matches!(result, Err(StoreError::Config(_))));
    }

    #[tokio::test]
    async fn put_then_get() {
        let (_tmp, store) = store();
        store
            .put_object("configurations/1.0.0/a.txt", "hello")
            .await
            .unwrap();
        let body = store.get_object("configurations/1.0.0/a.txt").await.unwrap();
        assert_eq!(body, "hello");
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let (_tmp, store) = store();
        let result = store.get_object("nope.txt").await;
        assert!(matches!(result, Err(StoreError::NotFound(k)) if k == "nope.txt"));
    }

    #[tokio::test]
    async fn escaping_keys_are_rejected() {
        let (_tmp, store) = store();
        for key in ["../secret", "/etc/passwd", "a/../../b", ""] {
            let result = store.get_object(key).await;
            assert!(
                matches!(result, Err(StoreError::InvalidKey(_))),
                "key {key:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn list_filters_by_prefix_and_sorts() {
        let (_tmp, store) = store();
        store.put_object("configurations/2.0.0/b.csv", "b").await.unwrap();
        store.put_object("configurations/1.0.0/z.csv", "zz").await.unwrap();
        store.put_object("configurations/1.0.0/a.csv", "a").await.unwrap();
        store.put_object("other/x.csv", "x").await.unwrap();

        let objects = store.list_objects("configurations/1.0.0/").await.unwrap();
        let keys: Vec<&str> = objects.iter().map(|o| o.key.as_str()).collect();
        assert_eq!(keys, ["configurations/1.0.0/a.csv", "configurations/1.0.0/z.csv"]);
        assert_eq!(objects[1].size, 2);
        assert!(objects[0].last_modified.is_some());
    }

    #[tokio::test]
    async fn presigned_url_points_at_file() {
        let (_tmp, store) = store();
        store.put_object("a/b.txt", "x").await.unwrap();
        let url = store
            .presigned_url("a/b.txt", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(url.starts_with("file://"));
        assert!(url.contains("a/b.txt?expires="));

        let missing = store.presigned_url("a/c.txt", Duration::from_secs(60)).await;
        assert!(matches!(missing, Err(StoreError::NotFound(_))));
    }
}
