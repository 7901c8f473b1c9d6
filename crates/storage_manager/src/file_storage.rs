//! File-backed store: one JSON object mapping keys to string values

use crate::error::Result;
use crate::store::KeyValueStore;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

type Entries = BTreeMap<String, String>;

pub struct FileKeyValueStore {
    path: PathBuf,
    // Serialises read-modify-write cycles on the backing file.
    write_lock: Mutex<()>,
}

impl FileKeyValueStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Entries> {
        if !self.path.exists() {
            return Ok(Entries::new());
        }

        let contents = fs::read_to_string(&self.path).await?;
        if contents.trim().is_empty() {
            return Ok(Entries::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    async fn persist(&self, entries: &Entries) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let contents = serde_json::to_string_pretty(entries)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, contents).await?;
        fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.load().await?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load().await?;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries).await?;
        tracing::debug!(key, path = %self.path.display(), "stored value");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load().await?;
        if entries.remove(key).is_some() {
            self.persist(&entries).await?;
            tracing::debug!(key, path = %self.path.display(), "removed value");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_file_store_set_and_get() {
        let dir = tempdir().unwrap();
        let store = FileKeyValueStore::new(dir.path().join("storage.json"));

        store.set("access_token", "token-1").await.unwrap();
        store.set("user_role", "admin").await.unwrap();

        assert_eq!(
            store.get("access_token").await.unwrap().as_deref(),
            Some("token-1")
        );
        assert_eq!(store.get("user_role").await.unwrap().as_deref(), Some("admin"));
        assert_eq!(store.get("user_sub").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        {
            let store = FileKeyValueStore::new(&path);
            store.set("Username", "sam").await.unwrap();
        }

        let reopened = FileKeyValueStore::new(&path);
        assert_eq!(reopened.get("Username").await.unwrap().as_deref(), Some("sam"));
    }

    #[tokio::test]
    async fn test_file_store_remove_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = FileKeyValueStore::new(dir.path().join("storage.json"));

        store.remove("access_token").await.unwrap();
        store.set("access_token", "t").await.unwrap();
        store.remove("access_token").await.unwrap();
        store.remove("access_token").await.unwrap();

        assert_eq!(store.get("access_token").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_rejects_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = FileKeyValueStore::new(&path);
        assert!(store.get("access_token").await.is_err());
    }
}
